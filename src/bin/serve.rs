use std::{
    env,
    io::{self, BufReader, Write},
    net::TcpListener,
};
use tracing::{error, info};

use drivingsim::{
    server::{serve, ServerSession},
    EnvRegistry,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:0".to_string());
    let listener = TcpListener::bind(&addr)?;

    // Clients read the port from stdout.
    println!("PORT={}", listener.local_addr()?.port());
    io::stdout().flush()?;

    for stream in listener.incoming() {
        let stream = stream?;
        info!("Accepted connection from {:?}", stream.peer_addr());
        stream.set_nodelay(true)?;

        let reader = BufReader::new(stream.try_clone()?);
        let mut session = ServerSession::new(EnvRegistry::default());
        match serve(&mut session, reader, &stream) {
            Ok(()) => info!("Connection closed"),
            Err(e) => error!("Connection ended with error: {}", e),
        }
    }

    Ok(())
}
