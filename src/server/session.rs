use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EnvConfig};
use crate::env::{BoxedEnv, EnvError, EnvRegistry, DRIVING_SIM_ENV_ID};
use crate::server::{Command, ObservationPayload, Response};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Environment not initialized; send Initialize first")]
    NotInitialized,

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Per-connection server state: the registry and the environment it built.
pub struct ServerSession {
    registry: EnvRegistry,
    env_id: Option<String>,
    env: Option<BoxedEnv>,
}

impl ServerSession {
    pub fn new(registry: EnvRegistry) -> Self {
        Self {
            registry,
            env_id: None,
            env: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.is_some()
    }

    pub fn env_id(&self) -> Option<&str> {
        self.env_id.as_deref()
    }

    pub fn handle(&mut self, command: Command) -> Result<Response, ServerError> {
        match command {
            Command::Initialize { env_id, config } => {
                let env_id = env_id.unwrap_or_else(|| DRIVING_SIM_ENV_ID.to_string());
                let config = EnvConfig::from_json(&config)?;
                let env = self.registry.make(&env_id, &config)?;
                info!("Initialized environment {}", env_id);

                let response = Response::Ready {
                    env_id: env_id.clone(),
                    action_space: *env.action_space(),
                    observation_space: *env.observation_space(),
                };
                self.env = Some(env);
                self.env_id = Some(env_id);
                Ok(response)
            }
            Command::Reset { seed } => {
                let env = self.env.as_mut().ok_or(ServerError::NotInitialized)?;
                let (obs, info) = env.reset(seed, None)?;
                Ok(Response::Reset {
                    obs: ObservationPayload::from(&obs),
                    info,
                })
            }
            Command::Step { action } => {
                let env = self.env.as_mut().ok_or(ServerError::NotInitialized)?;
                let step = env.step(&action)?;
                Ok(Response::from_step(&step))
            }
            Command::Close => {
                info!("Closing session");
                self.env = None;
                Ok(Response::Closed)
            }
        }
    }
}

/// Answer line-delimited JSON commands from `reader` until `Close` or end of input.
///
/// Malformed commands and failed operations are answered with an error
/// response and the loop carries on.
pub fn serve<R: BufRead, W: Write>(
    session: &mut ServerSession,
    reader: R,
    mut writer: W,
) -> Result<(), ServerError> {
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Command>(&line) {
            Ok(command) => {
                debug!("Received command: {:?}", command);
                session.handle(command).unwrap_or_else(|err| {
                    warn!("Command failed: {}", err);
                    Response::Error {
                        message: err.to_string(),
                    }
                })
            }
            Err(err) => Response::Error {
                message: format!("Invalid command: {}", err),
            },
        };

        let closing = matches!(response, Response::Closed);
        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        writer.write_all(payload.as_bytes())?;
        writer.flush()?;

        if closing {
            break;
        }
    }
    Ok(())
}
