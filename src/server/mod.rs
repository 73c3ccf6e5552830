mod session;
mod structures;

pub use session::{serve, ServerError, ServerSession};
pub use structures::{Command, FramePayload, ObservationPayload, Response};
