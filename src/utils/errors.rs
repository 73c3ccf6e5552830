use thiserror::Error;

/// Failures raised by a simulation engine or its renderer.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Physics error: {0}")]
    PhysicsError(String),

    #[error("Invalid control input: {0}")]
    InvalidControl(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}
