use thiserror::Error;

use crate::config::ConfigError;
use crate::env::EpisodePhase;
use crate::utils::errors::SimError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Episode is {0}; call reset before step")]
    UninitializedEpisode(EpisodePhase),

    #[error("Render decode error: {0}")]
    RenderDecode(String),

    #[error("Simulator fault: {0}")]
    SimulatorFault(#[source] SimError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Unknown environment id: {0}")]
    UnknownEnvironment(String),

    #[error("Environment id already registered: {0}")]
    DuplicateRegistration(String),
}

impl From<SimError> for EnvError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::InvalidControl(msg) => EnvError::InvalidAction(msg),
            other => EnvError::SimulatorFault(other),
        }
    }
}
