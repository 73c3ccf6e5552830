use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env::{ActionSpace, Info, Observation, ObservationSpace, StepResult};

/// Commands sent to the server, one JSON document per line.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Build an environment from the registry.
    Initialize {
        /// Registry id; defaults to the random driving environment.
        #[serde(default)]
        env_id: Option<String>,
        /// Partial configuration, missing fields take their defaults.
        #[serde(default)]
        config: Value,
    },
    /// Start a new episode with an optional random seed.
    Reset {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Perform a simulation step with `[acceleration, steering_angle]`.
    Step { action: Vec<f64> },
    /// Close the connection.
    Close,
}

/// A frame as row-major RGB8 bytes, base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramePayload {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub data: String,
}

impl FramePayload {
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64_STANDARD.decode(&self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationPayload {
    pub speed: [f64; 1],
    pub image: FramePayload,
}

impl From<&Observation> for ObservationPayload {
    fn from(obs: &Observation) -> Self {
        let [width, height, channels] = obs.image.shape();
        Self {
            speed: obs.speed,
            image: FramePayload {
                width: width as u32,
                height: height as u32,
                channels: channels as u32,
                data: BASE64_STANDARD.encode(obs.image.as_raw()),
            },
        }
    }
}

/// Server replies, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ready {
        env_id: String,
        action_space: ActionSpace,
        observation_space: ObservationSpace,
    },
    Reset {
        obs: ObservationPayload,
        info: Info,
    },
    Step {
        obs: ObservationPayload,
        reward: f64,
        terminated: bool,
        truncated: bool,
        info: Info,
    },
    Closed,
    Error {
        message: String,
    },
}

impl Response {
    pub fn from_step(step: &StepResult<Observation>) -> Self {
        Response::Step {
            obs: ObservationPayload::from(&step.observation),
            reward: step.reward,
            terminated: step.terminated,
            truncated: step.truncated,
            info: step.info.clone(),
        }
    }
}
