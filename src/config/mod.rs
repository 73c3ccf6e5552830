use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::rendering::RenderConfig;
use crate::simulation::SimulatorConfig;
use crate::utils::{
    DEFAULT_EPISODE_DURATION_S, DEFAULT_FPS, DEFAULT_REWARD_POINT_COUNT,
    DEFAULT_REWARD_POINT_VALUE, MAX_REWARD_POINT_COUNT, REWARD_AREA_X_MAX, REWARD_AREA_X_MIN, REWARD_AREA_Y_MAX,
    REWARD_AREA_Y_MIN,
};
use crate::vehicles::SteeringPolicy;

mod builder;
mod errors;

pub use builder::EnvConfigBuilder;
pub use errors::ConfigError;

/// How reward points are generated at the start of every episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewardConfig {
    /// Number of points per episode.
    pub count: usize,
    /// Reward granted by each point.
    pub reward: f64,
    /// Inclusive `[min, max]` range of x coordinates (px).
    pub x_range: [f64; 2],
    /// Inclusive `[min, max]` range of y coordinates (px).
    pub y_range: [f64; 2],
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_REWARD_POINT_COUNT,
            reward: DEFAULT_REWARD_POINT_VALUE,
            x_range: [REWARD_AREA_X_MIN, REWARD_AREA_X_MAX],
            y_range: [REWARD_AREA_Y_MIN, REWARD_AREA_Y_MAX],
        }
    }
}

/// Episode parameters and the configuration of the reference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Tick rate; every step advances the simulation by `1 / fps` seconds.
    pub fps: f64,
    /// Episode length in simulated seconds.
    pub duration_s: f64,
    pub steering_policy: SteeringPolicy,
    pub rewards: RewardConfig,
    pub simulator: SimulatorConfig,
    pub render: RenderConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            duration_s: DEFAULT_EPISODE_DURATION_S,
            steering_policy: SteeringPolicy::default(),
            rewards: RewardConfig::default(),
            simulator: SimulatorConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl EnvConfig {
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        EnvConfigBuilder::from_json(value)?.build()
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        EnvConfigBuilder::from_yaml_str(yaml)?.build()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        EnvConfigBuilder::from_yaml_file(path)?.build()
    }

    /// Number of steps until termination.
    pub fn max_episode_steps(&self) -> u64 {
        (self.duration_s * self.fps).ceil() as u64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fps", self.fps)?;
        positive("duration_s", self.duration_s)?;
        // The tick length must be representable as a Duration.
        if Duration::try_from_secs_f64(1.0 / self.fps).is_err() {
            return Err(ConfigError::invalid("fps", self.fps));
        }

        if self.rewards.count > MAX_REWARD_POINT_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "rewards.count {} exceeds the limit of {}",
                self.rewards.count, MAX_REWARD_POINT_COUNT
            )));
        }

        if !self.rewards.reward.is_finite() {
            return Err(ConfigError::invalid("rewards.reward", self.rewards.reward));
        }
        ordered_range("rewards.x_range", self.rewards.x_range)?;
        ordered_range("rewards.y_range", self.rewards.y_range)?;

        non_negative("simulator.max_acceleration", self.simulator.max_acceleration)?;
        non_negative("simulator.max_steer_angle", self.simulator.max_steer_angle)?;
        non_negative("simulator.collection_radius", self.simulator.collection_radius)?;

        positive("render.vehicle_width", self.render.vehicle_width as f64)?;
        positive("render.reward_marker_size", self.render.reward_marker_size as f64)?;

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, value))
    }
}

fn ordered_range(name: &str, [min, max]: [f64; 2]) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(ConfigError::invalid(name, format!("[{}, {}]", min, max)));
    }
    if !(max - min).is_finite() {
        return Err(ConfigError::ValidationError(format!(
            "{} spans [{}, {}], which is too wide to sample",
            name, min, max
        )));
    }
    if min > max {
        return Err(ConfigError::ValidationError(format!(
            "{} has min {} greater than max {}",
            name, min, max
        )));
    }
    Ok(())
}
