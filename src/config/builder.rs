use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::config::{ConfigError, EnvConfig, RewardConfig};
use crate::rendering::RenderConfig;
use crate::simulation::SimulatorConfig;
use crate::vehicles::SteeringPolicy;

/// Partial [`EnvConfig`]; unset fields fall back to the defaults on `build`.
#[derive(Default, Debug, Serialize, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvConfigBuilder {
    pub fps: Option<f64>,
    pub duration_s: Option<f64>,
    pub steering_policy: Option<SteeringPolicy>,
    pub rewards: Option<RewardConfig>,
    pub simulator: Option<SimulatorConfig>,
    pub render: Option<RenderConfig>,
}

impl EnvConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    pub fn duration_s(mut self, duration_s: f64) -> Self {
        self.duration_s = Some(duration_s);
        self
    }

    pub fn steering_policy(mut self, policy: SteeringPolicy) -> Self {
        self.steering_policy = Some(policy);
        self
    }

    pub fn rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = Some(rewards);
        self
    }

    pub fn simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = Some(simulator);
        self
    }

    pub fn render(mut self, render: RenderConfig) -> Self {
        self.render = Some(render);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn build(self) -> Result<EnvConfig, ConfigError> {
        let defaults = EnvConfig::default();
        let config = EnvConfig {
            fps: self.fps.unwrap_or(defaults.fps),
            duration_s: self.duration_s.unwrap_or(defaults.duration_s),
            steering_policy: self.steering_policy.unwrap_or(defaults.steering_policy),
            rewards: self.rewards.unwrap_or(defaults.rewards),
            simulator: self.simulator.unwrap_or(defaults.simulator),
            render: self.render.unwrap_or(defaults.render),
        };
        config.validate()?;
        Ok(config)
    }
}
