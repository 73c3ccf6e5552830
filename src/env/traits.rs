use crate::env::{ActionSpace, EnvError, ObservationSpace};

/// Auxiliary diagnostics returned alongside observations.
pub type Info = serde_json::Map<String, serde_json::Value>;

/// Outcome of a single [`Environment::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<O> {
    pub observation: O,
    pub reward: f64,
    /// The episode reached its natural end.
    pub terminated: bool,
    /// The episode was cut short externally.
    pub truncated: bool,
    pub info: Info,
}

/// Episodic control interface for continuous-action environments.
pub trait Environment {
    type Observation;

    fn action_space(&self) -> &ActionSpace;

    fn observation_space(&self) -> &ObservationSpace;

    /// Start a new episode. Passing a seed makes the episode reproducible.
    fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<&Info>,
    ) -> Result<(Self::Observation, Info), EnvError>;

    /// Apply one action and advance the episode by a single tick.
    fn step(&mut self, action: &[f64]) -> Result<StepResult<Self::Observation>, EnvError>;
}
