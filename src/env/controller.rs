use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::EnvConfig;
use crate::env::{
    assemble_observation, sample_reward_points, ActionSpace, EnvError, Environment, EpisodeClock,
    Info, Observation, ObservationSpace, StepResult,
};
use crate::simulation::{BicycleEngineFactory, EngineFactory, RewardPoint, SimulationEngine};
use crate::utils::EpisodeRng;
use crate::vehicles::{Action, VehicleState};

/// Lifecycle of the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodePhase {
    /// No episode has been started yet.
    Uninitialized,
    /// Accepting steps.
    Running,
    /// The episode duration has elapsed.
    Terminated,
    /// A step failed inside the engine or while decoding its frame.
    Faulted,
}

impl fmt::Display for EpisodePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EpisodePhase::Uninitialized => "uninitialized",
            EpisodePhase::Running => "running",
            EpisodePhase::Terminated => "terminated",
            EpisodePhase::Faulted => "faulted",
        };
        f.write_str(name)
    }
}

/// The random driving environment.
///
/// Every episode owns a fresh engine built by `F` from a default vehicle and
/// a newly sampled set of reward points. Steps advance the engine by one
/// tick of `1 / fps` seconds until `duration_s` of simulated time has passed.
pub struct DrivingEnv<F: EngineFactory> {
    config: EnvConfig,
    factory: F,
    clock: EpisodeClock,
    rng: EpisodeRng,
    phase: EpisodePhase,
    engine: Option<F::Engine>,
    reward_points: Vec<RewardPoint>,
    action_space: ActionSpace,
    observation_space: ObservationSpace,
    episode_count: u64,
}

impl DrivingEnv<BicycleEngineFactory> {
    /// Environment backed by the reference bicycle-model simulator.
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        let factory = BicycleEngineFactory::new(config.simulator.clone(), config.render.clone());
        Self::with_factory(config, factory)
    }
}

impl<F: EngineFactory> DrivingEnv<F> {
    pub fn with_factory(config: EnvConfig, factory: F) -> Result<Self, EnvError> {
        config.validate()?;

        Ok(Self {
            clock: EpisodeClock::new(config.fps, config.duration_s),
            config,
            factory,
            rng: EpisodeRng::new(),
            phase: EpisodePhase::Uninitialized,
            engine: None,
            reward_points: Vec::new(),
            action_space: ActionSpace::default(),
            observation_space: ObservationSpace::default(),
            episode_count: 0,
        })
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn clock(&self) -> &EpisodeClock {
        &self.clock
    }

    pub fn frames_taken(&self) -> u64 {
        self.clock.frames_taken()
    }

    pub fn elapsed_s(&self) -> f64 {
        self.clock.elapsed_s()
    }

    /// Reward points sampled for the current episode, as handed to the engine.
    pub fn reward_points(&self) -> &[RewardPoint] {
        &self.reward_points
    }

    pub fn engine(&self) -> Option<&F::Engine> {
        self.engine.as_ref()
    }

    /// Number of successful resets.
    pub fn episode_count(&self) -> u64 {
        self.episode_count
    }

    fn start_episode(&mut self, seed: Option<u64>) -> Result<Observation, EnvError> {
        let rng = self.rng.reseed(seed);
        let reward_points = sample_reward_points(rng, &self.config.rewards);

        let engine = self
            .factory
            .construct(VehicleState::default(), reward_points.clone())
            .map_err(EnvError::SimulatorFault)?;
        let snapshot = engine.snapshot().map_err(EnvError::SimulatorFault)?;
        let observation = assemble_observation(&snapshot)?;

        self.engine = Some(engine);
        self.reward_points = reward_points;
        Ok(observation)
    }
}

fn advance_and_observe<E: SimulationEngine>(
    engine: &mut E,
    action: &Action,
    delta_t: std::time::Duration,
) -> Result<(f64, Observation), EnvError> {
    let reward = engine
        .advance(action, delta_t)
        .map_err(EnvError::SimulatorFault)?;
    let snapshot = engine.snapshot().map_err(EnvError::SimulatorFault)?;
    let observation = assemble_observation(&snapshot)?;
    Ok((reward, observation))
}

impl<F: EngineFactory> Environment for DrivingEnv<F> {
    type Observation = Observation;

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }

    fn reset(
        &mut self,
        seed: Option<u64>,
        _options: Option<&Info>,
    ) -> Result<(Observation, Info), EnvError> {
        // The previous engine is dropped before anything else happens, so a
        // failed reset never leaves the old episode steppable.
        self.engine = None;
        self.reward_points.clear();
        self.phase = EpisodePhase::Uninitialized;
        self.clock.reset();

        let observation = self.start_episode(seed)?;

        self.phase = EpisodePhase::Running;
        self.episode_count += 1;
        info!(
            "Reset episode {} (seed: {:?}, reward points: {})",
            self.episode_count,
            seed,
            self.reward_points.len()
        );

        Ok((observation, Info::new()))
    }

    fn step(&mut self, action: &[f64]) -> Result<StepResult<Observation>, EnvError> {
        if self.phase != EpisodePhase::Running {
            return Err(EnvError::UninitializedEpisode(self.phase));
        }
        let action = Action::from_slice(action, self.config.steering_policy)?;

        let Some(engine) = self.engine.as_mut() else {
            return Err(EnvError::UninitializedEpisode(self.phase));
        };

        let (reward, observation) = match advance_and_observe(engine, &action, self.clock.delta_t()) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("Step {} failed: {}", self.clock.frames_taken() + 1, err);
                self.phase = EpisodePhase::Faulted;
                return Err(err);
            }
        };

        self.clock.tick();
        let terminated = self.clock.is_finished();
        if terminated {
            self.phase = EpisodePhase::Terminated;
            info!(
                "Episode {} terminated after {} frames ({:.2}s)",
                self.episode_count,
                self.clock.frames_taken(),
                self.clock.elapsed_s()
            );
        }
        debug!(
            "Step {}: action={:?} reward={} speed={}",
            self.clock.frames_taken(),
            action,
            reward,
            observation.speed[0]
        );

        Ok(StepResult {
            observation,
            reward,
            terminated,
            truncated: false,
            info: Info::new(),
        })
    }
}
