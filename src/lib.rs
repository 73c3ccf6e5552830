//! A stochastic driving scenario exposed as an episodic environment.
//!
//! An agent drives a kinematic car around a 1280x800 arena collecting
//! randomly placed reward points. [`DrivingEnv`] owns the episode lifecycle
//! and talks to the simulation through the [`simulation`] traits, so any
//! engine implementing them can stand in for the bundled bicycle model.

pub mod config;
pub mod env;
pub mod rendering;
pub mod server;
pub mod simulation;
pub mod utils;
pub mod vehicles;

pub use config::{ConfigError, EnvConfig, EnvConfigBuilder, RewardConfig};
pub use env::{
    DrivingEnv, EnvError, EnvRegistry, Environment, EpisodePhase, Observation, StepResult,
    DRIVING_SIM_ENV_ID,
};
pub use simulation::{BicycleEngineFactory, RewardPoint, Simulator};
pub use vehicles::{Action, SteeringPolicy, VehicleState};
