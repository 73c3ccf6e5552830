use std::time::Duration;

use crate::simulation::RewardPoint;
use crate::utils::errors::SimError;
use crate::vehicles::{Action, VehicleState};

/// An immutable copy of the simulation taken at one tick.
pub trait EngineSnapshot {
    fn vehicle_state(&self) -> &VehicleState;

    /// Encode the scene as a PNG raster.
    fn render(&self) -> Result<Vec<u8>, SimError>;
}

/// A live simulation owning the vehicle and reward points of one episode.
pub trait SimulationEngine {
    type Snapshot: EngineSnapshot;

    /// Advance the world by `delta_t` under `action` and return the reward earned.
    fn advance(&mut self, action: &Action, delta_t: Duration) -> Result<f64, SimError>;

    /// Copy the current state out of the engine. Later calls to `advance`
    /// must not be visible through the returned snapshot.
    fn snapshot(&self) -> Result<Self::Snapshot, SimError>;
}

/// Builds a fresh engine for every episode.
pub trait EngineFactory {
    type Engine: SimulationEngine;

    fn construct(
        &self,
        initial_vehicle_state: VehicleState,
        reward_points: Vec<RewardPoint>,
    ) -> Result<Self::Engine, SimError>;
}

impl<F, E> EngineFactory for F
where
    F: Fn(VehicleState, Vec<RewardPoint>) -> Result<E, SimError>,
    E: SimulationEngine,
{
    type Engine = E;

    fn construct(
        &self,
        initial_vehicle_state: VehicleState,
        reward_points: Vec<RewardPoint>,
    ) -> Result<E, SimError> {
        self(initial_vehicle_state, reward_points)
    }
}
