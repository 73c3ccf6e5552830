use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::rendering::RenderConfig;
use crate::simulation::{EngineFactory, RewardPoint, SimSnapshot, SimState, SimulationEngine};
use crate::utils::{
    clamp_symmetric, errors::SimError, MAX_ACCELERATION, MAX_WHEEL_STEER_ANGLE,
    REWARD_COLLECTION_RADIUS,
};
use crate::vehicles::{Action, VehicleState};

/// Limits of the reference bicycle-model simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorConfig {
    /// Acceleration commands are clamped to `±max_acceleration` (px/s²).
    pub max_acceleration: f64,
    /// Steering commands are clamped to `±max_steer_angle` (radians).
    pub max_steer_angle: f64,
    /// A reward point is collected when the vehicle is closer than this (px).
    pub collection_radius: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_acceleration: MAX_ACCELERATION,
            max_steer_angle: MAX_WHEEL_STEER_ANGLE,
            collection_radius: REWARD_COLLECTION_RADIUS,
        }
    }
}

/// Kinematic bicycle-model driving simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    state: SimState,
    config: SimulatorConfig,
    render_config: RenderConfig,
}

impl Simulator {
    pub fn new(
        initial_vehicle_state: VehicleState,
        reward_points: Vec<RewardPoint>,
        config: SimulatorConfig,
        render_config: RenderConfig,
    ) -> Self {
        Self {
            state: SimState {
                vehicle_state: initial_vehicle_state,
                reward_points,
            },
            config,
            render_config,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Remove every reward point within the collection radius and return their total.
    fn collect_rewards(&mut self) -> f64 {
        let position = self.state.vehicle_state.position;
        let radius = self.config.collection_radius;

        let mut reward = 0.0;
        self.state.reward_points.retain(|point| {
            if (position - point.position).norm() < radius {
                reward += point.reward;
                false
            } else {
                true
            }
        });
        reward
    }
}

impl SimulationEngine for Simulator {
    type Snapshot = SimSnapshot;

    fn advance(&mut self, action: &Action, delta_t: Duration) -> Result<f64, SimError> {
        let acceleration = clamp_symmetric(action.acceleration, self.config.max_acceleration);
        let wheel_steer_angle = clamp_symmetric(action.steering_angle, self.config.max_steer_angle);

        self.state
            .vehicle_state
            .step(acceleration, wheel_steer_angle, delta_t);

        let vehicle = &self.state.vehicle_state;
        if !(vehicle.position.iter().all(|v| v.is_finite()) && vehicle.speed.is_finite()) {
            return Err(SimError::PhysicsError(format!(
                "vehicle state diverged: position=({}, {}), speed={}",
                vehicle.position.x, vehicle.position.y, vehicle.speed
            )));
        }

        let reward = self.collect_rewards();
        if reward != 0.0 {
            debug!(
                "Collected reward {} ({} points remaining)",
                reward,
                self.state.reward_points.len()
            );
        }
        Ok(reward)
    }

    fn snapshot(&self) -> Result<SimSnapshot, SimError> {
        Ok(SimSnapshot::new(
            self.state.clone(),
            self.render_config.clone(),
        ))
    }
}

/// Builds [`Simulator`]s sharing one configuration.
#[derive(Debug, Clone, Default)]
pub struct BicycleEngineFactory {
    pub simulator: SimulatorConfig,
    pub render: RenderConfig,
}

impl BicycleEngineFactory {
    pub fn new(simulator: SimulatorConfig, render: RenderConfig) -> Self {
        Self { simulator, render }
    }
}

impl EngineFactory for BicycleEngineFactory {
    type Engine = Simulator;

    fn construct(
        &self,
        initial_vehicle_state: VehicleState,
        reward_points: Vec<RewardPoint>,
    ) -> Result<Simulator, SimError> {
        Ok(Simulator::new(
            initial_vehicle_state,
            reward_points,
            self.simulator.clone(),
            self.render.clone(),
        ))
    }
}
