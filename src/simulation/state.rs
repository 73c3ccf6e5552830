use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::rendering::{RenderConfig, SceneRenderer};
use crate::simulation::EngineSnapshot;
use crate::utils::errors::SimError;
use crate::vehicles::VehicleState;

/// A target location worth a fixed reward once the vehicle reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardPoint {
    pub position: Vector2<f64>,
    pub reward: f64,
}

impl RewardPoint {
    pub fn new(x: f64, y: f64, reward: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            reward,
        }
    }
}

/// Everything the reference simulator mutates during an episode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub vehicle_state: VehicleState,
    /// Reward points not yet collected.
    pub reward_points: Vec<RewardPoint>,
}

/// Owned copy of a [`SimState`] that can render itself.
#[derive(Debug, Clone)]
pub struct SimSnapshot {
    state: SimState,
    render_config: RenderConfig,
}

impl SimSnapshot {
    pub fn new(state: SimState, render_config: RenderConfig) -> Self {
        Self {
            state,
            render_config,
        }
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }
}

impl EngineSnapshot for SimSnapshot {
    fn vehicle_state(&self) -> &VehicleState {
        &self.state.vehicle_state
    }

    fn render(&self) -> Result<Vec<u8>, SimError> {
        SceneRenderer::new(self.render_config.clone()).render_png(&self.state)
    }
}
