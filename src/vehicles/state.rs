use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{DEFAULT_BASE_LENGTH, DEFAULT_MAX_SPEED};

/// Kinematic state of the simulated car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// Position of the rear axle in scene coordinates (px).
    pub position: Vector2<f64>,
    /// Signed longitudinal speed (px/s).
    pub speed: f64,
    /// Heading (radians), measured from the +x axis.
    pub angle: f64,
    /// Distance between the axles (px).
    pub base_length: f64,
    /// Speed limit applied in both directions (px/s).
    pub max_speed: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            position: Vector2::zeros(),
            speed: 0.0,
            angle: 0.0,
            base_length: DEFAULT_BASE_LENGTH,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl VehicleState {
    pub fn at_position(x: f64, y: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            ..Default::default()
        }
    }

    /// Integrate one tick of the kinematic bicycle model:
    ///
    /// ```text
    /// dx/dt     = v cos(theta)
    /// dy/dt     = v sin(theta)
    /// dtheta/dt = v tan(delta) / L
    /// dv/dt     = a
    /// ```
    ///
    /// Position and heading use the speed from the start of the tick.
    pub fn step(&mut self, acceleration: f64, wheel_steer_angle: f64, delta_t: Duration) {
        let dt = delta_t.as_secs_f64();

        let heading = Vector2::new(self.angle.cos(), self.angle.sin());
        self.position += heading * self.speed * dt;
        self.angle += self.speed * wheel_steer_angle.tan() / self.base_length * dt;
        self.speed = (self.speed + acceleration * dt).clamp(-self.max_speed, self.max_speed);
    }
}
