use serde::{Deserialize, Serialize};

use crate::utils::{clamp_symmetric, errors::SimError, STEERING_ANGLE_LIMIT};

/// A single control input: longitudinal acceleration and wheel steering angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Action {
    /// Longitudinal acceleration (px/s²). Unbounded but finite.
    pub acceleration: f64,
    /// Wheel steering angle (radians), intended domain `[-π, π]`.
    pub steering_angle: f64,
}

/// How steering angles outside `[-π, π]` are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringPolicy {
    /// Clamp to the nearest bound.
    #[default]
    Clip,
    /// Refuse the action.
    Reject,
}

impl Action {
    pub fn new(acceleration: f64, steering_angle: f64) -> Self {
        Self {
            acceleration,
            steering_angle,
        }
    }

    /// Build an action from a flat `[acceleration, steering_angle]` slice.
    pub fn from_slice(values: &[f64], policy: SteeringPolicy) -> Result<Self, SimError> {
        let &[acceleration, steering_angle] = values else {
            return Err(SimError::InvalidControl(format!(
                "expected 2 values (acceleration, steering_angle), got {}",
                values.len()
            )));
        };
        Self::new(acceleration, steering_angle).validated(policy)
    }

    /// Check the action against the action space, applying `policy` to the steering angle.
    pub fn validated(self, policy: SteeringPolicy) -> Result<Self, SimError> {
        if !self.acceleration.is_finite() {
            return Err(SimError::InvalidControl(format!(
                "acceleration must be finite, got {}",
                self.acceleration
            )));
        }
        if !self.steering_angle.is_finite() {
            return Err(SimError::InvalidControl(format!(
                "steering angle must be finite, got {}",
                self.steering_angle
            )));
        }

        if self.steering_angle.abs() <= STEERING_ANGLE_LIMIT {
            return Ok(self);
        }
        match policy {
            SteeringPolicy::Clip => Ok(Self {
                steering_angle: clamp_symmetric(self.steering_angle, STEERING_ANGLE_LIMIT),
                ..self
            }),
            SteeringPolicy::Reject => Err(SimError::InvalidControl(format!(
                "steering angle {} outside [-pi, pi]",
                self.steering_angle
            ))),
        }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.acceleration, self.steering_angle]
    }
}
