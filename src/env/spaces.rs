use serde::{Deserialize, Serialize};

use crate::env::Observation;
use crate::utils::{IMAGE_CHANNELS, IMAGE_HEIGHT, IMAGE_WIDTH, STEERING_ANGLE_LIMIT};

/// A closed real interval; a missing bound means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Interval {
    pub const UNBOUNDED: Interval = Interval {
        low: None,
        high: None,
    };

    pub fn bounded(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && self.low.map_or(true, |low| value >= low)
            && self.high.map_or(true, |high| value <= high)
    }
}

/// `(acceleration, steering_angle)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub acceleration: Interval,
    pub steering_angle: Interval,
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self {
            acceleration: Interval::UNBOUNDED,
            steering_angle: Interval::bounded(-STEERING_ANGLE_LIMIT, STEERING_ANGLE_LIMIT),
        }
    }
}

impl ActionSpace {
    pub fn shape(&self) -> [usize; 1] {
        [2]
    }

    pub fn contains(&self, action: &[f64]) -> bool {
        match action {
            &[acceleration, steering_angle] => {
                self.acceleration.contains(acceleration)
                    && self.steering_angle.contains(steering_angle)
            }
            _ => false,
        }
    }
}

/// `speed` plus a `(width, height, channels)` uint8 raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub speed: Interval,
    pub image_shape: [usize; 3],
    pub image_low: u8,
    pub image_high: u8,
}

impl Default for ObservationSpace {
    fn default() -> Self {
        Self {
            speed: Interval::UNBOUNDED,
            image_shape: [
                IMAGE_WIDTH as usize,
                IMAGE_HEIGHT as usize,
                IMAGE_CHANNELS as usize,
            ],
            image_low: u8::MIN,
            image_high: u8::MAX,
        }
    }
}

impl ObservationSpace {
    pub fn contains(&self, observation: &Observation) -> bool {
        self.speed.contains(observation.speed[0])
            && observation.image.shape() == self.image_shape
            && self.pixels_within_bounds(observation.image.as_raw())
    }

    fn pixels_within_bounds(&self, raw: &[u8]) -> bool {
        // Every u8 already lies in the full range.
        if (self.image_low, self.image_high) == (u8::MIN, u8::MAX) {
            return true;
        }
        let bounds = self.image_low..=self.image_high;
        raw.iter().all(|v| bounds.contains(v))
    }
}
