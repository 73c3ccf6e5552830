use std::f64::consts::PI;

// Episode timing
pub const DEFAULT_FPS: f64 = 25.0; // ticks per second
pub const DEFAULT_EPISODE_DURATION_S: f64 = 30.0; // s

// Reward points
pub const DEFAULT_REWARD_POINT_COUNT: usize = 5;
pub const DEFAULT_REWARD_POINT_VALUE: f64 = 10.0;
pub const MAX_REWARD_POINT_COUNT: usize = 10_000;
pub const REWARD_AREA_X_MIN: f64 = 50.0;
pub const REWARD_AREA_X_MAX: f64 = 1230.0;
pub const REWARD_AREA_Y_MIN: f64 = 50.0;
pub const REWARD_AREA_Y_MAX: f64 = 750.0;

// Rendered observation
pub const IMAGE_WIDTH: u32 = 1280; // px
pub const IMAGE_HEIGHT: u32 = 800; // px
pub const IMAGE_CHANNELS: u32 = 3; // RGB

// Action space
pub const STEERING_ANGLE_LIMIT: f64 = PI; // rad

// Reference simulator limits
pub const MAX_ACCELERATION: f64 = 100.0; // px/s^2
pub const MAX_WHEEL_STEER_ANGLE: f64 = PI / 4.0; // rad
pub const REWARD_COLLECTION_RADIUS: f64 = 50.0; // px
pub const DEFAULT_BASE_LENGTH: f64 = 100.0; // px
pub const DEFAULT_MAX_SPEED: f64 = 1000.0; // px/s
