use serde::{Deserialize, Serialize};

/// Styling of the top-down scene. The raster size is fixed by the observation contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub background_color: [u8; 3],
    pub vehicle_color: [u8; 3],
    pub reward_color: [u8; 3],
    /// Width of the vehicle body across its heading (px).
    pub vehicle_width: f32,
    /// Edge length of the square reward markers (px).
    pub reward_marker_size: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background_color: [100, 149, 237],
            vehicle_color: [255, 0, 0],
            reward_color: [0, 255, 0],
            vehicle_width: 50.0,
            reward_marker_size: 20.0,
        }
    }
}
