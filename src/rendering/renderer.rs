use tiny_skia::*;

use crate::rendering::types::RenderConfig;
use crate::simulation::{RewardPoint, SimState};
use crate::utils::{errors::SimError, rad_to_deg, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::vehicles::VehicleState;

/// Rasterises a simulation state as a top-down scene.
///
/// Scene coordinates map one-to-one onto pixels with the origin in the top
/// left corner, so anything outside `IMAGE_WIDTH x IMAGE_HEIGHT` is clipped.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    config: RenderConfig,
}

impl SceneRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, state: &SimState) -> Result<Pixmap, SimError> {
        let mut canvas = self.create_canvas()?;
        let [r, g, b] = self.config.background_color;
        canvas.fill(Color::from_rgba8(r, g, b, 255));

        self.draw_reward_points(&mut canvas, &state.reward_points)?;
        self.draw_vehicle(&mut canvas, &state.vehicle_state)?;

        Ok(canvas)
    }

    /// Render and encode the scene as PNG.
    pub fn render_png(&self, state: &SimState) -> Result<Vec<u8>, SimError> {
        self.render(state)?
            .encode_png()
            .map_err(|e| SimError::RenderError(format!("Failed to encode frame: {}", e)))
    }

    fn create_canvas(&self) -> Result<Pixmap, SimError> {
        Pixmap::new(IMAGE_WIDTH, IMAGE_HEIGHT)
            .ok_or_else(|| SimError::RenderError("Failed to create canvas".into()))
    }

    fn draw_vehicle(&self, canvas: &mut Pixmap, vehicle: &VehicleState) -> Result<(), SimError> {
        let x = vehicle.position.x as f32;
        let y = vehicle.position.y as f32;
        let width = self.config.vehicle_width;

        let body = Rect::from_xywh(x, y - width / 2.0, vehicle.base_length as f32, width)
            .ok_or_else(|| {
                SimError::RenderError(format!(
                    "Invalid vehicle geometry at ({}, {}) with base length {}",
                    x, y, vehicle.base_length
                ))
            })?;

        // The body extends forward from the rear axle and turns about it.
        let transform = Transform::from_rotate_at(rad_to_deg(vehicle.angle) as f32, x, y);
        canvas.fill_rect(body, &solid_paint(self.config.vehicle_color), transform, None);

        Ok(())
    }

    fn draw_reward_points(
        &self,
        canvas: &mut Pixmap,
        points: &[RewardPoint],
    ) -> Result<(), SimError> {
        let size = self.config.reward_marker_size;
        let paint = solid_paint(self.config.reward_color);

        for point in points {
            let marker = Rect::from_xywh(
                point.position.x as f32 - size / 2.0,
                point.position.y as f32 - size / 2.0,
                size,
                size,
            )
            .ok_or_else(|| {
                SimError::RenderError(format!(
                    "Invalid reward marker at ({}, {})",
                    point.position.x, point.position.y
                ))
            })?;
            canvas.fill_rect(marker, &paint, Transform::identity(), None);
        }

        Ok(())
    }
}

fn solid_paint(color: [u8; 3]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    paint
}
