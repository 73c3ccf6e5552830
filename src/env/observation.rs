use image::{ColorType, ImageFormat, RgbImage};
use std::fmt;

use crate::env::EnvError;
use crate::simulation::EngineSnapshot;
use crate::utils::{IMAGE_CHANNELS, IMAGE_HEIGHT, IMAGE_WIDTH};

/// A decoded RGB8 frame of the scene, owned by the caller.
#[derive(Clone, PartialEq)]
pub struct ImageObservation {
    pixels: RgbImage,
}

impl ImageObservation {
    /// Decode a PNG frame, requiring 8-bit RGB(A) at the observation resolution.
    pub fn from_png(bytes: &[u8]) -> Result<Self, EnvError> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| EnvError::RenderDecode(format!("Failed to decode frame: {}", e)))?;

        match decoded.color() {
            ColorType::Rgb8 | ColorType::Rgba8 => {}
            other => {
                return Err(EnvError::RenderDecode(format!(
                    "Unsupported pixel format {:?}, expected 8-bit RGB",
                    other
                )))
            }
        }

        if (decoded.width(), decoded.height()) != (IMAGE_WIDTH, IMAGE_HEIGHT) {
            return Err(EnvError::RenderDecode(format!(
                "Frame is {}x{}, expected {}x{}",
                decoded.width(),
                decoded.height(),
                IMAGE_WIDTH,
                IMAGE_HEIGHT
            )));
        }

        Ok(Self {
            pixels: decoded.into_rgb8(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height, channels)`.
    pub fn shape(&self) -> [usize; 3] {
        [
            self.pixels.width() as usize,
            self.pixels.height() as usize,
            IMAGE_CHANNELS as usize,
        ]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x < self.pixels.width() && y < self.pixels.height() {
            Some(self.pixels.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Row-major RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.pixels
    }
}

impl fmt::Debug for ImageObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageObservation")
            .field("shape", &self.shape())
            .finish()
    }
}

/// What the agent sees after every reset and step.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub speed: [f64; 1],
    pub image: ImageObservation,
}

/// Build an observation from a snapshot. Nothing in the result borrows from the engine.
pub fn assemble_observation<S: EngineSnapshot>(snapshot: &S) -> Result<Observation, EnvError> {
    let speed = snapshot.vehicle_state().speed;
    let encoded = snapshot.render().map_err(EnvError::SimulatorFault)?;
    let image = ImageObservation::from_png(&encoded)?;

    Ok(Observation {
        speed: [speed],
        image,
    })
}
