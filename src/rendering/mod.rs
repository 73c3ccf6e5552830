mod renderer;
mod types;

pub use renderer::SceneRenderer;
pub use types::RenderConfig;
