pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod scene_file;
pub mod shader;

mod camera;
mod renderer;
mod screen_block;
mod util;

pub use camera::Camera;
pub use renderer::{Progress, RenderProgress, RenderSettings, render};
pub use scene::Scene;
pub use screen_block::ScreenBlock;
pub use shader::TraceSettings;
pub use util::Rgb;
