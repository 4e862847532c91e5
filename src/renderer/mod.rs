mod machinery;
mod worker;

pub use machinery::{Progress, RenderProgress, render};

use crate::shader::TraceSettings;

/// Settings of a single render run.
#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    pub tile_size: std::num::NonZeroU32,
    /// Samples per pixel; 1 disables anti-aliasing and samples pixel
    /// centers.
    pub sample_count: std::num::NonZeroU32,
    /// Maximum ray tree depth; 1 disables reflections.
    pub max_depth: std::num::NonZeroU32,
    pub trace: TraceSettings,
}
