use crate::geometry::FloatType;
use crate::util::Rgb;

/// Phong material. Components are linear and conceptually in [0, 1], but
/// nothing clamps them before output quantization.
#[derive(Copy, Clone, Debug, Default)]
pub struct Material {
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
    /// Specular exponent; also scales the mirror reflection weight
    /// (see `shader::TraceSettings::reflectivity_scale`).
    pub shininess: FloatType,
}
