/// Linear (unclamped) color used throughout the shading code.
pub type Rgb = rgb::RGB<f32>;

/// Componentwise product of two linear colors.
pub fn modulate(a: Rgb, b: Rgb) -> Rgb {
    Rgb::new(a.r * b.r, a.g * b.g, a.b * b.b)
}
