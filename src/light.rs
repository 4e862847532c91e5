use crate::geometry::{EPSILON, FloatType, WorldPoint, WorldVector};
use crate::util::Rgb;

/// Distance falloff coefficients of a point light.
#[derive(Copy, Clone, Debug)]
pub struct Attenuation {
    pub constant: FloatType,
    pub linear: FloatType,
    pub quadratic: FloatType,
}

impl Attenuation {
    /// Intensity factor at distance `d`. The denominator is kept away from
    /// zero so a light coincident with the shaded point stays finite.
    pub fn factor(&self, d: FloatType) -> FloatType {
        1.0 / (self.constant + self.linear * d + self.quadratic * d * d).max(EPSILON)
    }
}

impl Default for Attenuation {
    fn default() -> Self {
        Attenuation {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub enum LightKind {
    Point {
        position: WorldPoint,
        attenuation: Attenuation,
    },
    /// Stores the direction the light shines in, from the light towards
    /// the scene. No attenuation.
    Directional { direction: WorldVector },
}

#[derive(Copy, Clone, Debug)]
pub struct Light {
    pub kind: LightKind,
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
}
