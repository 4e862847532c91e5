mod sphere;
mod triangle;

pub use sphere::Sphere;
pub use triangle::Triangle;

use nalgebra::{Point2, Point3, Unit, Vector2, Vector3};

pub type FloatType = f32;

/// Tolerance for "effectively zero" geometric quantities (degenerate
/// normals, near-parallel rays, vanishing denominators).
pub const EPSILON: FloatType = 1e-6;

pub type ScreenPoint = Point2<u32>;
pub type ScreenSize = Vector2<u32>;

pub type WorldPoint = Point3<FloatType>;
pub type WorldVector = Vector3<FloatType>;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: WorldVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction * t
    }
}

/// Result of a successful ray/object intersection.
#[derive(Copy, Clone, Debug)]
pub struct HitRecord {
    /// Distance along the ray; strictly positive for any reported hit.
    pub t: FloatType,
    pub point: WorldPoint,
    pub normal: Unit<WorldVector>,
}

/// Mirror reflection of `v` about `normal`.
pub fn reflect(v: &WorldVector, normal: &Unit<WorldVector>) -> WorldVector {
    v - normal.as_ref() * (2.0 * v.dot(normal))
}
