use nalgebra::Unit;

use crate::geometry::{FloatType, HitRecord, Ray, WorldPoint};
use crate::material::Material;

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: WorldPoint,
    pub radius: FloatType,
    pub material: Material,
}

impl Sphere {
    /// Nearest positive-distance intersection of `ray` with the sphere.
    /// A non-positive radius never intersects anything.
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = ray.origin - self.center;
        let b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - c;

        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = -b - sqrt_disc;
        let t2 = -b + sqrt_disc;

        // Smaller positive root wins; roots behind the origin don't count.
        let t = if t1 > 0.0 {
            t1
        } else if t2 > 0.0 {
            t2
        } else {
            return None;
        };

        let point = ray.point_at(t);
        Some(HitRecord {
            t,
            point,
            normal: Unit::new_normalize(point - self.center),
        })
    }
}
