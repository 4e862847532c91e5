use nalgebra::Unit;

use crate::geometry::{EPSILON, HitRecord, Ray, WorldPoint};
use crate::material::Material;

/// One-sided triangle; only rays arriving against the winding-order normal
/// (`cross(b - a, c - a)`) can hit it.
#[derive(Clone, Debug)]
pub struct Triangle {
    pub a: WorldPoint,
    pub b: WorldPoint,
    pub c: WorldPoint,
    pub material: Material,
}

impl Triangle {
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let n = ab.cross(&ac);

        // Denominator of the plane/edge system. Requiring it to be clearly
        // positive rejects back-facing rays, near-parallel rays and
        // collinear vertices (degenerate `n`) in one test, and keeps the
        // divisions below well defined.
        let f = (-ray.direction).dot(&n);
        if f <= EPSILON {
            return None;
        }

        let ao = ray.origin - self.a;
        let t = ao.dot(&n) / f;
        if t <= 0.0 {
            return None;
        }

        let e = (-ray.direction).cross(&ao);
        let u = ac.dot(&e) / f;
        let v = -ab.dot(&e) / f;
        if u < 0.0 || v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some(HitRecord {
            t,
            point: ray.point_at(t),
            normal: Unit::new_normalize(n),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::WorldVector;
    use assert2::assert;

    fn triangle(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Triangle {
        Triangle {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            material: Material::default(),
        }
    }

    #[test]
    fn direct_hit() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([0.0, 0.0, 5.0].into(), [0.0, 0.0, -1.0].into());

        let h = tri.intersect(&ray).expect("We should have a hit!");
        assert!((h.t - 5.0).abs() < EPSILON);
        assert!((h.point - WorldPoint::new(0.0, 0.0, 0.0)).norm() < EPSILON);
        assert!((h.normal.into_inner() - WorldVector::new(0.0, 0.0, 1.0)).norm() < EPSILON);
    }

    #[test]
    fn miss_outside_edges() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([2.0, 2.0, 5.0].into(), [0.0, 0.0, -1.0].into());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn back_face_is_a_miss() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, 1.0].into());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_is_a_miss() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([0.0, 0.0, 5.0].into(), [1.0, 0.0, 0.0].into());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn triangle_behind_origin_is_a_miss() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([0.0, 0.0, -5.0].into(), [0.0, 0.0, -1.0].into());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn collinear_vertices_are_a_miss() {
        let tri = triangle([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let ray = Ray::new([0.5, 0.0, 5.0].into(), [0.0, 0.0, -1.0].into());
        assert!(tri.intersect(&ray).is_none());
    }

    #[test]
    fn hit_close_to_an_edge_still_counts() {
        let tri = triangle([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
        let ray = Ray::new([0.0, -0.999, 5.0].into(), [0.0, 0.0, -1.0].into());
        assert!(tri.intersect(&ray).is_some());
    }
}
