use crate::geometry::{HitRecord, Ray, Sphere, Triangle};
use crate::light::Light;
use crate::material::Material;

/// Renderable object. A closed set of shapes, dispatched by match.
#[derive(Clone, Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
}

impl Primitive {
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        match self {
            Primitive::Sphere(sphere) => sphere.intersect(ray),
            Primitive::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(sphere) => &sphere.material,
            Primitive::Triangle(triangle) => &triangle.material,
        }
    }
}

/// Everything a ray can interact with. Read-only while rendering.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Insertion order defines tie-break precedence in `raycast`.
    pub objects: Vec<Primitive>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Nearest positive-distance intersection of `ray` with the scene,
    /// found by a plain linear scan. On equal distances the object inserted
    /// first wins (strict `<` comparison).
    pub fn raycast(&self, ray: &Ray) -> Option<(HitRecord, &Primitive)> {
        let mut nearest: Option<(HitRecord, &Primitive)> = None;
        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                match &nearest {
                    Some((nearest_hit, _)) if hit.t >= nearest_hit.t => {}
                    _ => nearest = Some((hit, object)),
                }
            }
        }
        nearest
    }
}
