use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Ray, WorldPoint, reflect};
use crate::light::LightKind;
use crate::scene::Scene;
use crate::util::{Rgb, modulate};

/// Knobs of the recursive tracer, threaded explicitly through the render
/// entry point instead of living in globals.
#[derive(Copy, Clone, Debug)]
pub struct TraceSettings {
    /// Returned for rays that leave the scene.
    pub background: Rgb,
    /// Offset along the surface normal for shadow ray origins.
    pub shadow_bias: FloatType,
    /// Offset along the surface normal for reflection ray origins.
    pub reflection_bias: FloatType,
    /// Material shininess divided by this gives the mirror reflection
    /// weight.
    pub reflectivity_scale: FloatType,
    /// Stand-in distance to a directional light in the shadow test. Only
    /// needs to exceed any scene extent.
    pub directional_light_distance: FloatType,
}

impl Default for TraceSettings {
    fn default() -> Self {
        TraceSettings {
            background: Rgb::new(0.0, 0.5, 0.5),
            shadow_bias: 1e-3,
            reflection_bias: 1e-3,
            reflectivity_scale: 256.0,
            directional_light_distance: 1e6,
        }
    }
}

/// Recursively evaluates the color a single ray brings back from the scene:
/// Phong ambient + diffuse + specular per light, shadowing, attenuation and
/// a mirror reflection bounce while `depth > 1`. `eye` is the camera
/// position (specular highlights always face the viewer, not the parent
/// ray). Colors are accumulated unclamped in linear space.
pub fn ray_trace(
    ray: &Ray,
    scene: &Scene,
    eye: WorldPoint,
    depth: u32,
    settings: &TraceSettings,
) -> Rgb {
    // Zero depth is not representable, treat it as a single bounce.
    let depth = depth.max(1);

    let Some((hit, object)) = scene.raycast(ray) else {
        return settings.background;
    };
    let material = object.material();

    let mut color = Rgb::new(0.0, 0.0, 0.0);
    let ambient_share = 1.0 / scene.lights.len().max(1) as FloatType;

    for light in &scene.lights {
        // Ambient is split evenly across lights and is never shadowed.
        color += modulate(material.ambient, light.ambient) * ambient_share;

        let shadow_origin = hit.point + hit.normal.as_ref() * settings.shadow_bias;
        let (to_light, attenuation, light_distance) = match &light.kind {
            LightKind::Point {
                position,
                attenuation,
            } => {
                let Some(to_light) = Unit::try_new(position - hit.point, EPSILON) else {
                    // Light sits on the surface point; its direction is
                    // undefined, only ambient applies.
                    continue;
                };
                // The shadow comparison distance is measured from the
                // biased origin, attenuation from the actual hit point.
                (
                    to_light,
                    attenuation.factor((position - hit.point).norm()),
                    (position - shadow_origin).norm(),
                )
            }
            LightKind::Directional { direction } => {
                let Some(to_light) = Unit::try_new(-direction, EPSILON) else {
                    continue;
                };
                (to_light, 1.0, settings.directional_light_distance)
            }
        };

        let shadow_ray = Ray::new(shadow_origin, to_light.into_inner());
        let occluded = scene
            .raycast(&shadow_ray)
            .is_some_and(|(shadow_hit, _)| shadow_hit.t < light_distance);
        if occluded {
            continue;
        }

        let diffuse_strength = to_light.dot(&hit.normal).max(0.0);
        color += modulate(material.diffuse, light.diffuse) * (diffuse_strength * attenuation);

        if let Some(to_eye) = Unit::try_new(eye - hit.point, EPSILON) {
            let reflected = reflect(&-to_light.into_inner(), &hit.normal);
            let specular_strength = reflected.dot(&to_eye).max(0.0).powf(material.shininess);
            color +=
                modulate(material.specular, light.specular) * (specular_strength * attenuation);
        }
    }

    if depth > 1 {
        let reflection_ray = Ray::new(
            hit.point + hit.normal.as_ref() * settings.reflection_bias,
            reflect(&ray.direction, &hit.normal),
        );
        let reflected_color = ray_trace(&reflection_ray, scene, eye, depth - 1, settings);
        color += reflected_color * (material.shininess / settings.reflectivity_scale);
    }

    color
}
