use image::RgbImage;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    camera::Camera,
    geometry::{FloatType, ScreenPoint},
    renderer::RenderSettings,
    scene::Scene,
    screen_block::ScreenBlock,
    shader,
    util::Rgb,
};

pub struct Worker {
    rng: SmallRng,
}

impl Worker {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Worker with a fixed jitter sequence, for reproducible tests.
    #[allow(dead_code)]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn render_tile(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        settings: &RenderSettings,
        tile: &ScreenBlock,
        buffer: &mut RgbImage,
    ) {
        for point in tile.internal_points() {
            let mut pixel_sum = Rgb::new(0.0, 0.0, 0.0);
            for _i in 0..settings.sample_count.get() {
                pixel_sum += self.render_sample(scene, camera, settings, &point);
            }
            let pixel = pixel_sum * (1.0 / settings.sample_count.get() as f32);

            let buffer_position = point - tile.min;
            buffer.put_pixel(buffer_position.x, buffer_position.y, color_to_image(pixel));
        }
    }

    fn render_sample(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        settings: &RenderSettings,
        point: &ScreenPoint,
    ) -> Rgb {
        // A single sample goes through the pixel center, anti-aliasing
        // jitters each sample independently.
        let offset: (FloatType, FloatType) = if settings.sample_count.get() > 1 {
            (self.rng.random(), self.rng.random())
        } else {
            (0.5, 0.5)
        };

        let ray = camera.ray_through_pixel(point, offset);
        let color = shader::ray_trace(
            &ray,
            scene,
            camera.center(),
            settings.max_depth.get(),
            &settings.trace,
        );

        // One broken sample must not poison the whole pixel.
        if color.r.is_finite() && color.g.is_finite() && color.b.is_finite() {
            color
        } else {
            settings.trace.background
        }
    }
}

/// Maps a 0-1 linear color to the 8 bit output format: clamp, scale, round.
pub fn color_to_image(color: Rgb) -> image::Rgb<u8> {
    image::Rgb([
        (color.r * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.g * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.b * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ScreenSize, Sphere, Triangle, WorldPoint, WorldVector};
    use crate::material::Material;
    use crate::scene::Primitive;
    use crate::shader::TraceSettings;
    use assert2::assert;
    use test_case::test_case;

    #[test_case(2.0, 255; "oversaturated clamps to white")]
    #[test_case(1.0, 255; "one maps to full")]
    #[test_case(0.5, 128; "half rounds up")]
    #[test_case(0.25, 64; "quarter rounds to nearest")]
    #[test_case(0.0, 0; "zero maps to zero")]
    #[test_case(-1.0, 0; "negative clamps to black")]
    fn quantization(value: f32, expected: u8) {
        let pixel = color_to_image(Rgb::new(value, value, value));
        assert!(pixel == image::Rgb([expected, expected, expected]));
    }

    fn settings(sample_count: u32) -> RenderSettings {
        RenderSettings {
            tile_size: 64.try_into().unwrap(),
            sample_count: sample_count.try_into().unwrap(),
            max_depth: 1.try_into().unwrap(),
            trace: TraceSettings::default(),
        }
    }

    /// Single pixel camera looking at a triangle covering the left half of
    /// the viewport, black material, no lights: jittered samples must
    /// converge to the halfway blend of object color and background.
    #[test]
    fn anti_aliasing_converges_on_an_edge() {
        let camera = Camera::builder()
            .position(WorldPoint::new(0.0, 0.0, 5.0))
            .look_target(WorldPoint::new(0.0, 0.0, 0.0))
            .up(WorldVector::new(0.0, 1.0, 0.0))
            .resolution(ScreenSize::new(1, 1))
            .fov_y(45.0)
            .focal_length(1.0)
            .build();
        let scene = Scene {
            objects: vec![Primitive::Triangle(Triangle {
                a: [0.0, -100.0, 0.0].into(),
                b: [0.0, 100.0, 0.0].into(),
                c: [-100.0, 0.0, 0.0].into(),
                material: Material::default(),
            })],
            lights: vec![],
        };

        let mut worker = Worker::with_seed(0x5eed);
        let tile = ScreenBlock::from_size(camera.resolution());
        let mut buffer = RgbImage::new(1, 1);
        worker.render_tile(&scene, &camera, &settings(4096), &tile, &mut buffer);

        // Background is (0, 0.5, 0.5); half the samples hit the (black)
        // triangle, so the average should sit near (0, 0.25, 0.25).
        let pixel = buffer.get_pixel(0, 0);
        assert!(pixel.0[0] == 0);
        assert!(pixel.0[1].abs_diff(64) <= 8);
        assert!(pixel.0[2].abs_diff(64) <= 8);
    }

    /// With a single sample per pixel the output is fully deterministic.
    #[test]
    fn centered_sampling_is_deterministic() {
        let camera = Camera::builder()
            .position(WorldPoint::new(0.0, 0.0, 5.0))
            .look_target(WorldPoint::new(0.0, 0.0, 0.0))
            .up(WorldVector::new(0.0, 1.0, 0.0))
            .resolution(ScreenSize::new(8, 8))
            .fov_y(45.0)
            .focal_length(1.0)
            .build();
        let scene = Scene {
            objects: vec![Primitive::Sphere(Sphere {
                center: [0.0, 0.0, 0.0].into(),
                radius: 1.0,
                material: Material::default(),
            })],
            lights: vec![],
        };
        let tile = ScreenBlock::from_size(camera.resolution());

        let mut first = RgbImage::new(8, 8);
        Worker::new().render_tile(&scene, &camera, &settings(1), &tile, &mut first);
        let mut second = RgbImage::new(8, 8);
        Worker::new().render_tile(&scene, &camera, &settings(1), &tile, &mut second);

        assert!(first == second);
    }
}
