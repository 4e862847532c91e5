use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use miniray::{
    Camera, RenderSettings, Rgb, Scene, TraceSettings,
    geometry::{ScreenSize, Sphere, Triangle, WorldPoint, WorldVector},
    light::{Attenuation, Light, LightKind},
    material::Material,
    render,
    scene::Primitive,
};

fn test_scene() -> Scene {
    let shiny = Material {
        ambient: Rgb::new(0.1, 0.05, 0.05),
        diffuse: Rgb::new(0.7, 0.2, 0.2),
        specular: Rgb::new(0.8, 0.8, 0.8),
        shininess: 96.0,
    };
    let matte = Material {
        ambient: Rgb::new(0.05, 0.05, 0.1),
        diffuse: Rgb::new(0.2, 0.3, 0.7),
        specular: Rgb::new(0.2, 0.2, 0.2),
        shininess: 8.0,
    };
    let floor = Material {
        ambient: Rgb::new(0.05, 0.05, 0.05),
        diffuse: Rgb::new(0.6, 0.6, 0.6),
        specular: Rgb::new(0.1, 0.1, 0.1),
        shininess: 4.0,
    };

    Scene {
        objects: vec![
            Primitive::Sphere(Sphere {
                center: [0.0, 0.0, 0.0].into(),
                radius: 1.0,
                material: shiny,
            }),
            Primitive::Sphere(Sphere {
                center: [-2.2, -0.4, -1.0].into(),
                radius: 0.6,
                material: matte,
            }),
            Primitive::Sphere(Sphere {
                center: [2.0, -0.5, 1.0].into(),
                radius: 0.5,
                material: matte,
            }),
            Primitive::Triangle(Triangle {
                a: [-8.0, -1.0, 8.0].into(),
                b: [8.0, -1.0, 8.0].into(),
                c: [8.0, -1.0, -8.0].into(),
                material: floor,
            }),
            Primitive::Triangle(Triangle {
                a: [-8.0, -1.0, 8.0].into(),
                b: [8.0, -1.0, -8.0].into(),
                c: [-8.0, -1.0, -8.0].into(),
                material: floor,
            }),
        ],
        lights: vec![
            Light {
                kind: LightKind::Point {
                    position: [4.0, 6.0, 4.0].into(),
                    attenuation: Attenuation {
                        constant: 1.0,
                        linear: 0.05,
                        quadratic: 0.01,
                    },
                },
                ambient: Rgb::new(0.2, 0.2, 0.2),
                diffuse: Rgb::new(1.0, 1.0, 1.0),
                specular: Rgb::new(1.0, 1.0, 1.0),
            },
            Light {
                kind: LightKind::Directional {
                    direction: WorldVector::new(-1.0, -1.0, -0.5),
                },
                ambient: Rgb::new(0.1, 0.1, 0.1),
                diffuse: Rgb::new(0.3, 0.3, 0.3),
                specular: Rgb::new(0.3, 0.3, 0.3),
            },
        ],
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let camera = Camera::builder()
        .position(WorldPoint::new(0.0, 1.0, 6.0))
        .look_target(WorldPoint::new(0.0, 0.0, 0.0))
        .up(WorldVector::new(0.0, 1.0, 0.0))
        .resolution(ScreenSize::new(640, 480))
        .fov_y(45.0)
        .focal_length(1.0)
        .build();
    let settings = RenderSettings {
        tile_size: 64.try_into().unwrap(),
        sample_count: 4.try_into().unwrap(),
        max_depth: 3.try_into().unwrap(),
        trace: TraceSettings::default(),
    };
    let scene = test_scene();

    c.bench_function("render_spheres", |b| {
        b.iter_batched(
            || (camera, settings, scene.clone()),
            |(camera, settings, scene)| {
                let mut render_progress =
                    render(scene, camera, settings, |_| {}, |_, _| {}).unwrap();
                render_progress.wait();
            },
            criterion::BatchSize::LargeInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10).measurement_time(Duration::from_secs(30));
    targets = criterion_benchmark
}
criterion_main!(benches);
