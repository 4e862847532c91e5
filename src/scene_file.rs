//! Reader for the plain-text scene description format.
//!
//! The format is a flat sequence of whitespace separated fields:
//! image width and height; camera position, look target and global up
//! vector; vertical field of view (degrees) and focal length; maximum ray
//! tree depth; object count followed by that many object records; light
//! count followed by that many light records.
//!
//! An object record starts with a tag: `sphere` introduces a center and a
//! radius, any other tag introduces the three vertices of a triangle.
//! Either is followed by a material (ambient, diffuse and specular RGB
//! triples, then shininess). A light record is a position with a fourth
//! component choosing the kind (nonzero: point light at that position,
//! zero: directional light shining along that vector), ambient/diffuse/
//! specular RGB triples, and three attenuation coefficients (present for
//! every light, meaningful only for point lights).

use std::num::NonZeroU32;
use std::path::Path;

use thiserror::Error;

use crate::Camera;
use crate::geometry::{EPSILON, FloatType, ScreenSize, Sphere, Triangle, WorldPoint, WorldVector};
use crate::light::{Attenuation, Light, LightKind};
use crate::material::Material;
use crate::scene::{Primitive, Scene};
use crate::util::Rgb;

#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("cannot read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene description ends before field `{0}`")]
    UnexpectedEnd(&'static str),
    #[error("field `{field}` has invalid value {token:?}")]
    InvalidValue { field: &'static str, token: String },
}

/// A fully loaded scene description: everything a render needs apart from
/// sampling settings.
#[derive(Clone, Debug)]
pub struct SceneFile {
    pub camera: Camera,
    pub max_depth: NonZeroU32,
    pub scene: Scene,
}

pub fn load(path: &Path) -> Result<SceneFile, SceneFileError> {
    parse(&std::fs::read_to_string(path)?)
}

pub fn parse(text: &str) -> Result<SceneFile, SceneFileError> {
    let mut fields = Fields {
        tokens: text.split_ascii_whitespace(),
    };

    let width: u32 = fields.value("image width")?;
    let height: u32 = fields.value("image height")?;
    if width == 0 || height == 0 {
        return Err(SceneFileError::InvalidValue {
            field: "image size",
            token: format!("{width}x{height}"),
        });
    }

    let position = fields.point("camera position")?;
    let look_target = fields.point("camera look target")?;
    let up = fields.vector("camera global up")?;
    let fov_y: FloatType = fields.value("vertical field of view")?;
    let focal_length: FloatType = fields.value("focal length")?;

    // The camera builder asserts these; report them as input errors instead.
    let forward = look_target - position;
    if forward.norm() < EPSILON {
        return Err(SceneFileError::InvalidValue {
            field: "camera look target",
            token: format!("{look_target:?}"),
        });
    }
    if forward.cross(&up).norm() < EPSILON {
        return Err(SceneFileError::InvalidValue {
            field: "camera global up",
            token: format!("{up:?}"),
        });
    }
    if !(fov_y > 0.0 && fov_y < 180.0) {
        return Err(SceneFileError::InvalidValue {
            field: "vertical field of view",
            token: format!("{fov_y}"),
        });
    }
    if focal_length <= 0.0 {
        return Err(SceneFileError::InvalidValue {
            field: "focal length",
            token: format!("{focal_length}"),
        });
    }

    // Depth below one is not representable; treat it as a single bounce.
    let max_depth: i64 = fields.value("max depth")?;
    let max_depth =
        NonZeroU32::new(max_depth.clamp(1, u32::MAX as i64) as u32).unwrap_or(NonZeroU32::MIN);

    let mut scene = Scene::default();

    let object_count: usize = fields.value("object count")?;
    for _ in 0..object_count {
        let tag = fields.word("object type")?;
        if tag == "sphere" {
            let center = fields.point("sphere center")?;
            let radius = fields.value("sphere radius")?;
            let material = fields.material()?;
            scene.objects.push(Primitive::Sphere(Sphere {
                center,
                radius,
                material,
            }));
        } else {
            // Any tag other than "sphere" introduces a triangle.
            let a = fields.point("triangle vertex A")?;
            let b = fields.point("triangle vertex B")?;
            let c = fields.point("triangle vertex C")?;
            let material = fields.material()?;
            scene
                .objects
                .push(Primitive::Triangle(Triangle { a, b, c, material }));
        }
    }

    let light_count: usize = fields.value("light count")?;
    for _ in 0..light_count {
        let position = fields.vector("light position")?;
        let w: FloatType = fields.value("light position w")?;
        let ambient = fields.rgb("light ambient")?;
        let diffuse = fields.rgb("light diffuse")?;
        let specular = fields.rgb("light specular")?;
        let attenuation = Attenuation {
            constant: fields.value("attenuation constant")?,
            linear: fields.value("attenuation linear")?,
            quadratic: fields.value("attenuation quadratic")?,
        };

        let kind = if w != 0.0 {
            LightKind::Point {
                position: WorldPoint::from(position),
                attenuation,
            }
        } else {
            LightKind::Directional {
                direction: position,
            }
        };
        scene.lights.push(Light {
            kind,
            ambient,
            diffuse,
            specular,
        });
    }

    let camera = Camera::builder()
        .position(position)
        .look_target(look_target)
        .up(up)
        .resolution(ScreenSize::new(width, height))
        .fov_y(fov_y)
        .focal_length(focal_length)
        .build();

    Ok(SceneFile {
        camera,
        max_depth,
        scene,
    })
}

struct Fields<'a> {
    tokens: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn word(&mut self, field: &'static str) -> Result<&'a str, SceneFileError> {
        self.tokens
            .next()
            .ok_or(SceneFileError::UnexpectedEnd(field))
    }

    fn value<T: std::str::FromStr>(&mut self, field: &'static str) -> Result<T, SceneFileError> {
        let token = self.word(field)?;
        token.parse().map_err(|_| SceneFileError::InvalidValue {
            field,
            token: token.to_owned(),
        })
    }

    fn vector(&mut self, field: &'static str) -> Result<WorldVector, SceneFileError> {
        Ok(WorldVector::new(
            self.value(field)?,
            self.value(field)?,
            self.value(field)?,
        ))
    }

    fn point(&mut self, field: &'static str) -> Result<WorldPoint, SceneFileError> {
        Ok(WorldPoint::from(self.vector(field)?))
    }

    fn rgb(&mut self, field: &'static str) -> Result<Rgb, SceneFileError> {
        Ok(Rgb::new(
            self.value(field)?,
            self.value(field)?,
            self.value(field)?,
        ))
    }

    fn material(&mut self) -> Result<Material, SceneFileError> {
        Ok(Material {
            ambient: self.rgb("material ambient")?,
            diffuse: self.rgb("material diffuse")?,
            specular: self.rgb("material specular")?,
            shininess: self.value("material shininess")?,
        })
    }
}
