use assert2::assert;
use bon::bon;
use nalgebra::Unit;

use crate::geometry::{EPSILON, FloatType, Ray, ScreenPoint, ScreenSize, WorldPoint, WorldVector};

#[derive(Copy, Clone, Debug)]
pub struct Camera {
    center: WorldPoint,
    resolution: ScreenSize,

    right: Unit<WorldVector>,
    true_up: Unit<WorldVector>,

    viewport_lower_left: WorldPoint,
    viewport_width: FloatType,
    viewport_height: FloatType,
}

#[bon]
impl Camera {
    #[builder]
    pub fn new(
        position: WorldPoint,
        look_target: WorldPoint,
        up: WorldVector,
        resolution: ScreenSize,
        /// Vertical field of view in degrees
        fov_y: FloatType,
        focal_length: FloatType,
    ) -> Self {
        assert!(resolution.x > 0);
        assert!(resolution.y > 0);
        assert!(fov_y > 0.0 && fov_y < 180.0);
        assert!(focal_length > 0.0);

        let forward = Unit::try_new(look_target - position, EPSILON)
            .expect("Camera must not sit at its look target");
        let right = Unit::try_new(forward.cross(&up), EPSILON)
            .expect("`up` and the view direction must be linearly independent");
        let true_up = Unit::new_normalize(right.cross(&forward));

        let viewport_height = 2.0 * focal_length * (fov_y.to_radians() / 2.0).tan();
        let viewport_width =
            resolution.x as FloatType * viewport_height / resolution.y as FloatType;

        let viewport_lower_left = position + forward.as_ref() * focal_length
            - right.as_ref() * (viewport_width / 2.0)
            - true_up.as_ref() * (viewport_height / 2.0);

        Camera {
            center: position,
            resolution,
            right,
            true_up,
            viewport_lower_left,
            viewport_width,
            viewport_height,
        }
    }
}

impl Camera {
    pub fn resolution(&self) -> ScreenSize {
        self.resolution
    }

    pub fn center(&self) -> WorldPoint {
        self.center
    }

    /// Ray from the camera through the given image pixel. `point` uses
    /// image coordinates (origin at the top left, matching the output
    /// image); `offset` is the sub-pixel sample position in [0, 1)² —
    /// (0.5, 0.5) samples the pixel center.
    pub fn ray_through_pixel(&self, point: &ScreenPoint, offset: (FloatType, FloatType)) -> Ray {
        // The viewport is addressed bottom-up, image rows run top-down.
        let flipped_y = self.resolution.y - 1 - point.y;

        let s =
            (point.x as FloatType + offset.0) * self.viewport_width / self.resolution.x as FloatType;
        let t = (flipped_y as FloatType + offset.1) * self.viewport_height
            / self.resolution.y as FloatType;

        let pixel_position =
            self.viewport_lower_left + self.right.as_ref() * s + self.true_up.as_ref() * t;

        Ray::new(self.center, pixel_position - self.center)
    }
}
