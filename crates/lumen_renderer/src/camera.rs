//! Pinhole camera for primary ray generation.

use std::f64::consts::FRAC_PI_2;
use std::sync::OnceLock;

use lumen_math::{view_transform, DMat4, DVec3, Mat4Ext, Point, Ray, Vector};

use crate::error::{RenderError, RenderResult};

/// A camera placed in the scene, looking from `location` towards `look_at`.
///
/// The view transform is derived from the placement on first use and cached.
#[derive(Debug, Clone)]
pub struct Camera {
    location: Point,
    look_at: Point,
    up: Vector,
    /// Horizontal or vertical, whichever side of the canvas is longer (radians)
    field_of_view: f64,
    transform: OnceLock<DMat4>,
}

impl Camera {
    pub fn new(location: Point, look_at: Point, up: Vector, field_of_view: f64) -> Self {
        Self {
            location,
            look_at,
            up,
            field_of_view,
            transform: OnceLock::new(),
        }
    }

    pub fn with_location(self, location: Point) -> Self {
        Self::new(location, self.look_at, self.up, self.field_of_view)
    }

    pub fn with_look_at(self, look_at: Point) -> Self {
        Self::new(self.location, look_at, self.up, self.field_of_view)
    }

    pub fn with_up(self, up: Vector) -> Self {
        Self::new(self.location, self.look_at, up, self.field_of_view)
    }

    pub fn with_field_of_view(self, field_of_view: f64) -> Self {
        Self::new(self.location, self.look_at, self.up, field_of_view)
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn look_at(&self) -> Point {
        self.look_at
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// World-to-camera transform.
    pub fn transform(&self) -> DMat4 {
        *self
            .transform
            .get_or_init(|| view_transform(self.location, self.look_at, self.up))
    }

    /// Fails if the placement is degenerate (`look_at` on top of `location`,
    /// or `up` parallel to the view direction).
    pub fn validate(&self) -> RenderResult<()> {
        let transform = self.transform();
        if transform.is_finite() && transform.is_invertible() {
            Ok(())
        } else {
            Err(RenderError::SingularTransform { kind: "camera" })
        }
    }

    /// World-space width of one pixel on the canvas one unit in front of the camera.
    pub fn pixel_size(&self, width: usize, height: usize) -> f64 {
        self.projection(width, height).pixel_size
    }

    /// Precompute the per-canvas values needed to shoot primary rays.
    pub fn projection(&self, width: usize, height: usize) -> Projection {
        let half_view = (self.field_of_view / 2.0).tan();
        let aspect = width as f64 / height as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let inverse = self.transform().inverse();
        Projection {
            pixel_size: half_width * 2.0 / width as f64,
            half_width,
            half_height,
            origin: inverse.transform_point3(DVec3::ZERO),
            inverse,
        }
    }

    /// Primary ray through the centre of pixel (`px`, `py`).
    ///
    /// Builds a fresh [`Projection`] (and inverts the camera matrix) on every
    /// call. When shooting many rays at one canvas size, call
    /// [`Camera::projection`] once and use [`Projection::ray_for_pixel`].
    pub fn ray_for_pixel(&self, px: usize, py: usize, width: usize, height: usize) -> Ray {
        self.projection(width, height).ray_for_pixel(px, py)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DVec3::NEG_Z, DVec3::Y, FRAC_PI_2)
    }
}

/// Camera state resolved against one canvas size.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub pixel_size: f64,
    pub half_width: f64,
    pub half_height: f64,
    /// Camera position in world space
    pub origin: Point,
    /// Camera-to-world transform
    pub inverse: DMat4,
}

impl Projection {
    /// Primary ray through the centre of pixel (`px`, `py`).
    ///
    /// The canvas sits at z = -1 in camera space with +x to the left of the
    /// image, so pixel (0, 0) is the top-left corner.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;

        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let pixel = self
            .inverse
            .transform_point3(DVec3::new(world_x, world_y, -1.0));
        Ray::new(self.origin, (pixel - self.origin).normalize())
    }
}
