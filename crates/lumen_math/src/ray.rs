use crate::{DMat4, Point, Vector};

/// A ray in 3D space with an origin and a direction.
///
/// Rays are immutable once built. Mapping a ray into another coordinate
/// space produces a new ray via [`Ray::transform`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Map the ray through a matrix.
    ///
    /// The origin is transformed as a point and the direction as a vector,
    /// so translation only moves the origin. The direction is not renormalised:
    /// distances along the transformed ray stay comparable with the original.
    pub fn transform(&self, matrix: &DMat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}
