// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod bounds;
mod ray;
mod roots;
mod transform;

pub use bounds::BoundingBox;
pub use ray::Ray;
pub use roots::{solve_cubic, solve_quadratic, solve_quartic};
pub use transform::{shearing, view_transform, Mat4Ext};

/// A position in space. Transformed with `transform_point3` (implicit w = 1).
pub type Point = DVec3;

/// A direction in space. Transformed with `transform_vector3` (implicit w = 0).
pub type Vector = DVec3;

/// Comparison tolerance shared by every crate in the workspace.
///
/// Also used as the offset for over/under points when shading.
pub const EPSILON: f64 = 1e-5;

/// Tolerance-based equality.
///
/// Floating-point error accumulates through transforms and root finding,
/// so geometry is never compared exactly.
pub trait Near {
    /// Returns true if every component differs by less than [`EPSILON`].
    fn near(&self, other: &Self) -> bool;
}

impl Near for f64 {
    #[inline]
    fn near(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl Near for DVec3 {
    #[inline]
    fn near(&self, other: &Self) -> bool {
        self.x.near(&other.x) && self.y.near(&other.y) && self.z.near(&other.z)
    }
}

impl Near for DVec4 {
    fn near(&self, other: &Self) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.near(b))
    }
}

impl Near for DMat4 {
    fn near(&self, other: &Self) -> bool {
        (0..4).all(|i| self.col(i).near(&other.col(i)))
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vector, n: Vector) -> Vector {
    v - n * 2.0 * v.dot(n)
}
