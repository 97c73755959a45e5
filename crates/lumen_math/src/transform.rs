// Transform utilities for DMat4
//
// Extends glam::DMat4 with the helpers ray tracing needs beyond what glam
// provides. glam already covers translation, scaling, rotation and inverse.

use crate::{BoundingBox, Point, Vector};
use glam::{DMat4, DVec4};

/// Extension trait for DMat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a surface normal from local to parent space.
    ///
    /// `self` must be the *inverse* of the local-to-parent matrix; the normal
    /// is multiplied by its transpose and renormalised.
    fn transform_normal(&self, normal: Vector) -> Vector;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox;

    /// True if the matrix can be inverted.
    fn is_invertible(&self) -> bool;
}

impl Mat4Ext for DMat4 {
    fn transform_normal(&self, normal: Vector) -> Vector {
        // Upper 3x3 of the transpose; translation must not leak into normals
        self.transpose().transform_vector3(normal).normalize()
    }

    fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if bounds.is_empty() {
            return *bounds;
        }
        BoundingBox::enclosing(bounds.corners().iter().map(|&c| self.transform_point3(c)))
    }

    fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > f64::EPSILON
    }
}

/// Shearing matrix: each component moves in proportion to the other two.
///
/// `xy` is "x moved in proportion to y" and so on.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> DMat4 {
    // glam matrices are column-major
    DMat4::from_cols(
        DVec4::new(1.0, yx, zx, 0.0),
        DVec4::new(xy, 1.0, zy, 0.0),
        DVec4::new(xz, yz, 1.0, 0.0),
        DVec4::W,
    )
}

/// Build the world-to-camera matrix for an eye at `from` looking at `to`.
///
/// The basis is `forward = normalize(from - to)`, `left = normalize(up x forward)`,
/// `true_up = forward x left`. The camera looks down its local -Z axis.
pub fn view_transform(from: Point, to: Point, up: Vector) -> DMat4 {
    let forward = (from - to).normalize();
    let left = up.cross(forward).normalize();
    let true_up = forward.cross(left);

    let orientation = DMat4::from_cols(
        DVec4::new(left.x, true_up.x, forward.x, 0.0),
        DVec4::new(left.y, true_up.y, forward.y, 0.0),
        DVec4::new(left.z, true_up.z, forward.z, 0.0),
        DVec4::W,
    );

    orientation * DMat4::from_translation(-from)
}
