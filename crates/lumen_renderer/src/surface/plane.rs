//! Infinite plane primitive.

use lumen_math::{BoundingBox, DVec3, Point, Ray, Vector, EPSILON};

use super::{LocalGeometry, LocalHit};

/// The local X-Z plane, extending forever with its normal along +Y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl LocalGeometry for Plane {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        // Parallel (or coplanar) rays never cross it
        if ray.direction.y.abs() < EPSILON {
            return;
        }
        hits.push(LocalHit::at(-ray.origin.y / ray.direction.y));
    }

    fn local_normal_at(&self, _point: Point, _hit: &LocalHit) -> Vector {
        DVec3::Y
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        None
    }
}
