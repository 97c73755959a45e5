//! Unit sphere primitive for ray tracing.

use lumen_math::{solve_quadratic, BoundingBox, DVec3, Point, Ray, Vector};

use super::{LocalGeometry, LocalHit};

/// A sphere of radius 1 centred on the local origin.
///
/// Position and size come from the owning surface's transform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl LocalGeometry for Sphere {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        // |O + tD|^2 = 1
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(ray.origin);
        let c = ray.origin.length_squared() - 1.0;

        hits.extend(solve_quadratic(a, b, c).into_iter().map(LocalHit::at));
    }

    fn local_normal_at(&self, point: Point, _hit: &LocalHit) -> Vector {
        point
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(DVec3::NEG_ONE, DVec3::ONE))
    }
}
