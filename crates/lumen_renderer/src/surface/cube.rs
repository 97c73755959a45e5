//! Axis-aligned cube primitive.

use lumen_math::{BoundingBox, DVec3, Point, Ray, Vector, EPSILON};

use super::{LocalGeometry, LocalHit};

/// The cube spanning -1..1 on every local axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cube;

/// Entry and exit distances against the pair of planes at -1 and +1 on one axis.
fn check_axis(origin: f64, direction: f64) -> (f64, f64) {
    let tmin_numerator = -1.0 - origin;
    let tmax_numerator = 1.0 - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (tmin_numerator * f64::INFINITY, tmax_numerator * f64::INFINITY)
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

impl LocalGeometry for Cube {
    /// Slab method: the largest entry and the smallest exit over all axes.
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return;
        }
        hits.push(LocalHit::at(tmin));
        hits.push(LocalHit::at(tmax));
    }

    fn local_normal_at(&self, point: Point, _hit: &LocalHit) -> Vector {
        let abs = point.abs();
        let maxc = abs.max_element();

        if maxc == abs.x {
            DVec3::new(point.x, 0.0, 0.0)
        } else if maxc == abs.y {
            DVec3::new(0.0, point.y, 0.0)
        } else {
            DVec3::new(0.0, 0.0, point.z)
        }
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        Some(BoundingBox::new(DVec3::NEG_ONE, DVec3::ONE))
    }
}
