//! Torus primitive, ring around the local Y axis.

use lumen_math::{solve_quartic, BoundingBox, DVec3, Point, Ray, Vector, EPSILON};

use super::{LocalGeometry, LocalHit};

/// Ring of tube radius `minor_radius` swept at `major_radius` around +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Torus {
    pub fn new(major_radius: f64, minor_radius: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new(1.0, 0.25)
    }
}

impl LocalGeometry for Torus {
    /// Solves `(|P|^2 - R^2 - r^2)^2 = 4R^2 (r^2 - y^2)` for `P = O + tD`.
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        let (o, d) = (ray.origin, ray.direction);
        let r2 = self.major_radius * self.major_radius;
        let rho2 = self.minor_radius * self.minor_radius;

        let dd = d.dot(d);
        let od = o.dot(d);
        let oo = o.dot(o);
        let k = oo - r2 - rho2;

        let c4 = dd * dd;
        let c3 = 4.0 * dd * od;
        let c2 = 2.0 * dd * k + 4.0 * od * od + 4.0 * r2 * d.y * d.y;
        let c1 = 4.0 * k * od + 8.0 * r2 * o.y * d.y;
        let c0 = k * k - 4.0 * r2 * (rho2 - o.y * o.y);

        hits.extend(
            solve_quartic(c4, c3, c2, c1, c0)
                .into_iter()
                .map(LocalHit::at),
        );
    }

    fn local_normal_at(&self, point: Point, _hit: &LocalHit) -> Vector {
        let ring = DVec3::new(point.x, 0.0, point.z);
        if ring.length_squared() < EPSILON * EPSILON {
            return DVec3::Y;
        }
        point - ring.normalize() * self.major_radius
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        let outer = self.major_radius + self.minor_radius;
        let r = self.minor_radius;
        Some(BoundingBox::new(
            DVec3::new(-outer, -r, -outer),
            DVec3::new(outer, r, outer),
        ))
    }
}
