//! Surfaces swept along the local Y axis: cylinders and double cones.
//!
//! Both share the same truncation rules. The lateral surface only counts
//! strictly between `minimum` and `maximum`, and a closed extrusion adds a
//! flat cap at each finite end.

use lumen_math::{BoundingBox, DVec3, Point, Ray, Vector, EPSILON};

use super::{LocalGeometry, LocalHit};

/// Y-extent and capping shared by every extruded surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrusion {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Extrusion {
    /// Infinite in both directions, no caps.
    pub const INFINITE: Extrusion = Extrusion {
        minimum: f64::NEG_INFINITY,
        maximum: f64::INFINITY,
        closed: false,
    };

    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self { minimum, maximum, closed }
    }

    /// True if both ends are finite.
    pub fn is_bounded(&self) -> bool {
        self.minimum.is_finite() && self.maximum.is_finite()
    }

    /// Lateral hits only count strictly inside the extent.
    fn spans(&self, y: f64) -> bool {
        self.minimum < y && y < self.maximum
    }

    /// Push the lateral roots of `a*t^2 + b*t + c` that fall inside the extent.
    fn push_lateral(&self, ray: &Ray, a: f64, b: f64, c: f64, hits: &mut Vec<LocalHit>) {
        let disc = b * b - 4.0 * a * c;
        // Grazing rays land a hair below zero
        if disc < -EPSILON {
            return;
        }
        let sqrt_disc = disc.max(0.0).sqrt();

        let mut t0 = (-b - sqrt_disc) / (2.0 * a);
        let mut t1 = (-b + sqrt_disc) / (2.0 * a);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        for t in [t0, t1] {
            if self.spans(ray.origin.y + t * ray.direction.y) {
                hits.push(LocalHit::at(t));
            }
        }
    }

    /// Push hits on the end caps, given the radius of the cross-section at a height.
    fn push_caps(&self, ray: &Ray, radius_at: impl Fn(f64) -> f64, hits: &mut Vec<LocalHit>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [self.minimum, self.maximum] {
            if !y.is_finite() {
                continue;
            }
            let t = (y - ray.origin.y) / ray.direction.y;
            let x = ray.origin.x + t * ray.direction.x;
            let z = ray.origin.z + t * ray.direction.z;
            let radius = radius_at(y);

            if x * x + z * z <= radius * radius + EPSILON {
                hits.push(LocalHit::at(t));
            }
        }
    }

    /// Cap normal if `point` lies on a cap of the given radius, else `None`.
    fn cap_normal(&self, point: Point, radius: f64) -> Option<Vector> {
        let dist = point.x * point.x + point.z * point.z;

        if dist < radius * radius && point.y >= self.maximum - EPSILON {
            Some(DVec3::Y)
        } else if dist < radius * radius && point.y <= self.minimum + EPSILON {
            Some(DVec3::NEG_Y)
        } else {
            None
        }
    }
}

impl Default for Extrusion {
    fn default() -> Self {
        Self::INFINITE
    }
}

/// Cylinder of radius 1 around the local Y axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cylinder {
    pub extrusion: Extrusion,
}

impl Cylinder {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            extrusion: Extrusion::new(minimum, maximum, closed),
        }
    }
}

impl LocalGeometry for Cylinder {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x + d.z * d.z;

        // Rays parallel to the axis can still hit the caps
        if a.abs() >= EPSILON {
            let b = 2.0 * (o.x * d.x + o.z * d.z);
            let c = o.x * o.x + o.z * o.z - 1.0;
            self.extrusion.push_lateral(ray, a, b, c, hits);
        }
        self.extrusion.push_caps(ray, |_| 1.0, hits);
    }

    fn local_normal_at(&self, point: Point, _hit: &LocalHit) -> Vector {
        self.extrusion
            .cap_normal(point, 1.0)
            .unwrap_or(DVec3::new(point.x, 0.0, point.z))
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        let e = &self.extrusion;
        e.is_bounded().then(|| {
            BoundingBox::new(DVec3::new(-1.0, e.minimum, -1.0), DVec3::new(1.0, e.maximum, 1.0))
        })
    }
}

/// Double-napped cone `x^2 + z^2 = y^2`, apex at the local origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Conic {
    pub extrusion: Extrusion,
}

impl Conic {
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            extrusion: Extrusion::new(minimum, maximum, closed),
        }
    }
}

impl LocalGeometry for Conic {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        let (o, d) = (ray.origin, ray.direction);
        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
        let c = o.x * o.x - o.y * o.y + o.z * o.z;

        if a.abs() < EPSILON {
            // Ray parallel to one nappe: a single crossing of the other
            if b.abs() >= EPSILON {
                let t = -c / b;
                if self.extrusion.spans(o.y + t * d.y) {
                    hits.push(LocalHit::at(t));
                }
            }
        } else {
            self.extrusion.push_lateral(ray, a, b, c, hits);
        }
        self.extrusion.push_caps(ray, f64::abs, hits);
    }

    fn local_normal_at(&self, point: Point, _hit: &LocalHit) -> Vector {
        if let Some(n) = self.extrusion.cap_normal(point, point.y.abs()) {
            return n;
        }

        let dist = point.x * point.x + point.z * point.z;
        let mut y = dist.sqrt();
        if point.y > 0.0 {
            y = -y;
        }
        DVec3::new(point.x, y, point.z)
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        let e = &self.extrusion;
        e.is_bounded().then(|| {
            let r = e.minimum.abs().max(e.maximum.abs());
            BoundingBox::new(DVec3::new(-r, e.minimum, -r), DVec3::new(r, e.maximum, r))
        })
    }
}
