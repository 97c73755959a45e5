//! Triangle primitives for ray tracing.
//!
//! Both flat and smooth triangles use the Möller-Trumbore algorithm; the
//! smooth variant keeps the barycentric (u, v) of each hit so the vertex
//! normals can be interpolated when shading.

use lumen_math::{BoundingBox, Point, Ray, Vector, EPSILON};

use super::{LocalGeometry, LocalHit};

/// Möller-Trumbore. Returns the hit with its barycentric coordinates.
fn moller_trumbore(p1: Point, e1: Vector, e2: Vector, ray: &Ray) -> Option<LocalHit> {
    let dir_cross_e2 = ray.direction.cross(e2);
    let det = e1.dot(dir_cross_e2);

    // Ray is parallel to the triangle
    if det.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / det;
    let p1_to_origin = ray.origin - p1;
    let u = f * p1_to_origin.dot(dir_cross_e2);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let origin_cross_e1 = p1_to_origin.cross(e1);
    let v = f * ray.direction.dot(origin_cross_e1);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * e2.dot(origin_cross_e1);
    Some(LocalHit { t, u, v })
}

/// A flat triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
    /// Pre-computed edges from `p1`
    e1: Vector,
    e2: Vector,
    /// Pre-computed face normal (unit length)
    normal: Vector,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(p1: Point, p2: Point, p3: Point) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;

        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalize(),
        }
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::enclosing([self.p1, self.p2, self.p3])
    }
}

impl LocalGeometry for Triangle {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        hits.extend(moller_trumbore(self.p1, self.e1, self.e2, ray));
    }

    fn local_normal_at(&self, _point: Point, _hit: &LocalHit) -> Vector {
        self.normal
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        Some(self.bounds())
    }
}

/// A triangle with per-vertex normals, interpolated across the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    pub face: Triangle,
    pub n1: Vector,
    pub n2: Vector,
    pub n3: Vector,
}

impl SmoothTriangle {
    pub fn new(p1: Point, p2: Point, p3: Point, n1: Vector, n2: Vector, n3: Vector) -> Self {
        Self {
            face: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

impl LocalGeometry for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        self.face.local_intersect(ray, hits);
    }

    fn local_normal_at(&self, _point: Point, hit: &LocalHit) -> Vector {
        self.n2 * hit.u + self.n3 * hit.v + self.n1 * (1.0 - hit.u - hit.v)
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        Some(self.face.bounds())
    }
}
