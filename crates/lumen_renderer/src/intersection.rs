//! Ray-surface intersections and the shading state derived from them.

use std::ops::Deref;

use lumen_math::{reflect, DMat4, Mat4Ext, Point, Ray, Vector, EPSILON};

use crate::surface::{LocalGeometry, LocalHit, Primitive, Shape, Surface};

/// One crossing of a ray with a primitive surface.
///
/// Carries the matrix that maps world space into the primitive's local space,
/// accumulated through every enclosing group, so the normal can be computed
/// without walking back up the tree.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Distance along the ray
    pub t: f64,
    /// Barycentric coordinates on triangles
    pub u: f64,
    pub v: f64,
    surface: &'a Surface,
    primitive: &'a Primitive,
    world_to_local: DMat4,
}

impl<'a> Intersection<'a> {
    /// Intersection with a top-level primitive surface.
    ///
    /// Returns `None` for groups and CSG nodes, which are never hit directly.
    pub fn new(t: f64, surface: &'a Surface) -> Option<Self> {
        match surface.shape() {
            Shape::Primitive(primitive) => Some(Self {
                t,
                u: 0.0,
                v: 0.0,
                surface,
                primitive,
                world_to_local: *surface.inverse(),
            }),
            _ => None,
        }
    }

    pub(crate) fn from_local(
        hit: LocalHit,
        surface: &'a Surface,
        primitive: &'a Primitive,
        world_to_local: DMat4,
    ) -> Self {
        Self {
            t: hit.t,
            u: hit.u,
            v: hit.v,
            surface,
            primitive,
            world_to_local,
        }
    }

    /// Set the barycentric coordinates.
    pub fn with_uv(mut self, u: f64, v: f64) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    /// The surface that was struck.
    pub fn surface(&self) -> &'a Surface {
        self.surface
    }

    /// Unit world-space normal at a world point on the struck surface.
    pub fn normal_at(&self, world_point: Point) -> Vector {
        let local_point = self.world_to_local.transform_point3(world_point);
        let local_hit = LocalHit {
            t: self.t,
            u: self.u,
            v: self.v,
        };
        let local_normal = self.primitive.local_normal_at(local_point, &local_hit);
        self.world_to_local.transform_normal(local_normal)
    }

    /// Compute everything shading needs for this hit.
    ///
    /// `xs` is the full sorted list this hit came from; it decides the
    /// refractive indices on either side of the boundary. The hit is found
    /// in `xs` by value, so a copy of an entry works as well as a reference.
    pub fn prepare(&self, ray: &Ray, xs: &[Intersection<'a>]) -> PreparedHit<'a> {
        let point = ray.at(self.t);
        let eye = -ray.direction;
        let mut normal = self.normal_at(point);

        let inside = normal.dot(eye) < 0.0;
        if inside {
            normal = -normal;
        }

        let (n1, n2) = self.refractive_indices(xs);

        PreparedHit {
            t: self.t,
            surface: self.surface,
            point,
            over_point: point + normal * EPSILON,
            under_point: point - normal * EPSILON,
            eye,
            normal,
            reflect: reflect(ray.direction, normal),
            inside,
            n1,
            n2,
            reflectance: schlick(eye, normal, n1, n2),
        }
    }

    /// Same primitive of the same surface at the same distance.
    fn same_hit(&self, other: &Intersection<'_>) -> bool {
        self.t == other.t
            && std::ptr::eq(self.surface, other.surface)
            && std::ptr::eq(self.primitive, other.primitive)
    }

    /// Indices of refraction being left (`n1`) and entered (`n2`).
    ///
    /// Walks the hits in order keeping a stack of the transparent surfaces
    /// the ray is inside. Opaque surfaces never enter the stack.
    fn refractive_indices(&self, xs: &[Intersection<'a>]) -> (f64, f64) {
        let mut containers: Vec<&Surface> = Vec::new();
        let outermost = |containers: &[&Surface]| {
            containers
                .last()
                .map_or(1.0, |s| s.material().refractive_index)
        };

        let mut n1 = 1.0;
        for x in xs {
            let is_hit = x.same_hit(self);
            if is_hit {
                n1 = outermost(&containers);
            }

            if x.surface.material().transparency > 0.0 {
                match containers.iter().position(|s| std::ptr::eq(*s, x.surface)) {
                    Some(pos) => {
                        containers.remove(pos);
                    }
                    None => containers.push(x.surface),
                }
            }

            if is_hit {
                return (n1, outermost(&containers));
            }
        }
        (1.0, 1.0)
    }
}

/// Schlick's approximation to the Fresnel reflectance.
pub fn schlick(eye: Vector, normal: Vector, n1: f64, n2: f64) -> f64 {
    let mut cos = eye.dot(normal);

    if n1 > n2 {
        let n = n1 / n2;
        let sin2_t = n * n * (1.0 - cos * cos);
        // Total internal reflection
        if sin2_t > 1.0 {
            return 1.0;
        }
        cos = (1.0 - sin2_t).sqrt();
    }

    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}

/// Shading state for one hit.
#[derive(Debug, Clone, Copy)]
pub struct PreparedHit<'a> {
    pub t: f64,
    pub surface: &'a Surface,
    pub point: Point,
    /// Nudged off the surface along the normal, for shadow and reflection rays
    pub over_point: Point,
    /// Nudged below the surface, for refraction rays
    pub under_point: Point,
    pub eye: Vector,
    /// Faces the eye; flipped when the hit is on the inside
    pub normal: Vector,
    pub reflect: Vector,
    pub inside: bool,
    pub n1: f64,
    pub n2: f64,
    pub reflectance: f64,
}

/// The intersections of one ray with a scene.
#[derive(Debug, Clone, Default)]
pub struct Intersections<'a> {
    items: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: Intersection<'a>) {
        self.items.push(x);
    }

    /// Order by ascending `t`.
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| a.t.total_cmp(&b.t));
    }

    /// The visible hit: smallest strictly positive `t`.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.items
            .iter()
            .filter(|x| x.t > 0.0)
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }

    pub fn into_vec(self) -> Vec<Intersection<'a>> {
        self.items
    }
}

impl<'a> Deref for Intersections<'a> {
    type Target = [Intersection<'a>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a> Extend<Intersection<'a>> for Intersections<'a> {
    fn extend<I: IntoIterator<Item = Intersection<'a>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a> FromIterator<Intersection<'a>> for Intersections<'a> {
    fn from_iter<I: IntoIterator<Item = Intersection<'a>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(items: Vec<Intersection<'a>>) -> Self {
        Self { items }
    }
}
