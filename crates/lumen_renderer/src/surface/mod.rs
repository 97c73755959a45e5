//! Surfaces: everything a ray can hit.
//!
//! A [`Surface`] pairs a [`Shape`] with the state every shape carries: a
//! local-to-parent transform (and its cached inverse), a material binding and
//! the shadow-casting flag. Shapes are either primitives, which compute
//! intersections in their own local space, or composites ([`Group`], [`Csg`])
//! that own child surfaces.
//!
//! Children never point back at their parents. Instead each intersection
//! records the world-to-local matrix accumulated while descending the tree,
//! which is all normal computation needs.

mod csg;
mod cube;
mod extruded;
mod group;
mod plane;
mod sphere;
mod torus;
mod triangle;

use std::sync::Arc;

use lumen_core::{Material, MaterialBinding};
use lumen_math::{BoundingBox, DMat4, Mat4Ext, Point, Ray, Vector};

use crate::error::{RenderError, RenderResult};
use crate::intersection::{Intersection, Intersections};

pub use csg::{Csg, CsgOperation};
pub use cube::Cube;
pub use extruded::{Conic, Cylinder, Extrusion};
pub use group::Group;
pub use plane::Plane;
pub use sphere::Sphere;
pub use torus::Torus;
pub use triangle::{SmoothTriangle, Triangle};

/// A hit found in a primitive's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalHit {
    pub t: f64,
    /// Barycentric coordinates; zero for everything but triangles
    pub u: f64,
    pub v: f64,
}

impl LocalHit {
    pub fn at(t: f64) -> Self {
        Self { t, u: 0.0, v: 0.0 }
    }
}

/// Geometry expressed in a primitive's local coordinate space.
pub trait LocalGeometry {
    /// Append every crossing of the local ray, in any order.
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>);

    /// Unnormalised local-space normal at a point on the surface.
    fn local_normal_at(&self, point: Point, hit: &LocalHit) -> Vector;

    /// Local-space bounds, or `None` if the geometry is infinite.
    fn local_bounds(&self) -> Option<BoundingBox>;
}

/// The closed set of primitive shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Cube(Cube),
    Cylinder(Cylinder),
    Conic(Conic),
    Torus(Torus),
    Triangle(Triangle),
    SmoothTriangle(SmoothTriangle),
}

impl Primitive {
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Plane(_) => "plane",
            Primitive::Cube(_) => "cube",
            Primitive::Cylinder(_) => "cylinder",
            Primitive::Conic(_) => "conic",
            Primitive::Torus(_) => "torus",
            Primitive::Triangle(_) => "triangle",
            Primitive::SmoothTriangle(_) => "smooth triangle",
        }
    }

    fn geometry(&self) -> &dyn LocalGeometry {
        match self {
            Primitive::Sphere(s) => s,
            Primitive::Plane(p) => p,
            Primitive::Cube(c) => c,
            Primitive::Cylinder(c) => c,
            Primitive::Conic(c) => c,
            Primitive::Torus(t) => t,
            Primitive::Triangle(t) => t,
            Primitive::SmoothTriangle(t) => t,
        }
    }
}

impl LocalGeometry for Primitive {
    fn local_intersect(&self, ray: &Ray, hits: &mut Vec<LocalHit>) {
        self.geometry().local_intersect(ray, hits)
    }

    fn local_normal_at(&self, point: Point, hit: &LocalHit) -> Vector {
        self.geometry().local_normal_at(point, hit)
    }

    fn local_bounds(&self) -> Option<BoundingBox> {
        self.geometry().local_bounds()
    }
}

/// What a surface is.
#[derive(Debug, Clone)]
pub enum Shape {
    Primitive(Primitive),
    Group(Group),
    Csg(Csg),
}

/// A shape placed in its parent's space, with a material.
#[derive(Debug, Clone)]
pub struct Surface {
    transform: DMat4,
    inverse: DMat4,
    material: MaterialBinding,
    no_shadow: bool,
    shape: Shape,
}

impl Surface {
    pub fn new(shape: Shape) -> Self {
        Self {
            transform: DMat4::IDENTITY,
            inverse: DMat4::IDENTITY,
            material: MaterialBinding::Unset,
            no_shadow: false,
            shape,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(Shape::Primitive(primitive))
    }

    pub fn sphere() -> Self {
        Self::primitive(Primitive::Sphere(Sphere))
    }

    pub fn plane() -> Self {
        Self::primitive(Primitive::Plane(Plane))
    }

    pub fn cube() -> Self {
        Self::primitive(Primitive::Cube(Cube))
    }

    /// Unit-radius cylinder between `minimum` and `maximum` on Y.
    pub fn cylinder(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::primitive(Primitive::Cylinder(Cylinder::new(minimum, maximum, closed)))
    }

    /// Double cone between `minimum` and `maximum` on Y.
    pub fn conic(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self::primitive(Primitive::Conic(Conic::new(minimum, maximum, closed)))
    }

    pub fn torus(major_radius: f64, minor_radius: f64) -> Self {
        Self::primitive(Primitive::Torus(Torus::new(major_radius, minor_radius)))
    }

    pub fn triangle(p1: Point, p2: Point, p3: Point) -> Self {
        Self::primitive(Primitive::Triangle(Triangle::new(p1, p2, p3)))
    }

    pub fn smooth_triangle(
        p1: Point,
        p2: Point,
        p3: Point,
        n1: Vector,
        n2: Vector,
        n3: Vector,
    ) -> Self {
        Self::primitive(Primitive::SmoothTriangle(SmoothTriangle::new(
            p1, p2, p3, n1, n2, n3,
        )))
    }

    pub fn group(children: Vec<Surface>) -> Self {
        Self::new(Shape::Group(Group::with_children(children)))
    }

    pub fn csg(operation: CsgOperation, left: Surface, right: Surface) -> Self {
        Self::new(Shape::Csg(Csg::new(operation, left, right)))
    }

    /// Fold two or more surfaces into a left-leaning chain of CSG nodes:
    /// `[a, b, c]` becomes `op(op(a, b), c)`.
    pub fn csg_chain(operation: CsgOperation, surfaces: Vec<Surface>) -> RenderResult<Self> {
        if surfaces.len() < 2 {
            return Err(RenderError::CsgArity {
                found: surfaces.len(),
            });
        }

        let mut iter = surfaces.into_iter();
        let first = iter.next().ok_or(RenderError::CsgArity { found: 0 })?;
        Ok(iter.fold(first, |acc, next| Surface::csg(operation, acc, next)))
    }

    /// Set the local-to-parent transform.
    pub fn with_transform(mut self, transform: DMat4) -> Self {
        self.set_transform(transform);
        self
    }

    /// Give this surface its own material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.set_material(material);
        self
    }

    /// Share one material between many surfaces.
    pub fn with_shared_material(mut self, material: Arc<Material>) -> Self {
        self.material = MaterialBinding::Explicit(material);
        self
    }

    /// Exclude this surface from shadow tests.
    pub fn with_no_shadow(mut self, no_shadow: bool) -> Self {
        self.no_shadow = no_shadow;
        self
    }

    pub fn set_transform(&mut self, transform: DMat4) {
        self.transform = transform;
        self.inverse = transform.inverse();
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = MaterialBinding::Explicit(Arc::new(material));
    }

    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    /// The material this surface shades with.
    pub fn material(&self) -> &Material {
        self.material.resolve()
    }

    pub fn material_binding(&self) -> &MaterialBinding {
        &self.material
    }

    pub fn no_shadow(&self) -> bool {
        self.no_shadow
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.shape {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match &mut self.shape {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_csg(&self) -> Option<&Csg> {
        match &self.shape {
            Shape::Csg(c) => Some(c),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.shape {
            Shape::Primitive(p) => p.name(),
            Shape::Group(_) => "group",
            Shape::Csg(_) => "csg",
        }
    }

    /// Direct children of a composite; empty for primitives.
    pub fn children(&self) -> Vec<&Surface> {
        match &self.shape {
            Shape::Primitive(_) => Vec::new(),
            Shape::Group(g) => g.children().iter().collect(),
            Shape::Csg(c) => vec![c.left(), c.right()],
        }
    }

    fn children_mut(&mut self) -> Vec<&mut Surface> {
        match &mut self.shape {
            Shape::Primitive(_) => Vec::new(),
            Shape::Group(g) => g.children_mut().iter_mut().collect(),
            Shape::Csg(c) => {
                let (left, right) = c.operands_mut();
                vec![left, right]
            }
        }
    }

    /// Intersect a world-space ray with this surface and all its descendants.
    pub fn intersect<'a>(&'a self, ray: &Ray, xs: &mut Intersections<'a>) {
        self.intersect_from(ray, &DMat4::IDENTITY, xs);
    }

    /// Intersect a ray given in this surface's parent space.
    ///
    /// `world_to_parent` is the accumulated inverse of every ancestor's
    /// transform; hits record it composed with this surface's own inverse.
    pub(crate) fn intersect_from<'a>(
        &'a self,
        ray: &Ray,
        world_to_parent: &DMat4,
        xs: &mut Intersections<'a>,
    ) {
        let world_to_local = self.inverse * *world_to_parent;
        let local_ray = ray.transform(&self.inverse);

        match &self.shape {
            Shape::Primitive(primitive) => {
                let mut hits = Vec::new();
                primitive.local_intersect(&local_ray, &mut hits);
                xs.extend(hits.into_iter().map(|hit| {
                    Intersection::from_local(hit, self, primitive, world_to_local)
                }));
            }
            Shape::Group(group) => group.intersect_children(&local_ray, &world_to_local, xs),
            Shape::Csg(csg) => csg.intersect_operands(&local_ray, &world_to_local, xs),
        }
    }

    /// True if `other` is this surface or one of its descendants.
    pub fn includes(&self, other: &Surface) -> bool {
        std::ptr::eq(self, other) || self.children().iter().any(|c| c.includes(other))
    }

    /// Bounds in local space, before this surface's transform.
    pub fn local_bounds(&self) -> Option<BoundingBox> {
        match &self.shape {
            Shape::Primitive(p) => p.local_bounds(),
            Shape::Group(g) => g.bounds_of_children(),
            Shape::Csg(c) => c.bounds_of_operands(),
        }
    }

    /// Bounds in parent space, or `None` if the surface is infinite.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.local_bounds()
            .map(|b| self.transform.transform_bounds(&b))
    }

    /// Prepare a composite for rendering.
    ///
    /// Finalizes nested composites first, pushes this surface's material down
    /// to every descendant without an explicit one, then caches each group's
    /// bounding box. Finalizing twice gives the same result.
    pub fn finalize(&mut self) {
        for child in self.children_mut() {
            child.finalize();
        }

        if let Some(material) = self.material.shared().cloned() {
            for child in self.children_mut() {
                child.inherit_material(&material);
            }
        }

        if let Shape::Group(group) = &mut self.shape {
            let bounds = group.bounds_of_children().map(|b| b.adjust());
            group.set_bounding_box(bounds);
            log::debug!(
                "finalized group of {} children, bounds {:?}",
                group.len(),
                bounds
            );
        }
    }

    fn inherit_material(&mut self, material: &Arc<Material>) {
        self.material.inherit(material);

        if let Some(effective) = self.material.shared().cloned() {
            for child in self.children_mut() {
                child.inherit_material(&effective);
            }
        }
    }

    /// Check that every transform in the tree can be inverted.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.transform.is_invertible() {
            log::warn!("Rejecting {} with singular transform", self.kind_name());
            return Err(RenderError::SingularTransform {
                kind: self.kind_name(),
            });
        }
        self.children().iter().try_for_each(|c| c.validate())
    }
}
