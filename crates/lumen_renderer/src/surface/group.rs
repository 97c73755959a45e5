//! Groups: composite surfaces that transform and prune their children.

use lumen_math::{BoundingBox, DMat4, Ray};

use super::Surface;
use crate::intersection::Intersections;

/// An ordered collection of child surfaces sharing one transform.
///
/// After [`Surface::finalize`] a bounded group carries a box around all of its
/// children, and a ray that misses the box skips the children entirely.
#[derive(Debug, Clone, Default)]
pub struct Group {
    children: Vec<Surface>,
    bounding_box: Option<BoundingBox>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: Vec<Surface>) -> Self {
        Self {
            children,
            bounding_box: None,
        }
    }

    /// Add a child. Call [`Surface::finalize`] again afterwards.
    pub fn add_child(&mut self, child: Surface) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Surface] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Surface] {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The cached box in the group's local space, if any.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
    }

    /// Override the cached box. `None` disables pruning.
    pub fn set_bounding_box(&mut self, bounding_box: Option<BoundingBox>) {
        self.bounding_box = bounding_box;
    }

    /// Union of every child's bounds, or `None` if any child is infinite.
    pub(crate) fn bounds_of_children(&self) -> Option<BoundingBox> {
        self.children
            .iter()
            .try_fold(BoundingBox::EMPTY, |acc, child| {
                child.bounds().map(|b| acc.union(&b))
            })
    }

    pub(crate) fn intersect_children<'a>(
        &'a self,
        ray: &Ray,
        world_to_local: &DMat4,
        xs: &mut Intersections<'a>,
    ) {
        if let Some(bbox) = &self.bounding_box {
            if !bbox.hit(ray) {
                return;
            }
        }

        for child in &self.children {
            child.intersect_from(ray, world_to_local, xs);
        }
    }
}
