//! Constructive solid geometry.
//!
//! A CSG node intersects both operands, then walks the merged hits in order
//! while tracking whether the ray is currently inside each operand. Only the
//! hits that lie on the boundary of the combined solid survive.

use lumen_math::{BoundingBox, DMat4, Ray};
use serde::{Deserialize, Serialize};

use super::Surface;
use crate::intersection::{Intersection, Intersections};

/// How a CSG node combines its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsgOperation {
    /// Everything inside either operand
    Union,
    /// Only what is inside both
    Intersection,
    /// The left operand minus the right
    Difference,
}

impl CsgOperation {
    /// Decide whether a hit survives.
    ///
    /// `left_hit` says which operand was struck; `in_left` and `in_right` say
    /// whether the ray is inside each operand just before the hit.
    pub fn allows(self, left_hit: bool, in_left: bool, in_right: bool) -> bool {
        match self {
            CsgOperation::Union => (left_hit && !in_right) || (!left_hit && !in_left),
            CsgOperation::Intersection => (left_hit && in_right) || (!left_hit && in_left),
            CsgOperation::Difference => (left_hit && !in_right) || (!left_hit && in_left),
        }
    }
}

/// Two operands combined by a [`CsgOperation`].
#[derive(Debug, Clone)]
pub struct Csg {
    operation: CsgOperation,
    left: Box<Surface>,
    right: Box<Surface>,
}

impl Csg {
    pub fn new(operation: CsgOperation, left: Surface, right: Surface) -> Self {
        Self {
            operation,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn operation(&self) -> CsgOperation {
        self.operation
    }

    pub fn left(&self) -> &Surface {
        &self.left
    }

    pub fn right(&self) -> &Surface {
        &self.right
    }

    pub(crate) fn operands_mut(&mut self) -> (&mut Surface, &mut Surface) {
        (&mut self.left, &mut self.right)
    }

    /// Keep only the hits on the boundary of the combined solid.
    ///
    /// `xs` must be sorted by `t`. Hits on surfaces outside both operands
    /// count as right-operand hits.
    pub fn filter_intersections<'a>(&self, xs: &[Intersection<'a>]) -> Vec<Intersection<'a>> {
        let mut in_left = false;
        let mut in_right = false;
        let mut kept = Vec::new();

        for x in xs {
            let left_hit = self.left.includes(x.surface());

            if self.operation.allows(left_hit, in_left, in_right) {
                kept.push(*x);
            }

            if left_hit {
                in_left = !in_left;
            } else {
                in_right = !in_right;
            }
        }
        kept
    }

    /// Union of both operands' bounds. Filtering can only remove hits.
    pub(crate) fn bounds_of_operands(&self) -> Option<BoundingBox> {
        Some(self.left.bounds()?.union(&self.right.bounds()?))
    }

    pub(crate) fn intersect_operands<'a>(
        &'a self,
        ray: &Ray,
        world_to_local: &DMat4,
        xs: &mut Intersections<'a>,
    ) {
        let mut both = Intersections::new();
        self.left.intersect_from(ray, world_to_local, &mut both);
        self.right.intersect_from(ray, world_to_local, &mut both);
        both.sort();

        xs.extend(self.filter_intersections(&both));
    }
}
