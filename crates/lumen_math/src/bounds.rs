use crate::{Point, Ray, DVec3};

/// Minimum thickness enforced by [`BoundingBox::adjust`].
const MIN_THICKNESS: f64 = 0.0001;

/// Axis-aligned bounding box used to prune whole groups of surfaces.
///
/// Defined by its minimum and maximum corners. A box whose `min` exceeds
/// its `max` on any axis is empty and is never hit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Create a box from its two corners, as given.
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a box spanning two arbitrary corner points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create the smallest box containing every point of the iterator.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |acc, p| acc.include_point(p))
    }

    /// Returns the union of this box and another.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns this box grown to contain a point.
    pub fn include_point(&self, point: Point) -> BoundingBox {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// True if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// True if the point lies inside or on the box.
    pub fn contains_point(&self, point: Point) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Pad any axis thinner than a minimum thickness.
    ///
    /// A group whose children are all coplanar (a flat mesh, say) would
    /// otherwise roll up into a zero-volume box that grazing rays can slip past.
    pub fn adjust(&self) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }

        let mut adjusted = *self;
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] < MIN_THICKNESS {
                adjusted.min[axis] -= MIN_THICKNESS / 2.0;
                adjusted.max[axis] += MIN_THICKNESS / 2.0;
            }
        }
        adjusted
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min, self.max);
        [
            DVec3::new(a.x, a.y, a.z),
            DVec3::new(b.x, a.y, a.z),
            DVec3::new(a.x, b.y, a.z),
            DVec3::new(b.x, b.y, a.z),
            DVec3::new(a.x, a.y, b.z),
            DVec3::new(b.x, a.y, b.z),
            DVec3::new(a.x, b.y, b.z),
            DVec3::new(b.x, b.y, b.z),
        ]
    }

    /// Test if the line carrying a ray crosses this box.
    ///
    /// Hits behind the origin count too: refraction and CSG need every
    /// crossing, not just the ones ahead. Uses the slab method, clipping the
    /// parameter range against each pair of axis-aligned planes.
    pub fn hit(&self, r: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let (mut t_min, mut t_max) = (f64::NEG_INFINITY, f64::INFINITY);
        for axis in 0..3 {
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (self.min[axis] - r.origin[axis]) * adinv;
            let mut t1 = (self.max[axis] - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t0.max(t_min);
            t_max = t1.min(t_max);
            if t_max < t_min {
                return false;
            }
        }

        true
    }

    /// An empty box (contains nothing, identity for [`BoundingBox::union`]).
    pub const EMPTY: BoundingBox = BoundingBox {
        min: DVec3::INFINITY,
        max: DVec3::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = BoundingBox::from_points(DVec3::new(10.0, 0.0, 5.0), DVec3::new(0.0, 10.0, 0.0));

        assert_eq!(bounds.min, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, DVec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_bounds_union() {
        let a = BoundingBox::new(DVec3::ZERO, DVec3::splat(5.0));
        let b = BoundingBox::new(DVec3::splat(3.0), DVec3::splat(10.0));
        let u = a.union(&b);

        assert_eq!(u.min, DVec3::ZERO);
        assert_eq!(u.max, DVec3::splat(10.0));
    }

    #[test]
    fn test_union_with_empty_is_identity() {
        let a = BoundingBox::new(DVec3::splat(-1.0), DVec3::ONE);
        assert_eq!(BoundingBox::EMPTY.union(&a), a);
        assert!(BoundingBox::EMPTY.is_empty());
    }

    #[test]
    fn test_include_point() {
        let bounds = BoundingBox::enclosing([
            DVec3::new(-5.0, 2.0, 0.0),
            DVec3::new(7.0, 0.0, -3.0),
        ]);

        assert_eq!(bounds.min, DVec3::new(-5.0, 0.0, -3.0));
        assert_eq!(bounds.max, DVec3::new(7.0, 2.0, 0.0));
    }

    #[test]
    fn test_adjust_pads_flat_box() {
        let flat = BoundingBox::new(DVec3::new(-1.0, 0.0, -1.0), DVec3::new(1.0, 0.0, 1.0));
        let adjusted = flat.adjust();

        assert!(adjusted.max.y - adjusted.min.y >= MIN_THICKNESS);
        assert!((adjusted.min.y + adjusted.max.y).abs() < 1e-12);
        assert_eq!((adjusted.min.x, adjusted.max.x), (flat.min.x, flat.max.x));
        assert!(!BoundingBox::EMPTY.adjust().contains_point(DVec3::ZERO));
    }

    #[test]
    fn test_bounds_hit() {
        let bounds = BoundingBox::new(DVec3::splat(-1.0), DVec3::ONE);

        // Ray pointing at center
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        assert!(bounds.hit(&ray));

        // Ray pointing away, but the whole line still crosses the box
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::NEG_Z);
        assert!(bounds.hit(&ray));

        // Ray missing the box
        let ray = Ray::new(DVec3::new(10.0, 0.0, 0.0), DVec3::Z);
        assert!(!bounds.hit(&ray));
    }

    #[test]
    fn test_contains_point() {
        let bounds = BoundingBox::new(DVec3::splat(-1.0), DVec3::ONE);
        assert!(bounds.contains_point(DVec3::ZERO));
        assert!(bounds.contains_point(DVec3::ONE));
        assert!(!bounds.contains_point(DVec3::new(0.0, 1.5, 0.0)));
    }
}
