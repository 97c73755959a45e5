use lumen_math::Point;

use crate::{color, Color};

/// A point light: infinitely small, radiating equally in every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point,
    pub color: Color,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }

    /// A white light at `position`.
    pub fn white(position: Point) -> Self {
        Self::new(position, color::WHITE)
    }
}
