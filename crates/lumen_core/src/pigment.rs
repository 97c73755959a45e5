//! Pigments: where a surface's base color comes from.
//!
//! Pattern generation (checkers, stripes, noise...) lives outside the
//! renderer. All the renderer needs is the "evaluate at a point" contract.

use std::fmt;
use std::sync::Arc;

use lumen_math::Point;

use crate::Color;

/// A color source that varies over space.
pub trait PigmentSource: Send + Sync + fmt::Debug {
    /// Color at a world-space point.
    fn color_at(&self, point: Point) -> Color;
}

/// The color source of a material or of the scene background.
#[derive(Clone, Debug)]
pub enum Pigment {
    /// The same color everywhere.
    Solid(Color),
    /// An externally supplied pattern.
    Pattern(Arc<dyn PigmentSource>),
}

impl Pigment {
    /// Create a solid pigment.
    pub const fn solid(color: Color) -> Self {
        Pigment::Solid(color)
    }

    /// Wrap a pattern source.
    pub fn pattern(source: impl PigmentSource + 'static) -> Self {
        Pigment::Pattern(Arc::new(source))
    }

    /// Evaluate the pigment at a point.
    #[inline]
    pub fn color_at(&self, point: Point) -> Color {
        match self {
            Pigment::Solid(color) => *color,
            Pigment::Pattern(source) => source.color_at(point),
        }
    }
}

impl From<Color> for Pigment {
    fn from(color: Color) -> Self {
        Pigment::Solid(color)
    }
}

impl Default for Pigment {
    fn default() -> Self {
        Pigment::Solid(crate::color::WHITE)
    }
}
