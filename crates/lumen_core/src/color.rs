//! RGB colors.
//!
//! Colors share the f64 vector type so the usual arithmetic (sum, scale and
//! the component-wise "Hadamard" product used to tint light) comes for free.

use lumen_math::DVec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// No light at all. Also the contribution of an exhausted bounce budget.
pub const BLACK: Color = DVec3::ZERO;

/// Full-intensity white.
pub const WHITE: Color = DVec3::ONE;

/// Build a color from its red, green and blue channels.
#[inline]
pub const fn rgb(red: f64, green: f64, blue: f64) -> Color {
    DVec3::new(red, green, blue)
}

/// Convert a channel to 8 bits, clamping to [0, 1] first.
#[inline]
fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [
        channel_to_u8(color.x),
        channel_to_u8(color.y),
        channel_to_u8(color.z),
        255,
    ]
}
