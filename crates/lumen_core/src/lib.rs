//! Lumen Core - scene data shared by the renderer.
//!
//! This crate provides:
//!
//! - **Shading inputs**: `Color`, `Pigment`, `Material`, `PointLight`
//! - **Material inheritance**: `MaterialBinding`, the unset / inherited /
//!   explicit tri-state pushed down through groups
//! - **Output**: `Canvas`, the pixel grid a render writes into
//!
//! # Example
//!
//! ```
//! use lumen_core::{color, Canvas, Material};
//!
//! let mut canvas = Canvas::new(4, 2);
//! canvas.set_pixel(3, 1, color::rgb(1.0, 0.5, 0.0));
//! assert_eq!(canvas.get_pixel(3, 1), color::rgb(1.0, 0.5, 0.0));
//!
//! let glass = Material::default().with_transparency(1.0).with_refractive_index(1.5);
//! assert_eq!(glass.refractive_index, 1.5);
//! ```

pub mod canvas;
pub mod color;
pub mod light;
pub mod material;
pub mod pigment;

// Re-export commonly used types
pub use canvas::Canvas;
pub use color::{color_to_rgba, Color};
pub use light::PointLight;
pub use material::{Material, MaterialBinding};
pub use pigment::{Pigment, PigmentSource};
