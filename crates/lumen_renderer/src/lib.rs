//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Traces one primary ray per pixel through a scene of analytic surfaces,
//! shading hits with the Phong model plus recursive mirror reflection and
//! Fresnel-weighted refraction. Groups prune their children with bounding
//! boxes; CSG nodes combine two operands by union, intersection or
//! difference.
//!
//! # Example
//!
//! ```
//! use lumen_core::{color, Canvas, Material, PointLight};
//! use lumen_math::DVec3;
//! use lumen_renderer::{render, Camera, RenderConfig, Scene, Surface};
//!
//! let scene = Scene::new()
//!     .with_light(PointLight::white(DVec3::new(-10.0, 10.0, -10.0)))
//!     .with_surface(Surface::sphere().with_material(Material::new(color::rgb(1.0, 0.2, 0.2))));
//! let camera = Camera::new(DVec3::new(0.0, 0.0, -5.0), DVec3::ZERO, DVec3::Y, 1.0);
//!
//! let mut canvas = Canvas::new(16, 16);
//! render(&camera, &scene, &mut canvas, &RenderConfig::default()).unwrap();
//! assert_ne!(canvas.get_pixel(8, 8), color::BLACK);
//! ```

mod camera;
mod error;
mod intersection;
mod renderer;
mod scanner;
mod scene;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

pub use camera::{Camera, Projection};
pub use error::{RenderError, RenderResult};
pub use intersection::{schlick, Intersection, Intersections, PreparedHit};
pub use renderer::{render, RenderConfig};
pub use scanner::{
    LineParallelScanner, PixelParallelScanner, Scanner, ScannerKind, SingleThreadedScanner,
};
pub use scene::{lighting, Scene};
pub use surface::{CsgOperation, Shape, Surface};
