//! Render entry point and configuration.

use std::time::Instant;

use lumen_core::Canvas;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::scanner::ScannerKind;
use crate::{Camera, Scene};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Reflection/refraction recursion depth
    pub bounces: u32,
    /// How pixels are distributed over threads
    pub scanner: ScannerKind,
    /// Worker threads; `None` uses rayon's global pool
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bounces: 5,
            scanner: ScannerKind::default(),
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_bounces(mut self, bounces: u32) -> Self {
        self.bounces = bounces;
        self
    }

    pub fn with_scanner(mut self, scanner: ScannerKind) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Render `scene` as seen by `camera` into `canvas`.
///
/// The canvas size decides the resolution. Every pixel is overwritten.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    canvas: &mut Canvas,
    config: &RenderConfig,
) -> RenderResult<()> {
    if canvas.is_empty() {
        return Err(RenderError::EmptyCanvas {
            width: canvas.width(),
            height: canvas.height(),
        });
    }
    camera.validate()?;
    scene.validate()?;

    let scanner = config.scanner.scanner();
    log::info!(
        "Rendering {}x{} with {} scanner, {} surfaces, {} lights, {} bounces",
        canvas.width(),
        canvas.height(),
        scanner.name(),
        scene.surfaces().len(),
        scene.lights().len(),
        config.bounces
    );

    let start = Instant::now();
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            log::debug!("Using dedicated pool of {} threads", pool.current_num_threads());
            pool.install(|| scanner.scan(camera, scene, canvas, config.bounces));
        }
        None => scanner.scan(camera, scene, canvas, config.bounces),
    }

    log::info!("Render complete in {:.2?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_color, default_scene, init_logging};
    use lumen_core::color::rgb;
    use lumen_math::{DMat4, DVec3};
    use std::f64::consts::FRAC_PI_2;

    fn camera() -> Camera {
        Camera::new(DVec3::new(0.0, 0.0, -5.0), DVec3::ZERO, DVec3::Y, FRAC_PI_2)
    }

    #[test]
    fn test_render_default_scene_centre_pixel() {
        init_logging();
        let scene = default_scene();
        let mut canvas = Canvas::new(11, 11);

        render(&camera(), &scene, &mut canvas, &RenderConfig::default()).unwrap();
        assert_color(canvas.get_pixel(5, 5), rgb(0.380661, 0.475826, 0.285496));
    }

    #[test]
    fn test_render_with_dedicated_pool() {
        let scene = default_scene();
        let mut pooled = Canvas::new(11, 11);
        let mut global = Canvas::new(11, 11);

        let config = RenderConfig::default().with_threads(2);
        render(&camera(), &scene, &mut pooled, &config).unwrap();
        render(&camera(), &scene, &mut global, &RenderConfig::default()).unwrap();

        assert_eq!(pooled, global);
    }

    #[test]
    fn test_render_rejects_empty_canvas() {
        let mut canvas = Canvas::new(0, 5);
        let err = render(&camera(), &default_scene(), &mut canvas, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::EmptyCanvas { width: 0, height: 5 }));
    }

    #[test]
    fn test_render_rejects_singular_surface() {
        let scene = default_scene()
            .with_surface(crate::Surface::cube().with_transform(DMat4::from_scale(DVec3::new(0.0, 1.0, 1.0))));
        let mut canvas = Canvas::new(4, 4);

        let err = render(&camera(), &scene, &mut canvas, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::SingularTransform { kind: "cube" }));
    }

    #[test]
    fn test_render_rejects_degenerate_camera() {
        let camera = Camera::default().with_look_at(DVec3::ZERO);
        let mut canvas = Canvas::new(4, 4);

        let err = render(&camera, &default_scene(), &mut canvas, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::SingularTransform { kind: "camera" }));
    }

    #[test]
    fn test_config_from_json() {
        let config = RenderConfig::from_json(r#"{ "bounces": 2, "scanner": "single_threaded" }"#).unwrap();

        assert_eq!(config.bounces, 2);
        assert_eq!(config.scanner, ScannerKind::SingleThreaded);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_config_from_bad_json() {
        let err = RenderConfig::from_json(r#"{ "scanner": "tiled" }"#).unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_config_builders() {
        let config = RenderConfig::default()
            .with_bounces(1)
            .with_scanner(ScannerKind::LineParallel)
            .with_threads(3);

        assert_eq!(
            config,
            RenderConfig {
                bounces: 1,
                scanner: ScannerKind::LineParallel,
                threads: Some(3),
            }
        );
    }
}
