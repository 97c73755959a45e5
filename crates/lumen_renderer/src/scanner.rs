//! Scanners: strategies for walking the canvas and shading each pixel.
//!
//! All scanners produce identical images. They only differ in how the work
//! is split across rayon's worker threads.

use lumen_core::{Canvas, Color};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{camera::Projection, Camera, Scene};

/// Fills every pixel of a canvas with the color seen through it.
pub trait Scanner: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Render `scene` into `canvas`, allowing `bounces` levels of recursion.
    fn scan(&self, camera: &Camera, scene: &Scene, canvas: &mut Canvas, bounces: u32);
}

#[inline]
fn shade_pixel(projection: &Projection, scene: &Scene, x: usize, y: usize, bounces: u32) -> Color {
    scene.color_for(&projection.ray_for_pixel(x, y), bounces)
}

/// Row by row on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleThreadedScanner;

impl Scanner for SingleThreadedScanner {
    fn name(&self) -> &'static str {
        "single-threaded"
    }

    fn scan(&self, camera: &Camera, scene: &Scene, canvas: &mut Canvas, bounces: u32) {
        if canvas.is_empty() {
            return;
        }
        let projection = camera.projection(canvas.width(), canvas.height());

        for (y, row) in canvas.rows_mut().enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = shade_pixel(&projection, scene, x, y, bounces);
            }
        }
    }
}

/// One rayon task per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParallelScanner;

impl Scanner for LineParallelScanner {
    fn name(&self) -> &'static str {
        "line-parallel"
    }

    fn scan(&self, camera: &Camera, scene: &Scene, canvas: &mut Canvas, bounces: u32) {
        if canvas.is_empty() {
            return;
        }
        let width = canvas.width();
        let projection = camera.projection(width, canvas.height());

        canvas
            .pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = shade_pixel(&projection, scene, x, y, bounces);
                }
            });
    }
}

/// One rayon task per pixel; rayon splits the range adaptively.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelParallelScanner;

impl Scanner for PixelParallelScanner {
    fn name(&self) -> &'static str {
        "pixel-parallel"
    }

    fn scan(&self, camera: &Camera, scene: &Scene, canvas: &mut Canvas, bounces: u32) {
        if canvas.is_empty() {
            return;
        }
        let width = canvas.width();
        let projection = camera.projection(width, canvas.height());

        canvas
            .pixels_mut()
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, pixel)| {
                *pixel = shade_pixel(&projection, scene, i % width, i / width, bounces);
            });
    }
}

/// Scanner selection, as it appears in a render configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScannerKind {
    SingleThreaded,
    LineParallel,
    #[default]
    PixelParallel,
}

impl ScannerKind {
    pub fn scanner(self) -> Box<dyn Scanner> {
        match self {
            ScannerKind::SingleThreaded => Box::new(SingleThreadedScanner),
            ScannerKind::LineParallel => Box::new(LineParallelScanner),
            ScannerKind::PixelParallel => Box::new(PixelParallelScanner),
        }
    }
}
