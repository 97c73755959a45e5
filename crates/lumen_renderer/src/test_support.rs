//! Fixtures shared by the unit tests.

use lumen_core::{color::rgb, Color, Material, PigmentSource, PointLight};
use lumen_math::{DMat4, DVec3, Point};

use crate::{Scene, Surface};

/// Pigment that returns the sample point as a color.
#[derive(Debug)]
pub struct PointPigment;

impl PigmentSource for PointPigment {
    fn color_at(&self, point: Point) -> Color {
        point
    }
}

pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

#[track_caller]
pub fn assert_color(actual: Color, expected: Color) {
    assert!(
        (actual - expected).abs().max_element() < 1e-4,
        "color {:?} should be {:?}",
        actual,
        expected
    );
}

pub fn outer_material() -> Material {
    Material::new(rgb(0.8, 1.0, 0.6)).with_phong(0.1, 0.7, 0.2, 200.0)
}

/// Unit sphere of the default scene.
pub fn outer_sphere() -> Surface {
    Surface::sphere().with_material(outer_material())
}

/// Half-size sphere nested inside [`outer_sphere`].
pub fn inner_sphere() -> Surface {
    Surface::sphere().with_transform(DMat4::from_scale(DVec3::splat(0.5)))
}

pub fn glass_sphere() -> Surface {
    Surface::sphere().with_material(Material::glass())
}

/// Two concentric spheres lit by one white light up and to the left.
pub fn default_scene() -> Scene {
    Scene::new()
        .with_light(PointLight::white(DVec3::new(-10.0, 10.0, -10.0)))
        .with_surface(outer_sphere())
        .with_surface(inner_sphere())
}
