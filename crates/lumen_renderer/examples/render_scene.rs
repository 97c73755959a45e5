//! Renders a showcase scene and saves it as a PNG.
//!
//! Usage: `cargo run --release --example render_scene [config.json] [output.png]`
//!
//! The optional JSON file holds a `RenderConfig`, e.g.
//! `{ "bounces": 4, "scanner": "line_parallel", "threads": 8 }`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

use anyhow::{Context, Result};
use lumen_core::{color::rgb, Canvas, Material, PointLight};
use lumen_math::{DMat4, DVec3};
use lumen_renderer::{render, Camera, CsgOperation, RenderConfig, Scene, Surface};
use rand::{Rng, SeedableRng};

const WIDTH: usize = 640;
const HEIGHT: usize = 360;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            RenderConfig::from_json(&json)?
        }
        None => RenderConfig::default(),
    };
    let output = args.next().unwrap_or_else(|| "output.png".to_string());

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    log::info!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(
        DVec3::new(0.0, 3.0, -9.0),
        DVec3::new(0.0, 0.8, 0.0),
        DVec3::Y,
        FRAC_PI_3,
    );

    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    render(&camera, &scene, &mut canvas, &config)?;

    image::save_buffer(
        &output,
        &canvas.to_rgba8(),
        WIDTH as u32,
        HEIGHT as u32,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to save {}", output))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let floor = Surface::plane().with_material(
        Material::new(rgb(0.35, 0.35, 0.4))
            .with_phong(0.1, 0.8, 0.1, 50.0)
            .with_reflective(0.2),
    );

    let glass = Surface::sphere()
        .with_transform(DMat4::from_translation(DVec3::new(0.0, 1.0, 0.0)))
        .with_material(Material::glass().with_reflective(0.9))
        .with_no_shadow(true);

    // Rounded die: cube intersected with a sphere, minus a cylinder bore
    let die = Surface::csg_chain(
        CsgOperation::Difference,
        vec![
            Surface::csg(
                CsgOperation::Intersection,
                Surface::cube(),
                Surface::sphere().with_transform(DMat4::from_scale(DVec3::splat(1.35))),
            ),
            Surface::cylinder(-2.0, 2.0, true)
                .with_transform(DMat4::from_scale(DVec3::new(0.5, 1.0, 0.5))),
        ],
    )?
    .with_transform(
        DMat4::from_translation(DVec3::new(-2.8, 1.0, 0.5)) * DMat4::from_rotation_y(FRAC_PI_4),
    )
    .with_material(Material::new(rgb(0.9, 0.3, 0.2)));

    let ring = Surface::torus(1.0, 0.25)
        .with_transform(
            DMat4::from_translation(DVec3::new(2.8, 1.0, 0.5)) * DMat4::from_rotation_x(FRAC_PI_2 * 0.7),
        )
        .with_material(Material::new(rgb(0.9, 0.75, 0.3)).with_reflective(0.4));

    let cone = Surface::conic(-1.0, 0.0, true)
        .with_transform(
            DMat4::from_translation(DVec3::new(0.0, 1.0, 3.0)) * DMat4::from_scale(DVec3::new(0.6, 1.0, 0.6)),
        )
        .with_material(Material::new(rgb(0.3, 0.6, 0.9)));

    let pyramid = Surface::group(vec![
        Surface::triangle(DVec3::new(-1.0, 0.0, -1.0), DVec3::new(1.0, 0.0, -1.0), DVec3::new(0.0, 1.5, 0.0)),
        Surface::triangle(DVec3::new(1.0, 0.0, -1.0), DVec3::new(1.0, 0.0, 1.0), DVec3::new(0.0, 1.5, 0.0)),
        Surface::triangle(DVec3::new(1.0, 0.0, 1.0), DVec3::new(-1.0, 0.0, 1.0), DVec3::new(0.0, 1.5, 0.0)),
        Surface::triangle(DVec3::new(-1.0, 0.0, 1.0), DVec3::new(-1.0, 0.0, -1.0), DVec3::new(0.0, 1.5, 0.0)),
    ])
    .with_transform(DMat4::from_translation(DVec3::new(-1.6, 0.0, 3.2)))
    .with_material(Material::new(rgb(0.4, 0.8, 0.4)));

    // A scatter of small spheres, one group so the box prunes them together
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let pebbles = (0..24)
        .map(|_| {
            let position = DVec3::new(rng.gen_range(-4.5..4.5), 0.2, rng.gen_range(-3.0..-1.5));
            let color = rgb(rng.gen(), rng.gen(), rng.gen());
            Surface::sphere()
                .with_transform(DMat4::from_translation(position) * DMat4::from_scale(DVec3::splat(0.2)))
                .with_material(Material::new(color).with_reflective(rng.gen_range(0.0..0.3)))
        })
        .collect();

    let scene = Scene::new()
        .with_light(PointLight::white(DVec3::new(-8.0, 10.0, -10.0)))
        .with_light(PointLight::new(DVec3::new(6.0, 6.0, -6.0), rgb(0.3, 0.3, 0.35)))
        .with_background(rgb(0.05, 0.07, 0.12))
        .with_surface(floor)
        .with_surface(glass)
        .with_surface(die)
        .with_surface(ring)
        .with_surface(cone)
        .with_surface(pyramid)
        .with_surface(Surface::group(pebbles));

    log::info!("Created {} top-level surfaces", scene.surfaces().len());
    Ok(scene)
}
