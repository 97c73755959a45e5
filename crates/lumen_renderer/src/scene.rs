//! Scene description and the recursive Whitted shading model.

use lumen_core::{color, Color, Material, Pigment, PointLight};
use lumen_math::{reflect, Near, Point, Ray, Vector};

use crate::error::RenderResult;
use crate::intersection::{Intersections, PreparedHit};
use crate::surface::Surface;

/// Lights, surfaces and what a ray sees when it escapes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    lights: Vec<PointLight>,
    surfaces: Vec<Surface>,
    background: Option<Pigment>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_light(mut self, light: PointLight) -> Self {
        self.add_light(light);
        self
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.add_surface(surface);
        self
    }

    /// Pigment sampled with the ray direction when nothing is hit.
    pub fn with_background(mut self, background: impl Into<Pigment>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Add a top-level surface, finalizing it if it is a composite.
    pub fn add_surface(&mut self, mut surface: Surface) {
        surface.finalize();
        self.surfaces.push(surface);
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn background(&self) -> Option<&Pigment> {
        self.background.as_ref()
    }

    /// Check every surface transform can be inverted.
    pub fn validate(&self) -> RenderResult<()> {
        self.surfaces.iter().try_for_each(Surface::validate)
    }

    /// All intersections of a world-space ray, sorted by `t`.
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Intersections<'a> {
        let mut xs = Intersections::new();
        for surface in &self.surfaces {
            surface.intersect(ray, &mut xs);
        }
        xs.sort();
        xs
    }

    /// Color seen along a ray. `remaining` bounds the reflection and
    /// refraction recursion.
    pub fn color_for(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match xs.hit() {
            Some(hit) => self.hit_color(&hit.prepare(ray, &xs), remaining),
            None => self.background_color(ray),
        }
    }

    /// Shade a prepared hit: direct light from every source plus
    /// reflected and refracted contributions.
    pub fn hit_color(&self, hit: &PreparedHit, remaining: u32) -> Color {
        let material = hit.surface.material();

        let surface: Color = self
            .lights
            .iter()
            .map(|light| {
                let in_shadow = self.is_in_shadow(light, hit.over_point);
                lighting(material, light, hit.point, hit.eye, hit.normal, in_shadow)
            })
            .sum();

        let reflected = self.reflected_color(hit, remaining);
        let refracted = self.refracted_color(hit, remaining);

        if material.reflective > 0.0 && material.transparency > 0.0 {
            surface + reflected * hit.reflectance + refracted * (1.0 - hit.reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// True if the nearest surface between `point` and the light casts
    /// shadows. A `no_shadow` surface in front hides anything behind it.
    pub fn is_in_shadow(&self, light: &PointLight, point: Point) -> bool {
        let to_light = light.position - point;
        let distance = to_light.length();
        let ray = Ray::new(point, to_light / distance);

        self.intersect(&ray)
            .hit()
            .is_some_and(|x| x.t < distance && !x.surface().no_shadow())
    }

    /// Mirror contribution, scaled by the surface's reflectivity.
    pub fn reflected_color(&self, hit: &PreparedHit, remaining: u32) -> Color {
        let reflective = hit.surface.material().reflective;
        if remaining == 0 || reflective.near(&0.0) {
            return color::BLACK;
        }

        let ray = Ray::new(hit.over_point, hit.reflect);
        self.color_for(&ray, remaining - 1) * reflective
    }

    /// Transmitted contribution, scaled by the surface's transparency.
    pub fn refracted_color(&self, hit: &PreparedHit, remaining: u32) -> Color {
        let transparency = hit.surface.material().transparency;
        if remaining == 0 || transparency.near(&0.0) {
            return color::BLACK;
        }

        // Snell's law
        let n_ratio = hit.n1 / hit.n2;
        let cos_i = hit.eye.dot(hit.normal);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            // Total internal reflection
            return color::BLACK;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = hit.normal * (n_ratio * cos_i - cos_t) - hit.eye * n_ratio;
        let ray = Ray::new(hit.under_point, direction);

        self.color_for(&ray, remaining - 1) * transparency
    }

    fn background_color(&self, ray: &Ray) -> Color {
        self.background
            .as_ref()
            .map_or(color::BLACK, |p| p.color_at(ray.direction.normalize()))
    }
}

/// Phong illumination of one point by one light.
///
/// The pigment is sampled at the world-space `point`. Points in shadow keep
/// only the ambient term.
pub fn lighting(
    material: &Material,
    light: &PointLight,
    point: Point,
    eye: Vector,
    normal: Vector,
    in_shadow: bool,
) -> Color {
    let pigment = material.pigment.color_at(point);
    let ambient = pigment * material.ambient;
    if in_shadow {
        return ambient;
    }

    let to_light = (light.position - point).normalize();
    let light_dot_normal = to_light.dot(normal);
    if light_dot_normal < 0.0 {
        // Light is on the other side of the surface
        return ambient;
    }

    let diffuse = pigment * material.diffuse * light_dot_normal;

    let reflect_dot_eye = reflect(-to_light, normal).dot(eye);
    let specular = if reflect_dot_eye <= 0.0 {
        color::BLACK
    } else {
        light.color * material.specular * reflect_dot_eye.powf(material.shininess)
    };

    ambient + diffuse + specular
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::Intersection;
    use crate::test_support::{
        assert_color, default_scene, glass_sphere, inner_sphere, outer_material, outer_sphere,
        PointPigment,
    };
    use lumen_core::color::rgb;
    use lumen_math::{DMat4, DVec3};
    use std::f64::consts::SQRT_2;

    fn white_light_at(position: DVec3) -> PointLight {
        PointLight::white(position)
    }

    mod phong {
        use super::*;

        fn shade(eye: DVec3, light: DVec3, in_shadow: bool) -> Color {
            lighting(
                &Material::default(),
                &white_light_at(light),
                DVec3::ZERO,
                eye,
                DVec3::NEG_Z,
                in_shadow,
            )
        }

        #[test]
        fn test_eye_between_light_and_surface() {
            assert_color(shade(DVec3::NEG_Z, DVec3::new(0.0, 0.0, -10.0), false), rgb(1.9, 1.9, 1.9));
        }

        #[test]
        fn test_eye_offset_45_degrees() {
            let eye = DVec3::new(0.0, SQRT_2 / 2.0, -SQRT_2 / 2.0);
            assert_color(shade(eye, DVec3::new(0.0, 0.0, -10.0), false), rgb(1.0, 1.0, 1.0));
        }

        #[test]
        fn test_light_offset_45_degrees() {
            let c = shade(DVec3::NEG_Z, DVec3::new(0.0, 10.0, -10.0), false);
            assert_color(c, rgb(0.7364, 0.7364, 0.7364));
        }

        #[test]
        fn test_eye_in_reflection_path() {
            let eye = DVec3::new(0.0, -SQRT_2 / 2.0, -SQRT_2 / 2.0);
            let c = shade(eye, DVec3::new(0.0, 10.0, -10.0), false);
            assert_color(c, rgb(1.6364, 1.6364, 1.6364));
        }

        #[test]
        fn test_light_behind_surface() {
            assert_color(shade(DVec3::NEG_Z, DVec3::new(0.0, 0.0, 10.0), false), rgb(0.1, 0.1, 0.1));
        }

        #[test]
        fn test_surface_in_shadow() {
            assert_color(shade(DVec3::NEG_Z, DVec3::new(0.0, 0.0, -10.0), true), rgb(0.1, 0.1, 0.1));
        }

        #[test]
        fn test_pigment_sampled_at_point() {
            let m = Material::default()
                .with_pigment(Pigment::pattern(PointPigment))
                .with_phong(1.0, 0.0, 0.0, 200.0);
            let light = white_light_at(DVec3::new(0.0, 0.0, -10.0));
            let point = DVec3::new(0.25, 0.5, 0.0);

            let c = lighting(&m, &light, point, DVec3::NEG_Z, DVec3::NEG_Z, false);
            assert_color(c, rgb(0.25, 0.5, 0.0));
        }
    }

    #[test]
    fn test_intersect_default_scene() {
        let scene = default_scene();
        let xs = scene.intersect(&Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z));

        let ts: Vec<f64> = xs.iter().map(|x| x.t).collect();
        assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
    }

    #[test]
    fn test_hit_color_outside() {
        let scene = default_scene();
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let x = Intersection::new(4.0, &scene.surfaces()[0]).unwrap();

        let c = scene.hit_color(&x.prepare(&ray, &[x]), 5);
        assert_color(c, rgb(0.380661, 0.475826, 0.285496));
    }

    #[test]
    fn test_hit_color_inside() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(0.0, 0.25, 0.0)))
            .with_surface(outer_sphere())
            .with_surface(inner_sphere());
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let x = Intersection::new(0.5, &scene.surfaces()[1]).unwrap();

        let c = scene.hit_color(&x.prepare(&ray, &[x]), 5);
        assert_color(c, rgb(0.90498, 0.90498, 0.90498));
    }

    #[test]
    fn test_hit_in_shadow_gets_ambient_only() {
        let s2 = Surface::sphere().with_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, 10.0)));
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(0.0, 0.0, -10.0)))
            .with_surface(Surface::sphere())
            .with_surface(s2);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::Z);
        let x = Intersection::new(4.0, &scene.surfaces()[1]).unwrap();

        let c = scene.hit_color(&x.prepare(&ray, &[x]), 5);
        assert_color(c, rgb(0.1, 0.1, 0.1));
    }

    #[test]
    fn test_color_when_ray_misses() {
        let scene = default_scene();
        let c = scene.color_for(&Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Y), 5);
        assert_eq!(c, color::BLACK);
    }

    #[test]
    fn test_color_when_ray_hits() {
        let scene = default_scene();
        let c = scene.color_for(&Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z), 5);
        assert_color(c, rgb(0.380661, 0.475826, 0.285496));
    }

    #[test]
    fn test_color_with_hit_behind_ray() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(outer_sphere().with_material(outer_material().with_ambient(1.0)))
            .with_surface(inner_sphere().with_material(Material::default().with_ambient(1.0)));

        let c = scene.color_for(&Ray::new(DVec3::new(0.0, 0.0, 0.75), DVec3::NEG_Z), 5);
        assert_color(c, color::WHITE);
    }

    #[test]
    fn test_background_sampled_by_direction() {
        let scene = Scene::new().with_background(Pigment::pattern(PointPigment));
        let c = scene.color_for(&Ray::new(DVec3::ZERO, DVec3::new(0.0, 3.0, 4.0)), 5);
        assert_color(c, rgb(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_shadows() {
        let scene = default_scene();
        let light = &scene.lights()[0];
        let cases = [
            (DVec3::new(0.0, 10.0, 0.0), false),
            (DVec3::new(10.0, -10.0, 10.0), true),
            (DVec3::new(-20.0, 20.0, -20.0), false),
            (DVec3::new(-2.0, 2.0, -2.0), false),
        ];

        for (point, shadowed) in cases {
            assert_eq!(scene.is_in_shadow(light, point), shadowed, "point {:?}", point);
        }
    }

    #[test]
    fn test_no_shadow_surfaces_cast_no_shadow() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(outer_sphere().with_no_shadow(true))
            .with_surface(inner_sphere().with_no_shadow(true));

        assert!(!scene.is_in_shadow(&scene.lights()[0], DVec3::new(10.0, -10.0, 10.0)));
    }

    #[test]
    fn test_nearest_occluder_decides_shadow() {
        let near = Surface::sphere().with_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, -3.0)));
        let far = Surface::sphere().with_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, -6.0)));
        let light = white_light_at(DVec3::new(0.0, 0.0, -10.0));

        let scene = Scene::new()
            .with_light(light)
            .with_surface(near.clone().with_no_shadow(true))
            .with_surface(far.clone());
        assert!(!scene.is_in_shadow(&light, DVec3::ZERO));

        let scene = Scene::new()
            .with_light(light)
            .with_surface(near)
            .with_surface(far.with_no_shadow(true));
        assert!(scene.is_in_shadow(&light, DVec3::ZERO));
    }

    fn scene_with_mirror_floor() -> Scene {
        default_scene().with_surface(
            Surface::plane()
                .with_material(Material::default().with_reflective(0.5))
                .with_transform(DMat4::from_translation(DVec3::new(0.0, -1.0, 0.0))),
        )
    }

    fn ray_at_floor() -> Ray {
        Ray::new(
            DVec3::new(0.0, 0.0, -3.0),
            DVec3::new(0.0, -SQRT_2 / 2.0, SQRT_2 / 2.0),
        )
    }

    #[test]
    fn test_reflected_color_of_matte_surface() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(outer_sphere())
            .with_surface(inner_sphere().with_material(Material::default().with_ambient(1.0)));
        let ray = Ray::new(DVec3::ZERO, DVec3::Z);
        let x = Intersection::new(1.0, &scene.surfaces()[1]).unwrap();

        assert_eq!(scene.reflected_color(&x.prepare(&ray, &[x]), 5), color::BLACK);
    }

    #[test]
    fn test_reflected_color_of_mirror() {
        let scene = scene_with_mirror_floor();
        let ray = ray_at_floor();
        let x = Intersection::new(SQRT_2, &scene.surfaces()[2]).unwrap();

        let c = scene.reflected_color(&x.prepare(&ray, &[x]), 1);
        assert_color(c, rgb(0.190330, 0.237913, 0.142748));
    }

    #[test]
    fn test_reflected_color_at_recursion_limit() {
        let scene = scene_with_mirror_floor();
        let ray = ray_at_floor();
        let x = Intersection::new(SQRT_2, &scene.surfaces()[2]).unwrap();

        assert_eq!(scene.reflected_color(&x.prepare(&ray, &[x]), 0), color::BLACK);
    }

    #[test]
    fn test_hit_color_with_mirror() {
        let scene = scene_with_mirror_floor();
        let ray = ray_at_floor();
        let x = Intersection::new(SQRT_2, &scene.surfaces()[2]).unwrap();

        let c = scene.hit_color(&x.prepare(&ray, &[x]), 5);
        assert_color(c, rgb(0.87677, 0.92436, 0.82918));
    }

    #[test]
    fn test_parallel_mirrors_terminate() {
        let mirror = Material::default().with_reflective(1.0);
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::ZERO))
            .with_surface(
                Surface::plane()
                    .with_material(mirror.clone())
                    .with_transform(DMat4::from_translation(DVec3::new(0.0, -1.0, 0.0))),
            )
            .with_surface(
                Surface::plane()
                    .with_material(mirror)
                    .with_transform(DMat4::from_translation(DVec3::new(0.0, 1.0, 0.0))),
            );

        let c = scene.color_for(&Ray::new(DVec3::ZERO, DVec3::Y), 5);
        assert!(c.is_finite());
    }

    #[test]
    fn test_refracted_color_of_opaque_surface() {
        let scene = default_scene();
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let s = &scene.surfaces()[0];
        let xs: Vec<Intersection> = [4.0, 6.0].iter().filter_map(|&t| Intersection::new(t, s)).collect();

        assert_eq!(scene.refracted_color(&xs[0].prepare(&ray, &xs), 5), color::BLACK);
    }

    #[test]
    fn test_refracted_color_at_recursion_limit() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(glass_sphere());
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let s = &scene.surfaces()[0];
        let xs: Vec<Intersection> = [4.0, 6.0].iter().filter_map(|&t| Intersection::new(t, s)).collect();

        assert_eq!(scene.refracted_color(&xs[0].prepare(&ray, &xs), 0), color::BLACK);
    }

    #[test]
    fn test_refracted_color_under_total_internal_reflection() {
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(glass_sphere());
        let ray = Ray::new(DVec3::new(0.0, 0.0, SQRT_2 / 2.0), DVec3::Y);
        let s = &scene.surfaces()[0];
        let xs: Vec<Intersection> = [-SQRT_2 / 2.0, SQRT_2 / 2.0]
            .iter()
            .filter_map(|&t| Intersection::new(t, s))
            .collect();

        assert_eq!(scene.refracted_color(&xs[1].prepare(&ray, &xs), 5), color::BLACK);
    }

    #[test]
    fn test_refracted_color_through_nested_glass() {
        let outer = outer_sphere().with_material(
            outer_material()
                .with_ambient(1.0)
                .with_pigment(Pigment::pattern(PointPigment)),
        );
        let inner = inner_sphere().with_material(Material::glass());
        let scene = Scene::new()
            .with_light(white_light_at(DVec3::new(-10.0, 10.0, -10.0)))
            .with_surface(outer)
            .with_surface(inner);

        let (a, b) = (&scene.surfaces()[0], &scene.surfaces()[1]);
        let ray = Ray::new(DVec3::new(0.0, 0.0, 0.1), DVec3::Y);
        let xs: Vec<Intersection> = [(-0.9899, a), (-0.4899, b), (0.4899, b), (0.9899, a)]
            .iter()
            .filter_map(|&(t, s)| Intersection::new(t, s))
            .collect();

        let c = scene.refracted_color(&xs[2].prepare(&ray, &xs), 5);
        assert_color(c, rgb(0.0, 0.998886, 0.047217));
    }

    fn scene_with_glass_floor(floor: Material) -> Scene {
        default_scene()
            .with_surface(
                Surface::plane()
                    .with_material(floor)
                    .with_transform(DMat4::from_translation(DVec3::new(0.0, -1.0, 0.0))),
            )
            .with_surface(
                Surface::sphere()
                    .with_material(Material::new(rgb(1.0, 0.0, 0.0)).with_ambient(0.5))
                    .with_transform(DMat4::from_translation(DVec3::new(0.0, -3.5, -0.5))),
            )
    }

    #[test]
    fn test_hit_color_with_transparent_floor() {
        let scene = scene_with_glass_floor(
            Material::default()
                .with_transparency(0.5)
                .with_refractive_index(1.5),
        );
        let ray = ray_at_floor();
        let xs: Vec<Intersection> = [SQRT_2]
            .iter()
            .filter_map(|&t| Intersection::new(t, &scene.surfaces()[2]))
            .collect();

        let c = scene.hit_color(&xs[0].prepare(&ray, &xs), 5);
        assert_color(c, rgb(0.93642, 0.68642, 0.68642));
    }

    #[test]
    fn test_hit_color_blends_with_schlick() {
        let scene = scene_with_glass_floor(
            Material::default()
                .with_reflective(0.5)
                .with_transparency(0.5)
                .with_refractive_index(1.5),
        );
        let ray = ray_at_floor();
        let xs: Vec<Intersection> = [SQRT_2]
            .iter()
            .filter_map(|&t| Intersection::new(t, &scene.surfaces()[2]))
            .collect();

        let c = scene.hit_color(&xs[0].prepare(&ray, &xs), 5);
        assert_color(c, rgb(0.93391, 0.69643, 0.69243));
    }

    #[test]
    fn test_validate_reports_singular_surface() {
        let scene = default_scene()
            .with_surface(Surface::sphere().with_transform(DMat4::from_scale(DVec3::ZERO)));
        assert!(scene.validate().is_err());
        assert!(default_scene().validate().is_ok());
    }
}
