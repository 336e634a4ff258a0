//! Recursive Whitted-style ray tracing.
//!
//! Each hit is shaded with [`compute_lighting`] and, for reflective spheres,
//! blended with the color seen along the mirror direction. Recursion depth is
//! an explicit parameter capped by [`TraceConfig::max_depth`].

use cgfs_core::light::reflect;
use cgfs_core::{Color, StaticScene};
use cgfs_math::{Interval, Ray};
use serde::{Deserialize, Serialize};

use crate::intersection::closest_intersection;
use crate::lighting::{compute_lighting, SHADOW_EPSILON};

/// Ray tracing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Color returned by rays that hit nothing
    pub background: Color,
    /// Reflection recursion limit; a hit at this depth is shaded locally only
    pub max_depth: u32,
    /// Minimum parameter for reflection rays leaving a surface
    pub epsilon: f32,
    /// Cast shadow rays; when off every light reaches every surface
    pub shadows: bool,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            max_depth: 3,
            epsilon: SHADOW_EPSILON,
            shadows: true,
        }
    }
}

impl TraceConfig {
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_shadows(mut self, shadows: bool) -> Self {
        self.shadows = shadows;
        self
    }
}

/// Compute the color seen along `ray` within `ray_t`.
///
/// `depth` counts reflections already followed; primary rays start at 0.
pub fn trace_ray(
    ray: &Ray,
    ray_t: Interval,
    scene: &StaticScene,
    config: &TraceConfig,
    depth: u32,
) -> Color {
    let hit = closest_intersection(ray, ray_t, scene);
    let Some(sphere) = hit.sphere else {
        return config.background;
    };

    let point = ray.at(hit.t);
    let normal = sphere.normal_at(point);
    let view = -ray.direction;

    let lighting = if config.shadows {
        compute_lighting(point, normal, view, scene, sphere.specular)
    } else {
        scene.lights.compute_lighting(point, normal, view, sphere.specular)
    };
    let local = sphere.color.adjust_intensity(lighting);

    let k = sphere.reflectivity;
    if depth >= config.max_depth || k <= 0.0 {
        return local;
    }

    let reflected_ray = Ray::new(point, reflect(view, normal));
    let reflected = trace_ray(
        &reflected_ray,
        Interval::from_min(config.epsilon),
        scene,
        config,
        depth + 1,
    );

    local.lerp(reflected, k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgfs_core::{Light, Sphere};
    use cgfs_math::Vec3;

    fn primary() -> Interval {
        Interval::from_min(1.0)
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = StaticScene::with_ambient();
        let config = TraceConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert_eq!(trace_ray(&ray, primary(), &scene, &config, 0), Color::WHITE);

        let black = config.with_background(Color::BLACK);
        assert_eq!(trace_ray(&ray, primary(), &scene, &black, 0), Color::BLACK);
    }

    #[test]
    fn test_ambient_hit_is_flat_color() {
        let mut scene = StaticScene::with_ambient();
        scene.add_sphere(Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::RED).unwrap());

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 3.0));
        let color = trace_ray(&ray, primary(), &scene, &TraceConfig::default(), 0);
        assert_eq!(color, Color::RED);
    }

    #[test]
    fn test_non_reflective_is_local_color() {
        let mut scene = StaticScene::new();
        scene.add_lights([Light::ambient(0.5), Light::point(Vec3::new(0.0, 0.0, -5.0), 0.5)]);
        scene.add_spheres([
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::BLUE).unwrap(),
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 3.0, Color::GREEN).unwrap(),
        ]);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let config = TraceConfig::default();
        let color = trace_ray(&ray, primary(), &scene, &config, 0);

        // Hit at (0, 0, 4) facing the camera, light behind the camera
        let sphere = &scene.spheres[0];
        let point = Vec3::new(0.0, 0.0, 4.0);
        let lighting = compute_lighting(point, sphere.normal_at(point), Vec3::NEG_Z, &scene, None);
        assert_eq!(color, Color::BLUE.adjust_intensity(lighting));
    }

    #[test]
    fn test_mirror_reflects_background() {
        let mut scene = StaticScene::with_ambient();
        scene.add_sphere(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::RED)
                .unwrap()
                .with_reflectivity(1.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let config = TraceConfig::default();
        let color = trace_ray(&ray, primary(), &scene, &config, 0);

        // Straight back towards the camera, hitting nothing
        assert_eq!(color, config.background);
    }

    #[test]
    fn test_half_mirror_blends() {
        let mut scene = StaticScene::with_ambient();
        scene.add_sphere(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::RED)
                .unwrap()
                .with_reflectivity(0.5),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let config = TraceConfig::default().with_background(Color::BLUE);
        let color = trace_ray(&ray, primary(), &scene, &config, 0);

        assert!((color.red - 127.5).abs() < 1e-3);
        assert!(color.green.abs() < 1e-3);
        assert!((color.blue - 127.5).abs() < 1e-3);
        assert!((color.alpha - 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_depth_cap_stops_recursion() {
        let mut scene = StaticScene::with_ambient();
        scene.add_sphere(
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::RED)
                .unwrap()
                .with_reflectivity(1.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let config = TraceConfig::default();
        let color = trace_ray(&ray, primary(), &scene, &config, config.max_depth);
        assert_eq!(color, Color::RED);

        let no_bounce = TraceConfig::default().with_max_depth(0);
        assert_eq!(trace_ray(&ray, primary(), &scene, &no_bounce, 0), Color::RED);
    }

    #[test]
    fn test_shadows_can_be_disabled() {
        let mut scene = StaticScene::new();
        scene.add_lights([Light::ambient(0.2), Light::point(Vec3::new(0.0, 10.0, 5.0), 0.8)]);
        scene.add_spheres([
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE).unwrap(),
            Sphere::new(Vec3::new(0.0, 5.0, 5.0), 1.0, Color::RED).unwrap(),
        ]);

        // Top of the lower sphere, under the blocker
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -2.0, 5.0));
        let config = TraceConfig::default();

        let ray_t = Interval::from_min(config.epsilon);

        let shadowed = trace_ray(&ray, ray_t, &scene, &config, 0);
        let lit = trace_ray(&ray, ray_t, &scene, &config.with_shadows(false), 0);
        assert!((shadowed.red - 51.0).abs() < 1e-2);
        assert!((lit.red - 255.0).abs() < 1e-2);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let mut scene = StaticScene::with_ambient();
        scene.add_spheres([
            Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::RED)
                .unwrap()
                .with_reflectivity(0.9),
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::GREEN)
                .unwrap()
                .with_reflectivity(0.9),
        ]);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let color = trace_ray(&ray, primary(), &scene, &TraceConfig::default(), 0);

        // red, green, red, then green shaded locally at the cap
        let expected = Color::RED.lerp(
            Color::GREEN.lerp(Color::RED.lerp(Color::GREEN, 0.9), 0.9),
            0.9,
        );
        assert!((color.red - expected.red).abs() < 1e-2);
        assert!((color.green - expected.green).abs() < 1e-2);
        assert!(color.blue.abs() < 1e-3);
    }
}
