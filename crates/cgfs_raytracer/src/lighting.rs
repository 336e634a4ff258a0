//! Shadow-aware lighting for the ray tracer.

use cgfs_core::light::phong_intensity;
use cgfs_core::{Light, StaticScene};
use cgfs_math::{Interval, Ray, Vec3};

use crate::intersection::is_occluded;

/// Minimum shadow-ray parameter, so a surface does not shadow itself.
pub const SHADOW_EPSILON: f32 = 0.001;

/// Total light intensity arriving at `point`.
///
/// Ambient light always contributes. Point and directional lights contribute
/// only when a shadow ray from `point` towards them is unobstructed; the ray
/// runs over `(SHADOW_EPSILON, t_max)` where `t_max` is 1 for point lights
/// (the light itself) and unbounded for directional ones.
pub fn compute_lighting(
    point: Vec3,
    normal: Vec3,
    view: Vec3,
    scene: &StaticScene,
    specular: Option<f32>,
) -> f32 {
    scene
        .lights
        .iter()
        .map(|light| light_contribution(light, point, normal, view, scene, specular))
        .sum()
}

fn light_contribution(
    light: &Light,
    point: Vec3,
    normal: Vec3,
    view: Vec3,
    scene: &StaticScene,
    specular: Option<f32>,
) -> f32 {
    let Some((to_light, t_max)) = light.light_vector(point) else {
        return light.intensity();
    };

    let shadow_ray = Ray::new(point, to_light);
    if is_occluded(&shadow_ray, Interval::new(SHADOW_EPSILON, t_max), scene) {
        return 0.0;
    }

    phong_intensity(light.intensity(), to_light, normal, view, specular)
}
