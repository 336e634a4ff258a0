//! Sphere scene for the ray tracer.
//!
//! A `StaticScene` owns spheres and a [`LightSet`]. Lights are renormalized
//! every time one is added, so their intensities always sum to 1.

use cgfs_math::Vec3;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::light::{specular_exponent, Light, LightSet};
use crate::Color;

/// Errors that can occur while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive, got {0}")]
    NonPositiveRadius(f32),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere with its surface properties.
///
/// Deserialization goes through [`Sphere::new`], so a loaded sphere always
/// has a positive radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,

    /// Phong exponent; `None` disables the specular highlight.
    pub specular: Option<f32>,

    /// Mirror blend factor in `[0, 1]`; 0 never spawns reflection rays.
    pub reflectivity: f32,
}

/// Unchecked sphere fields as they appear in serialized scenes.
#[derive(Deserialize)]
struct SphereData {
    center: Vec3,
    radius: f32,
    color: Color,
    #[serde(default)]
    specular: Option<f32>,
    #[serde(default)]
    reflectivity: f32,
}

impl<'de> Deserialize<'de> for Sphere {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = SphereData::deserialize(deserializer)?;
        let mut sphere = Sphere::new(data.center, data.radius, data.color)
            .map_err(serde::de::Error::custom)?
            .with_reflectivity(data.reflectivity);
        sphere.specular = data.specular;
        Ok(sphere)
    }
}

impl Sphere {
    /// Create a matte, non-reflective sphere.
    pub fn new(center: Vec3, radius: f32, color: Color) -> SceneResult<Self> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(SceneError::NonPositiveRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            color,
            specular: None,
            reflectivity: 0.0,
        })
    }

    /// Set the Phong exponent; `-1` turns the highlight off.
    pub fn with_specular(mut self, exponent: f32) -> Self {
        self.specular = specular_exponent(exponent);
        self
    }

    /// Set the reflectivity, clamped to `[0, 1]`.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
        self
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }
}

/// Spheres plus normalized lights.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticScene {
    pub spheres: Vec<Sphere>,
    #[serde(default)]
    pub lights: LightSet,
}

impl StaticScene {
    /// Create an empty scene with no lights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene lit by a single full-strength ambient light, so spheres
    /// show their flat color.
    pub fn with_ambient() -> Self {
        let mut scene = Self::new();
        scene.add_light(Light::ambient(1.0));
        scene
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn add_spheres(&mut self, spheres: impl IntoIterator<Item = Sphere>) {
        self.spheres.extend(spheres);
    }

    /// Add a light and renormalize all light intensities to sum to 1.
    pub fn add_light(&mut self, light: Light) {
        self.lights.add_light(light);
    }

    /// Add lights and renormalize all light intensities to sum to 1.
    pub fn add_lights(&mut self, lights: impl IntoIterator<Item = Light>) {
        self.lights.add_lights(lights);
    }

    pub fn clear_spheres(&mut self) {
        self.spheres.clear();
    }

    pub fn clear_lights(&mut self) {
        self.lights.clear();
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_defaults() {
        let sphere = Sphere::new(Vec3::new(0.0, -1.0, 3.0), 1.0, Color::RED).unwrap();
        assert_eq!(sphere.specular, None);
        assert_eq!(sphere.reflectivity, 0.0);
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, Color::RED),
            Err(SceneError::NonPositiveRadius(0.0))
        );
        assert!(Sphere::new(Vec3::ZERO, -2.0, Color::RED).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::NAN, Color::RED).is_err());
    }

    #[test]
    fn test_sphere_builders() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Color::BLUE)
            .unwrap()
            .with_specular(500.0)
            .with_reflectivity(1.7);
        assert_eq!(sphere.specular, Some(500.0));
        assert_eq!(sphere.reflectivity, 1.0);
        assert_eq!(sphere.with_specular(-1.0).specular, None);
    }

    #[test]
    fn test_sphere_deserialize_checks_radius() {
        let sphere: Sphere = serde_json::from_str(
            r#"{ "center": [0.0, 0.0, 3.0], "radius": 1.0, "color": { "red": 255, "green": 0, "blue": 0 } }"#,
        )
        .unwrap();
        assert_eq!(sphere.radius, 1.0);
        assert_eq!(sphere.specular, None);
        assert_eq!(sphere.reflectivity, 0.0);

        let result: Result<Sphere, _> = serde_json::from_str(
            r#"{ "center": [0.0, 0.0, 3.0], "radius": 0.0, "color": { "red": 255, "green": 0, "blue": 0 } }"#,
        );
        let err = result.unwrap_err();
        assert!(err.to_string().contains("radius must be positive"));
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 3.0), 2.0, Color::RED).unwrap();
        let n = sphere.normal_at(Vec3::new(0.0, 0.0, 1.0));
        assert!((n - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_scene_with_ambient() {
        let scene = StaticScene::with_ambient();
        assert_eq!(scene.light_count(), 1);
        assert!((scene.lights.total_intensity() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scene_lights_sum_to_one() {
        let mut scene = StaticScene::new();
        scene.add_lights([
            Light::ambient(0.2),
            Light::point(Vec3::new(2.0, 1.0, 0.0), 0.6),
        ]);
        scene.add_light(Light::directional(Vec3::new(1.0, 4.0, 4.0), 0.2));
        scene.add_light(Light::point(Vec3::new(-1.0, 0.0, 0.0), 5.0));

        assert_eq!(scene.light_count(), 4);
        assert!((scene.lights.total_intensity() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scene_clear() {
        let mut scene = StaticScene::with_ambient();
        scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, Color::RED).unwrap());

        scene.clear_spheres();
        scene.clear_lights();
        assert_eq!(scene.sphere_count(), 0);
        assert_eq!(scene.light_count(), 0);
    }
}
