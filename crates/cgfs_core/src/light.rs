//! Light sources and the unshadowed Phong lighting model.
//!
//! Every light reports a scalar intensity contribution at a surface point;
//! callers multiply surface color by the summed intensity. The ray tracer adds
//! a shadow test on top of [`Light::light_vector`] before using
//! [`phong_intensity`]; the rasterizer uses [`Light::calculate_intensity`]
//! directly.

use cgfs_math::Vec3;
use serde::{Deserialize, Serialize};

/// A light source.
///
/// Intensities are relative; a [`LightSet`] rescales them so they sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Light {
    /// Uniform light reaching every point.
    Ambient { intensity: f32 },
    /// Light emitted from a position in all directions.
    Point { intensity: f32, position: Vec3 },
    /// Light arriving from a fixed direction (pointing towards the light).
    Directional { intensity: f32, direction: Vec3 },
}

/// Convert the `-1` "no specular" sentinel into an optional exponent.
pub fn specular_exponent(exponent: f32) -> Option<f32> {
    if exponent == -1.0 {
        None
    } else {
        Some(exponent)
    }
}

impl Light {
    pub fn ambient(intensity: f32) -> Self {
        Light::Ambient { intensity }
    }

    pub fn point(position: Vec3, intensity: f32) -> Self {
        Light::Point {
            intensity,
            position,
        }
    }

    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Light::Directional {
            intensity,
            direction,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => intensity,
        }
    }

    fn set_intensity(&mut self, value: f32) {
        match self {
            Light::Ambient { intensity }
            | Light::Point { intensity, .. }
            | Light::Directional { intensity, .. } => *intensity = value,
        }
    }

    /// Vector from `point` towards the light, plus the largest shadow-ray
    /// parameter that still lies between the point and the light.
    ///
    /// Point lights return the full vector to the light, so `t = 1` reaches
    /// it. Directional lights are infinitely far away. Ambient light has no
    /// direction and returns `None`.
    pub fn light_vector(&self, point: Vec3) -> Option<(Vec3, f32)> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Point { position, .. } => Some((position - point, 1.0)),
            Light::Directional { direction, .. } => Some((direction, f32::INFINITY)),
        }
    }

    /// Contribution of this light at `point`, ignoring occlusion.
    ///
    /// `view` points from the surface back towards the viewer; `specular` is
    /// the Phong exponent, `None` for matte surfaces.
    pub fn calculate_intensity(
        &self,
        point: Vec3,
        normal: Vec3,
        view: Vec3,
        specular: Option<f32>,
    ) -> f32 {
        match self.light_vector(point) {
            None => self.intensity(),
            Some((light, _)) => phong_intensity(self.intensity(), light, normal, view, specular),
        }
    }
}

/// Diffuse plus specular contribution of a light arriving along `light`.
pub fn phong_intensity(
    intensity: f32,
    light: Vec3,
    normal: Vec3,
    view: Vec3,
    specular: Option<f32>,
) -> f32 {
    let diffuse = diffuse_intensity(intensity, light, normal);
    let specular = specular.map_or(0.0, |exponent| {
        specular_intensity(intensity, light, normal, view, exponent)
    });
    diffuse + specular
}

/// `intensity * cos(angle(normal, light))`, or 0 when the light is behind.
pub fn diffuse_intensity(intensity: f32, light: Vec3, normal: Vec3) -> f32 {
    let n_dot_l = normal.dot(light);
    if n_dot_l > 0.0 {
        intensity * n_dot_l / (normal.length() * light.length())
    } else {
        0.0
    }
}

/// Phong highlight: reflect the light about the normal and compare with the
/// view direction.
pub fn specular_intensity(intensity: f32, light: Vec3, normal: Vec3, view: Vec3, exponent: f32) -> f32 {
    let reflection = reflect(light, normal);
    let r_dot_v = reflection.dot(view);
    if r_dot_v > 0.0 {
        intensity * (r_dot_v / (reflection.length() * view.length())).powf(exponent)
    } else {
        0.0
    }
}

/// Mirror `v` about `normal`: `2 n (n · v) - v`.
///
/// The result points away from the surface on the same side as `v`.
#[inline]
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    2.0 * normal * normal.dot(v) - v
}

/// Lights whose intensities always sum to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Light>", into = "Vec<Light>")]
pub struct LightSet {
    lights: Vec<Light>,
}

impl LightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light, then renormalize every intensity.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
        self.normalize();
    }

    /// Add several lights, then renormalize once.
    pub fn add_lights(&mut self, lights: impl IntoIterator<Item = Light>) {
        self.lights.extend(lights);
        self.normalize();
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Light> {
        self.lights.iter()
    }

    /// Sum of all intensities (1 for any non-empty, well-formed set).
    pub fn total_intensity(&self) -> f32 {
        self.lights.iter().map(Light::intensity).sum()
    }

    /// Unshadowed lighting at a point: the sum of every light's contribution.
    pub fn compute_lighting(&self, point: Vec3, normal: Vec3, view: Vec3, specular: Option<f32>) -> f32 {
        self.lights
            .iter()
            .map(|light| light.calculate_intensity(point, normal, view, specular))
            .sum()
    }

    fn normalize(&mut self) {
        let total = self.total_intensity();
        if total <= 0.0 || !total.is_finite() {
            log::warn!(
                "Light set total intensity is {}, leaving {} lights unnormalized",
                total,
                self.lights.len()
            );
            return;
        }

        for light in &mut self.lights {
            light.set_intensity(light.intensity() / total);
        }
    }
}

impl<'a> IntoIterator for &'a LightSet {
    type Item = &'a Light;
    type IntoIter = std::slice::Iter<'a, Light>;

    fn into_iter(self) -> Self::IntoIter {
        self.lights.iter()
    }
}

impl From<Vec<Light>> for LightSet {
    fn from(lights: Vec<Light>) -> Self {
        lights.into_iter().collect()
    }
}

impl From<LightSet> for Vec<Light> {
    fn from(set: LightSet) -> Self {
        set.lights
    }
}

impl FromIterator<Light> for LightSet {
    fn from_iter<I: IntoIterator<Item = Light>>(iter: I) -> Self {
        let mut set = LightSet::new();
        set.add_lights(iter);
        set
    }
}
