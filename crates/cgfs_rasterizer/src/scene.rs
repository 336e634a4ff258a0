//! Raster scene graph: instances of named models placed by a transform.

use std::sync::Arc;

use cgfs_core::{Light, LightSet};
use cgfs_math::{translation, uniform_scale, Camera, Frustum, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::model::ModelTable;

/// Uniform scale, rotation and translation of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub scale: f32,
    pub rotation: Mat4,
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: Mat4::IDENTITY,
            translation: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn new(scale: f32, rotation: Mat4, translation: Vec3) -> Self {
        Self {
            scale,
            rotation,
            translation,
        }
    }

    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Model-to-world matrix.
    ///
    /// Order: scale, then rotate, then translate: `T * (R * S)`.
    pub fn matrix(&self) -> Mat4 {
        translation(self.translation) * (self.rotation * uniform_scale(self.scale))
    }
}

/// A named model placed in the world.
///
/// The combined model matrix is computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInstance {
    pub model: String,
    pub transform: Transform,
    transform_matrix: Mat4,
}

impl SceneInstance {
    pub fn new(model: impl Into<String>, transform: Transform) -> Self {
        Self {
            model: model.into(),
            transform,
            transform_matrix: transform.matrix(),
        }
    }

    /// Create an instance with just a translation.
    pub fn with_translation(model: impl Into<String>, translation: Vec3) -> Self {
        Self::new(model, Transform::from_translation(translation))
    }

    pub fn transform_matrix(&self) -> Mat4 {
        self.transform_matrix
    }
}

/// Everything the rasterizer needs for one frame.
#[derive(Debug, Clone)]
pub struct RasterScene {
    pub instances: Vec<SceneInstance>,
    pub models: Arc<ModelTable>,
    pub camera: Camera,
    /// Used by shaded rendering only
    pub lights: LightSet,
    /// Planes every instance is clipped against; `None` disables clipping
    pub clip: Option<Frustum>,
}

impl Default for RasterScene {
    fn default() -> Self {
        Self::new(Arc::new(ModelTable::builtin()))
    }
}

impl RasterScene {
    /// Create an empty scene over a model table, camera at the origin.
    pub fn new(models: Arc<ModelTable>) -> Self {
        Self {
            instances: Vec::new(),
            models,
            camera: Camera::default(),
            lights: LightSet::new(),
            clip: None,
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_clipping(mut self, clip: Frustum) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn add_instance(&mut self, instance: SceneInstance) {
        self.instances.push(instance);
    }

    pub fn add_instances(&mut self, instances: impl IntoIterator<Item = SceneInstance>) {
        self.instances.extend(instances);
    }

    /// Add lights and renormalize all light intensities to sum to 1.
    pub fn add_lights(&mut self, lights: impl IntoIterator<Item = Light>) {
        self.lights.add_lights(lights);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Triangle count across instances whose model is known.
    pub fn total_triangle_count(&self) -> usize {
        self.instances
            .iter()
            .filter_map(|instance| self.models.get(&instance.model).ok())
            .map(|model| model.triangle_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgfs_math::rotation_y;

    #[test]
    fn test_transform_default_is_identity() {
        assert!(Transform::default().matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_transform_order() {
        let transform = Transform::new(2.0, rotation_y(90.0), Vec3::new(0.0, 0.0, 7.0));
        let p = transform.matrix().transform_point3(Vec3::Z);

        // Scale to (0, 0, 2), turn onto +X, then move forward
        assert!((p - Vec3::new(2.0, 0.0, 7.0)).length() < 1e-5);
    }

    #[test]
    fn test_instance_caches_matrix() {
        let instance = SceneInstance::with_translation("cube", Vec3::new(-1.5, 0.0, 7.0));
        assert!(instance
            .transform_matrix()
            .abs_diff_eq(translation(Vec3::new(-1.5, 0.0, 7.0)), 1e-6));
    }

    #[test]
    fn test_scene_counts() {
        let mut scene = RasterScene::default();
        scene.add_instances([
            SceneInstance::with_translation("cube", Vec3::new(-1.5, 0.0, 7.0)),
            SceneInstance::with_translation("cube", Vec3::new(1.25, 2.0, 7.5)),
            SceneInstance::with_translation("missing", Vec3::ZERO),
        ]);

        assert_eq!(scene.instance_count(), 3);
        assert_eq!(scene.total_triangle_count(), 24);
    }

    #[test]
    fn test_scene_lights_normalized() {
        let mut scene = RasterScene::default();
        scene.add_lights([Light::ambient(2.0), Light::point(Vec3::new(-3.0, 2.0, -10.0), 6.0)]);
        assert!((scene.lights.total_intensity() - 1.0).abs() < 1e-6);
    }
}
