use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::{translation, Mat4Ext};

/// Camera placement for both pipelines: a position and an orthonormal rotation.
///
/// The camera looks down +Z in its own space with +Y up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Mat4,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, rotation: Mat4) -> Self {
        Self { position, rotation }
    }

    /// Camera at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Mat4::IDENTITY)
    }

    /// Camera-to-world transform: `T(position) * R`.
    pub fn world_matrix(&self) -> Mat4 {
        translation(self.position) * self.rotation
    }

    /// World-to-camera transform.
    ///
    /// Inverse of the rigid camera transform: `transpose(R) * T(-position)`.
    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().rigid_inverse()
    }

    /// Rotate a camera-space direction into world space.
    pub fn to_world_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.transform_vector3(direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
