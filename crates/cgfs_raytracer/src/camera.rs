//! Viewport camera for primary ray generation.

use cgfs_math::{Camera, Mat4, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera that shoots rays through a square viewport.
///
/// The viewport is `viewport_size` wide and tall, centred on the camera's +Z
/// axis at distance `projection_plane`. Canvas pixels map linearly onto it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportCamera {
    pub camera: Camera,
    pub viewport_size: f32,
    pub projection_plane: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            viewport_size: 1.0,
            projection_plane: 1.0,
        }
    }
}

impl ViewportCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.camera.position = position;
        self
    }

    /// Set camera orientation.
    pub fn with_rotation(mut self, rotation: Mat4) -> Self {
        self.camera.rotation = rotation;
        self
    }

    /// Set viewport size and projection plane distance.
    pub fn with_viewport(mut self, viewport_size: f32, projection_plane: f32) -> Self {
        self.viewport_size = viewport_size;
        self.projection_plane = projection_plane;
        self
    }

    /// Map canvas pixel `(x, y)` to a point on the viewport in camera space.
    pub fn canvas_to_viewport(&self, x: i32, y: i32, canvas_width: u32, canvas_height: u32) -> Vec3 {
        Vec3::new(
            x as f32 * self.viewport_size / canvas_width as f32,
            y as f32 * self.viewport_size / canvas_height as f32,
            self.projection_plane,
        )
    }

    /// Primary ray from the camera through canvas pixel `(x, y)`, in world space.
    ///
    /// The direction is not normalized: `t = 1` lands on the viewport.
    pub fn ray_through(&self, x: i32, y: i32, canvas_width: u32, canvas_height: u32) -> Ray {
        let direction = self.canvas_to_viewport(x, y, canvas_width, canvas_height);
        Ray::new(self.camera.position, self.camera.to_world_direction(direction))
    }
}
