//! Perspective projection from camera space onto the canvas.

use cgfs_math::{Frustum, IVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Viewport rectangle at `projection_plane` in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub projection_plane: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            projection_plane: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, projection_plane: f32) -> Self {
        Self {
            width,
            height,
            projection_plane,
        }
    }

    /// Scale a viewport point to canvas pixels.
    pub fn viewport_to_canvas(&self, point: Vec2, canvas_width: u32, canvas_height: u32) -> Vec2 {
        Vec2::new(
            point.x * canvas_width as f32 / self.width,
            point.y * canvas_height as f32 / self.height,
        )
    }

    /// Project a camera-space vertex to a canvas pixel.
    ///
    /// Divides by depth, so vertices at or behind the camera produce
    /// meaningless (but finite or saturated) coordinates; clip them first.
    pub fn project_vertex(&self, vertex: Vec3, canvas_width: u32, canvas_height: u32) -> IVec2 {
        let d = self.projection_plane;
        let on_viewport = Vec2::new(vertex.x * d / vertex.z, vertex.y * d / vertex.z);
        let canvas = self.viewport_to_canvas(on_viewport, canvas_width, canvas_height);
        IVec2::new(canvas.x.floor() as i32, canvas.y.floor() as i32)
    }

    /// The five planes bounding what this viewport can see.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_viewport(self.width, self.height, self.projection_plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_to_canvas() {
        let viewport = Viewport::default();
        let p = viewport.viewport_to_canvas(Vec2::new(0.5, -0.25), 600, 400);
        assert!((p - Vec2::new(300.0, -100.0)).length() < 1e-5);
    }

    #[test]
    fn test_project_center() {
        let viewport = Viewport::default();
        assert_eq!(viewport.project_vertex(Vec3::new(0.0, 0.0, 5.0), 100, 100), IVec2::ZERO);
    }

    #[test]
    fn test_project_perspective_divide() {
        let viewport = Viewport::default();
        let near = viewport.project_vertex(Vec3::new(1.0, 1.0, 5.0), 100, 100);
        let far = viewport.project_vertex(Vec3::new(1.0, 1.0, 10.0), 100, 100);

        assert_eq!(near, IVec2::new(20, 20));
        assert_eq!(far, IVec2::new(10, 10));
    }

    #[test]
    fn test_project_floors() {
        let viewport = Viewport::default();
        let p = viewport.project_vertex(Vec3::new(-1.0, 1.0, 3.0), 100, 100);
        assert_eq!(p, IVec2::new(-34, 33));
    }

    #[test]
    fn test_viewport_edge_lands_on_canvas_edge() {
        let viewport = Viewport::new(2.0, 1.0, 2.0);
        // x / z * d = 1, the right viewport edge
        let p = viewport.project_vertex(Vec3::new(2.0, 0.0, 4.0), 200, 100);
        assert_eq!(p, IVec2::new(100, 0));
    }

    #[test]
    fn test_frustum_matches_viewport() {
        let viewport = Viewport::default();
        let frustum = viewport.frustum();
        assert_eq!(frustum.planes().len(), 5);
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 2.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 0.5)));
        assert!(!frustum.contains_point(Vec3::new(3.0, 0.0, 2.0)));
    }
}
