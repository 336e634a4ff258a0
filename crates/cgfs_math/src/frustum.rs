//! Camera-space clipping volume.
//!
//! Builds the planes of the view frustum for a viewport placed at the
//! projection plane, looking down +Z. Every plane's normal points into the
//! visible volume, so a point is inside when all signed distances are >= 0.

use crate::{Plane, Vec3};
use serde::{Deserialize, Serialize};

/// The set of camera-space planes geometry is clipped against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    planes: Vec<Plane>,
}

impl Frustum {
    /// Wrap an arbitrary list of clipping planes.
    pub fn from_planes(planes: Vec<Plane>) -> Self {
        Self { planes }
    }

    /// Near plane only, at `z = near`.
    pub fn near_only(near: f32) -> Self {
        Self::from_planes(vec![Self::near_plane(near)])
    }

    /// Near plane plus the four side planes through the viewport edges.
    ///
    /// `viewport_width`/`viewport_height` are the viewport size at distance
    /// `projection_plane` from the camera; the near plane sits on the
    /// projection plane itself.
    pub fn from_viewport(viewport_width: f32, viewport_height: f32, projection_plane: f32) -> Self {
        let d = projection_plane;
        let half_w = viewport_width / 2.0;
        let half_h = viewport_height / 2.0;

        let side = |normal: Vec3| Plane::new(normal.normalize(), 0.0);

        Self::from_planes(vec![
            Self::near_plane(d),
            side(Vec3::new(d, 0.0, half_w)),  // left
            side(Vec3::new(-d, 0.0, half_w)), // right
            side(Vec3::new(0.0, d, half_h)),  // bottom
            side(Vec3::new(0.0, -d, half_h)), // top
        ])
    }

    /// Add a far plane at `z = far`.
    pub fn with_far(mut self, far: f32) -> Self {
        self.planes.push(Plane::new(Vec3::NEG_Z, far));
        self
    }

    fn near_plane(near: f32) -> Plane {
        Plane::new(Vec3::Z, -near)
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Test if a point is inside every plane.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(point) >= 0.0)
    }
}

impl Default for Frustum {
    /// Unit viewport at distance 1.
    fn default() -> Self {
        Self::from_viewport(1.0, 1.0, 1.0)
    }
}
