// Re-export glam for convenience
pub use glam::*;

// cgfs math types
mod camera;
mod frustum;
mod interpolate;
mod interval;
mod plane;
mod ray;
mod transform;

pub use camera::Camera;
pub use frustum::Frustum;
pub use interpolate::{clamp, interpolate, interpolate_within};
pub use interval::Interval;
pub use plane::{Line3, Plane};
pub use ray::Ray;
pub use transform::{
    rotation_x, rotation_y, rotation_z, to_homogeneous, translation, uniform_scale, Mat4Ext,
};
