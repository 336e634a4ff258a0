// Transform utilities for Mat4
//
// Matrix builders take angles in degrees. Perspective division is never baked
// into these matrices; the rasterizer divides by z after transforming.

use glam::{Mat4, Vec3, Vec4};

/// Rotation around the X axis, angle in degrees.
pub fn rotation_x(degrees: f32) -> Mat4 {
    Mat4::from_rotation_x(degrees.to_radians())
}

/// Rotation around the Y axis, angle in degrees.
pub fn rotation_y(degrees: f32) -> Mat4 {
    Mat4::from_rotation_y(degrees.to_radians())
}

/// Rotation around the Z axis, angle in degrees.
pub fn rotation_z(degrees: f32) -> Mat4 {
    Mat4::from_rotation_z(degrees.to_radians())
}

pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

pub fn uniform_scale(scale: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(scale))
}

/// Lift a point into homogeneous coordinates (w = 1).
#[inline]
pub fn to_homogeneous(point: Vec3) -> Vec4 {
    point.extend(1.0)
}

/// Extension trait for Mat4 with the operations the renderers need.
pub trait Mat4Ext {
    /// Multiply a point in homogeneous form (w = 1) and return the full 4-vector.
    fn transform_homogeneous(&self, point: Vec3) -> Vec4;

    /// Inverse of a rigid transform (rotation followed by translation).
    ///
    /// The rotation part must be orthonormal, so its transpose is its inverse:
    /// `inverse(T * R) = transpose(R) * T(-t)`.
    fn rigid_inverse(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn transform_homogeneous(&self, point: Vec3) -> Vec4 {
        *self * to_homogeneous(point)
    }

    fn rigid_inverse(&self) -> Mat4 {
        let offset = self.w_axis.truncate();
        let mut rotation = *self;
        rotation.w_axis = Vec4::W;
        rotation.transpose() * Mat4::from_translation(-offset)
    }
}
