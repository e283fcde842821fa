//! Actor placement: position, rotation, non-uniform scale
//!
//! Local axes: right = +X, up = +Y, forward = +Z.

use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub pos: Vec3,
    pub rot: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

impl Transform {
    pub fn from_position(pos: Vec3) -> Self {
        Self {
            pos,
            rot: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn new(pos: Vec3, rot: Quat, scale: Vec3) -> Self {
        Self { pos, rot, scale }
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rot * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rot * Vec3::Y
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rot * Vec3::Z
    }

    /// translation * rotation * scale
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rot, self.pos)
    }

    /// Map a local-space point (pre-scale) into world space
    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.pos + self.rot * (local * self.scale)
    }

    /// Pitch about the local right axis
    pub fn local_rotate_x(&mut self, angle: f32) {
        self.rot = (self.rot * Quat::from_rotation_x(angle)).normalize();
    }

    /// Yaw about the local up axis
    pub fn local_rotate_y(&mut self, angle: f32) {
        self.rot = (self.rot * Quat::from_rotation_y(angle)).normalize();
    }
}
