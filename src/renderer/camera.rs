//! Perspective camera and world-to-screen projection
//!
//! Left-handed view space to match actor transforms: +X right, +Y up, +Z forward.

use glam::{Mat4, Vec2, Vec3};

use crate::sim::Transform;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Position and orientation; the camera looks along `transform.forward()`
    pub transform: Transform,
    /// Vertical field of view (radians)
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fov_y: 70f32.to_radians(),
            aspect: crate::consts::UI_WIDTH / crate::consts::UI_HEIGHT,
            near: 0.05,
            far: 500.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_lh(
            self.transform.pos,
            self.transform.forward(),
            self.transform.up(),
        )
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Normalized screen position of a world point: (0, 0) bottom-left,
    /// (1, 1) top-right. `None` when the point is behind the camera.
    pub fn world_to_screen_pos(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5))
    }
}
