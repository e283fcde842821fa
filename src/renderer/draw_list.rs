//! Recorded draw commands for one frame

use glam::{Vec2, Vec3};

use super::RenderSink;
use super::shapes::{VOLUME_EDGES, volume_outline};
use super::vertex::{Color, LineVertex};

/// Text queued on the UI canvas
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Wireframe volume queued in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub corners: [Vec3; 8],
    pub thickness: f32,
    pub color: Color,
}

/// Frame-local command buffer; the backend drains it after the HUD pass
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub texts: Vec<UiText>,
    pub outlines: Vec<Outline>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded for the previous frame
    pub fn clear(&mut self) {
        self.texts.clear();
        self.outlines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.outlines.is_empty()
    }

    /// Expand all outlines into line-list vertices, grouped by thickness
    /// so each group can be issued as one draw call.
    pub fn line_batches(&self) -> Vec<(f32, Vec<LineVertex>)> {
        let mut batches: Vec<(f32, Vec<LineVertex>)> = Vec::new();
        for outline in &self.outlines {
            let verts = volume_outline(&outline.corners, outline.color);
            match batches.iter_mut().find(|(t, _)| *t == outline.thickness) {
                Some((_, batch)) => batch.extend(verts),
                None => batches.push((outline.thickness, verts)),
            }
        }
        batches
    }

    /// Vertex buffer size needed to upload every line batch this frame
    pub fn line_buffer_size(&self) -> wgpu::BufferAddress {
        let stride = LineVertex::desc().array_stride;
        let vertices: usize = self.outlines.len() * VOLUME_EDGES.len() * 2;
        vertices as wgpu::BufferAddress * stride
    }
}

impl RenderSink for DrawList {
    fn push_ui_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.texts.push(UiText {
            text: text.to_owned(),
            pos,
            size,
            color,
        });
    }

    fn push_volume_outline(&mut self, corners: &[Vec3; 8], thickness: f32, color: Color) {
        self.outlines.push(Outline {
            corners: *corners,
            thickness,
            color,
        });
    }
}
