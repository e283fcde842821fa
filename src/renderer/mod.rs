//! Rendering glue
//!
//! The GPU backend is a collaborator behind [`RenderSink`]: the simulation
//! and HUD push UI text and wireframe outlines into it and never touch the
//! device directly. [`DrawList`] is the recording sink used by the game loop.

pub mod camera;
pub mod draw_list;
pub mod shapes;
pub mod vertex;

pub use camera::Camera;
pub use draw_list::{DrawList, Outline, UiText};
pub use vertex::{Color, LineVertex, colors};

use glam::{Vec2, Vec3};

/// Destination for screen-space text and world-space outlines
pub trait RenderSink {
    /// Queue `text` at `pos` on the UI canvas (origin bottom-left, y up)
    fn push_ui_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color);

    /// Queue the 12 edges of a hexahedron given by its 8 corners.
    ///
    /// Corners 0..4 form one face and 4..8 the opposite face, wound the same
    /// way, so corner `i` connects to corner `i + 4`.
    fn push_volume_outline(&mut self, corners: &[Vec3; 8], thickness: f32, color: Color);
}
