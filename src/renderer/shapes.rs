//! Shape generation for debug primitives

use glam::Vec3;

use super::vertex::{Color, LineVertex};

/// Corner index pairs for the 12 edges of a hexahedron whose corners 0..4 and
/// 4..8 are two opposite faces wound the same way.
pub const VOLUME_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Generate a line list (two vertices per edge) outlining a volume
pub fn volume_outline(corners: &[Vec3; 8], color: Color) -> Vec<LineVertex> {
    let mut vertices = Vec::with_capacity(VOLUME_EDGES.len() * 2);
    for (a, b) in VOLUME_EDGES {
        vertices.push(LineVertex::new(corners[a], color));
        vertices.push(LineVertex::new(corners[b], color));
    }
    vertices
}
