//! Oriented-box collision detection
//!
//! Two phases:
//! - Broad phase: each collider is wrapped in an axis-aligned cube and the
//!   cubes are tested per world axis. Cheap, conservative, never misses.
//! - Narrow phase: separating-axis test over the 15 candidate axes of two
//!   oriented boxes (3 face normals each, 9 edge cross products).
//!
//! Only overlap is reported. Collision response belongs to the actors.

use glam::Vec3;

use super::transform::Transform;
use super::world::Actor;
use crate::consts::DEFAULT_BOUNDS;
use crate::renderer::{Color, RenderSink};

/// Local-space box attached to an actor (pre-scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Box centre relative to the actor origin
    pub offset: Vec3,
    /// Half-extents, non-negative
    pub bounds: Vec3,
}

impl Default for Collider {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            bounds: Vec3::splat(DEFAULT_BOUNDS),
        }
    }
}

impl Collider {
    pub fn new(offset: Vec3, bounds: Vec3) -> Self {
        debug_assert!(bounds.cmpge(Vec3::ZERO).all(), "negative collider bounds");
        Self { offset, bounds }
    }
}

/// Axis-aligned cube used to reject far-apart pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BroadBox {
    /// Cube centred on the collider with the largest world-axis half-extent
    /// applied uniformly on all three axes.
    ///
    /// Each scaled half-extent is measured along the world axes
    /// (`Σ |axis_j| * ext_j`), so the cube keeps containing the rotated box.
    /// For an unrotated actor this is plain `max(|bounds * scale|)`. Mirrored
    /// (negative) scale flips the box but not its size.
    pub fn new(transform: &Transform, collider: &Collider) -> Self {
        let center = transform.transform_point(collider.offset);
        let ext = (collider.bounds * transform.scale).abs();
        let world_ext = transform.right().abs() * ext.x
            + transform.up().abs() * ext.y
            + transform.forward().abs() * ext.z;
        let half = Vec3::splat(world_ext.max_element());

        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive interval overlap on x, y and z
    #[inline]
    pub fn overlaps(&self, other: &BroadBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Interval covered by a box projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub start: f32,
    pub end: f32,
}

impl Projection {
    #[inline]
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.end.min(other.end) >= self.start.max(other.start)
    }
}

/// World-space description of an oriented box, rebuilt for every test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObbInfo {
    /// right, up, forward
    pub axes: [Vec3; 3],
    pub center: Vec3,
    /// Corners 0..4 lie on the +forward face, 4..8 on the -forward face,
    /// both wound in the same order.
    pub corners: [Vec3; 8],
}

impl ObbInfo {
    pub fn new(transform: &Transform, collider: &Collider) -> Self {
        let axes = [transform.right(), transform.up(), transform.forward()];
        let p = transform.transform_point(collider.offset);
        let dx = axes[0] * (transform.scale.x * collider.bounds.x);
        let dy = axes[1] * (transform.scale.y * collider.bounds.y);
        let dz = axes[2] * (transform.scale.z * collider.bounds.z);

        let corners = [
            p - dx + dy + dz,
            p - dx - dy + dz,
            p + dx - dy + dz,
            p + dx + dy + dz,
            p - dx + dy - dz,
            p - dx - dy - dz,
            p + dx - dy - dz,
            p + dx + dy - dz,
        ];

        Self {
            axes,
            center: p,
            corners,
        }
    }

    /// Project all eight corners onto `axis`. The axis need not be unit
    /// length: both boxes of a test share it, so overlap is unaffected.
    pub fn project(&self, axis: Vec3) -> Projection {
        self.corners.iter().fold(
            Projection {
                start: f32::MAX,
                end: f32::MIN,
            },
            |prj, corner| {
                let val = corner.dot(axis);
                Projection {
                    start: prj.start.min(val),
                    end: prj.end.max(val),
                }
            },
        )
    }
}

/// The 15 candidate separating axes for a pair of oriented boxes.
///
/// Cross products of parallel edges come out as the zero vector; projecting
/// onto it collapses both boxes to the same point, which can never separate.
pub fn candidate_axes(a: &ObbInfo, b: &ObbInfo) -> [Vec3; 15] {
    let mut axes = [Vec3::ZERO; 15];
    axes[..3].copy_from_slice(&a.axes);
    axes[3..6].copy_from_slice(&b.axes);
    for (j, b_axis) in b.axes.iter().enumerate() {
        for (i, a_axis) in a.axes.iter().enumerate() {
            axes[6 + j * 3 + i] = a_axis.cross(*b_axis);
        }
    }
    axes
}

/// Separating-axis test. True when no candidate axis separates the boxes.
pub fn sat_overlap(a: &ObbInfo, b: &ObbInfo) -> bool {
    candidate_axes(a, b)
        .iter()
        .all(|&axis| a.project(axis).overlaps(&b.project(axis)))
}

/// Full two-phase test on raw placement data
pub fn check_collide_boxes(
    transform_a: &Transform,
    collider_a: &Collider,
    transform_b: &Transform,
    collider_b: &Collider,
) -> bool {
    let broad_a = BroadBox::new(transform_a, collider_a);
    let broad_b = BroadBox::new(transform_b, collider_b);
    if !broad_a.overlaps(&broad_b) {
        return false;
    }

    let info_a = ObbInfo::new(transform_a, collider_a);
    let info_b = ObbInfo::new(transform_b, collider_b);
    sat_overlap(&info_a, &info_b)
}

/// True iff the oriented colliders of the two actors overlap (touching counts)
pub fn check_collide(a: &Actor, b: &Actor) -> bool {
    check_collide_boxes(&a.transform, &a.collider, &b.transform, &b.collider)
}

/// Draw the actor's oriented collider as a wireframe box
pub fn render_collider_outline<S: RenderSink + ?Sized>(
    actor: &Actor,
    thickness: f32,
    color: Color,
    sink: &mut S,
) {
    let info = ObbInfo::new(&actor.transform, &actor.collider);
    sink.push_volume_outline(&info.corners, thickness, color);
}
