//! Orb Runner - a 3D arcade flyer
//!
//! Core modules:
//! - `sim`: Simulation (actor kinematics, oriented-box collisions, world tick)
//! - `platform`: Input polling abstraction and per-frame input snapshot
//! - `renderer`: Camera projection and recorded draw commands
//! - `ui`: HUD overlays
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::{Vec2, Vec3};
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Virtual UI canvas the HUD is laid out on
    pub const UI_WIDTH: f32 = 1280.0;
    pub const UI_HEIGHT: f32 = 720.0;

    /// Default collider half-extents (unit cube)
    pub const DEFAULT_BOUNDS: f32 = 0.5;
    /// Half depth of a wall slab along its normal
    pub const WALL_HALF_DEPTH: f32 = 0.1;
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
#[inline]
pub fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}

/// Move a 2D vector toward `target` along the straight line between them,
/// by at most `max_delta` of length.
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist == 0.0 {
        target
    } else {
        current + diff * (max_delta / dist)
    }
}

/// 3D counterpart of [`approach_vec2`].
#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist == 0.0 {
        target
    } else {
        current + diff * (max_delta / dist)
    }
}

/// Mirror reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec3, normal: Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

/// Uniformly distributed direction on the unit sphere
pub fn random_unit_vec3<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta: f32 = rng.random_range(0.0..std::f32::consts::TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}
