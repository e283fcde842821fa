//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - Destruction deferred to the end of the tick

pub mod collision;
pub mod orb;
pub mod player;
pub mod tick;
pub mod transform;
pub mod world;

pub use collision::{
    BroadBox, Collider, ObbInfo, Projection, check_collide, check_collide_boxes,
    render_collider_outline, sat_overlap,
};
pub use orb::{OrbData, spawn_orb};
pub use player::{PlayerData, player_camera_view, spawn_player, steering};
pub use tick::{TickSummary, tick};
pub use transform::Transform;
pub use world::{
    Actor, ActorId, ActorKind, ActorType, CollisionHandler, CollisionMask, Fate, HitActor, World,
    spawn_wall,
};
