//! World state and actor container
//!
//! Actors are a closed set of kinds, each owning its own kinematic state.
//! Destruction is deferred: handlers only flag an actor, and the tick removes
//! flagged actors once the update and collision passes are over.

use bitflags::bitflags;
use glam::{Quat, Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Collider;
use super::orb::OrbData;
use super::player::PlayerData;
use super::transform::Transform;
use crate::consts::WALL_HALF_DEPTH;
use crate::tuning::Tuning;

/// Stable actor handle, never reused within a world
pub type ActorId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    Player,
    Orb,
    Wall,
}

bitflags! {
    /// Set of actor types an actor wants collision callbacks for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionMask: u32 {
        const PLAYER = 1 << 0;
        const ORB = 1 << 1;
        const WALL = 1 << 2;
    }
}

impl ActorType {
    pub fn bit(self) -> CollisionMask {
        match self {
            ActorType::Player => CollisionMask::PLAYER,
            ActorType::Orb => CollisionMask::ORB,
            ActorType::Wall => CollisionMask::WALL,
        }
    }
}

/// What a handler wants done with its actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Live,
    Destroy,
}

/// The other party of a collision, as seen by a handler
#[derive(Debug, Clone, Copy)]
pub struct HitActor<'a> {
    pub actor_type: ActorType,
    pub transform: &'a Transform,
}

/// Per-kind collision response
pub trait CollisionHandler {
    fn on_collide(&mut self, hit: HitActor<'_>, tuning: &Tuning) -> Fate;
}

/// Actor payload, one variant per kind
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    Player(PlayerData),
    Orb(OrbData),
    /// Static slab; its forward axis is the surface normal
    Wall,
}

impl ActorKind {
    pub fn actor_type(&self) -> ActorType {
        match self {
            ActorKind::Player(_) => ActorType::Player,
            ActorKind::Orb(_) => ActorType::Orb,
            ActorKind::Wall => ActorType::Wall,
        }
    }
}

impl CollisionHandler for ActorKind {
    fn on_collide(&mut self, hit: HitActor<'_>, tuning: &Tuning) -> Fate {
        match self {
            ActorKind::Player(data) => data.on_collide(hit, tuning),
            ActorKind::Orb(data) => data.on_collide(hit, tuning),
            ActorKind::Wall => Fate::Live,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: ActorId,
    pub transform: Transform,
    pub collider: Collider,
    pub collide_mask: CollisionMask,
    pub kind: ActorKind,
    destroyed: bool,
}

impl Actor {
    pub fn new(id: ActorId, pos: Vec3, kind: ActorKind) -> Self {
        Self {
            id,
            transform: Transform::from_position(pos),
            collider: Collider::default(),
            collide_mask: CollisionMask::all(),
            kind,
            destroyed: false,
        }
    }

    #[inline]
    pub fn actor_type(&self) -> ActorType {
        self.kind.actor_type()
    }

    /// Flagged for removal at the end of the current tick
    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Request removal; applied after the current pass completes
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Whether this actor wants callbacks for collisions with `other`
    #[inline]
    pub fn wants_collision_with(&self, other: ActorType) -> bool {
        self.collide_mask.contains(other.bit())
    }

    pub fn as_player(&self) -> Option<&PlayerData> {
        match &self.kind {
            ActorKind::Player(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_orb(&self) -> Option<&OrbData> {
        match &self.kind {
            ActorKind::Orb(data) => Some(data),
            _ => None,
        }
    }

    pub fn hit_view(&self) -> HitActor<'_> {
        HitActor {
            actor_type: self.actor_type(),
            transform: &self.transform,
        }
    }
}

/// All live actors plus the shared simulation context
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Live actors, in spawn order
    pub actors: Vec<Actor>,
    /// The privileged player actor, if alive
    pub player: Option<ActorId>,
    rng: Pcg32,
    next_id: ActorId,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            time_ticks: 0,
            tuning,
            actors: Vec::new(),
            player: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new actor ID
    pub fn next_actor_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Create an actor with default transform, collider and mask
    pub fn new_actor(&mut self, pos: Vec3, kind: ActorKind) -> &mut Actor {
        let id = self.next_actor_id();
        log::debug!("Spawned {:?} #{} at {:?}", kind.actor_type(), id, pos);
        self.actors.push(Actor::new(id, pos, kind));
        let last = self.actors.len() - 1;
        &mut self.actors[last]
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn player_actor(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn count(&self, actor_type: ActorType) -> usize {
        self.actors
            .iter()
            .filter(|a| a.actor_type() == actor_type)
            .count()
    }

    /// Remove every actor flagged for destruction, returning what was removed
    pub fn remove_destroyed(&mut self) -> Vec<(ActorId, ActorType)> {
        let removed: Vec<(ActorId, ActorType)> = self
            .actors
            .iter()
            .filter(|a| a.destroyed)
            .map(|a| (a.id, a.actor_type()))
            .collect();
        if removed.is_empty() {
            return removed;
        }

        self.actors.retain(|a| !a.destroyed);
        if let Some(player) = self.player
            && removed.iter().any(|(id, _)| *id == player)
        {
            log::info!("Player #{player} destroyed");
            self.player = None;
        }
        removed
    }
}

/// Spawn a static wall slab of `size` (width, height) whose surface normal is
/// `rot * +Z`. Walls only report against players and orbs.
pub fn spawn_wall(world: &mut World, pos: Vec3, rot: Quat, size: Vec2) -> ActorId {
    let actor = world.new_actor(pos, ActorKind::Wall);
    actor.transform.rot = rot;
    actor.transform.scale = Vec3::new(size.x, size.y, 1.0);
    actor.collider = Collider::new(Vec3::ZERO, Vec3::new(0.5, 0.5, WALL_HALF_DEPTH));
    actor.collide_mask = CollisionMask::PLAYER | CollisionMask::ORB;
    actor.id
}
