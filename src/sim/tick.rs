//! Fixed timestep world tick
//!
//! One tick runs three passes in order:
//! 1. every live actor's kinematic update
//! 2. pairwise collision over unordered pairs, dispatching to both handlers
//! 3. removal of actors flagged for destruction

use glam::Vec3;

use super::collision::check_collide;
use super::world::{ActorId, ActorKind, ActorType, CollisionHandler, Fate, World};
use crate::platform::InputState;

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    /// Overlapping pairs that were dispatched, lower index first
    pub collisions: Vec<(ActorId, ActorId)>,
    /// Actors removed at the end of the tick
    pub destroyed: Vec<(ActorId, ActorType)>,
}

impl TickSummary {
    pub fn player_destroyed(&self) -> bool {
        self.destroyed.iter().any(|(_, t)| *t == ActorType::Player)
    }

    pub fn orbs_destroyed(&self) -> usize {
        self.destroyed
            .iter()
            .filter(|(_, t)| *t == ActorType::Orb)
            .count()
    }
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &InputState, dt: f32) -> TickSummary {
    world.time_ticks += 1;

    update_actors(world, input, dt);
    let collisions = collide_actors(world);
    let destroyed = world.remove_destroyed();

    if !destroyed.is_empty() {
        log::debug!(
            "Tick {}: {} collisions, removed {:?}",
            world.time_ticks,
            collisions.len(),
            destroyed
        );
    }

    TickSummary {
        collisions,
        destroyed,
    }
}

fn update_actors(world: &mut World, input: &InputState, dt: f32) {
    // Orbs read the player's position as it was at the start of the tick
    let player_pos: Option<Vec3> = world.player_actor().map(|a| a.transform.pos);
    let tuning = &world.tuning;

    for actor in world.actors.iter_mut().filter(|a| !a.is_destroyed()) {
        let fate = match &mut actor.kind {
            ActorKind::Player(data) => data.update(&mut actor.transform, input, &tuning.player, dt),
            ActorKind::Orb(data) => {
                data.update(&mut actor.transform, player_pos, &tuning.orb, dt);
                Fate::Live
            }
            ActorKind::Wall => Fate::Live,
        };
        if fate == Fate::Destroy {
            actor.destroy();
        }
    }
}

fn collide_actors(world: &mut World) -> Vec<(ActorId, ActorId)> {
    let tuning = &world.tuning;
    let actors = &mut world.actors;
    let mut hits = Vec::new();

    for i in 0..actors.len() {
        let (head, tail) = actors.split_at_mut(i + 1);
        let a = &mut head[i];

        for b in tail.iter_mut() {
            if a.is_destroyed() {
                break;
            }
            if b.is_destroyed() {
                continue;
            }

            let a_wants = a.wants_collision_with(b.actor_type());
            let b_wants = b.wants_collision_with(a.actor_type());
            if !(a_wants || b_wants) || !check_collide(a, b) {
                continue;
            }

            log::trace!(
                "Collision {:?} #{} <-> {:?} #{}",
                a.actor_type(),
                a.id,
                b.actor_type(),
                b.id
            );
            hits.push((a.id, b.id));

            let fate_a = a.kind.on_collide(b.hit_view(), tuning);
            let fate_b = b.kind.on_collide(a.hit_view(), tuning);
            if fate_a == Fate::Destroy {
                a.destroy();
            }
            if fate_b == Fate::Destroy {
                b.destroy();
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{spawn_orb, spawn_player, spawn_wall};
    use glam::{Quat, Vec2};

    #[test]
    fn test_player_collects_orb() {
        let mut world = World::new(12345);
        let player = spawn_player(&mut world, Vec3::ZERO);
        let orb = spawn_orb(&mut world, Vec3::new(0.0, 0.0, 0.3));
        let input = InputState::default();

        let summary = tick(&mut world, &input, SIM_DT);
        assert_eq!(summary.collisions, vec![(player, orb)]);
        assert_eq!(summary.destroyed, vec![(orb, ActorType::Orb)]);
        assert_eq!(summary.orbs_destroyed(), 1);

        let data = world.player_actor().unwrap().as_player().unwrap();
        assert_eq!(data.progress(), 1);
        assert!(world.actor(orb).is_none());
    }

    #[test]
    fn test_player_dies_on_wall() {
        let mut world = World::new(1);
        spawn_player(&mut world, Vec3::ZERO);
        spawn_wall(
            &mut world,
            Vec3::new(0.0, 0.0, 0.55),
            Quat::from_rotation_y(std::f32::consts::PI),
            Vec2::splat(10.0),
        );
        let input = InputState::default();

        let summary = tick(&mut world, &input, SIM_DT);
        assert!(summary.player_destroyed());
        assert!(world.player.is_none());
        assert_eq!(world.count(ActorType::Wall), 1);
    }

    #[test]
    fn test_orb_bounces_off_wall() {
        let mut world = World::new(9);
        let orb = spawn_orb(&mut world, Vec3::ZERO);
        if let Some(a) = world.actor_mut(orb)
            && let ActorKind::Orb(data) = &mut a.kind
        {
            data.dir = Vec3::NEG_Z;
        }
        spawn_wall(&mut world, Vec3::new(0.0, 0.0, -0.1), Quat::IDENTITY, Vec2::splat(4.0));
        let input = InputState::default();

        let summary = tick(&mut world, &input, SIM_DT);
        assert_eq!(summary.collisions.len(), 1);
        assert!(summary.destroyed.is_empty());
        let dir = world.actor(orb).unwrap().as_orb().unwrap().dir;
        assert!((dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_orbs_ignore_each_other() {
        let mut world = World::new(2);
        spawn_orb(&mut world, Vec3::ZERO);
        spawn_orb(&mut world, Vec3::new(0.01, 0.0, 0.0));
        let summary = tick(&mut world, &InputState::default(), SIM_DT);
        // Orb masks admit orbs, but neither handler reacts
        assert_eq!(summary.collisions.len(), 1);
        assert_eq!(world.count(ActorType::Orb), 2);
    }

    #[test]
    fn test_walls_never_pair() {
        let mut world = World::new(2);
        spawn_wall(&mut world, Vec3::ZERO, Quat::IDENTITY, Vec2::ONE);
        spawn_wall(&mut world, Vec3::ZERO, Quat::IDENTITY, Vec2::ONE);
        let summary = tick(&mut world, &InputState::default(), SIM_DT);
        assert!(summary.collisions.is_empty());
    }

    #[test]
    fn test_destroyed_actor_skips_remaining_pairs() {
        let mut world = World::new(4);
        let player = spawn_player(&mut world, Vec3::ZERO);
        let orb = spawn_orb(&mut world, Vec3::new(0.0, 0.0, 0.2));
        // Wall behind the orb, facing the player
        let wall = spawn_wall(
            &mut world,
            Vec3::new(0.0, 0.0, 0.3),
            Quat::from_rotation_y(std::f32::consts::PI),
            Vec2::splat(0.2),
        );

        let summary = tick(&mut world, &InputState::default(), SIM_DT);
        assert!(summary.collisions.contains(&(player, orb)));
        assert!(summary.collisions.contains(&(player, wall)));
        assert!(!summary.collisions.contains(&(orb, wall)));
        assert_eq!(summary.orbs_destroyed(), 1);
        assert!(summary.player_destroyed());
    }

    #[test]
    fn test_deterministic() {
        let run = |seed| {
            let mut world = World::new(seed);
            spawn_player(&mut world, Vec3::ZERO);
            for i in 0..10 {
                spawn_orb(&mut world, Vec3::new(i as f32 * 3.0, 1.0, 20.0));
            }
            let input = InputState::default();
            for _ in 0..240 {
                tick(&mut world, &input, SIM_DT);
            }
            world
                .actors
                .iter()
                .map(|a| a.transform.pos)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
    }
}
