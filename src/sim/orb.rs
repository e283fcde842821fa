//! Orb drift, player attraction and wall bounces

use glam::Vec3;

use super::transform::Transform;
use super::world::{ActorId, ActorKind, ActorType, CollisionHandler, Fate, HitActor, World};
use crate::tuning::{OrbTuning, Tuning};
use crate::{approach_vec3, random_unit_vec3, reflect};

/// Kinematic state of a single orb
#[derive(Debug, Clone, PartialEq)]
pub struct OrbData {
    pub vel: Vec3,
    /// Unit travel direction
    pub dir: Vec3,
}

impl OrbData {
    pub fn new(dir: Vec3) -> Self {
        Self {
            vel: Vec3::ZERO,
            dir,
        }
    }

    /// Steer velocity toward the cruise velocity, or toward the player when in
    /// attraction range, then integrate position.
    pub fn update(
        &mut self,
        transform: &mut Transform,
        player_pos: Option<Vec3>,
        tuning: &OrbTuning,
        dt: f32,
    ) {
        let mut target_vel = self.dir * tuning.speed_normal;
        let mut accel = tuning.accel_normal;

        if let Some(player_pos) = player_pos {
            let diff = player_pos - transform.pos;
            let len = diff.length();
            if len < tuning.attract_range {
                target_vel = diff.normalize_or_zero() * tuning.attract_speed_max;
                // Pull strengthens linearly from the edge of range inward
                accel = (tuning.attract_range - len) / tuning.attract_range
                    * tuning.attract_accel_max;
            }
        }

        self.vel = approach_vec3(self.vel, target_vel, accel * dt);
        transform.pos += self.vel * dt;
    }
}

impl CollisionHandler for OrbData {
    fn on_collide(&mut self, hit: HitActor<'_>, _tuning: &Tuning) -> Fate {
        match hit.actor_type {
            ActorType::Wall => {
                let normal = hit.transform.forward();
                // Only bounce while heading into the wall
                if normal.dot(self.dir) <= 0.0 {
                    self.dir = reflect(self.dir, normal);
                    log::trace!("Orb bounced, new dir {:?}", self.dir);
                }
                Fate::Live
            }
            ActorType::Player => Fate::Destroy,
            ActorType::Orb => Fate::Live,
        }
    }
}

/// Spawn an orb at `pos`, drifting in a random direction
pub fn spawn_orb(world: &mut World, pos: Vec3) -> ActorId {
    let dir = random_unit_vec3(world.rng());
    let divisor = world.tuning.orb.scale_divisor;
    let actor = world.new_actor(pos, ActorKind::Orb(OrbData::new(dir)));
    actor.transform.scale /= divisor;
    actor.id
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    const DT: f32 = 1.0 / 120.0;

    fn wall_transform() -> Transform {
        Transform::default()
    }

    #[test]
    fn test_reflects_into_wall() {
        let tuning = Tuning::default();
        let wall = wall_transform();
        let mut orb = OrbData::new(Vec3::NEG_Z);

        let hit = HitActor {
            actor_type: ActorType::Wall,
            transform: &wall,
        };
        assert_eq!(orb.on_collide(hit, &tuning), Fate::Live);
        assert!((orb.dir - Vec3::Z).length() < 1e-6);

        // Already leaving; must not flip back
        assert_eq!(orb.on_collide(hit, &tuning), Fate::Live);
        assert!((orb.dir - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_oblique_reflection_keeps_tangent() {
        let tuning = Tuning::default();
        let wall = Transform::new(
            Vec3::ZERO,
            Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            Vec3::ONE,
        );
        let dir = Vec3::new(1.0, -1.0, 0.0).normalize();
        let mut orb = OrbData::new(dir);
        let hit = HitActor {
            actor_type: ActorType::Wall,
            transform: &wall,
        };
        orb.on_collide(hit, &tuning);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((orb.dir - expected).length() < 1e-5);
        assert!((orb.dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_player_contact_destroys() {
        let tuning = Tuning::default();
        let player = Transform::default();
        let mut orb = OrbData::new(Vec3::X);
        let hit = HitActor {
            actor_type: ActorType::Player,
            transform: &player,
        };
        assert_eq!(orb.on_collide(hit, &tuning), Fate::Destroy);
    }

    #[test]
    fn test_accelerates_to_cruise_speed() {
        let tuning = OrbTuning::default();
        let mut orb = OrbData::new(Vec3::X);
        let mut t = Transform::default();

        orb.update(&mut t, None, &tuning, DT);
        assert!((orb.vel.x - tuning.accel_normal * DT).abs() < 1e-6);

        for _ in 0..(3.0 / DT) as usize {
            orb.update(&mut t, None, &tuning, DT);
        }
        assert!((orb.vel - Vec3::X * tuning.speed_normal).length() < 1e-5);
        assert!(t.pos.x > 0.0);
    }

    #[test]
    fn test_attracted_toward_nearby_player() {
        let tuning = OrbTuning::default();
        let mut orb = OrbData::new(Vec3::X);
        let mut t = Transform::default();
        let player = Vec3::new(0.0, 1.0, 0.0);

        orb.update(&mut t, Some(player), &tuning, DT);
        assert!(orb.vel.y > 0.0);
        assert_eq!(orb.vel.x, 0.0);
    }

    #[test]
    fn test_distant_player_ignored() {
        let tuning = OrbTuning::default();
        let mut orb = OrbData::new(Vec3::X);
        let mut t = Transform::default();
        let player = Vec3::new(0.0, 50.0, 0.0);

        orb.update(&mut t, Some(player), &tuning, DT);
        assert!(orb.vel.x > 0.0);
        assert_eq!(orb.vel.y, 0.0);
    }

    #[test]
    fn test_player_on_top_is_finite() {
        let tuning = OrbTuning::default();
        let mut orb = OrbData::new(Vec3::X);
        let mut t = Transform::default();
        orb.update(&mut t, Some(Vec3::ZERO), &tuning, DT);
        assert!(orb.vel.is_finite());
        assert!(t.pos.is_finite());
    }

    #[test]
    fn test_spawn_scaled_and_directed() {
        let mut world = World::new(42);
        let id = spawn_orb(&mut world, Vec3::new(1.0, 2.0, 3.0));
        let actor = world.actor(id).unwrap();
        assert_eq!(actor.transform.scale, Vec3::splat(1.0 / 8.0));
        let orb = actor.as_orb().unwrap();
        assert_eq!(orb.vel, Vec3::ZERO);
        assert!((orb.dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_spawn_deterministic_per_seed() {
        let mut a = World::new(7);
        let mut b = World::new(7);
        let ia = spawn_orb(&mut a, Vec3::ZERO);
        let ib = spawn_orb(&mut b, Vec3::ZERO);
        assert_eq!(
            a.actor(ia).unwrap().as_orb().unwrap().dir,
            b.actor(ib).unwrap().as_orb().unwrap().dir
        );
    }
}
