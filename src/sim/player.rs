//! Player ship: steering, forward thrust, camera lean, fuel and orb upgrades
//!
//! Every rate in here scales geometrically with the ship's upgrade level, so
//! collecting orbs makes the ship faster and twitchier. Fuel burns
//! continuously and is topped up by orbs; running dry or touching a wall ends
//! the run.

use glam::{Vec2, Vec3};

use super::transform::Transform;
use super::world::{
    Actor, ActorId, ActorKind, ActorType, CollisionHandler, CollisionMask, Fate, HitActor, World,
};
use crate::platform::{GamepadAxis, InputState, Key};
use crate::renderer::Camera;
use crate::tuning::{PlayerTuning, Tuning, level_scaled};
use crate::{approach, approach_vec2};

/// Kinematic and progression state of the player ship
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    spd: f32,
    /// Pitch (x) and yaw (y) rates, rad/s
    ang_spd: Vec2,
    /// Camera lean relative to the ship heading, rad
    look_ang: Vec2,
    level: u32,
    progress: u32,
    fuel: f32,
}

impl PlayerData {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            spd: tuning.speed_base,
            ang_spd: Vec2::ZERO,
            look_ang: Vec2::ZERO,
            level: 0,
            progress: 0,
            fuel: tuning.fuel_max,
        }
    }

    pub fn speed(&self) -> f32 {
        self.spd
    }

    pub fn angular_speed(&self) -> Vec2 {
        self.ang_spd
    }

    pub fn look_angle(&self) -> Vec2 {
        self.look_ang
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Orbs collected toward the next level
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn orb_target(&self, tuning: &PlayerTuning) -> u32 {
        tuning.orb_target(self.level)
    }

    /// Advance one tick using the current input snapshot
    pub fn update(
        &mut self,
        transform: &mut Transform,
        input: &InputState,
        tuning: &PlayerTuning,
        dt: f32,
    ) -> Fate {
        self.step(transform, steering(input), tuning, dt)
    }

    /// Advance one tick with an explicit steering vector (x = pitch, y = yaw)
    pub fn step(
        &mut self,
        transform: &mut Transform,
        rdir: Vec2,
        tuning: &PlayerTuning,
        dt: f32,
    ) -> Fate {
        if self.fuel < 0.0 {
            return Fate::Destroy;
        }
        let level = self.level;

        let ang_spd_max = level_scaled(tuning.ang_speed_max_base, tuning.level_ang_speed_mul, level);
        let ang_spd_target = rdir * ang_spd_max;
        let ang_rate = if ang_spd_target != Vec2::ZERO {
            level_scaled(tuning.ang_accel_base, tuning.level_ang_accel_mul, level)
        } else {
            level_scaled(tuning.ang_decel_base, tuning.level_ang_accel_mul, level)
        };
        self.ang_spd = approach_vec2(self.ang_spd, ang_spd_target, ang_rate * dt);

        transform.local_rotate_x(self.ang_spd.x * dt);
        transform.local_rotate_y(self.ang_spd.y * dt);

        let speed_target = level_scaled(tuning.speed_base, tuning.level_speed_mul, level);
        self.spd = approach(self.spd, speed_target, tuning.accel * dt);
        transform.pos += transform.forward() * (self.spd * dt);

        let look_ang_max = level_scaled(tuning.look_angle_max_base, tuning.level_look_mul, level);
        let look_ang_spd = level_scaled(tuning.look_angle_speed_base, tuning.level_look_mul, level);
        let look_target = look_amount(rdir, tuning.look_start) * look_ang_max;
        self.look_ang = approach_vec2(self.look_ang, look_target, look_ang_spd * dt);

        self.fuel -= tuning.fuel_deplete_rate * dt;
        if self.fuel < 0.0 {
            self.fuel = 0.0;
            log::info!("Out of fuel at level {}", self.level);
            return Fate::Destroy;
        }
        Fate::Live
    }

    /// Place `camera` at the ship, leaning by the accumulated look angle.
    /// The camera snaps to the ship, so `_dt` is unused.
    pub fn camera_view(&self, transform: &Transform, camera: &mut Camera, _dt: f32) {
        camera.transform.pos = transform.pos;
        camera.transform.rot = transform.rot;
        camera.transform.local_rotate_x(self.look_ang.x);
        camera.transform.local_rotate_y(self.look_ang.y);
    }

    fn collect_orb(&mut self, tuning: &PlayerTuning) {
        self.progress += 1;
        if self.progress >= self.orb_target(tuning) {
            self.progress = 0;
            self.level += 1;
            log::info!("Level up: {}", self.level);
        }
        self.fuel = (self.fuel + tuning.fuel_per_orb).min(tuning.fuel_max);
    }
}

impl CollisionHandler for PlayerData {
    fn on_collide(&mut self, hit: HitActor<'_>, tuning: &Tuning) -> Fate {
        match hit.actor_type {
            ActorType::Orb => {
                self.collect_orb(&tuning.player);
                Fate::Live
            }
            ActorType::Wall => {
                log::info!("Player hit a wall at level {}", self.level);
                Fate::Destroy
            }
            ActorType::Player => Fate::Live,
        }
    }
}

/// Steering from the active gamepad's left stick, else W/S/A/D
pub fn steering(input: &InputState) -> Vec2 {
    if let Some(pad) = input.active_controller() {
        return Vec2::new(
            pad.axis(GamepadAxis::LeftY),
            -pad.axis(GamepadAxis::LeftX),
        );
    }
    let axis = |pos: Key, neg: Key| f32::from(input.key_down(pos)) - f32::from(input.key_down(neg));
    Vec2::new(axis(Key::S, Key::W), axis(Key::A, Key::D))
}

/// Remap steering past the dead zone to a lean factor of at most 1.
/// Deflection inside the dead zone yields zero.
fn look_amount(rdir: Vec2, look_start: f32) -> Vec2 {
    let amount = rdir - rdir.normalize_or_zero() * look_start;
    if rdir.dot(amount) < 0.0 {
        return Vec2::ZERO;
    }
    (amount / (1.0 - look_start)).clamp_length_max(1.0)
}

/// Spawn the player ship at `pos` and register it as the world's player
pub fn spawn_player(world: &mut World, pos: Vec3) -> ActorId {
    let data = PlayerData::new(&world.tuning.player);
    let scale = world.tuning.player.scale;
    let actor = world.new_actor(pos, ActorKind::Player(data));
    actor.transform.scale = Vec3::splat(scale);
    actor.collide_mask = CollisionMask::ORB;
    let id = actor.id;
    world.player = Some(id);
    log::info!("Player #{id} spawned at {pos:?}");
    id
}

/// Camera follow for a player actor; no-op for other kinds
pub fn player_camera_view(actor: &Actor, camera: &mut Camera, dt: f32) {
    if let Some(data) = actor.as_player() {
        data.camera_view(&actor.transform, camera, dt);
    }
}
