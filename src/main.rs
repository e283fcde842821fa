//! Orb Runner - headless demo
//!
//! Builds a walled arena, scatters orbs and flies the ship with a scripted
//! pilot at the fixed simulation timestep. Every frame records the HUD and
//! collider outlines into a draw list, as a GPU frontend would consume them.
//!
//! Usage: `orb-runner [tuning.json] [seed]`

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec2, Vec3};
use rand::Rng;

use orb_runner::Tuning;
use orb_runner::consts::{MAX_SUBSTEPS, SIM_DT};
use orb_runner::platform::{GamepadSnapshot, InputSource, InputState, Key, MouseButton};
use orb_runner::renderer::{Camera, DrawList, RenderSink, colors};
use orb_runner::sim::{
    ActorType, World, player_camera_view, render_collider_outline, spawn_orb, spawn_player,
    spawn_wall, tick,
};
use orb_runner::ui::{player_render_hud, player_render_state_info};

/// Half the side length of the cubic arena
const ARENA_HALF: f32 = 60.0;
const ORB_COUNT: usize = 40;
/// Presentation rate the demo pretends to run at
const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 60;
const DEFAULT_SEED: u64 = 0x0_5EED;

/// Keyboard-only pilot that weaves in a slow figure of eight
struct ScriptedPilot {
    frame: u32,
}

impl ScriptedPilot {
    fn holding(&self, key: Key) -> bool {
        // 4 second cycle: climb, bank left, dive, bank right
        let phase = (self.frame / 60) % 4;
        matches!(
            (phase, key),
            (0, Key::W) | (1, Key::A) | (2, Key::S) | (3, Key::D)
        )
    }
}

impl InputSource for ScriptedPilot {
    fn key_down(&self, key: Key) -> bool {
        self.holding(key)
    }

    fn mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn cursor_pos(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn joystick_axis_count(&self, _slot: usize) -> Option<usize> {
        None
    }

    fn gamepad_state(&self, _slot: usize) -> Option<GamepadSnapshot> {
        None
    }
}

struct Game {
    world: World,
    input: InputState,
    camera: Camera,
    draw_list: DrawList,
    accumulator: f32,
    orbs_collected: usize,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        let input = InputState::new(tuning.input.controller_dead_zone);
        let mut world = World::with_tuning(seed, tuning);
        build_arena(&mut world);
        spawn_player(&mut world, Vec3::ZERO);

        Self {
            world,
            input,
            camera: Camera::default(),
            draw_list: DrawList::new(),
            accumulator: 0.0,
            orbs_collected: 0,
        }
    }

    /// Run as many fixed ticks as the frame time allows
    fn update(&mut self, dt: f32) {
        self.accumulator += dt.min(0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let summary = tick(&mut self.world, &self.input, SIM_DT);
            self.orbs_collected += summary.orbs_destroyed();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Record this frame's draw commands
    fn render(&mut self) {
        self.draw_list.clear();
        let Some(player) = self.world.player_actor() else {
            return;
        };

        player_camera_view(player, &mut self.camera, FRAME_DT);
        player_render_hud(player, &self.camera, &mut self.draw_list);
        player_render_state_info(player, &self.world.tuning.player, &mut self.draw_list);

        for actor in &self.world.actors {
            if actor.actor_type() == ActorType::Orb {
                render_collider_outline(actor, 1.0, colors::COLLIDER, &mut self.draw_list);
            }
        }
        let summary = format!("Orbs: {}", self.orbs_collected);
        self.draw_list
            .push_ui_text(&summary, Vec2::new(10.0, 120.0), 0.4, colors::WHITE);
    }
}

/// Six inward-facing walls enclosing a cube of side `2 * ARENA_HALF`
fn build_arena(world: &mut World) {
    let size = Vec2::splat(ARENA_HALF * 2.0);
    let h = ARENA_HALF;
    let walls = [
        (Vec3::new(0.0, -h, 0.0), Quat::from_rotation_x(-FRAC_PI_2)),
        (Vec3::new(0.0, h, 0.0), Quat::from_rotation_x(FRAC_PI_2)),
        (Vec3::new(0.0, 0.0, -h), Quat::IDENTITY),
        (Vec3::new(0.0, 0.0, h), Quat::from_rotation_y(PI)),
        (Vec3::new(-h, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2)),
        (Vec3::new(h, 0.0, 0.0), Quat::from_rotation_y(-FRAC_PI_2)),
    ];
    for (pos, rot) in walls {
        spawn_wall(world, pos, rot, size);
    }

    let spread = ARENA_HALF * 0.8;
    for _ in 0..ORB_COUNT {
        let rng = world.rng();
        let pos = Vec3::new(
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
        );
        spawn_orb(world, pos);
    }
}

fn main() {
    env_logger::init();
    log::info!("Orb Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut game = Game::new(seed, tuning);
    let mut pilot = ScriptedPilot { frame: 0 };

    for frame in 0..MAX_FRAMES {
        pilot.frame = frame;
        game.input.update(&pilot);
        game.update(FRAME_DT);
        game.render();

        if game.world.player.is_none() {
            log::info!("Run over after {:.2}s", frame as f32 * FRAME_DT);
            break;
        }
        if frame % 60 == 0 {
            log::debug!(
                "Frame {frame}: {} texts, {} outlines, {} bytes of line vertices",
                game.draw_list.texts.len(),
                game.draw_list.outlines.len(),
                game.draw_list.line_buffer_size()
            );
        }
    }

    log::info!(
        "Collected {} orbs, {} left in the arena",
        game.orbs_collected,
        game.world.count(ActorType::Orb)
    );
}
