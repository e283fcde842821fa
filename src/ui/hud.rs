//! Player HUD: reticle, screen-centre marker, fuel gauge and a debug readout

use glam::Vec2;

use crate::consts::{UI_HEIGHT, UI_WIDTH};
use crate::renderer::{Camera, RenderSink, colors};
use crate::sim::Actor;
use crate::tuning::PlayerTuning;

/// Glyph cell size the marker offsets are measured in
const GLYPH_OFFSET: f32 = 24.0;
const HUD_TEXT_SIZE: f32 = 0.5;
const INFO_TEXT_SIZE: f32 = 0.4;
const INFO_POS: Vec2 = Vec2::new(10.0, 150.0);

/// Centre a single HUD glyph on a UI-space point
fn glyph_anchor(ui: Vec2) -> Vec2 {
    let half = GLYPH_OFFSET * HUD_TEXT_SIZE;
    Vec2::new(ui.x - half, ui.y + half)
}

/// Draw the heading reticle ("o" one unit ahead of the ship), the screen
/// centre ("x") and the remaining fuel. Does nothing for non-player actors.
pub fn player_render_hud<S: RenderSink + ?Sized>(actor: &Actor, camera: &Camera, sink: &mut S) {
    let Some(data) = actor.as_player() else {
        return;
    };

    let ahead = actor.transform.pos + actor.transform.forward();
    if let Some(screen) = camera.world_to_screen_pos(ahead) {
        let ui = screen * Vec2::new(UI_WIDTH, UI_HEIGHT);
        sink.push_ui_text("o", glyph_anchor(ui), HUD_TEXT_SIZE, colors::GREEN);
    }

    let center = glyph_anchor(Vec2::new(UI_WIDTH, UI_HEIGHT) * 0.5);
    sink.push_ui_text("x", center, HUD_TEXT_SIZE, colors::GREEN);

    let fuel = format!("{:.2}", data.fuel());
    sink.push_ui_text(
        &fuel,
        center - Vec2::new(32.0, 100.0),
        HUD_TEXT_SIZE,
        colors::GREEN,
    );
}

/// Multi-line debug readout of the player's kinematic state
pub fn player_render_state_info<S: RenderSink + ?Sized>(
    actor: &Actor,
    tuning: &PlayerTuning,
    sink: &mut S,
) {
    let Some(data) = actor.as_player() else {
        return;
    };
    let pos = actor.transform.pos;
    let fwd = actor.transform.forward();
    let ang = data.angular_speed();

    let info = format!(
        "Pos: ({:.3}, {:.3}, {:.3})\n\
         Forward: ({:.3}, {:.3}, {:.3})\n\
         Spd: {:.3}\n\
         Ang Spd: ({:.3}, {:.3})\n\
         Orb: {}/{}\n\
         Level: {}\n",
        pos.x,
        pos.y,
        pos.z,
        fwd.x,
        fwd.y,
        fwd.z,
        data.speed(),
        ang.x,
        ang.y,
        data.progress(),
        data.orb_target(tuning),
        data.level(),
    );
    sink.push_ui_text(&info, INFO_POS, INFO_TEXT_SIZE, colors::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::Tuning;
    use crate::sim::{ActorKind, Fate, World, player_camera_view, spawn_player, spawn_wall};
    use glam::{Quat, Vec3};

    #[test]
    fn test_hud_layout() {
        let mut world = World::new(5);
        let id = spawn_player(&mut world, Vec3::new(3.0, 1.0, -2.0));
        let actor = world.actor(id).unwrap();
        let mut camera = Camera::default();
        player_camera_view(actor, &mut camera, 0.0);

        let mut list = DrawList::new();
        player_render_hud(actor, &camera, &mut list);
        assert_eq!(list.texts.len(), 3);

        let center = Vec2::new(UI_WIDTH / 2.0 - 12.0, UI_HEIGHT / 2.0 + 12.0);
        let reticle = &list.texts[0];
        assert_eq!(reticle.text, "o");
        // Camera looks straight down the ship's heading
        assert!((reticle.pos - center).length() < 1e-2);

        assert_eq!(list.texts[1].text, "x");
        assert_eq!(list.texts[1].pos, center);
        assert_eq!(list.texts[2].text, "100.00");
        assert_eq!(list.texts[2].pos, center - Vec2::new(32.0, 100.0));
        assert!(list.texts.iter().all(|t| t.color == colors::GREEN));
    }

    #[test]
    fn test_reticle_hidden_behind_camera() {
        let mut world = World::new(5);
        let id = spawn_player(&mut world, Vec3::ZERO);
        let actor = world.actor(id).unwrap();
        let mut camera = Camera::default();
        camera.transform.rot = Quat::from_rotation_y(std::f32::consts::PI);

        let mut list = DrawList::new();
        player_render_hud(actor, &camera, &mut list);
        assert!(list.texts.iter().all(|t| t.text != "o"));
    }

    #[test]
    fn test_state_info_readout() {
        let mut world = World::new(5);
        let id = spawn_player(&mut world, Vec3::ZERO);
        let actor = world.actor(id).unwrap();

        let mut list = DrawList::new();
        player_render_state_info(actor, &world.tuning.player, &mut list);
        let text = &list.texts[0];
        assert_eq!(text.pos, INFO_POS);
        assert_eq!(text.size, INFO_TEXT_SIZE);
        assert!(text.text.contains("Spd: 10.000"));
        assert!(text.text.contains("Orb: 0/2"));
    }

    #[test]
    fn test_fuel_readout_never_negative_on_final_tick() {
        let tuning = Tuning {
            player: PlayerTuning {
                fuel_max: 1.0,
                fuel_deplete_rate: 10.0,
                ..PlayerTuning::default()
            },
            ..Tuning::default()
        };
        let mut world = World::with_tuning(5, tuning);
        let id = spawn_player(&mut world, Vec3::ZERO);
        let player_tuning = world.tuning.player.clone();

        let actor = world.actor_mut(id).unwrap();
        let ActorKind::Player(data) = &mut actor.kind else {
            panic!("spawned actor is not a player");
        };
        let mut fates = Vec::new();
        for _ in 0..3 {
            fates.push(data.step(&mut actor.transform, Vec2::ZERO, &player_tuning, 0.07));
        }
        assert_eq!(fates, vec![Fate::Live, Fate::Destroy, Fate::Destroy]);

        let actor = world.actor(id).unwrap();
        let mut list = DrawList::new();
        player_render_hud(actor, &Camera::default(), &mut list);
        let fuel = list.texts.last().unwrap();
        assert_eq!(fuel.text, "0.00");
    }

    #[test]
    fn test_non_player_draws_nothing() {
        let mut world = World::new(5);
        let id = spawn_wall(&mut world, Vec3::ZERO, Quat::IDENTITY, Vec2::ONE);
        let actor = world.actor(id).unwrap();
        let mut list = DrawList::new();
        player_render_hud(actor, &Camera::default(), &mut list);
        player_render_state_info(actor, &world.tuning.player, &mut list);
        assert!(list.is_empty());
    }
}
