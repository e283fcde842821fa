//! Screen-space overlays drawn on top of the 3D view

pub mod hud;

pub use hud::{player_render_hud, player_render_state_info};
