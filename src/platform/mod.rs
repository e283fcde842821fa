//! Platform abstraction layer
//!
//! Handles window-system differences for:
//! - Input events (keyboard, mouse, gamepads) via [`InputSource`]
//! - The per-frame input snapshot consumed by the simulation

pub mod input;

pub use input::{
    ButtonState, Controller, GamepadAxis, GamepadButton, GamepadSnapshot, InputSource,
    InputState, Key, Mouse, MouseButton, CONTROLLER_MAX,
};
