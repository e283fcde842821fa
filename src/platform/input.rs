//! Per-frame input snapshot
//!
//! The window library is polled once per frame through [`InputSource`]; the
//! result is folded into an owned [`InputState`] that tracks level (down) and
//! edge (pressed/released) state for keys and buttons.

use bitflags::bitflags;
use glam::Vec2;

/// Gamepad slots polled every frame
pub const CONTROLLER_MAX: usize = 16;

bitflags! {
    /// Level and edge bits for a key or button
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ButtonState: u8 {
        const DOWN = 1 << 0;
        /// Went down this frame
        const PRESSED = 1 << 1;
        /// Went up this frame
        const RELEASED = 1 << 2;
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::empty()
    }
}

impl ButtonState {
    /// Fold the polled level into the state, deriving edges from the last frame
    pub fn update(&mut self, down: bool) {
        self.remove(Self::PRESSED | Self::RELEASED);

        if down {
            if !self.contains(Self::DOWN) {
                self.insert(Self::PRESSED);
            }
            self.insert(Self::DOWN);
        } else {
            if self.contains(Self::DOWN) {
                self.insert(Self::RELEASED);
            }
            self.remove(Self::DOWN);
        }
    }

    #[inline]
    pub fn is_down(self) -> bool {
        self.contains(Self::DOWN)
    }

    #[inline]
    pub fn is_pressed(self) -> bool {
        self.contains(Self::PRESSED)
    }

    #[inline]
    pub fn is_released(self) -> bool {
        self.contains(Self::RELEASED)
    }
}

/// Declares a dense enum together with its variant table
macro_rules! input_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const COUNT: usize = Self::ALL.len();

            #[inline]
            pub fn index(self) -> usize {
                self as usize
            }

            /// Look up a variant by its dense index
            pub fn from_index(index: usize) -> Option<Self> {
                Self::ALL.get(index).copied()
            }
        }
    };
}

input_enum! {
    /// Keyboard key
    Key {
        A, B, C, D, E, F, G, H, I, J, K, L, M,
        N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
        Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        Escape, Tab, Space, Enter, Backspace, Delete, Insert,
        Home, End, PageUp, PageDown,
        Left, Right, Up, Down,
        LeftShift, RightShift, LeftControl, RightControl, LeftAlt, RightAlt,
    }
}

input_enum! {
    MouseButton { Left, Right, Middle }
}

input_enum! {
    /// Standard gamepad axis layout
    GamepadAxis { LeftX, LeftY, RightX, RightY, LeftTrigger, RightTrigger }
}

input_enum! {
    /// Standard gamepad button layout
    GamepadButton {
        A, B, X, Y,
        LeftBumper, RightBumper,
        Back, Start, Guide,
        LeftThumb, RightThumb,
        DpadUp, DpadRight, DpadDown, DpadLeft,
    }
}

/// Raw gamepad readout for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadSnapshot {
    pub axes: [f32; GamepadAxis::COUNT],
    pub buttons: [bool; GamepadButton::COUNT],
}

/// Window/input library, polled once per frame
pub trait InputSource {
    fn key_down(&self, key: Key) -> bool;
    fn mouse_button_down(&self, button: MouseButton) -> bool;
    fn cursor_pos(&self) -> Vec2;
    /// Axis count of the joystick in `slot`, `None` if nothing is connected
    fn joystick_axis_count(&self, slot: usize) -> Option<usize>;
    /// Gamepad mapping of the joystick in `slot`
    fn gamepad_state(&self, slot: usize) -> Option<GamepadSnapshot>;
}

/// Filtered state of one gamepad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Controller {
    axes: [f32; GamepadAxis::COUNT],
    buttons: [ButtonState; GamepadButton::COUNT],
}

impl Controller {
    /// Axis value, zero inside the dead zone
    #[inline]
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis.index()]
    }

    #[inline]
    pub fn button(&self, button: GamepadButton) -> ButtonState {
        self.buttons[button.index()]
    }

    pub fn any_button_pressed(&self) -> bool {
        self.buttons.iter().any(|b| b.is_pressed())
    }

    fn update(&mut self, snapshot: &GamepadSnapshot, dead_zone: f32) {
        for (axis, raw) in self.axes.iter_mut().zip(snapshot.axes) {
            *axis = if raw.abs() <= dead_zone { 0.0 } else { raw };
        }
        for (state, down) in self.buttons.iter_mut().zip(snapshot.buttons) {
            state.update(down);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mouse {
    pub pos: Vec2,
    /// Movement since the previous frame
    pub delta: Vec2,
    buttons: [ButtonState; MouseButton::COUNT],
}

impl Mouse {
    #[inline]
    pub fn button(&self, button: MouseButton) -> ButtonState {
        self.buttons[button.index()]
    }
}

/// Input snapshot, refreshed once per frame before the simulation reads it
#[derive(Debug, Clone)]
pub struct InputState {
    keys: [ButtonState; Key::COUNT],
    controllers: [Controller; CONTROLLER_MAX],
    controller_active: [bool; CONTROLLER_MAX],
    mouse: Mouse,
    mouse_scroll: f32,
    dead_zone: f32,
    polled: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(crate::tuning::InputTuning::default().controller_dead_zone)
    }
}

impl InputState {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            keys: [ButtonState::empty(); Key::COUNT],
            controllers: [Controller::default(); CONTROLLER_MAX],
            controller_active: [false; CONTROLLER_MAX],
            mouse: Mouse::default(),
            mouse_scroll: 0.0,
            dead_zone,
            polled: false,
        }
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    /// Poll the source and fold the readout into edge/level state
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &S) {
        for key in Key::ALL {
            self.keys[key.index()].update(source.key_down(*key));
        }

        for slot in 0..CONTROLLER_MAX {
            // The OS exposes the mouse as a single-axis joystick; only
            // devices with more than one axis count as gamepads.
            let active = source.joystick_axis_count(slot).is_some_and(|n| n > 1);
            let snapshot = if active { source.gamepad_state(slot) } else { None };

            let was_active = self.controller_active[slot];
            self.controller_active[slot] = snapshot.is_some();
            match snapshot {
                Some(snapshot) => {
                    if !was_active {
                        log::info!("Gamepad connected in slot {slot}");
                    }
                    self.controllers[slot].update(&snapshot, self.dead_zone);
                }
                None if was_active => {
                    log::info!("Gamepad in slot {slot} disconnected");
                    self.controllers[slot] = Controller::default();
                }
                None => {}
            }
        }

        let pos = source.cursor_pos();
        self.mouse.delta = if self.polled {
            pos - self.mouse.pos
        } else {
            Vec2::ZERO
        };
        self.mouse.pos = pos;
        for button in MouseButton::ALL {
            self.mouse.buttons[button.index()].update(source.mouse_button_down(*button));
        }

        self.polled = true;
    }

    /// Accumulate a scroll-wheel event; drained by [`Self::consume_mouse_scroll`]
    pub fn add_mouse_scroll(&mut self, offset: f32) {
        self.mouse_scroll += offset;
    }

    /// Take the scroll accumulated since the last call
    pub fn consume_mouse_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.mouse_scroll)
    }

    #[inline]
    pub fn key(&self, key: Key) -> ButtonState {
        self.keys[key.index()]
    }

    /// State by raw key code.
    ///
    /// # Panics
    /// If `code` is not a valid key index. Passing one is a programming error.
    pub fn key_by_code(&self, code: usize) -> ButtonState {
        assert!(code < Key::COUNT, "key code {code} out of range");
        self.keys[code]
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.key(key).is_down()
    }

    #[inline]
    pub fn key_up(&self, key: Key) -> bool {
        !self.key_down(key)
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.key(key).is_pressed()
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.key(key).is_released()
    }

    pub fn any_key_pressed(&self) -> bool {
        self.keys.iter().any(|k| k.is_pressed())
    }

    /// The gamepad the player steers with: the first connected slot
    pub fn active_controller(&self) -> Option<&Controller> {
        self.controller_active
            .iter()
            .position(|&active| active)
            .map(|slot| &self.controllers[slot])
    }

    /// Any button on the active gamepad went down this frame
    pub fn any_controller_button_pressed(&self) -> bool {
        self.active_controller()
            .is_some_and(Controller::any_button_pressed)
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct FakeSource {
        keys: HashSet<Key>,
        buttons: HashSet<MouseButton>,
        cursor: Vec2,
        joysticks: HashMap<usize, (usize, GamepadSnapshot)>,
    }

    impl InputSource for FakeSource {
        fn key_down(&self, key: Key) -> bool {
            self.keys.contains(&key)
        }
        fn mouse_button_down(&self, button: MouseButton) -> bool {
            self.buttons.contains(&button)
        }
        fn cursor_pos(&self) -> Vec2 {
            self.cursor
        }
        fn joystick_axis_count(&self, slot: usize) -> Option<usize> {
            self.joysticks.get(&slot).map(|(n, _)| *n)
        }
        fn gamepad_state(&self, slot: usize) -> Option<GamepadSnapshot> {
            self.joysticks.get(&slot).map(|(_, s)| *s)
        }
    }

    #[test]
    fn test_button_edges() {
        let mut b = ButtonState::default();
        b.update(true);
        assert!(b.is_down() && b.is_pressed() && !b.is_released());
        b.update(true);
        assert!(b.is_down() && !b.is_pressed());
        b.update(false);
        assert!(!b.is_down() && b.is_released());
        b.update(false);
        assert_eq!(b, ButtonState::empty());
    }

    #[test]
    fn test_key_queries() {
        let mut input = InputState::default();
        let mut src = FakeSource::default();
        src.keys.insert(Key::W);

        input.update(&src);
        assert!(input.key_down(Key::W));
        assert!(input.key_pressed(Key::W));
        assert!(input.key_up(Key::S));
        assert!(input.any_key_pressed());
        assert_eq!(input.key_by_code(Key::W.index()), input.key(Key::W));

        input.update(&src);
        assert!(input.key_down(Key::W));
        assert!(!input.any_key_pressed());

        src.keys.clear();
        input.update(&src);
        assert!(input.key_released(Key::W));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_key_code_out_of_range_panics() {
        InputState::default().key_by_code(Key::COUNT);
    }

    #[test]
    fn test_single_axis_joystick_is_not_a_controller() {
        let mut input = InputState::default();
        let mut src = FakeSource::default();
        src.joysticks.insert(0, (1, GamepadSnapshot::default()));
        input.update(&src);
        assert!(input.active_controller().is_none());

        let mut pad = GamepadSnapshot::default();
        pad.axes[GamepadAxis::LeftX.index()] = 0.9;
        src.joysticks.insert(3, (6, pad));
        input.update(&src);
        let con = input.active_controller().unwrap();
        assert_eq!(con.axis(GamepadAxis::LeftX), 0.9);
    }

    #[test]
    fn test_dead_zone_filters_axes() {
        let mut input = InputState::new(0.3);
        let mut src = FakeSource::default();
        let mut pad = GamepadSnapshot::default();
        pad.axes[GamepadAxis::LeftX.index()] = 0.3;
        pad.axes[GamepadAxis::LeftY.index()] = -0.31;
        pad.buttons[GamepadButton::A.index()] = true;
        src.joysticks.insert(0, (6, pad));

        input.update(&src);
        let con = input.active_controller().unwrap();
        assert_eq!(con.axis(GamepadAxis::LeftX), 0.0);
        assert_eq!(con.axis(GamepadAxis::LeftY), -0.31);
        assert!(con.any_button_pressed());
        assert!(con.button(GamepadButton::A).is_down());
        assert!(input.any_controller_button_pressed());

        input.update(&src);
        assert!(!input.any_controller_button_pressed());

        src.joysticks.clear();
        input.update(&src);
        assert!(input.active_controller().is_none());
    }

    #[test]
    fn test_mouse_delta_and_scroll() {
        let mut input = InputState::default();
        let mut src = FakeSource {
            cursor: Vec2::new(100.0, 50.0),
            ..Default::default()
        };
        input.update(&src);
        assert_eq!(input.mouse().delta, Vec2::ZERO);

        src.cursor = Vec2::new(110.0, 45.0);
        src.buttons.insert(MouseButton::Left);
        input.update(&src);
        assert_eq!(input.mouse().delta, Vec2::new(10.0, -5.0));
        assert!(input.mouse().button(MouseButton::Left).is_pressed());

        input.add_mouse_scroll(1.0);
        input.add_mouse_scroll(0.5);
        assert_eq!(input.consume_mouse_scroll(), 1.5);
        assert_eq!(input.consume_mouse_scroll(), 0.0);
    }
}
