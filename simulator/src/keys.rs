//! Keyboard stand-ins for the three hardware buttons.
//!
//! | Button | Keys                 |
//! |--------|----------------------|
//! | Left   | `A`, `Left`          |
//! | Middle | `S`, `Space`, `Down` |
//! | Right  | `D`, `Right`         |
//!
//! Levels follow KeyDown/KeyUp so holding a key behaves like holding the
//! button, which the exit gesture and Dino's duck rely on.

use embedded_graphics_simulator::sdl2::Keycode;
use launcher_common::Button;
use launcher_common::config::BUTTON_COUNT;

/// Which button a key stands for, if any.
pub fn button_for(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::A | Keycode::Left => Some(Button::Left),
        Keycode::S | Keycode::Space | Keycode::Down => Some(Button::Middle),
        Keycode::D | Keycode::Right => Some(Button::Right),
        _ => None,
    }
}

/// Current level of each button as driven by the keyboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keys {
    down: [bool; BUTTON_COUNT],
}

impl Keys {
    pub const fn new() -> Self {
        Self {
            down: [false; BUTTON_COUNT],
        }
    }

    pub fn key_down(
        &mut self,
        keycode: Keycode,
    ) {
        self.set(keycode, true);
    }

    pub fn key_up(
        &mut self,
        keycode: Keycode,
    ) {
        self.set(keycode, false);
    }

    fn set(
        &mut self,
        keycode: Keycode,
        level: bool,
    ) {
        if let Some(button) = button_for(keycode) {
            self.down[button.index()] = level;
        }
    }

    /// Raw levels in the order `Input::update` expects.
    pub const fn levels(&self) -> [bool; BUTTON_COUNT] { self.down }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(button_for(Keycode::A), Some(Button::Left));
        assert_eq!(button_for(Keycode::Left), Some(Button::Left));
        assert_eq!(button_for(Keycode::Space), Some(Button::Middle));
        assert_eq!(button_for(Keycode::Down), Some(Button::Middle));
        assert_eq!(button_for(Keycode::Right), Some(Button::Right));
        assert_eq!(button_for(Keycode::Q), None);
    }

    #[test]
    fn test_levels_follow_key_events() {
        let mut keys = Keys::new();
        keys.key_down(Keycode::A);
        keys.key_down(Keycode::D);
        assert_eq!(keys.levels(), [true, false, true]);

        keys.key_up(Keycode::A);
        keys.key_down(Keycode::Escape);
        assert_eq!(keys.levels(), [false, false, true]);
    }
}
