//! Button input: debouncing, edges, logical actions and gestures.
//!
//! [`Input`] is updated once per frame with the raw (active-level corrected)
//! pin levels and a millisecond timestamp. Programs then query either the
//! physical buttons or logical [`Action`]s, which are resolved through the
//! mapping of the active [`ProgramId`].
//!
//! Hold durations are measured against the timestamp of the last
//! [`Input::update`], so every query within one frame sees the same time.

mod button;
mod mapping;

pub use button::ButtonState;
pub use mapping::{Action, ProgramId};

use crate::config::{BUTTON_COUNT, EXIT_REQUEST_MS, FAIL_SAFE_MS};

/// Physical button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Left,
    Middle,
    Right,
}

impl Button {
    /// All buttons in physical order.
    pub const ALL: [Self; BUTTON_COUNT] = [Self::Left, Self::Middle, Self::Right];

    /// Physical index (0 = Left, 1 = Middle, 2 = Right).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

/// Debounced state of all buttons plus the active action mapping.
#[derive(Clone, Debug)]
pub struct Input {
    buttons: [ButtonState; BUTTON_COUNT],
    now_ms: u32,
    active: ProgramId,
}

impl Input {
    /// Seed from the current pin levels.
    ///
    /// A button already down at boot is accepted as down but does not produce
    /// a press edge.
    pub fn new(
        raw: [bool; BUTTON_COUNT],
        now_ms: u32,
    ) -> Self {
        Self {
            buttons: raw.map(|level| ButtonState::new(level, now_ms)),
            now_ms,
            active: ProgramId::Menu,
        }
    }

    /// Feed one sample of all pins. Call once per frame.
    pub fn update(
        &mut self,
        raw: [bool; BUTTON_COUNT],
        now_ms: u32,
    ) {
        self.now_ms = now_ms;
        for (state, level) in self.buttons.iter_mut().zip(raw) {
            state.update(level, now_ms);
        }
    }

    /// Re-seed every button without edges. The active mapping is kept.
    pub fn reset(
        &mut self,
        raw: [bool; BUTTON_COUNT],
        now_ms: u32,
    ) {
        self.now_ms = now_ms;
        self.buttons = raw.map(|level| ButtonState::new(level, now_ms));
    }

    /// Timestamp of the last update.
    #[inline]
    pub const fn now_ms(&self) -> u32 { self.now_ms }

    #[inline]
    const fn state(
        &self,
        button: Button,
    ) -> &ButtonState {
        &self.buttons[button.index()]
    }

    // -------------------------------------------------------------------------
    // Physical queries
    // -------------------------------------------------------------------------

    /// Rising edge on the last update.
    #[inline]
    pub const fn pressed(
        &self,
        button: Button,
    ) -> bool {
        self.state(button).pressed()
    }

    /// Falling edge on the last update.
    #[inline]
    pub const fn released(
        &self,
        button: Button,
    ) -> bool {
        self.state(button).released()
    }

    #[inline]
    pub const fn is_down(
        &self,
        button: Button,
    ) -> bool {
        self.state(button).is_down()
    }

    /// Down for at least [`HELD_MS`](crate::config::HELD_MS).
    #[inline]
    pub const fn held(
        &self,
        button: Button,
    ) -> bool {
        self.state(button).held(self.now_ms)
    }

    /// How long `button` has been down (0 when released).
    #[inline]
    pub const fn held_for(
        &self,
        button: Button,
    ) -> u32 {
        self.state(button).held_for(self.now_ms)
    }

    /// Any button saw a press edge on the last update.
    pub fn any_pressed(&self) -> bool { Button::ALL.iter().any(|&b| self.pressed(b)) }

    // -------------------------------------------------------------------------
    // Logical actions
    // -------------------------------------------------------------------------

    /// Switch the action mapping.
    #[inline]
    pub fn set_active_program(
        &mut self,
        id: ProgramId,
    ) {
        self.active = id;
    }

    #[inline]
    pub const fn active_program(&self) -> ProgramId { self.active }

    /// True if any button mapped to `action` satisfies `predicate`.
    fn action_matches(
        &self,
        action: Action,
        predicate: impl Fn(Button) -> bool,
    ) -> bool {
        if action == Action::None {
            return false;
        }
        Button::ALL
            .iter()
            .any(|&b| self.active.action_for(b) == action && predicate(b))
    }

    pub fn action_pressed(
        &self,
        action: Action,
    ) -> bool {
        self.action_matches(action, |b| self.pressed(b))
    }

    pub fn action_released(
        &self,
        action: Action,
    ) -> bool {
        self.action_matches(action, |b| self.released(b))
    }

    pub fn action_held(
        &self,
        action: Action,
    ) -> bool {
        self.action_matches(action, |b| self.held(b))
    }

    pub fn action_down(
        &self,
        action: Action,
    ) -> bool {
        self.action_matches(action, |b| self.is_down(b))
    }

    // -------------------------------------------------------------------------
    // Gestures
    // -------------------------------------------------------------------------

    /// Left and Right are both down.
    pub const fn exit_combo_active(&self) -> bool {
        self.is_down(Button::Left) && self.is_down(Button::Right)
    }

    /// Left and Right both held: return to the menu.
    pub const fn exit_combo_triggered(&self) -> bool {
        self.held(Button::Left) && self.held(Button::Right)
    }

    /// Exit combo kept up for [`EXIT_REQUEST_MS`].
    pub const fn exit_requested(&self) -> bool {
        self.exit_combo_active()
            && self.held_for(Button::Left) >= EXIT_REQUEST_MS
            && self.held_for(Button::Right) >= EXIT_REQUEST_MS
    }

    /// Any single button held for [`FAIL_SAFE_MS`].
    pub fn fail_safe(&self) -> bool {
        Button::ALL.iter().any(|&b| self.held_for(b) >= FAIL_SAFE_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
