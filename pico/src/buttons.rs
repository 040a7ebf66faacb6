//! The three front-panel buttons.
//!
//! Default wiring is switch to 3V3 with the internal pull-down, so a pressed
//! button reads high. The `buttons-active-low` feature flips this for
//! switches wired to GND.

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pin, Pull};
use launcher_common::config::BUTTON_COUNT;

#[cfg(not(feature = "buttons-active-low"))]
const PULL: Pull = Pull::Down;
#[cfg(feature = "buttons-active-low")]
const PULL: Pull = Pull::Up;

const ACTIVE_LOW: bool = cfg!(feature = "buttons-active-low");

/// Left, Middle and Right button inputs, in [`launcher_common::Button`] order.
pub struct Buttons<'d> {
    pins: [Input<'d>; BUTTON_COUNT],
}

impl<'d> Buttons<'d> {
    pub fn new(
        left: Peri<'d, impl Pin>,
        middle: Peri<'d, impl Pin>,
        right: Peri<'d, impl Pin>,
    ) -> Self {
        Self {
            pins: [Input::new(left, PULL), Input::new(middle, PULL), Input::new(right, PULL)],
        }
    }

    /// Raw pressed levels, not debounced.
    pub fn read(&self) -> [bool; BUTTON_COUNT] { self.pins.each_ref().map(|pin| pin.is_high() != ACTIVE_LOW) }
}
