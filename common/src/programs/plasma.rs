//! Animation A: integer XOR plasma.
//!
//! Every pixel is a pure function of its position and an 8-bit frame
//! counter, so no assets or lookup tables are needed.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::{Program, ProgramStatus};
use crate::config::{CENTER_X, CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::Input;

/// Unthrottled: the I2C transfer is the frame limiter.
pub const FRAME_MS: u32 = 0;

/// Whether pixel (x, y) is lit on frame `t`.
pub fn is_lit(
    x: i32,
    y: i32,
    t: u8,
) -> bool {
    let t32 = i32::from(t);
    let a = (((x << 2) + t32) ^ ((y << 2) + t32 * 3)) as u8;
    let r = ((x - CENTER_X).abs() + (y - CENTER_Y).abs() + (t32 << 1)) as u8;
    let u = a.wrapping_add(r.wrapping_mul(5));
    let threshold = 48 + (t & 0x1F);
    (u ^ (t << 2)) < threshold
}

#[derive(Clone, Debug, Default)]
pub struct Plasma {
    t: u8,
}

impl Plasma {
    pub const fn new() -> Self { Self { t: 0 } }

    pub const fn frame(&self) -> u8 { self.t }
}

impl Program for Plasma {
    fn update(
        &mut self,
        _input: &Input,
    ) -> ProgramStatus {
        self.t = self.t.wrapping_add(1);
        ProgramStatus::Running
    }

    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off).ok();
        let t = self.t;
        let lit = (0..SCREEN_HEIGHT as i32)
            .flat_map(|y| (0..SCREEN_WIDTH as i32).map(move |x| (x, y)))
            .filter(move |&(x, y)| is_lit(x, y, t))
            .map(|(x, y)| Pixel(Point::new(x, y), BinaryColor::On));
        display.draw_iter(lit).ok();
    }

    fn frame_interval_ms(&self) -> u32 { FRAME_MS }
}
