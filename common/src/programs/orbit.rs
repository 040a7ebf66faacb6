//! Animation B: frame-locked orbit loop.
//!
//! A fixed-length loop played at 10 FPS. Each frame is generated on the fly
//! from its index: a centre ring, three satellites on an elliptical orbit and
//! a spoke sweeping the other way.

use core::f32::consts::TAU;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use micromath::F32;

use super::{Program, ProgramStatus};
use crate::config::{CENTER_X, CENTER_Y};
use crate::gfx;
use crate::input::Input;

/// 10 FPS.
pub const FRAME_MS: u32 = 100;

/// Frames in one loop.
pub const FRAME_COUNT: u32 = 24;

const RING_DIAMETER: u32 = 13;
const ORBIT_RX: f32 = 40.0;
const ORBIT_RY: f32 = 22.0;
const SATELLITES: u32 = 3;
const SATELLITE_DIAMETER: u32 = 7;
const SPOKE_RX: f32 = 30.0;
const SPOKE_RY: f32 = 16.0;
const PATH_DOTS: u32 = 32;

#[inline]
fn frame_angle(frame: u32) -> f32 { frame as f32 * (TAU / FRAME_COUNT as f32) }

/// Point on the ellipse (rx, ry) around the screen centre at `angle` radians.
fn on_ellipse(
    angle: f32,
    rx: f32,
    ry: f32,
) -> Point {
    let x = F32(angle).cos().0 * rx;
    let y = F32(angle).sin().0 * ry;
    Point::new(CENTER_X + x as i32, CENTER_Y + y as i32)
}

/// Centre of satellite `index` on `frame`.
pub fn satellite_position(
    frame: u32,
    index: u32,
) -> Point {
    let angle = frame_angle(frame) + index as f32 * (TAU / SATELLITES as f32);
    on_ellipse(angle, ORBIT_RX, ORBIT_RY)
}

#[derive(Clone, Debug, Default)]
pub struct Orbit {
    frame: u32,
}

impl Orbit {
    pub const fn new() -> Self { Self { frame: 0 } }

    pub const fn frame(&self) -> u32 { self.frame }
}

impl Program for Orbit {
    fn update(
        &mut self,
        _input: &Input,
    ) -> ProgramStatus {
        self.frame = (self.frame + 1) % FRAME_COUNT;
        ProgramStatus::Running
    }

    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off).ok();
        let center = Point::new(CENTER_X, CENTER_Y);

        // Dotted orbit path, rotating one dot per frame
        let offset = frame_angle(self.frame) / 4.0;
        for i in 0..PATH_DOTS {
            let p = on_ellipse(offset + i as f32 * (TAU / PATH_DOTS as f32), ORBIT_RX, ORBIT_RY);
            gfx::plot(display, p.x, p.y, true);
        }

        Circle::with_center(center, RING_DIAMETER)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)
            .ok();

        let spoke_end = on_ellipse(-2.0 * frame_angle(self.frame), SPOKE_RX, SPOKE_RY);
        Line::new(center, spoke_end)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)
            .ok();

        for k in 0..SATELLITES {
            Circle::with_center(satellite_position(self.frame, k), SATELLITE_DIAMETER)
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)
                .ok();
        }
    }

    fn frame_interval_ms(&self) -> u32 { FRAME_MS }
}
