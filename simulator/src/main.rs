//! Pico OLED Launcher Simulator for Desktop.
//!
//! Runs the same [`Launcher`] as the firmware in an
//! embedded-graphics-simulator window. Frames are rendered into the same
//! [`Framebuffer`] the firmware streams to the SSD1306 and then copied to the
//! window, so what you see is the exact display RAM image.
//!
//! # Controls
//!
//! - **A / Left**: Left button
//! - **S / Space / Down**: Middle button
//! - **D / Right**: Right button
//! - **A + D held**: Back to the menu

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod keys;
mod timing;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use launcher_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use launcher_common::launcher::draw_boot_screen;
use launcher_common::{Framebuffer, Input, Launcher, LauncherEvent};
use tracing::{debug, info};

use crate::keys::Keys;
use crate::timing::{BOOT_SCREEN, Clock, EVENT_POLL, until};

/// Copy the framebuffer to the simulator display pixel by pixel.
fn present(
    frame: &Framebuffer,
    display: &mut SimulatorDisplay<BinaryColor>,
) {
    let pixels = (0..SCREEN_HEIGHT as i32).flat_map(|y| {
        (0..SCREEN_WIDTH as i32).map(move |x| Pixel(Point::new(x, y), BinaryColor::from(frame.pixel(x, y))))
    });
    display.draw_iter(pixels).ok();
}

/// Drain window events into `keys`. Returns `false` when the window closed.
fn pump_events(
    window: &mut Window,
    keys: &mut Keys,
) -> bool {
    for ev in window.events() {
        match ev {
            SimulatorEvent::Quit => return false,
            SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                if !repeat {
                    keys.key_down(keycode);
                }
            }
            SimulatorEvent::KeyUp { keycode, .. } => keys.key_up(keycode),
            _ => {}
        }
    }
    true
}

/// Show the boot screen. Returns `false` if the window was closed.
fn run_boot_screen(
    frame: &mut Framebuffer,
    display: &mut SimulatorDisplay<BinaryColor>,
    window: &mut Window,
    keys: &mut Keys,
) -> bool {
    draw_boot_screen(frame);
    present(frame, display);

    let start = Instant::now();
    while start.elapsed() < BOOT_SCREEN {
        window.update(display);
        if !pump_events(window, keys) {
            return false;
        }
        thread::sleep(EVENT_POLL);
    }
    true
}

fn main() {
    tracing_subscriber::fmt().compact().init();

    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledBlue)
        .scale(4)
        .build();
    let mut window = Window::new("Pico OLED Launcher", &output_settings);

    let clock = Clock::new();
    let mut keys = Keys::new();
    let mut frame = Framebuffer::new();

    info!("Simulator starting");
    if !run_boot_screen(&mut frame, &mut display, &mut window, &mut keys) {
        return;
    }

    let mut input = Input::new(keys.levels(), clock.now_ms());
    let mut launcher = Launcher::new();
    let mut next_frame = Instant::now();

    loop {
        if !pump_events(&mut window, &mut keys) {
            info!("Window closed");
            return;
        }

        match launcher.step(&mut input, keys.levels(), clock.now_ms(), clock.seed()) {
            LauncherEvent::Idle => {}
            LauncherEvent::Launched(id) => info!(?id, "Launched"),
            LauncherEvent::Exited(id) => info!(?id, dino_hi = launcher.hi_scores().dino, "Exited"),
        }

        if launcher.take_dirty() {
            launcher.draw(&mut frame);
            present(&frame, &mut display);
        }
        window.update(&display);

        next_frame += Duration::from_millis(u64::from(launcher.frame_interval_ms()));
        let wait = until(next_frame);
        if wait.is_zero() {
            debug!("Frame overran");
            next_frame = Instant::now();
        } else {
            thread::sleep(wait);
        }
    }
}
