//! Pico OLED Launcher Firmware for Raspberry Pi Pico (RP2040)
//!
//! Menu of small programs on a 128x64 SSD1306 over I2C, driven by three
//! buttons.
//!
//! # Button Controls
//!
//! - **Left / Right**: Move the menu cursor, program specific in games
//! - **Middle**: Launch the selected program
//! - **Left + Right held**: Back to the menu from any program

#![no_std]
#![no_main]
// Crate-level lints (match launcher-common for consistency)
#![allow(clippy::cast_possible_truncation)]

mod buttons;
mod display;

use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{I2c, InterruptHandler};
use embassy_rp::peripherals::I2C1;
use embassy_time::{Duration, Instant, Timer};
use launcher_common::config::{BOOT_SCREEN_MS, HEARTBEAT_MS};
use launcher_common::launcher::draw_boot_screen;
use launcher_common::{Framebuffer, Input, Launcher, LauncherEvent};
use {defmt_rtt as _, panic_probe as _};

use crate::buttons::Buttons;
use crate::display::{Oled, display_i2c_config, init_display, new_display};

bind_interrupts!(struct Irqs {
    I2C1_IRQ => InterruptHandler<I2C1>;
});

/// Milliseconds since boot. Wraps after ~49 days; input timing uses
/// wrapping arithmetic.
fn now_ms() -> u32 { Instant::now().as_millis() as u32 }

/// Seed for a freshly launched program: low bits of the tick counter, which
/// depend on when the user pressed the button.
fn seed() -> u32 { Instant::now().as_ticks() as u32 }

/// Blink the on-board LED so a hung display is distinguishable from a hung
/// core.
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.toggle();
        Timer::after_millis(u64::from(HEARTBEAT_MS)).await;
    }
}

/// Push a frame, dropping it if the bus fails. The next frame retries.
async fn flush(
    oled: &mut Oled,
    frame: &Framebuffer,
) {
    if let Err(e) = oled.flush(frame).await {
        warn!("Frame flush failed: {}", e);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pico launcher starting...");

    let p = embassy_rp::init(Default::default());

    // On-board LED: GPIO25
    let led = Output::new(p.PIN_25, Level::Low);
    spawner.spawn(heartbeat_task(led)).unwrap();

    // OLED: I2C1 with SCL=27, SDA=26
    let i2c = I2c::new_async(p.I2C1, p.PIN_27, p.PIN_26, Irqs, display_i2c_config());
    let mut oled = new_display(i2c);
    init_display(&mut oled).await;

    // Buttons: Left=9, Middle=8, Right=7
    let buttons = Buttons::new(p.PIN_9, p.PIN_8, p.PIN_7);

    let mut frame = Framebuffer::new();
    draw_boot_screen(&mut frame);
    flush(&mut oled, &frame).await;
    Timer::after_millis(u64::from(BOOT_SCREEN_MS)).await;

    let mut input = Input::new(buttons.read(), now_ms());
    let mut launcher = Launcher::new();
    let mut next_frame = Instant::now();

    info!("Starting main loop...");

    loop {
        match launcher.step(&mut input, buttons.read(), now_ms(), seed()) {
            LauncherEvent::Idle => {}
            LauncherEvent::Launched(id) => info!("Launched {}", id),
            LauncherEvent::Exited(id) => {
                info!("Exited {} (dino hi score {})", id, launcher.hi_scores().dino);
            }
        }

        if launcher.take_dirty() {
            launcher.draw(&mut frame);
            flush(&mut oled, &frame).await;
        }

        // Fixed cadence; a frame that overran starts the next one right away
        next_frame += Duration::from_millis(u64::from(launcher.frame_interval_ms()));
        let now = Instant::now();
        if next_frame < now {
            next_frame = now;
        }
        Timer::at(next_frame).await;
    }
}
