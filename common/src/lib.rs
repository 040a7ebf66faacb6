//! Portable core of the Pico OLED launcher.
//!
//! This crate contains everything that does not touch hardware, shared between
//! the RP2040 firmware and the desktop simulator:
//!
//! - [`config`]: Display, input and timing constants
//! - [`framebuffer`]: 1bpp page-organised framebuffer (SSD1306 layout)
//! - [`gfx`]: Drawing helpers and the 5x7 bitmap font
//! - [`input`]: Button debouncing, edge detection and the exit gesture
//! - [`registry`]: Table of launchable programs
//! - [`launcher`]: Menu and program switching
//! - [`programs`]: The programs themselves (animations and games)
//! - [`ssd1306`]: Async I2C transport for the SSD1306 controller
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Time is passed in as plain `u32`
//! millisecond timestamps so nothing here depends on a clock implementation.
//!
//! # Testing
//!
//! ```bash
//! cargo test -p launcher-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod config;
pub mod framebuffer;
pub mod gfx;
pub mod input;
pub mod launcher;
pub mod programs;
pub mod registry;
pub mod rng;
pub mod ssd1306;

// Re-export commonly used items
pub use framebuffer::Framebuffer;
pub use input::{Action, Button, Input, ProgramId};
pub use launcher::{Launcher, LauncherEvent};
pub use programs::{ActiveProgram, HiScores, Program, ProgramStatus};
