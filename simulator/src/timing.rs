//! Timing for the simulator.
//!
//! These use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::{Duration, Instant};

use launcher_common::config::BOOT_SCREEN_MS;

/// How long the boot screen stays up.
pub const BOOT_SCREEN: Duration = Duration::from_millis(BOOT_SCREEN_MS as u64);

/// Window event polling interval while the boot screen is shown.
pub const EVENT_POLL: Duration = Duration::from_millis(10);

/// Millisecond clock starting at zero, like the firmware's uptime.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    pub fn new() -> Self { Self { start: Instant::now() } }

    /// Milliseconds since start, wrapping like the device's `u32` uptime.
    pub fn now_ms(&self) -> u32 { self.start.elapsed().as_millis() as u32 }

    /// Program seed from the sub-millisecond part of the clock.
    pub fn seed(&self) -> u32 { self.start.elapsed().as_nanos() as u32 }
}

impl Default for Clock {
    fn default() -> Self { Self::new() }
}

/// Time left until `deadline`, zero if it already passed.
pub fn until(deadline: Instant) -> Duration { deadline.saturating_duration_since(Instant::now()) }
