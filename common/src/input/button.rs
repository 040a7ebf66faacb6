//! Per-button debounce state.
//!
//! Provides time-based debouncing with edge detection. A raw level has to be
//! stable for [`DEBOUNCE_MS`] before the debounced level follows it, which
//! filters the 5-20 ms of contact bounce typical for tactile switches.

use crate::config::{DEBOUNCE_MS, HELD_MS};

/// Debounce state of a single button.
///
/// All timestamps are milliseconds from an arbitrary, wrapping `u32` clock.
#[derive(Clone, Copy, Debug)]
pub struct ButtonState {
    /// Last raw (active-level corrected) reading.
    raw: bool,
    /// Accepted level.
    debounced: bool,
    /// Accepted level before the most recent update (edge detection).
    prev: bool,
    /// When `raw` last changed.
    last_change_ms: u32,
    /// When `debounced` last changed.
    since_ms: u32,
}

impl ButtonState {
    /// Seed the state from the current level without reporting an edge.
    pub const fn new(
        level: bool,
        now_ms: u32,
    ) -> Self {
        Self {
            raw: level,
            debounced: level,
            prev: level,
            last_change_ms: now_ms,
            since_ms: now_ms,
        }
    }

    /// Feed one raw sample.
    ///
    /// Edges are visible for exactly one update: `prev` always catches up with
    /// the accepted level first, then the accepted level may flip.
    pub fn update(
        &mut self,
        level: bool,
        now_ms: u32,
    ) {
        self.prev = self.debounced;

        if level != self.raw {
            self.raw = level;
            self.last_change_ms = now_ms;
        }

        if self.debounced != self.raw && now_ms.wrapping_sub(self.last_change_ms) >= DEBOUNCE_MS {
            self.debounced = self.raw;
            self.since_ms = now_ms;
        }
    }

    /// Debounced level went from released to pressed on the last update.
    #[inline]
    pub const fn pressed(&self) -> bool { self.debounced && !self.prev }

    /// Debounced level went from pressed to released on the last update.
    #[inline]
    pub const fn released(&self) -> bool { !self.debounced && self.prev }

    /// Debounced level.
    #[inline]
    pub const fn is_down(&self) -> bool { self.debounced }

    /// How long the button has been down at `now_ms` (0 when released).
    #[inline]
    pub const fn held_for(
        &self,
        now_ms: u32,
    ) -> u32 {
        if self.debounced { now_ms.wrapping_sub(self.since_ms) } else { 0 }
    }

    /// Down for at least [`HELD_MS`].
    #[inline]
    pub const fn held(
        &self,
        now_ms: u32,
    ) -> bool {
        self.debounced && self.held_for(now_ms) >= HELD_MS
    }
}

// =============================================================================
// Tests
// =============================================================================
