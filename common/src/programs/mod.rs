//! Launchable programs and the per-frame interface the launcher drives.
//!
//! Each program is a plain state machine: [`Program::update`] is called once
//! per frame with the debounced input, then [`Program::draw`] renders the
//! current state. Programs never block; the runner sleeps for
//! [`Program::frame_interval_ms`] between frames.

pub mod brickout;
pub mod dino;
pub mod orbit;
pub mod plasma;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::input::{Input, ProgramId};
pub use brickout::Brickout;
pub use dino::Dino;
pub use orbit::Orbit;
pub use plasma::Plasma;

/// Result of one program step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProgramStatus {
    Running,
    /// The program is done; the launcher returns to the menu.
    Exit,
}

/// A frame-stepped program.
pub trait Program {
    /// Advance one frame.
    fn update(
        &mut self,
        input: &Input,
    ) -> ProgramStatus;

    /// Render the current state. Draws the whole screen.
    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>;

    /// Delay between frames, 0 = as fast as the display allows.
    fn frame_interval_ms(&self) -> u32;
}

/// Best scores, kept by the launcher across program launches until power-off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HiScores {
    pub dino: u32,
}

/// The running program, dispatched statically (no heap, no trait objects).
#[derive(Clone, Debug)]
pub enum ActiveProgram {
    AnimationA(Plasma),
    AnimationB(Orbit),
    Dino(Dino),
    Brickout(Brickout),
}

impl ActiveProgram {
    /// Start a fresh instance of `id`, carrying over its best score.
    /// Returns `None` for [`ProgramId::Menu`].
    pub fn launch(
        id: ProgramId,
        seed: u32,
        scores: &HiScores,
    ) -> Option<Self> {
        match id {
            ProgramId::Menu => None,
            ProgramId::AnimationA => Some(Self::AnimationA(Plasma::new())),
            ProgramId::AnimationB => Some(Self::AnimationB(Orbit::new())),
            ProgramId::Dino => Some(Self::Dino(Dino::with_hi_score(seed, scores.dino))),
            ProgramId::Brickout => Some(Self::Brickout(Brickout::new(seed))),
        }
    }

    /// Copy this program's best score back into `scores`.
    pub fn record_scores(
        &self,
        scores: &mut HiScores,
    ) {
        if let Self::Dino(game) = self {
            scores.dino = scores.dino.max(game.hi_score());
        }
    }

    pub const fn id(&self) -> ProgramId {
        match self {
            Self::AnimationA(_) => ProgramId::AnimationA,
            Self::AnimationB(_) => ProgramId::AnimationB,
            Self::Dino(_) => ProgramId::Dino,
            Self::Brickout(_) => ProgramId::Brickout,
        }
    }
}

impl Program for ActiveProgram {
    fn update(
        &mut self,
        input: &Input,
    ) -> ProgramStatus {
        match self {
            Self::AnimationA(p) => p.update(input),
            Self::AnimationB(p) => p.update(input),
            Self::Dino(p) => p.update(input),
            Self::Brickout(p) => p.update(input),
        }
    }

    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            Self::AnimationA(p) => p.draw(display),
            Self::AnimationB(p) => p.draw(display),
            Self::Dino(p) => p.draw(display),
            Self::Brickout(p) => p.draw(display),
        }
    }

    fn frame_interval_ms(&self) -> u32 {
        match self {
            Self::AnimationA(p) => p.frame_interval_ms(),
            Self::AnimationB(p) => p.frame_interval_ms(),
            Self::Dino(p) => p.frame_interval_ms(),
            Self::Brickout(p) => p.frame_interval_ms(),
        }
    }
}
