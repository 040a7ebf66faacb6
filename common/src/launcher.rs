//! Launcher menu and program switching.
//!
//! The [`Launcher`] is the only thing the firmware and simulator loops talk
//! to. Each frame they call [`Launcher::step`], redraw when
//! [`Launcher::take_dirty`] says so and sleep for
//! [`Launcher::frame_interval_ms`].
//!
//! # Exit Gesture
//!
//! Holding Left and Right together ([`Input::exit_combo_triggered`]) returns
//! any program to the menu. The gesture is latched until the combo is let go
//! so a program launched with the buttons still down does not bounce straight
//! back out. Keeping the combo up for [`EXIT_REQUEST_MS`](crate::config::EXIT_REQUEST_MS) exits even while
//! latched.
//!
//! # Fail-safe
//!
//! In the menu, any button held for [`FAIL_SAFE_MS`](crate::config::FAIL_SAFE_MS) forces a full redraw
//! every frame, which recovers a panel that lost its contents.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{BUTTON_COUNT, MENU_FRAME_MS, MENU_LINE_HEIGHT, SCREEN_WIDTH};
use crate::gfx;
use crate::input::{Action, Input, ProgramId};
use crate::programs::{ActiveProgram, HiScores, Program, ProgramStatus};
use crate::registry::{self, ProgramEntry};

/// What happened during a tick, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LauncherEvent {
    Idle,
    Launched(ProgramId),
    Exited(ProgramId),
}

/// Menu cursor over the program registry.
#[derive(Clone, Debug, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub const fn new() -> Self { Self { selected: 0 } }

    pub const fn selected(&self) -> usize { self.selected }

    pub fn selected_entry(&self) -> Option<&'static ProgramEntry> { registry::entry(self.selected) }

    pub fn select_prev(&mut self) {
        let count = registry::count();
        self.selected = (self.selected + count - 1) % count;
    }

    pub fn select_next(&mut self) { self.selected = (self.selected + 1) % registry::count(); }

    /// One line per entry; the selection is unlit text on a lit bar.
    pub fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off).ok();
        for (i, entry) in registry::PROGRAMS.iter().enumerate() {
            let y = i as i32 * MENU_LINE_HEIGHT;
            if i == self.selected {
                gfx::fill_rect(display, 0, y, SCREEN_WIDTH as i32, 8, true);
                gfx::text5x7(display, 0, y, entry.name, false);
            } else {
                gfx::text5x7(display, 0, y, entry.name, true);
            }
        }
    }
}

/// Menu plus the currently running program.
#[derive(Clone, Debug)]
pub struct Launcher {
    menu: Menu,
    running: Option<ActiveProgram>,
    scores: HiScores,
    dirty: bool,
    combo_latched: bool,
}

impl Launcher {
    pub const fn new() -> Self {
        Self {
            menu: Menu::new(),
            running: None,
            scores: HiScores { dino: 0 },
            dirty: true,
            combo_latched: false,
        }
    }

    pub const fn menu(&self) -> &Menu { &self.menu }

    /// Best scores of programs that already exited.
    pub const fn hi_scores(&self) -> &HiScores { &self.scores }

    /// Id of the running program, `None` while the menu is shown.
    pub fn running(&self) -> Option<ProgramId> { self.running.as_ref().map(ActiveProgram::id) }

    /// Advance one frame. `seed` is used if a program gets launched.
    pub fn tick(
        &mut self,
        input: &mut Input,
        seed: u32,
    ) -> LauncherEvent {
        if !input.exit_combo_active() {
            self.combo_latched = false;
        }

        if let Some(program) = self.running.as_mut() {
            let by_combo = (input.exit_combo_triggered() && !self.combo_latched) || input.exit_requested();
            if by_combo || program.update(input) == ProgramStatus::Exit {
                let id = program.id();
                program.record_scores(&mut self.scores);
                self.running = None;
                self.combo_latched |= by_combo;
                self.dirty = true;
                input.set_active_program(ProgramId::Menu);
                return LauncherEvent::Exited(id);
            }
            return LauncherEvent::Idle;
        }

        if input.fail_safe() {
            self.dirty = true;
        }
        if input.action_pressed(Action::MenuUp) {
            self.menu.select_prev();
            self.dirty = true;
        }
        if input.action_pressed(Action::MenuDown) {
            self.menu.select_next();
            self.dirty = true;
        }
        if input.action_pressed(Action::MenuSelect) {
            let launched = self
                .menu
                .selected_entry()
                .and_then(|entry| ActiveProgram::launch(entry.id, seed, &self.scores));
            if let Some(program) = launched {
                let id = program.id();
                self.running = Some(program);
                self.dirty = true;
                input.set_active_program(id);
                return LauncherEvent::Launched(id);
            }
        }
        LauncherEvent::Idle
    }

    /// One runner frame: sample the pins, advance, and re-seed the buttons
    /// after a program switch so the switching press is not seen again.
    pub fn step(
        &mut self,
        input: &mut Input,
        raw: [bool; BUTTON_COUNT],
        now_ms: u32,
        seed: u32,
    ) -> LauncherEvent {
        input.update(raw, now_ms);
        let event = self.tick(input, seed);
        if event != LauncherEvent::Idle {
            input.reset(raw, now_ms);
        }
        event
    }

    /// Whether a redraw is needed. Programs redraw every frame, the menu only
    /// after a change.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.dirty || self.running.is_some();
        self.dirty = false;
        dirty
    }

    pub fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        match &self.running {
            Some(program) => program.draw(display),
            None => self.menu.draw(display),
        }
    }

    pub fn frame_interval_ms(&self) -> u32 {
        self.running.as_ref().map_or(MENU_FRAME_MS, ActiveProgram::frame_interval_ms)
    }
}

impl Default for Launcher {
    fn default() -> Self { Self::new() }
}

/// "BOOT" in the top-left corner, shown once at power-up.
pub fn draw_boot_screen<D>(display: &mut D)
where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off).ok();
    gfx::text5x7(display, 0, 0, "BOOT", true);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Framebuffer;
    use crate::config::{EXIT_REQUEST_MS, FAIL_SAFE_MS, HELD_MS};
    use crate::input::Button;
    use crate::input::tests::{COMBO, LEFT, MIDDLE, NONE, RIGHT, feed, press};

    /// Release all buttons so the next press is a fresh edge.
    fn release(
        input: &mut Input,
        t: u32,
    ) -> u32 {
        input.update(NONE, t);
        input.update(NONE, t + 20);
        t + 20
    }

    #[test]
    fn test_new_draws_menu_once() {
        let mut launcher = Launcher::new();
        assert!(launcher.take_dirty());
        assert!(!launcher.take_dirty());
        assert_eq!(launcher.frame_interval_ms(), MENU_FRAME_MS);
        assert_eq!(launcher.running(), None);
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        launcher.take_dirty();

        let t = press(&mut input, LEFT, 0);
        assert_eq!(launcher.tick(&mut input, 1), LauncherEvent::Idle);
        assert_eq!(launcher.menu().selected(), registry::count() - 1);
        assert!(launcher.take_dirty());

        let t = release(&mut input, t + 1);
        press(&mut input, RIGHT, t + 1);
        launcher.tick(&mut input, 1);
        assert_eq!(launcher.menu().selected(), 0);
    }

    #[test]
    fn test_held_button_does_not_repeat() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        let t = press(&mut input, RIGHT, 0);
        launcher.tick(&mut input, 1);
        feed(&mut input, RIGHT, t + 10, 500);
        launcher.tick(&mut input, 1);
        assert_eq!(launcher.menu().selected(), 1);
    }

    #[test]
    fn test_select_launches_and_switches_mapping() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        press(&mut input, MIDDLE, 0);
        assert_eq!(launcher.tick(&mut input, 1), LauncherEvent::Launched(ProgramId::Dino));
        assert_eq!(launcher.running(), Some(ProgramId::Dino));
        assert_eq!(input.active_program(), ProgramId::Dino);
        assert_eq!(launcher.frame_interval_ms(), crate::programs::dino::FRAME_MS);

        // Programs redraw every frame
        assert!(launcher.take_dirty());
        assert!(launcher.take_dirty());
    }

    #[test]
    fn test_exit_combo_returns_to_menu() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        let t = press(&mut input, MIDDLE, 0);
        launcher.tick(&mut input, 1);
        let t = release(&mut input, t + 1);

        let t = feed(&mut input, COMBO, t + 1, 100);
        assert_eq!(launcher.tick(&mut input, 1), LauncherEvent::Idle);

        feed(&mut input, COMBO, t, HELD_MS);
        assert_eq!(launcher.tick(&mut input, 1), LauncherEvent::Exited(ProgramId::Dino));
        assert_eq!(launcher.running(), None);
        assert_eq!(input.active_program(), ProgramId::Menu);
        assert!(launcher.take_dirty());
    }

    #[test]
    fn test_combo_latched_until_released() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        let t = press(&mut input, MIDDLE, 0);
        launcher.tick(&mut input, 1);
        let t = release(&mut input, t + 1);
        let t = feed(&mut input, COMBO, t + 1, 1_000);
        assert!(matches!(launcher.tick(&mut input, 1), LauncherEvent::Exited(_)));

        // Middle pressed while the combo is still held launches and stays
        press(&mut input, [true, true, true], t);
        assert_eq!(launcher.tick(&mut input, 2), LauncherEvent::Launched(ProgramId::Dino));
        assert_eq!(launcher.tick(&mut input, 2), LauncherEvent::Idle);
        assert_eq!(launcher.running(), Some(ProgramId::Dino));
    }

    #[test]
    fn test_program_exit_returns_to_menu() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        // Brick-Out is the second entry
        let t = press(&mut input, RIGHT, 0);
        launcher.tick(&mut input, 1);
        let mut t = release(&mut input, t + 1);
        t = press(&mut input, MIDDLE, t + 1);
        assert_eq!(launcher.tick(&mut input, 1), LauncherEvent::Launched(ProgramId::Brickout));

        // Title -> LevelIntro -> Serve -> Playing, then let the ball drop
        for _ in 0..3 {
            t = release(&mut input, t + 1);
            t = press(&mut input, MIDDLE, t + 1);
            launcher.tick(&mut input, 1);
        }
        t = release(&mut input, t + 1);
        let mut event = LauncherEvent::Idle;
        for _ in 0..500 {
            event = launcher.tick(&mut input, 1);
            if event != LauncherEvent::Idle {
                break;
            }
            // Any press leaves the game-over screen
            t = release(&mut input, t + 1);
            t = press(&mut input, MIDDLE, t + 1);
        }
        assert_eq!(event, LauncherEvent::Exited(ProgramId::Brickout));
        assert_eq!(input.active_program(), ProgramId::Menu);
    }

    /// `(game over, hi score)` of a running Dino.
    fn dino_state(launcher: &Launcher) -> Option<(bool, u32)> {
        match &launcher.running {
            Some(ActiveProgram::Dino(game)) => Some((game.is_game_over(), game.hi_score())),
            _ => None,
        }
    }

    #[test]
    fn test_dino_hi_score_survives_relaunch() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        let t = press(&mut input, MIDDLE, 0);
        assert_eq!(launcher.tick(&mut input, 9), LauncherEvent::Launched(ProgramId::Dino));
        let t = release(&mut input, t + 1);

        // Standing still, the first cactus ends the run
        for _ in 0..2_000 {
            launcher.tick(&mut input, 9);
            if dino_state(&launcher).is_some_and(|(over, _)| over) {
                break;
            }
        }
        let hi = dino_state(&launcher).map_or(0, |(_, hi)| hi);
        assert!(hi > 0);

        let t = feed(&mut input, COMBO, t + 1, 1_000);
        assert_eq!(launcher.tick(&mut input, 9), LauncherEvent::Exited(ProgramId::Dino));
        assert_eq!(launcher.hi_scores().dino, hi);

        let t = release(&mut input, t);
        launcher.tick(&mut input, 9);
        press(&mut input, MIDDLE, t + 1);
        assert_eq!(launcher.tick(&mut input, 9), LauncherEvent::Launched(ProgramId::Dino));
        assert_eq!(dino_state(&launcher), Some((false, hi)));
    }

    #[test]
    fn test_step_reseeds_input_after_switch() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        assert_eq!(launcher.step(&mut input, MIDDLE, 0, 1), LauncherEvent::Idle);
        assert_eq!(launcher.step(&mut input, MIDDLE, 20, 1), LauncherEvent::Launched(ProgramId::Dino));

        // The launching press is spent: still down, no edge, hold restarts
        assert!(input.is_down(Button::Middle));
        assert!(!input.pressed(Button::Middle));
        assert_eq!(input.held_for(Button::Middle), 0);
        assert_eq!(input.active_program(), ProgramId::Dino);
    }

    #[test]
    fn test_long_combo_exits_while_latched() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        launcher.step(&mut input, MIDDLE, 0, 1);
        launcher.step(&mut input, MIDDLE, 20, 1);
        launcher.step(&mut input, NONE, 30, 1);
        launcher.step(&mut input, NONE, 50, 1);

        let mut t = 60;
        while launcher.step(&mut input, COMBO, t, 1) == LauncherEvent::Idle {
            t += 10;
        }
        assert_eq!(launcher.running(), None);

        // Relaunch with the combo still down; the latch holds it off
        let all = [true, true, true];
        launcher.step(&mut input, all, t + 10, 1);
        let launched_at = t + 30;
        assert_eq!(launcher.step(&mut input, all, launched_at, 1), LauncherEvent::Launched(ProgramId::Dino));

        let mut t = launched_at + 10;
        let mut exited_at = None;
        while t <= launched_at + EXIT_REQUEST_MS + 50 {
            if launcher.step(&mut input, COMBO, t, 1) == LauncherEvent::Exited(ProgramId::Dino) {
                exited_at = Some(t);
                break;
            }
            t += 10;
        }
        assert_eq!(exited_at, Some(launched_at + EXIT_REQUEST_MS));
    }

    #[test]
    fn test_fail_safe_forces_menu_redraw() {
        let mut launcher = Launcher::new();
        let mut input = Input::new(NONE, 0);
        let t = press(&mut input, LEFT, 0);
        launcher.tick(&mut input, 1);
        assert!(launcher.take_dirty());

        let t = feed(&mut input, LEFT, t + 10, 1_000);
        launcher.tick(&mut input, 1);
        assert!(!launcher.take_dirty());

        feed(&mut input, LEFT, t, FAIL_SAFE_MS);
        launcher.tick(&mut input, 1);
        assert!(launcher.take_dirty());
        assert_eq!(launcher.menu().selected(), registry::count() - 1);
    }

    #[test]
    fn test_menu_draw_highlights_selection() {
        let launcher = Launcher::new();
        let mut fb = Framebuffer::new();
        launcher.draw(&mut fb);
        // Bar spans the full width of line 0
        assert!(fb.pixel(127, 0));
        assert!(fb.pixel(127, 7));
        assert!(!fb.pixel(127, 8));
        // "D" of Dino is cut out of the bar
        assert!(!fb.pixel(0, 0));
        // Line 1 text is lit on a dark background: "B" column 0
        assert!(fb.pixel(0, MENU_LINE_HEIGHT));
        assert!(!fb.pixel(127, MENU_LINE_HEIGHT));
    }

    #[test]
    fn test_boot_screen() {
        let mut fb = Framebuffer::new();
        fb.clear(BinaryColor::On).ok();
        draw_boot_screen(&mut fb);
        // "B" column 0 is a full bar
        assert!((0..7).all(|y| fb.pixel(0, y)));
        assert!(!fb.pixel(0, 8));
        assert!(fb.lit_pixels() < 100);
    }
}
