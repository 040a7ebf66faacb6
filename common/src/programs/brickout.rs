//! Brick-Out: three-level Breakout clone.
//!
//! The game is a phase machine stepped once per frame. Screens that wait for
//! the player (title, level intro, game over) are phases that advance on any
//! button press instead of blocking loops.
//!
//! ```text
//! Title -> LevelIntro -> Serve -> Playing -+-> LevelIntro (next level)
//!                                          +-> Win      -> exit
//!                                          +-> GameOver -> exit
//! ```

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::String;

use super::{Program, ProgramStatus};
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::gfx;
use crate::input::{Action, Input};
use crate::rng::Rng;

const W: i32 = SCREEN_WIDTH as i32;
const H: i32 = SCREEN_HEIGHT as i32;

pub const PADDLE_W: i32 = 20;
pub const PADDLE_H: i32 = 3;
/// Top edge of the paddle.
pub const PADDLE_Y: i32 = H - 6;
const PADDLE_STEP: i32 = 2;

pub const BALL_SIZE: i32 = 2;

pub const BRICK_W: i32 = 16;
pub const BRICK_H: i32 = 5;
pub const BRICK_COLS: usize = 8;
pub const BRICK_ROWS: usize = 3;
const BRICK_TOP: i32 = 10;
const BRICK_POINTS: u32 = 10;

pub const MAX_LEVEL: u32 = 3;

/// Poll rate of the screens waiting for a button.
const WAIT_FRAME_MS: u32 = 50;

const WIN_FRAME_MS: u32 = 200;
/// 3 s of stars.
const WIN_FRAMES: u32 = 15;
const WIN_STARS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Title,
    LevelIntro,
    /// Ball rides on the paddle until Launch.
    Serve,
    Playing,
    GameOver,
    Win,
}

#[derive(Clone, Debug)]
pub struct Brickout {
    rng: Rng,
    phase: Phase,
    level: u32,
    score: u32,
    paddle_x: i32,
    ball_x: i32,
    ball_y: i32,
    ball_dx: i32,
    ball_dy: i32,
    bricks: [[bool; BRICK_COLS]; BRICK_ROWS],
    win_frames: u32,
    stars: [(i32, i32); WIN_STARS],
}

impl Brickout {
    pub fn new(seed: u32) -> Self {
        let mut game = Self {
            rng: Rng::new(seed),
            phase: Phase::Title,
            level: 1,
            score: 0,
            paddle_x: 0,
            ball_x: 0,
            ball_y: 0,
            ball_dx: 1,
            ball_dy: -1,
            bricks: [[true; BRICK_COLS]; BRICK_ROWS],
            win_frames: 0,
            stars: [(0, 0); WIN_STARS],
        };
        game.reset_ball_paddle();
        game
    }

    pub const fn phase(&self) -> Phase { self.phase }

    pub const fn level(&self) -> u32 { self.level }

    pub const fn score(&self) -> u32 { self.score }

    pub const fn paddle_x(&self) -> i32 { self.paddle_x }

    pub const fn ball(&self) -> (i32, i32) { (self.ball_x, self.ball_y) }

    pub const fn ball_velocity(&self) -> (i32, i32) { (self.ball_dx, self.ball_dy) }

    pub fn bricks_remaining(&self) -> usize { self.bricks.iter().flatten().filter(|&&b| b).count() }

    /// Top-left corner of brick (row, col).
    const fn brick_origin(
        row: usize,
        col: usize,
    ) -> (i32, i32) {
        (col as i32 * BRICK_W, row as i32 * BRICK_H + BRICK_TOP)
    }

    fn start_level(&mut self) {
        self.bricks = [[true; BRICK_COLS]; BRICK_ROWS];
        self.reset_ball_paddle();
    }

    fn reset_ball_paddle(&mut self) {
        self.paddle_x = (W - PADDLE_W) / 2;
        self.attach_ball();
    }

    /// Park the ball centred on top of the paddle.
    fn attach_ball(&mut self) {
        self.ball_x = self.paddle_x + (PADDLE_W - BALL_SIZE) / 2;
        self.ball_y = PADDLE_Y - BALL_SIZE - 1;
    }

    fn move_paddle(
        &mut self,
        input: &Input,
    ) {
        if input.action_down(Action::PaddleLeft) {
            self.paddle_x = (self.paddle_x - PADDLE_STEP).max(0);
        }
        if input.action_down(Action::PaddleRight) {
            self.paddle_x = (self.paddle_x + PADDLE_STEP).min(W - PADDLE_W);
        }
    }

    /// One ball step with wall, paddle and brick collisions.
    fn step_ball(&mut self) {
        self.ball_x += self.ball_dx;
        self.ball_y += self.ball_dy;

        if self.ball_x <= 0 {
            self.ball_dx = self.ball_dx.abs();
        } else if self.ball_x >= W - BALL_SIZE {
            self.ball_dx = -self.ball_dx.abs();
        }
        if self.ball_y <= 0 {
            self.ball_dy = self.ball_dy.abs();
        }

        let over_paddle =
            self.ball_x + BALL_SIZE >= self.paddle_x && self.ball_x <= self.paddle_x + PADDLE_W;
        if self.ball_dy > 0 && self.ball_y >= PADDLE_Y - BALL_SIZE && self.ball_y <= PADDLE_Y && over_paddle {
            self.ball_dy = -self.ball_dy;
            if self.ball_x < self.paddle_x + PADDLE_W / 3 {
                self.ball_dx = -1;
            } else if self.ball_x > self.paddle_x + 2 * PADDLE_W / 3 {
                self.ball_dx = 1;
            }
        }

        let (bx, by) = (self.ball_x, self.ball_y);
        let hit = (0..BRICK_ROWS)
            .flat_map(|r| (0..BRICK_COLS).map(move |c| (r, c)))
            .find(|&(r, c)| {
                let (x, y) = Self::brick_origin(r, c);
                self.bricks[r][c]
                    && bx + BALL_SIZE > x
                    && bx < x + BRICK_W
                    && by + BALL_SIZE > y
                    && by < y + BRICK_H
            });
        if let Some((r, c)) = hit {
            self.bricks[r][c] = false;
            self.ball_dy = -self.ball_dy;
            self.score += BRICK_POINTS;
        }
    }

    fn scatter_stars(&mut self) {
        for star in &mut self.stars {
            *star = (self.rng.range(0, W - 1), self.rng.range(0, H - 1));
        }
    }

    fn step_playing(&mut self) {
        self.step_ball();

        if self.ball_y > H {
            self.phase = Phase::GameOver;
        } else if self.bricks_remaining() == 0 {
            if self.level >= MAX_LEVEL {
                self.phase = Phase::Win;
                self.win_frames = 0;
                self.scatter_stars();
            } else {
                self.level += 1;
                self.start_level();
                self.phase = Phase::LevelIntro;
            }
        }
    }
}

impl Program for Brickout {
    fn update(
        &mut self,
        input: &Input,
    ) -> ProgramStatus {
        match self.phase {
            Phase::Title => {
                if input.any_pressed() {
                    self.level = 1;
                    self.score = 0;
                    self.start_level();
                    self.phase = Phase::LevelIntro;
                }
            }
            Phase::LevelIntro => {
                if input.any_pressed() {
                    self.phase = Phase::Serve;
                }
            }
            Phase::Serve => {
                self.move_paddle(input);
                self.attach_ball();
                if input.action_pressed(Action::Launch) {
                    self.ball_dx = if self.rng.coin() { 1 } else { -1 };
                    self.ball_dy = -1;
                    self.phase = Phase::Playing;
                }
            }
            Phase::Playing => {
                self.move_paddle(input);
                self.step_playing();
            }
            Phase::GameOver => {
                if input.any_pressed() {
                    return ProgramStatus::Exit;
                }
            }
            Phase::Win => {
                self.win_frames += 1;
                if self.win_frames >= WIN_FRAMES {
                    return ProgramStatus::Exit;
                }
                self.scatter_stars();
            }
        }
        ProgramStatus::Running
    }

    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off).ok();
        match self.phase {
            Phase::Title => gfx::draw_center_text(display, "BRICK-OUT", 24),
            Phase::LevelIntro => {
                let text: String<12> = gfx::labeled_u32("LEVEL ", self.level);
                gfx::draw_center_text(display, &text, 28);
            }
            Phase::Serve | Phase::Playing => {
                gfx::fill_rect(display, self.paddle_x, PADDLE_Y, PADDLE_W, PADDLE_H, true);
                gfx::fill_rect(display, self.ball_x, self.ball_y, BALL_SIZE, BALL_SIZE, true);
                for (r, row) in self.bricks.iter().enumerate() {
                    for (c, _) in row.iter().enumerate().filter(|(_, alive)| **alive) {
                        let (x, y) = Self::brick_origin(r, c);
                        gfx::fill_rect(display, x, y, BRICK_W - 1, BRICK_H - 1, true);
                    }
                }
            }
            Phase::GameOver => {
                gfx::draw_center_text(display, "GAME OVER", 24);
                let text: String<16> = gfx::labeled_u32("SCORE: ", self.score);
                gfx::draw_center_text(display, &text, 36);
            }
            Phase::Win => {
                for &(x, y) in &self.stars {
                    gfx::plot(display, x, y, true);
                }
                gfx::draw_center_text(display, "YOU WIN!", 28);
            }
        }
    }

    fn frame_interval_ms(&self) -> u32 {
        match self.phase {
            Phase::Serve | Phase::Playing => 10 + (MAX_LEVEL - self.level.min(MAX_LEVEL)) * 5,
            Phase::Win => WIN_FRAME_MS,
            Phase::Title | Phase::LevelIntro | Phase::GameOver => WAIT_FRAME_MS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
