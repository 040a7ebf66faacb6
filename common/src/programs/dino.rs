//! Dino: endless runner.
//!
//! Runs at a fixed ~30 FPS. All timing (sprite animation, clouds) is derived
//! from a frame clock advanced by [`FRAME_MS`] per update, so a run is fully
//! determined by the seed and the input sequence.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::String;

use super::{Program, ProgramStatus};
use crate::config::SCREEN_WIDTH;
use crate::gfx;
use crate::input::{Action, Input};
use crate::rng::Rng;

// =============================================================================
// Tuning
// =============================================================================

/// ~30 FPS.
pub const FRAME_MS: u32 = 33;

/// Baseline the dino stands on and cacti grow from.
pub const GROUND_Y: i32 = 54;

/// Fixed horizontal position of the dino.
pub const DINO_X: i32 = 14;

/// Initial vertical velocity of a jump (px/frame, negative = up).
pub const JUMP_VEL: i32 = -10;

/// Gravity in tenths of a pixel per frame².
const GRAVITY_TENTHS: i32 = 12;

pub const INIT_SPEED_X: i32 = 3;
pub const MAX_SPEED_X: i32 = 7;

/// Speed goes up by one every this many points.
const SPEED_STEP_SCORE: u32 = 150;

/// Birds only appear once the score is past this.
pub const BIRD_UNLOCK: u32 = 250;

const RUN_ANIM_MS: u32 = 90;
const WING_ANIM_MS: u32 = 120;

pub const MAX_OBSTACLES: usize = 3;

/// No spawn while an obstacle is still this close to the right edge.
const SPAWN_GAP: i32 = 30;

const W: i32 = SCREEN_WIDTH as i32;

// =============================================================================
// Sprites
// =============================================================================

const DINO_W: i32 = 16;
const DINO_H: i32 = 16;
const DUCK_W: i32 = 22;
const DUCK_H: i32 = 12;

static DINO_RUN_A: [&str; 16] = [
    "................",
    "......####......",
    ".....######.....",
    "....########....",
    "...##########...",
    "...##########...",
    "..###########...",
    "..###########...",
    "..####..######..",
    "..####..######..",
    "..####..######..",
    "..####..######..",
    "..####..###.....",
    "..######..##....",
    ".####..######...",
    "......##........",
];

static DINO_RUN_B: [&str; 16] = [
    "................",
    "......####......",
    ".....######.....",
    "....########....",
    "...##########...",
    "...##########...",
    "..###########...",
    "..###########...",
    "..####..######..",
    "..####..######..",
    "..####..######..",
    "..####..######..",
    "..####..###.....",
    "..######..##....",
    "......######....",
    ".......##.......",
];

static DINO_DUCK_A: [&str; 12] = [
    "......##########......",
    ".....############.....",
    "....##############....",
    "...################...",
    "..##################..",
    "..######..#########...",
    "..######..#########...",
    "..######..#########...",
    "..######..######......",
    "..######..######......",
    "..#####....####.......",
    "...##.................",
];

static DINO_DUCK_B: [&str; 12] = [
    "......##########......",
    ".....############.....",
    "....##############....",
    "...################...",
    "..##################..",
    "..######..#########...",
    "..######..#########...",
    "..######..#########...",
    "..######..######......",
    "..######..######......",
    "...####..#####........",
    "....##................",
];

static CACTUS_SMALL: [&str; 16] = [
    "..##....",
    "..##....",
    "..##....",
    "..##....",
    "######..",
    "..##....",
    "..##....",
    "..##....",
    "..##....",
    "..##.##.",
    "######..",
    "..##....",
    "..##....",
    "..##....",
    "..##....",
    "..##....",
];

static CACTUS_TALL: [&str; 18] = [
    "...####.....",
    "...####.....",
    "...####.....",
    "...####.....",
    "#########...",
    "...####.....",
    "...####..##.",
    "...####..##.",
    "...####.....",
    "...####.....",
    "...####.....",
    "...####.....",
    "...####.....",
    "#########...",
    "...####.....",
    "...####.....",
    "...####.....",
    "...####.....",
];

static BIRD_A: [&str; 8] = [
    "........#.......",
    ".......###......",
    "############....",
    "........###.....",
    "..........##....",
    "...........#....",
    "................",
    "................",
];

static BIRD_B: [&str; 8] = [
    "........#.......",
    ".......###......",
    "############....",
    "......##........",
    ".....##.........",
    "....##..........",
    "................",
    "................",
];

// =============================================================================
// Obstacles
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObstacleKind {
    SmallCactus,
    TallCactus,
    Bird,
}

impl ObstacleKind {
    /// Hitbox (and sprite) size.
    const fn size(self) -> (i32, i32) {
        match self {
            Self::SmallCactus => (8, 16),
            Self::TallCactus => (12, 18),
            Self::Bird => (16, 8),
        }
    }
}

/// One obstacle slot. `y` is the bottom edge.
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub active: bool,
    pub kind: ObstacleKind,
    pub x: i32,
    pub y: i32,
}

impl Obstacle {
    const INACTIVE: Self = Self {
        active: false,
        kind: ObstacleKind::SmallCactus,
        x: 0,
        y: GROUND_Y,
    };

    const fn width(&self) -> i32 { self.kind.size().0 }

    const fn height(&self) -> i32 { self.kind.size().1 }
}

/// Axis-aligned overlap test on (x, y, w, h) boxes.
const fn aabb(
    a: (i32, i32, i32, i32),
    b: (i32, i32, i32, i32),
) -> bool {
    a.0 < b.0 + b.2 && a.0 + a.2 > b.0 && a.1 < b.1 + b.3 && a.1 + a.3 > b.1
}

// =============================================================================
// Game
// =============================================================================

#[derive(Clone, Debug)]
pub struct Dino {
    rng: Rng,
    obstacles: [Obstacle; MAX_OBSTACLES],
    /// Bottom edge of the dino.
    dino_y: i32,
    vel_y: i32,
    jumping: bool,
    ducking: bool,
    game_over: bool,
    speed_x: i32,
    score: u32,
    hi_score: u32,
    /// Frame clock driving sprite and cloud animation.
    t_ms: u32,
}

impl Dino {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed),
            obstacles: [Obstacle::INACTIVE; MAX_OBSTACLES],
            dino_y: GROUND_Y,
            vel_y: 0,
            jumping: false,
            ducking: false,
            game_over: false,
            speed_x: INIT_SPEED_X,
            score: 0,
            hi_score: 0,
            t_ms: 0,
        }
    }

    /// Fresh game that remembers a high score from an earlier session.
    pub fn with_hi_score(
        seed: u32,
        hi_score: u32,
    ) -> Self {
        Self {
            hi_score,
            ..Self::new(seed)
        }
    }

    /// Start a new run. The high score survives.
    pub fn reset(&mut self) {
        self.obstacles = [Obstacle::INACTIVE; MAX_OBSTACLES];
        self.dino_y = GROUND_Y;
        self.vel_y = 0;
        self.jumping = false;
        self.ducking = false;
        self.game_over = false;
        self.speed_x = INIT_SPEED_X;
        self.score = 0;
    }

    pub const fn score(&self) -> u32 { self.score }

    pub const fn hi_score(&self) -> u32 { self.hi_score }

    pub const fn is_game_over(&self) -> bool { self.game_over }

    pub const fn speed(&self) -> i32 { self.speed_x }

    pub const fn dino_y(&self) -> i32 { self.dino_y }

    pub const fn is_jumping(&self) -> bool { self.jumping }

    pub const fn is_ducking(&self) -> bool { self.ducking }

    pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }

    /// Current hitbox as (x, y, w, h).
    pub const fn dino_box(&self) -> (i32, i32, i32, i32) {
        if self.ducking && !self.jumping {
            (DINO_X, self.dino_y - DUCK_H, DUCK_W, DUCK_H)
        } else {
            (DINO_X, self.dino_y - DINO_H, DINO_W, DINO_H)
        }
    }

    fn step_jump(&mut self) {
        self.dino_y += self.vel_y;
        // Integer velocity truncated toward zero after adding 1.2
        self.vel_y = (self.vel_y * 10 + GRAVITY_TENTHS) / 10;
        if self.dino_y >= GROUND_Y {
            self.dino_y = GROUND_Y;
            self.vel_y = 0;
            self.jumping = false;
        }
    }

    fn step_obstacles(&mut self) {
        for o in self.obstacles.iter_mut().filter(|o| o.active) {
            o.x -= self.speed_x;
            if o.x + o.width() < 0 {
                o.active = false;
            }
        }

        let crowded = self.obstacles.iter().any(|o| o.active && o.x > W - SPAWN_GAP);
        if crowded {
            return;
        }
        let Some(slot) = self.obstacles.iter().position(|o| !o.active) else {
            return;
        };

        let kind = if self.score > BIRD_UNLOCK && self.rng.range(0, 4) == 0 {
            ObstacleKind::Bird
        } else if self.rng.coin() {
            ObstacleKind::TallCactus
        } else {
            ObstacleKind::SmallCactus
        };
        let x = W + self.rng.range(0, 20);
        let y = match kind {
            ObstacleKind::Bird => {
                if self.rng.coin() { GROUND_Y - 20 } else { GROUND_Y - 8 }
            }
            _ => GROUND_Y,
        };
        self.obstacles[slot] = Obstacle {
            active: true,
            kind,
            x,
            y,
        };
    }

    fn hit(&self) -> bool {
        let dino = self.dino_box();
        self.obstacles
            .iter()
            .filter(|o| o.active)
            .any(|o| aabb(dino, (o.x, o.y - o.height(), o.width(), o.height())))
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    fn draw_clouds<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let span = SCREEN_WIDTH + 30;
        let c1 = W - (self.t_ms / 6 % span) as i32;
        let c2 = W / 2 - (self.t_ms / 9 % span) as i32;
        for dx in 0..12 {
            gfx::plot(display, c1 + dx, 12 + i32::from(dx % 4 == 0), true);
            gfx::plot(display, c2 + dx, 20 + i32::from(dx % 5 == 0), true);
        }
    }

    fn draw_ground<D>(display: &mut D)
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for x in (0..W).step_by(4) {
            gfx::plot(display, x, GROUND_Y, true);
            gfx::plot(display, x + 1, GROUND_Y, true);
        }
    }

    fn draw_dino<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let alt = (self.t_ms / RUN_ANIM_MS) % 2 == 0;
        if self.ducking && !self.jumping {
            let rows = if alt { &DINO_DUCK_A } else { &DINO_DUCK_B };
            gfx::sprite_rows(display, DINO_X, self.dino_y - DUCK_H, DUCK_W as usize, DUCK_H as usize, rows);
        } else {
            let rows = if alt { &DINO_RUN_A } else { &DINO_RUN_B };
            gfx::sprite_rows(display, DINO_X, self.dino_y - DINO_H, DINO_W as usize, DINO_H as usize, rows);
        }
    }

    fn draw_obstacles<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let wing_up = (self.t_ms / WING_ANIM_MS) % 2 == 0;
        for o in self.obstacles.iter().filter(|o| o.active) {
            let rows: &[&str] = match o.kind {
                ObstacleKind::SmallCactus => &CACTUS_SMALL,
                ObstacleKind::TallCactus => &CACTUS_TALL,
                ObstacleKind::Bird if wing_up => &BIRD_A,
                ObstacleKind::Bird => &BIRD_B,
            };
            let (w, h) = o.kind.size();
            gfx::sprite_rows(display, o.x, o.y - h, w as usize, h as usize, rows);
        }
    }

    fn draw_scores<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let score: String<12> = gfx::labeled_u32("", self.score);
        gfx::text5x7(display, W - gfx::text_width(&score) - 2, 2, &score, true);
        let hi: String<16> = gfx::labeled_u32("HI ", self.hi_score);
        gfx::text5x7(display, 2, 2, &hi, true);
    }
}

impl Program for Dino {
    fn update(
        &mut self,
        input: &Input,
    ) -> ProgramStatus {
        self.t_ms = self.t_ms.wrapping_add(FRAME_MS);

        if self.game_over {
            if input.action_down(Action::Restart) {
                self.reset();
            }
            return ProgramStatus::Running;
        }

        if input.action_pressed(Action::Jump) && !self.jumping {
            self.jumping = true;
            self.vel_y = JUMP_VEL;
        }
        self.ducking = input.action_down(Action::Duck) && !self.jumping;

        if self.jumping {
            self.step_jump();
        }

        self.step_obstacles();

        if self.hit() {
            self.game_over = true;
            self.hi_score = self.hi_score.max(self.score);
            return ProgramStatus::Running;
        }

        self.score += 1;
        if self.score % SPEED_STEP_SCORE == 0 && self.speed_x < MAX_SPEED_X {
            self.speed_x += 1;
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
        if !self.game_over {
            self.draw_clouds(display);
        }
        Self::draw_ground(display);
        self.draw_dino(display);
        self.draw_obstacles(display);
        self.draw_scores(display);

        if self.game_over {
            gfx::text5x7(display, 37, 22, "GAME OVER", true);
            gfx::text5x7(display, 25, 38, "PRESS RESTART", true);
        }
    }

    fn frame_interval_ms(&self) -> u32 { FRAME_MS }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Framebuffer;
    use crate::input::ProgramId;
    use crate::input::tests::{LEFT, MIDDLE, NONE, RIGHT, press};

    fn dino_input() -> Input {
        let mut input = Input::new(NONE, 0);
        input.set_active_program(ProgramId::Dino);
        input
    }

    fn idle(input: &mut Input) {
        let t = input.now_ms() + FRAME_MS;
        input.update(NONE, t);
    }

    #[test]
    fn test_sprite_rows_have_declared_width() {
        let sets: [(&[&str], usize); 8] = [
            (&DINO_RUN_A, 16),
            (&DINO_RUN_B, 16),
            (&DINO_DUCK_A, 22),
            (&DINO_DUCK_B, 22),
            (&CACTUS_SMALL, 8),
            (&CACTUS_TALL, 12),
            (&BIRD_A, 16),
            (&BIRD_B, 16),
        ];
        for (rows, width) in sets {
            assert!(rows.iter().all(|r| r.len() == width));
        }
    }

    #[test]
    fn test_jump_arc_peaks_30px_and_lands() {
        let mut input = dino_input();
        let mut game = Dino::new(1);
        press(&mut input, RIGHT, 0);
        game.update(&input);
        assert!(game.is_jumping());
        assert_eq!(game.dino_y(), GROUND_Y - 10);

        let mut peak = game.dino_y();
        let mut frames = 1;
        while game.is_jumping() {
            idle(&mut input);
            game.update(&input);
            peak = peak.min(game.dino_y());
            frames += 1;
        }
        assert_eq!(GROUND_Y - peak, 30);
        assert_eq!(frames, 14);
        assert_eq!(game.dino_y(), GROUND_Y);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_no_double_jump() {
        let mut input = dino_input();
        let mut game = Dino::new(1);
        let t = press(&mut input, RIGHT, 0);
        game.update(&input);
        input.update(NONE, t + 1);
        input.update(NONE, t + 1 + 20);
        press(&mut input, RIGHT, t + 100);
        let y = game.dino_y();
        game.update(&input);
        // Still on the first arc: velocity went -10 -> -8
        assert_eq!(game.dino_y(), y - 8);
    }

    #[test]
    fn test_duck_changes_hitbox() {
        let mut input = dino_input();
        let mut game = Dino::new(1);
        press(&mut input, LEFT, 0);
        game.update(&input);
        assert!(game.is_ducking());
        assert_eq!(game.dino_box(), (DINO_X, GROUND_Y - 12, 22, 12));
    }

    #[test]
    fn test_first_spawn_position() {
        let input = dino_input();
        let mut game = Dino::new(42);
        game.update(&input);
        let active: Vec<_> = game.obstacles().iter().filter(|o| o.active).collect();
        assert_eq!(active.len(), 1);
        assert!((W..=W + 20).contains(&active[0].x));
        assert_ne!(active[0].kind, ObstacleKind::Bird);

        // Fresh obstacle is inside the spawn gap, so nothing else spawns yet
        game.update(&input);
        assert_eq!(game.obstacles().iter().filter(|o| o.active).count(), 1);
    }

    #[test]
    fn test_birds_only_after_unlock() {
        let mut game = Dino::new(7);
        for _ in 0..200 {
            game.obstacles = [Obstacle::INACTIVE; MAX_OBSTACLES];
            game.step_obstacles();
            assert_ne!(game.obstacles[0].kind, ObstacleKind::Bird);
        }

        game.score = BIRD_UNLOCK + 1;
        let mut birds = 0;
        for _ in 0..200 {
            game.obstacles = [Obstacle::INACTIVE; MAX_OBSTACLES];
            game.step_obstacles();
            let o = game.obstacles[0];
            if o.kind == ObstacleKind::Bird {
                birds += 1;
                assert!(o.y == GROUND_Y - 8 || o.y == GROUND_Y - 20);
            }
        }
        assert!(birds > 0);
    }

    #[test]
    fn test_obstacles_despawn_off_screen() {
        let mut game = Dino::new(3);
        game.obstacles[0] = Obstacle {
            active: true,
            kind: ObstacleKind::SmallCactus,
            x: -6,
            y: GROUND_Y,
        };
        game.step_obstacles();
        // -6 - 3 = -9, right edge at -1: gone, the slot may be refilled off screen
        assert!(game.obstacles().iter().all(|o| !o.active || o.x >= W));
    }

    #[test]
    fn test_collision_ends_run_and_keeps_hi_score() {
        let input = dino_input();
        let mut game = Dino::new(5);
        game.score = 321;
        game.obstacles[0] = Obstacle {
            active: true,
            kind: ObstacleKind::SmallCactus,
            x: DINO_X + INIT_SPEED_X,
            y: GROUND_Y,
        };
        game.update(&input);
        assert!(game.is_game_over());
        assert_eq!(game.hi_score(), 321);

        // Frozen until restart
        game.update(&input);
        assert_eq!(game.score(), 321);
    }

    #[test]
    fn test_with_hi_score_starts_fresh_run() {
        let game = Dino::with_hi_score(5, 250);
        assert_eq!(game.hi_score(), 250);
        assert_eq!(game.score(), 0);
        assert!(!game.is_game_over());
        assert_eq!(game.speed(), INIT_SPEED_X);
    }

    #[test]
    fn test_high_bird_clears_standing_dino() {
        let game = Dino::new(5);
        let bird = (DINO_X, GROUND_Y - 20 - 8, 16, 8);
        assert!(!aabb(game.dino_box(), bird));
    }

    #[test]
    fn test_restart_resets_run() {
        let mut input = dino_input();
        let mut game = Dino::new(5);
        game.score = 99;
        game.speed_x = 5;
        game.game_over = true;
        game.hi_score = 400;

        input.update(MIDDLE, 10);
        input.update(MIDDLE, 40);
        game.update(&input);
        assert!(!game.is_game_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), INIT_SPEED_X);
        assert_eq!(game.hi_score(), 400);
        assert!(game.obstacles().iter().all(|o| !o.active));
    }

    #[test]
    fn test_speed_steps_and_caps() {
        let input = dino_input();
        let mut game = Dino::new(9);
        game.score = SPEED_STEP_SCORE - 1;
        game.update(&input);
        assert_eq!(game.speed(), INIT_SPEED_X + 1);

        game.score = SPEED_STEP_SCORE * 10 - 1;
        game.speed_x = MAX_SPEED_X;
        game.obstacles = [Obstacle::INACTIVE; MAX_OBSTACLES];
        game.update(&input);
        assert_eq!(game.speed(), MAX_SPEED_X);
    }

    #[test]
    fn test_draw_ground_scores_and_game_over() {
        let input = dino_input();
        let mut game = Dino::new(11);
        game.update(&input);

        let mut fb = Framebuffer::new();
        game.draw(&mut fb);
        assert!(fb.pixel(0, GROUND_Y));
        assert!(fb.pixel(1, GROUND_Y));
        assert!(!fb.pixel(2, GROUND_Y));
        // Standing dino: top row of the body
        assert!(fb.pixel(DINO_X + 6, GROUND_Y - 15));
        let running = fb.lit_pixels();

        game.game_over = true;
        let mut over = Framebuffer::new();
        game.draw(&mut over);
        assert_ne!(running, over.lit_pixels());
        // "G" of GAME OVER starts at (37, 22)
        assert!(over.pixel(37, 23));
    }
}
