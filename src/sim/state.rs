//! Game state and core simulation types
//!
//! Everything that must be reproducible for a fixed seed lives here: the
//! paddle, the ball, the brick field, score, lives, and the current phase.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::config::{ConfigError, GameConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Ball glued to the paddle, waiting for launch input
    Aiming,
    /// Active gameplay
    Playing,
    /// Out of lives; frozen until restart
    Lost,
    /// Field cleared; frozen until restart
    Won,
}

impl Phase {
    /// True for the two frozen end states that accept a restart
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Lost | Phase::Won)
    }

    /// Center-screen status line the renderer shows for this phase, if any
    pub fn status_line(self) -> Option<&'static str> {
        match self {
            Phase::Aiming => Some("PRESS SPACE TO FIRE BALL"),
            Phase::Playing => None,
            Phase::Lost => Some("GAME OVER! PRESS ENTER TO PLAY AGAIN"),
            Phase::Won => Some("YIPEE YOU WON! PRESS ENTER TO PLAY AGAIN"),
        }
    }
}

/// The player's paddle
///
/// `y`, `w`, and `h` are fixed for the session; only `x` moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Paddle {
    /// Paddle centered horizontally at its fixed vertical offset
    pub fn centered(config: &GameConfig) -> Self {
        Self {
            x: (config.field_width - config.paddle_width) / 2.0,
            y: config.paddle_y(),
            w: config.paddle_width,
            h: config.paddle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Shift horizontally and clamp into [0, max_x]
    pub fn move_by(&mut self, dx: f32, max_x: f32) {
        self.set_x(self.x + dx, max_x);
    }

    /// Position the left edge absolutely and clamp into [0, max_x]
    pub fn set_x(&mut self, x: f32, max_x: f32) {
        self.x = x.clamp(0.0, max_x);
    }
}

/// The ball: a square with a per-tick velocity
///
/// Speed magnitude never changes during a session; bounces only flip the
/// sign of a component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement applied each Playing tick
    pub vel: Vec2,
    /// Side length
    pub size: f32,
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Re-pin directly above the paddle center (Aiming phase, every tick)
    pub fn pin_to(&mut self, paddle: &Paddle) {
        self.pos.x = paddle.x + (paddle.w - self.size) / 2.0;
        self.pos.y = paddle.y - self.size;
    }
}

/// Give up regenerating an empty grid after this many whole-grid attempts
/// and force a single brick instead. With a fair coin per cell the chance of
/// one empty 9x9 attempt is 2^-81; the bound only exists to keep the loop
/// provably finite.
const MAX_GENERATION_ATTEMPTS: u32 = 16;

/// Complete game state (deterministic for a fixed seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) rng: Pcg32,
    pub(crate) seed: u64,
    pub(crate) phase: Phase,
    pub(crate) score: u32,
    pub(crate) lives: u8,
    /// Tick counter; advances only in Aiming/Playing so terminal phases
    /// stay bit-for-bit frozen
    pub(crate) time_ticks: u64,
    pub(crate) paddle: Paddle,
    pub(crate) ball: Ball,
    /// Insertion order is the collision scan order
    pub(crate) bricks: Vec<Rect>,
}

impl GameState {
    /// Create a new session from a validated config and RNG seed.
    ///
    /// Rejects a misconfigured layout eagerly rather than letting it corrupt
    /// play; see [`GameConfig::validate`].
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let paddle = Paddle::centered(&config);
        let ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: config.ball_size,
        };
        let mut state = Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: Phase::Aiming,
            score: 0,
            lives: 0,
            time_ticks: 0,
            paddle,
            ball,
            bricks: Vec::new(),
        };
        state.reset_session();
        log::info!(
            "new session: seed={} bricks={} lives={}",
            seed,
            state.bricks.len(),
            state.lives
        );
        Ok(state)
    }

    /// Rebuild the session: full lives, zero score, centered paddle, pinned
    /// ball, fresh brick field.
    ///
    /// The RNG stream runs on across restarts (seeded once per session), so
    /// a fixed seed plus a fixed input sequence reproduces whole multi-game
    /// runs.
    pub(crate) fn reset_session(&mut self) {
        self.lives = self.config.starting_lives;
        self.score = 0;
        self.phase = Phase::Aiming;
        self.paddle = Paddle::centered(&self.config);
        self.ball.vel = Vec2::ZERO;
        self.ball.pin_to(&self.paddle);
        self.generate_bricks();
    }

    /// Fill the brick grid: one fair coin flip per cell, row-major, retrying
    /// the whole grid while it comes up empty so a session always has at
    /// least one brick.
    fn generate_bricks(&mut self) {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            self.fill_grid();
            if !self.bricks.is_empty() {
                return;
            }
        }
        log::warn!(
            "brick generation empty after {} attempts, forcing one brick",
            MAX_GENERATION_ATTEMPTS
        );
        self.bricks.push(self.cell_rect(0, 0));
    }

    fn fill_grid(&mut self) {
        self.bricks.clear();
        for row in 0..self.config.brick_rows {
            for col in 0..self.config.brick_cols {
                if self.rng.random_bool(0.5) {
                    let brick = self.cell_rect(row, col);
                    self.bricks.push(brick);
                }
            }
        }
    }

    fn cell_rect(&self, row: u32, col: u32) -> Rect {
        Rect::new(
            self.config.grid_origin_x + col as f32 * self.config.cell_pitch_x(),
            self.config.grid_origin_y + row as f32 * self.config.cell_pitch_y(),
            self.config.brick_width,
            self.config.brick_height,
        )
    }

    // --- read-only accessors for the driving loop ---

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u8 {
        self.lives
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    #[inline]
    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Live bricks in collision scan order
    #[inline]
    pub fn bricks(&self) -> &[Rect] {
        &self.bricks
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
