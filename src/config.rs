//! Game configuration
//!
//! Every dimension and tuning value the simulation needs is fixed at
//! construction time; there is no live reconfiguration during a session.
//! Defaults reproduce the classic 640x480 layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a configuration is rejected before any state is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("brick grid needs at least one row and one column")]
    EmptyGrid,
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("paddle ({paddle_width}px) is wider than the field ({field_width}px)")]
    PaddleTooWide { paddle_width: f32, field_width: f32 },
    #[error("ball ({ball_size}px) is wider than the field ({field_width}px)")]
    BallTooWide { ball_size: f32, field_width: f32 },
    #[error("brick row spans to x={row_end} but the field is only {field_width}px wide")]
    GridTooWide { row_end: f32, field_width: f32 },
    #[error("brick grid reaches y={grid_bottom} which is below the paddle top at y={paddle_y}")]
    GridTooTall { grid_bottom: f32, paddle_y: f32 },
}

/// Init-time constants for a game session
///
/// Geometry uses a top-left origin with y growing downward. The paddle sits
/// `paddle_bottom_margin` above the bottom edge; the brick grid hangs from
/// `grid_origin` with a fixed cell pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle underside and the bottom of the field
    pub paddle_bottom_margin: f32,
    /// Paddle travel per MoveLeft/MoveRight command
    pub paddle_step: f32,
    /// The ball is a square of this side length
    pub ball_size: f32,
    /// Per-axis, per-tick speed; velocity is always (±ball_speed, ±ball_speed)
    pub ball_speed: f32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_rows: u32,
    pub brick_cols: u32,
    /// Top-left corner of the brick grid
    pub grid_origin_x: f32,
    pub grid_origin_y: f32,
    /// Spacing between neighbouring cells
    pub brick_gap_x: f32,
    pub brick_gap_y: f32,
    pub starting_lives: u8,
    pub score_per_brick: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 640.0,
            field_height: 480.0,
            paddle_width: 60.0,
            paddle_height: 12.0,
            paddle_bottom_margin: 10.0,
            paddle_step: 5.0,
            ball_size: 16.0,
            ball_speed: 5.0,
            brick_width: 55.0,
            brick_height: 15.0,
            brick_rows: 9,
            brick_cols: 9,
            grid_origin_x: 25.0,
            grid_origin_y: 35.0,
            brick_gap_x: 10.0,
            brick_gap_y: 5.0,
            starting_lives: 3,
            score_per_brick: 3,
        }
    }
}

impl GameConfig {
    /// Fixed vertical position of the paddle's top edge
    #[inline]
    pub fn paddle_y(&self) -> f32 {
        self.field_height - self.paddle_height - self.paddle_bottom_margin
    }

    /// Rightmost legal paddle.x
    #[inline]
    pub fn max_paddle_x(&self) -> f32 {
        self.field_width - self.paddle_width
    }

    /// Rightmost legal ball.x
    #[inline]
    pub fn max_ball_x(&self) -> f32 {
        self.field_width - self.ball_size
    }

    /// Horizontal distance between the left edges of neighbouring cells
    #[inline]
    pub fn cell_pitch_x(&self) -> f32 {
        self.brick_width + self.brick_gap_x
    }

    /// Vertical distance between the top edges of neighbouring rows
    #[inline]
    pub fn cell_pitch_y(&self) -> f32 {
        self.brick_height + self.brick_gap_y
    }

    /// Reject misconfiguration eagerly, before a session is built.
    ///
    /// Layout mistakes (a grid wider than the field, bricks below the
    /// paddle) would otherwise corrupt play silently rather than fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.brick_rows == 0 || self.brick_cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.paddle_width > self.field_width {
            return Err(ConfigError::PaddleTooWide {
                paddle_width: self.paddle_width,
                field_width: self.field_width,
            });
        }
        if self.ball_size > self.field_width {
            return Err(ConfigError::BallTooWide {
                ball_size: self.ball_size,
                field_width: self.field_width,
            });
        }

        let row_end = self.grid_origin_x
            + self.brick_cols as f32 * self.brick_width
            + (self.brick_cols - 1) as f32 * self.brick_gap_x;
        if row_end > self.field_width {
            return Err(ConfigError::GridTooWide {
                row_end,
                field_width: self.field_width,
            });
        }

        let grid_bottom = self.grid_origin_y
            + self.brick_rows as f32 * self.brick_height
            + (self.brick_rows - 1) as f32 * self.brick_gap_y;
        if grid_bottom > self.paddle_y() {
            return Err(ConfigError::GridTooTall {
                grid_bottom,
                paddle_y: self.paddle_y(),
            });
        }

        Ok(())
    }
}
