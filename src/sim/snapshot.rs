//! Render-ready projection of the game state
//!
//! The renderer (and anything else outside the sim) only ever sees this
//! owned copy, taken between ticks; it can never alias live mutable state.

use serde::Serialize;

use super::rect::Rect;
use super::state::{GameState, Phase};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub paddle: Rect,
    pub ball: Rect,
    /// Live bricks in scan order
    pub bricks: Vec<Rect>,
    pub score: u32,
    pub lives: u8,
    pub phase: Phase,
    /// Center-screen status line for the current phase, if any
    pub status: Option<&'static str>,
}

impl GameState {
    /// Take an immutable snapshot for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            paddle: self.paddle.rect(),
            ball: self.ball.rect(),
            bricks: self.bricks.clone(),
            score: self.score,
            lives: self.lives,
            phase: self.phase,
            status: self.phase.status_line(),
        }
    }
}
