//! Brickfall - a single-screen brick-breaker game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `config`: Init-time tuning for field geometry and difficulty
//!
//! The crate is only the simulation. Window creation, input-device polling,
//! font rendering, and the frame loop are the caller's job: each frame the
//! driver feeds [`sim::Command`]s through [`sim::handle_input`], advances the
//! world with [`sim::tick`], and draws the [`sim::Snapshot`] it takes between
//! ticks. The core never touches a device, a clock, or a drawing surface.

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use sim::{Command, GameState, Phase, Rect, Snapshot, handle_input, tick};
