//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (bricks scan in insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{first_brick_hit, resolve_wall_bounce};
pub use rect::Rect;
pub use snapshot::Snapshot;
pub use state::{Ball, GameState, Paddle, Phase};
pub use tick::{Command, handle_input, tick};
