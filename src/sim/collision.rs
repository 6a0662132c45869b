//! Collision detection and resolution
//!
//! Wall handling clamps the ball back into the field and flips the matching
//! velocity component; brick handling finds the first overlap in scan order.
//! The bottom edge is deliberately open: falling past the paddle is the loss
//! condition and is resolved by the tick, not here.

use crate::config::GameConfig;

use super::rect::Rect;
use super::state::Ball;

/// Bounce the ball off the hard walls (left, right, top).
///
/// Resolution order is fixed: left/right before top, left wins over right.
pub fn resolve_wall_bounce(ball: &mut Ball, config: &GameConfig) {
    if ball.pos.x <= 0.0 {
        ball.pos.x = 0.0;
        ball.vel.x = -ball.vel.x;
    } else if ball.pos.x >= config.max_ball_x() {
        ball.pos.x = config.max_ball_x();
        ball.vel.x = -ball.vel.x;
    }

    if ball.pos.y < 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
    }
}

/// Index of the first brick the ball overlaps, scanning insertion order.
///
/// At most one brick is consumed per tick even when the ball geometrically
/// overlaps several; the caller stops at the returned index.
pub fn first_brick_hit(ball: &Rect, bricks: &[Rect]) -> Option<usize> {
    bricks.iter().position(|brick| brick.intersects(ball))
}
