//! Fixed timestep simulation tick and input handling
//!
//! The driving loop calls [`handle_input`] for every command it polled, then
//! [`tick`] once per fixed frame interval, then renders a snapshot. Nothing
//! here blocks, waits, or touches a device.

use glam::Vec2;

use super::collision::{first_brick_hit, resolve_wall_bounce};
use super::state::{GameState, Phase};

/// Discrete input commands recognized by the simulation.
///
/// Quit is deliberately absent: shutting down is the driving loop's concern
/// and never reaches the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Step the paddle left by the configured amount
    MoveLeft,
    /// Step the paddle right by the configured amount
    MoveRight,
    /// Pointer-style absolute positioning of the paddle's left edge
    SetPaddleX(f32),
    /// Fire the ball; honored only while Aiming
    Launch,
    /// Start a fresh game; honored only in Won/Lost
    Restart,
}

/// Apply one input command to the state.
///
/// Paddle movement works in every phase. Launch and Restart are gated on
/// phase and no-ops otherwise; no other transitions exist.
pub fn handle_input(state: &mut GameState, cmd: Command) {
    let max_x = state.config.max_paddle_x();
    match cmd {
        Command::MoveLeft => state.paddle.move_by(-state.config.paddle_step, max_x),
        Command::MoveRight => state.paddle.move_by(state.config.paddle_step, max_x),
        Command::SetPaddleX(x) => state.paddle.set_x(x, max_x),
        Command::Launch => {
            if state.phase == Phase::Aiming {
                let speed = state.config.ball_speed;
                state.ball.vel = Vec2::new(speed, -speed);
                state.phase = Phase::Playing;
                log::debug!("launch at tick {}", state.time_ticks);
            }
        }
        Command::Restart => {
            if state.phase.is_terminal() {
                log::info!("restart from {:?}", state.phase);
                state.reset_session();
            }
        }
    }
}

/// Advance the game by one fixed timestep.
///
/// `dt` is informational only: velocities are per-tick displacements tuned
/// for one fixed cadence and are never scaled by it.
pub fn tick(state: &mut GameState, _dt: f32) {
    match state.phase {
        Phase::Aiming => {
            state.time_ticks += 1;
            // Ball tracks the paddle every tick while waiting to launch
            state.ball.pin_to(&state.paddle);
        }
        Phase::Playing => {
            state.time_ticks += 1;
            step_playing(state);
        }
        // Frozen until restart
        Phase::Won | Phase::Lost => {}
    }
}

/// One Playing step: integrate, then resolve walls, bricks, and the paddle
/// in that fixed order.
fn step_playing(state: &mut GameState) {
    state.ball.pos += state.ball.vel;
    resolve_wall_bounce(&mut state.ball, &state.config);

    if let Some(idx) = first_brick_hit(&state.ball.rect(), &state.bricks) {
        state.bricks.remove(idx);
        state.score += state.config.score_per_brick;
        state.ball.vel.y = -state.ball.vel.y;
        log::debug!("brick destroyed, {} remaining", state.bricks.len());

        if state.bricks.is_empty() {
            state.phase = Phase::Won;
            log::info!("field cleared, final score {}", state.score);
            return;
        }
    }

    let paddle_rect = state.paddle.rect();
    if state.ball.rect().intersects(&paddle_rect) {
        // Snap on top of the paddle so the ball can neither tunnel through
        // nor stick inside it
        state.ball.pos.y = paddle_rect.y - state.ball.size;
        state.ball.vel.y = -state.ball.vel.y;
    } else if state.ball.pos.y > paddle_rect.y {
        // Dropped past the paddle
        state.lives = state.lives.saturating_sub(1);
        if state.lives > 0 {
            state.phase = Phase::Aiming;
            log::debug!("ball dropped, {} lives left", state.lives);
        } else {
            state.phase = Phase::Lost;
            log::info!("out of lives, final score {}", state.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use crate::config::GameConfig;
    use crate::sim::rect::Rect;

    use super::*;

    const DT: f32 = 1.0 / 50.0;

    fn new_state(seed: u64) -> GameState {
        let _ = env_logger::builder().is_test(true).try_init();
        GameState::new(GameConfig::default(), seed).unwrap()
    }

    #[test]
    fn test_launch_transitions_aiming_to_playing() {
        let mut state = new_state(12345);
        assert_eq!(state.phase(), Phase::Aiming);

        // Tick without launch - stays Aiming
        tick(&mut state, DT);
        assert_eq!(state.phase(), Phase::Aiming);

        handle_input(&mut state, Command::Launch);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.ball().vel, Vec2::new(5.0, -5.0));

        // A second launch while already Playing is a no-op
        handle_input(&mut state, Command::Launch);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.ball().vel, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_aiming_ball_tracks_paddle() {
        let mut state = new_state(1);
        for _ in 0..10 {
            handle_input(&mut state, Command::MoveRight);
            tick(&mut state, DT);
            let expected_x = state.paddle().x + (state.paddle().w - state.ball().size) / 2.0;
            assert_eq!(state.ball().pos.x, expected_x);
            assert_eq!(state.ball().pos.y, state.paddle().y - state.ball().size);
        }
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        state.ball.pos = Vec2::new(0.0, 100.0);
        state.ball.vel = Vec2::new(-5.0, -5.0);

        tick(&mut state, DT);
        assert_eq!(state.ball().pos.x, 0.0);
        assert_eq!(state.ball().vel.x, 5.0);
        assert_eq!(state.ball().pos.y, 95.0);
    }

    #[test]
    fn test_single_brick_destroyed_under_multi_overlap() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        state.ball.pos = Vec2::new(100.0, 100.0);
        state.ball.vel = Vec2::new(5.0, -5.0);
        // Two bricks that will both overlap the ball after one step, plus a
        // far-away survivor
        let first = Rect::new(100.0, 90.0, 55.0, 15.0);
        let second = Rect::new(95.0, 85.0, 55.0, 15.0);
        let far = Rect::new(500.0, 50.0, 55.0, 15.0);
        state.bricks = vec![first, second, far];

        tick(&mut state, DT);
        assert_eq!(state.score(), 3);
        assert_eq!(state.bricks(), &[second, far]);
        assert_eq!(state.ball().vel, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_win_on_last_brick_short_circuits() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        state.ball.pos = Vec2::new(100.0, 100.0);
        state.ball.vel = Vec2::new(5.0, -5.0);
        state.bricks = vec![Rect::new(100.0, 90.0, 55.0, 15.0)];

        tick(&mut state, DT);
        assert_eq!(state.phase(), Phase::Won);
        assert_eq!(state.score(), 3);
        assert!(state.bricks().is_empty());

        // Won is frozen: further ticks change nothing
        let before = state.snapshot();
        let ticks_before = state.time_ticks();
        tick(&mut state, DT);
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.time_ticks(), ticks_before);
    }

    #[test]
    fn test_paddle_bounce_snaps_above() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        let paddle_rect = state.paddle().rect();
        state.ball.pos = Vec2::new(paddle_rect.x + 10.0, paddle_rect.y - 12.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state, DT);
        assert_eq!(state.ball().pos.y, paddle_rect.y - state.ball().size);
        assert_eq!(state.ball().vel.y, -5.0);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_drop_decrements_lives_and_reaims() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        // Below the paddle top, nowhere near the paddle horizontally
        state.paddle.set_x(0.0, state.config().max_paddle_x());
        state.ball.pos = Vec2::new(400.0, 460.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state, DT);
        assert_eq!(state.lives(), 2);
        assert_eq!(state.phase(), Phase::Aiming);

        // Next tick re-pins the ball to the paddle
        tick(&mut state, DT);
        assert_eq!(state.ball().pos.y, state.paddle().y - state.ball().size);
    }

    #[test]
    fn test_last_life_drop_loses_and_freezes() {
        let mut state = new_state(1);
        handle_input(&mut state, Command::Launch);
        state.lives = 1;
        state.paddle.set_x(0.0, state.config().max_paddle_x());
        state.ball.pos = Vec2::new(400.0, 460.0);
        state.ball.vel = Vec2::new(5.0, 5.0);

        tick(&mut state, DT);
        assert_eq!(state.lives(), 0);
        assert_eq!(state.phase(), Phase::Lost);

        let before = state.snapshot();
        for _ in 0..5 {
            tick(&mut state, DT);
        }
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_restart_only_from_terminal_phases() {
        let mut state = new_state(1);
        let bricks_before = state.bricks().len();

        // No-op while Aiming and Playing
        handle_input(&mut state, Command::Restart);
        assert_eq!(state.phase(), Phase::Aiming);
        assert_eq!(state.bricks().len(), bricks_before);
        handle_input(&mut state, Command::Launch);
        handle_input(&mut state, Command::Restart);
        assert_eq!(state.phase(), Phase::Playing);

        // Force a loss, then restart
        state.lives = 1;
        state.paddle.set_x(0.0, state.config().max_paddle_x());
        state.ball.pos = Vec2::new(400.0, 460.0);
        state.ball.vel = Vec2::new(5.0, 5.0);
        state.score = 42;
        tick(&mut state, DT);
        assert_eq!(state.phase(), Phase::Lost);

        handle_input(&mut state, Command::Restart);
        assert_eq!(state.phase(), Phase::Aiming);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
        assert!(!state.bricks().is_empty());
    }

    #[test]
    fn test_determinism_bit_identical_snapshots() {
        let script = [
            Some(Command::MoveRight),
            Some(Command::MoveRight),
            Some(Command::Launch),
            None,
            Some(Command::MoveLeft),
            None,
            Some(Command::SetPaddleX(120.0)),
            None,
            None,
            Some(Command::MoveRight),
        ];

        let mut a = new_state(424242);
        let mut b = new_state(424242);
        for cmd in script {
            if let Some(cmd) = cmd {
                handle_input(&mut a, cmd);
                handle_input(&mut b, cmd);
            }
            tick(&mut a, DT);
            tick(&mut b, DT);
            let snap_a = serde_json::to_string(&a.snapshot()).unwrap();
            let snap_b = serde_json::to_string(&b.snapshot()).unwrap();
            assert_eq!(snap_a, snap_b);
        }
    }

    proptest! {
        /// Wall and speed invariants hold after every Playing tick, and the
        /// brick count never increases nor drops by more than one.
        #[test]
        fn prop_playing_invariants(seed in any::<u64>(), moves in prop::collection::vec(any::<i16>(), 1..400)) {
            let mut state = new_state(seed);
            let speed = state.config().ball_speed;
            handle_input(&mut state, Command::Launch);
            let mut prev_bricks = state.bricks().len();

            for m in moves {
                match m.rem_euclid(3) {
                    0 => handle_input(&mut state, Command::MoveLeft),
                    1 => handle_input(&mut state, Command::MoveRight),
                    _ => handle_input(&mut state, Command::SetPaddleX(m as f32)),
                }
                tick(&mut state, DT);

                if state.phase() == Phase::Playing {
                    let ball = state.ball();
                    prop_assert!(ball.pos.x >= 0.0);
                    prop_assert!(ball.pos.x <= state.config().max_ball_x());
                    prop_assert!(ball.pos.y >= 0.0);
                    prop_assert_eq!(ball.vel.x.abs(), speed);
                    prop_assert_eq!(ball.vel.y.abs(), speed);
                }

                let bricks = state.bricks().len();
                prop_assert!(bricks <= prev_bricks);
                prop_assert!(prev_bricks - bricks <= 1);
                prev_bricks = bricks;
            }
        }

        /// Won is reached only by clearing the field, never earlier.
        #[test]
        fn prop_won_iff_no_bricks(seed in any::<u64>()) {
            let mut state = new_state(seed);
            handle_input(&mut state, Command::Launch);
            for _ in 0..2000 {
                tick(&mut state, DT);
                if state.phase() == Phase::Won {
                    prop_assert!(state.bricks().is_empty());
                } else {
                    prop_assert!(!state.bricks().is_empty());
                }
            }
        }
    }
}
