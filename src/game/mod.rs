//! Match state and the per-frame physics step
//!
//! `MatchState` is the single owner of paddles, ball and score. The
//! `step_match` system advances it once per fixed frame.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ball::Ball;
use crate::config::GameConfig;
use crate::events::{EventBus, MatchEvent};
use crate::input::PaddleInput;
use crate::paddle::{Paddle, Side, apply_tracked_y, move_paddle};
use crate::scoring::{MatchOutcome, Score};
use crate::tracking::TrackedPaddle;

/// Authoritative game state
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    config: GameConfig,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
}

impl MatchState {
    /// Fresh match: centred paddles, ball at the centre, 0 - 0
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            left: Paddle::new(config.left_paddle_x(), config.paddle_start_y()),
            right: Paddle::new(config.right_paddle_x(), config.paddle_start_y()),
            ball: Ball::kickoff(&config),
            score: Score::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reinitialise every piece of match state. Window, audio and tracking
    /// resources live elsewhere and are untouched.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        MatchOutcome::from_score(&self.score, self.config.win_score)
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Advance one frame.
    ///
    /// Order: tracked sample, keyboard, ball move, walls, paddles, goals, win
    /// check. While the match is over the ball stays frozen and only the
    /// restart key is honoured.
    pub fn step(
        &mut self,
        input: &PaddleInput,
        tracked_y: Option<f32>,
        rng: &mut impl Rng,
    ) -> Vec<MatchEvent> {
        let config = self.config;
        let mut events = Vec::new();

        if let Some(y) = tracked_y {
            apply_tracked_y(&mut self.left, y);
        }
        move_paddle(&mut self.left, input.left, &config);
        move_paddle(&mut self.right, input.right, &config);

        let was_over = self.outcome().is_some();
        if !was_over {
            self.ball.advance();

            if self.ball.bounce_off_walls(&config) {
                events.push(MatchEvent::WallBounce);
            }
            if self.ball.bounce_off_paddle(&self.left, Side::Left, &config) {
                events.push(MatchEvent::PaddleHit { side: Side::Left });
            }
            if self.ball.bounce_off_paddle(&self.right, Side::Right, &config) {
                events.push(MatchEvent::PaddleHit { side: Side::Right });
            }

            if let Some(scorer) = self.ball.scorer(&config) {
                self.score.award(scorer);
                self.ball.serve(&config, rng);
                events.push(MatchEvent::Goal {
                    scorer,
                    left: self.score.left,
                    right: self.score.right,
                });
            }
        }

        if let Some(outcome) = self.outcome() {
            self.ball.freeze(&config);
            if !was_over {
                events.push(MatchEvent::MatchOver {
                    winner: outcome.winner,
                });
            }
            if input.restart_held {
                self.reset();
                events.push(MatchEvent::Restart);
            }
        }

        events
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

/// Randomness for serves. Seedable so scenarios replay exactly.
#[derive(Resource)]
pub struct MatchRng(pub StdRng);

impl MatchRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for MatchRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Fixed-rate physics step. Also handles the quit key on the match-over prompt.
pub fn step_match(
    mut state: ResMut<MatchState>,
    input: Res<PaddleInput>,
    tracked: Option<Res<TrackedPaddle>>,
    mut rng: ResMut<MatchRng>,
    mut bus: ResMut<EventBus>,
    mut exit: MessageWriter<AppExit>,
) {
    bus.next_frame();
    let tracked_y = tracked.and_then(|paddle| paddle.take());
    let events = state.step(&input, tracked_y, &mut rng.0);
    bus.emit_all(events);

    if state.outcome().is_some() && input.quit_held {
        info!("Rematch declined, quitting");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paddle::PaddleKeys;
    use bevy::math::Vec2;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn idle() -> PaddleInput {
        PaddleInput::default()
    }

    #[test]
    fn test_new_match_is_centered() {
        let state = MatchState::default();
        assert_eq!(state.left, Paddle::new(50.0, 225.0));
        assert_eq!(state.right, Paddle::new(735.0, 225.0));
        assert_eq!(state.ball.position, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.velocity, Vec2::new(0.0, 5.0));
        assert_eq!(state.score, Score::default());
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_ball_moves_by_velocity_each_frame() {
        let mut state = MatchState::default();
        state.ball.position = Vec2::new(300.0, 200.0);
        state.ball.velocity = Vec2::new(3.0, -4.0);
        let mut rng = rng();

        for frame in 1..=10 {
            let events = state.step(&idle(), None, &mut rng);
            assert!(events.is_empty());
            assert_eq!(
                state.ball.position,
                Vec2::new(300.0 + 3.0 * frame as f32, 200.0 - 4.0 * frame as f32)
            );
        }
    }

    #[test]
    fn test_vertical_ball_never_changes_x() {
        let mut state = MatchState::default();
        state.ball.position = Vec2::new(400.0, 300.0);
        state.ball.velocity = Vec2::new(0.0, -5.0);
        let mut rng = rng();

        let mut bounces = 0;
        for _ in 0..600 {
            let events = state.step(&idle(), None, &mut rng);
            bounces += events
                .iter()
                .filter(|e| **e == MatchEvent::WallBounce)
                .count();
            assert_eq!(state.ball.position.x, 400.0);
        }
        assert!(bounces >= 4);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_goal_awards_point_and_serves() {
        let config = GameConfig {
            ball_speed_x: 5.0,
            ..GameConfig::default()
        };
        let mut state = MatchState::new(config);
        // Below the left paddle so nothing blocks it
        state.ball.position = Vec2::new(14.0, 500.0);
        state.ball.velocity = Vec2::new(-5.0, 0.0);
        let mut rng = rng();

        let events = state.step(&idle(), None, &mut rng);
        assert_eq!(
            events,
            vec![MatchEvent::Goal {
                scorer: Side::Right,
                left: 0,
                right: 1
            }]
        );
        assert_eq!(state.ball.position, Vec2::new(400.0, 300.0));
        assert_eq!(state.ball.velocity.x.abs(), 5.0);
        assert_eq!(state.ball.velocity.y, 5.0);
    }

    #[test]
    fn test_left_paddle_hit_reflects() {
        let config = GameConfig {
            ball_speed_x: 5.0,
            ..GameConfig::default()
        };
        let mut state = MatchState::new(config);
        state.ball.position = Vec2::new(70.0, 300.0);
        state.ball.velocity = Vec2::new(-5.0, 0.0);
        let mut rng = rng();

        let events = state.step(&idle(), None, &mut rng);
        assert_eq!(events, vec![MatchEvent::PaddleHit { side: Side::Left }]);
        assert_eq!(state.ball.velocity, Vec2::new(5.0, 0.0));
        assert_eq!(state.ball.position, Vec2::new(65.0, 300.0));
    }

    #[test]
    fn test_win_freezes_ball_and_reports_once() {
        let config = GameConfig {
            ball_speed_x: 5.0,
            ..GameConfig::default()
        };
        let mut state = MatchState::new(config);
        state.score = Score { left: 4, right: 3 };
        state.ball.position = Vec2::new(786.0, 550.0);
        state.ball.velocity = Vec2::new(5.0, 0.0);
        let mut rng = rng();

        let events = state.step(&idle(), None, &mut rng);
        assert_eq!(
            events,
            vec![
                MatchEvent::Goal {
                    scorer: Side::Left,
                    left: 5,
                    right: 3
                },
                MatchEvent::MatchOver { winner: Side::Left },
            ]
        );
        let outcome = state.outcome().unwrap();
        assert_eq!(outcome.headline(), "Player 1 wins!");
        assert_eq!(state.ball.position, Vec2::new(400.0, 50.0));
        assert_eq!(state.ball.velocity, Vec2::ZERO);

        for _ in 0..30 {
            let events = state.step(&idle(), None, &mut rng);
            assert!(events.is_empty());
            assert_eq!(state.ball.velocity, Vec2::ZERO);
            assert_eq!(state.ball.position, Vec2::new(400.0, 50.0));
        }
    }

    #[test]
    fn test_restart_after_win_resets_everything() {
        let mut state = MatchState::default();
        state.score = Score { left: 5, right: 3 };
        state.left.y = 10.0;
        state.right.y = 400.0;
        let mut rng = rng();

        state.step(&idle(), None, &mut rng);
        assert!(state.outcome().is_some());

        let restart = PaddleInput {
            restart_held: true,
            ..PaddleInput::default()
        };
        let events = state.step(&restart, None, &mut rng);
        assert_eq!(events, vec![MatchEvent::Restart]);
        assert_eq!(state, MatchState::default());
    }

    #[test]
    fn test_restart_key_ignored_during_play() {
        let mut state = MatchState::default();
        state.score = Score { left: 2, right: 1 };
        let restart = PaddleInput {
            restart_held: true,
            ..PaddleInput::default()
        };
        let events = state.step(&restart, None, &mut rng());
        assert!(events.is_empty());
        assert_eq!(state.score, Score { left: 2, right: 1 });
    }

    #[test]
    fn test_tracked_sample_then_keyboard() {
        let mut state = MatchState::default();
        let mut rng = rng();

        state.step(&idle(), Some(-40.0), &mut rng);
        assert_eq!(state.left.y, -40.0);

        let down = PaddleInput {
            left: PaddleKeys::DOWN,
            ..PaddleInput::default()
        };
        state.step(&down, Some(100.0), &mut rng);
        assert_eq!(state.left.y, 105.0);
    }
}
