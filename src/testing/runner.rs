//! Test execution engine

use bevy::prelude::*;

use crate::ball::Ball;
use crate::config::GameConfig;
use crate::events::EventBus;
use crate::game::{MatchState, step_match};
use crate::scoring::Score;
use crate::simulation::HeadlessAppBuilder;

use super::assertions::{AssertionError, CapturedEvent, WorldState, check_sequence, check_state};
use super::input::{ScriptedInputs, input_injection};
use super::parser::{TestDefinition, TestSetup};

/// Frames run when a test names no frame at all
const DEFAULT_FRAMES: u64 = 60;

/// Result of running a test
#[derive(Debug)]
pub enum TestResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

impl TestResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }
}

/// Build the starting match from a test setup
pub fn initial_state(setup: &TestSetup) -> MatchState {
    let mut config = GameConfig::default();
    if let Some(speed) = setup.ball_speed_x {
        config.ball_speed_x = speed;
    }

    let mut state = MatchState::new(config);
    if let Some(ball) = &setup.ball {
        state.ball = Ball {
            position: Vec2::new(ball.x, ball.y),
            velocity: Vec2::new(ball.velocity_x, ball.velocity_y),
        };
    }
    if let Some(y) = setup.left_y {
        state.left.y = y;
    }
    if let Some(y) = setup.right_y {
        state.right.y = y;
    }
    state.score = Score {
        left: setup.score_left,
        right: setup.score_right,
    };
    state
}

/// Run a single test and return the result
pub fn run_test(test: &TestDefinition) -> TestResult {
    let mut scripted = match ScriptedInputs::from_inputs(&test.input) {
        Ok(scripted) => scripted,
        Err(message) => return TestResult::Error { message },
    };

    // Run long enough to reach every assertion
    for state in &test.expect.state {
        scripted.set_max_frame(state.after_frame);
    }
    for event in &test.expect.sequence {
        if let Some(max) = event.frame_max {
            scripted.set_max_frame(max);
        }
    }
    if scripted.max_frame == 0 {
        scripted.max_frame = DEFAULT_FRAMES;
    }

    let mut builder = HeadlessAppBuilder::new()
        .with_state(initial_state(&test.setup))
        .with_minimal_threads()
        .with_tracking();
    if let Some(seed) = test.setup.seed {
        builder = builder.with_seed(seed);
    }
    let mut app = builder.build();
    app.insert_resource(scripted);
    app.add_systems(FixedUpdate, input_injection.before(step_match));

    let mut captured = Vec::new();
    let mut frame = 0;
    loop {
        app.world_mut().run_schedule(FixedUpdate);
        frame = app.world().resource::<ScriptedInputs>().current_frame;

        captured.extend(
            app.world_mut()
                .resource_mut::<EventBus>()
                .drain()
                .iter()
                .map(CapturedEvent::from_frame_event),
        );

        let exit = app.should_exit().is_some();
        let world_state = WorldState::capture(app.world().resource::<MatchState>(), exit);
        for assertion in test.expect.state.iter().filter(|a| a.after_frame == frame) {
            if let Err(error) = check_state(assertion, &world_state) {
                return TestResult::Fail { error };
            }
        }

        // A quit ends the run like it ends the game
        if exit || !app.world().resource::<ScriptedInputs>().should_continue() {
            break;
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &captured) {
        return TestResult::Fail { error };
    }

    TestResult::Pass { frames: frame }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::parse_test_str;

    fn run(toml: &str) -> TestResult {
        run_test(&parse_test_str(toml).unwrap())
    }

    #[test]
    fn test_vertical_ball_scenario() {
        let result = run(r#"
name = "vertical"
[setup.ball]
x = 400.0
y = 300.0
velocity_y = -5.0

[[expect.sequence]]
event = "WallBounce"
frame_min = 60
frame_max = 60

[[expect.state]]
after_frame = 61
checks = ["ball.x = 400", "ball.y = 5", "ball.vy = 5"]
"#);
        assert!(result.is_pass(), "{:?}", result);
    }

    #[test]
    fn test_failed_check_reports() {
        let result = run(r#"
name = "wrong"
[[expect.state]]
after_frame = 1
checks = ["ball.y = 0"]
"#);
        assert!(matches!(result, TestResult::Fail { .. }));
    }

    #[test]
    fn test_quit_stops_run() {
        let result = run(r#"
name = "quit"
[setup]
score_left = 5

[[input]]
frame = 2
quit = true

[[expect.state]]
after_frame = 2
checks = ["exit = true"]

[[expect.state]]
after_frame = 50
checks = ["exit = true"]
"#);
        assert!(matches!(result, TestResult::Pass { frames: 2 }), "{:?}", result);
    }
}
