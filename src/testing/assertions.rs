//! Assertion checking for test expectations

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::FrameEvent;
use crate::game::MatchState;
use crate::paddle::Side;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub player: Option<String>,
}

impl CapturedEvent {
    pub fn from_frame_event(event: &FrameEvent) -> Self {
        Self {
            frame: event.frame,
            event_type: event.event.name().to_string(),
            player: event.event.side().map(|side| side_name(side).to_string()),
        }
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}

/// Check if captured events match expected sequence
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let wanted = match exp.player.as_deref().map(str::parse::<Side>) {
            None => None,
            Some(Ok(side)) => Some(side_name(side)),
            Some(Err(e)) => {
                return Err(AssertionError {
                    message: format!("Event #{} '{}': {}", i + 1, exp.event, e),
                    expected: "player = left or right".to_string(),
                    actual: format!("player = {:?}", exp.player.as_deref().unwrap_or_default()),
                });
            }
        };

        // Find matching event starting from current position
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            if cap.event_type != exp.event {
                return false;
            }
            wanted.is_none() || cap.player.as_deref() == wanted
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min {
                    if cap.frame < min {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too early", i + 1, exp.event),
                            expected: format!("frame >= {}", min),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                if let Some(max) = exp.frame_max {
                    if cap.frame > max {
                        return Err(AssertionError {
                            message: format!("Event #{} '{}' occurred too late", i + 1, exp.event),
                            expected: format!("frame <= {}", max),
                            actual: format!("frame {}", cap.frame),
                        });
                    }
                }
                captured_idx += offset + 1;
            }
            None => {
                let player_str = exp.player.as_ref().map(|p| format!(" (player: {})", p)).unwrap_or_default();
                return Err(AssertionError {
                    message: format!("Event #{} '{}'{} not found", i + 1, exp.event, player_str),
                    expected: format!("'{}' event in sequence", exp.event),
                    actual: format!("events after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..].iter().map(|e| &e.event_type).collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Match state snapshot for assertions
#[derive(Debug, Clone)]
pub struct WorldState {
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub left_y: f32,
    pub right_y: f32,
    pub score_left: u32,
    pub score_right: u32,
    pub outcome: Option<Side>,
    pub exit: bool,
}

impl WorldState {
    pub fn capture(state: &MatchState, exit: bool) -> Self {
        Self {
            ball_x: state.ball.position.x,
            ball_y: state.ball.position.y,
            ball_vx: state.ball.velocity.x,
            ball_vy: state.ball.velocity.y,
            left_y: state.left.y,
            right_y: state.right.y,
            score_left: state.score.left,
            score_right: state.score.right,
            outcome: state.outcome().map(|o| o.winner),
            exit,
        }
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against world state
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'ball.x = value' or 'score.left > value'".to_string(),
            actual: check.clone(),
        })?;

        let actual = match path {
            "ball.x" => state.ball_x,
            "ball.y" => state.ball_y,
            "ball.vx" => state.ball_vx,
            "ball.vy" => state.ball_vy,
            "left.y" => state.left_y,
            "right.y" => state.right_y,
            "score.left" => state.score_left as f32,
            "score.right" => state.score_right as f32,
            "outcome" => {
                let actual = state.outcome.map(side_name).unwrap_or("none");
                check_text(check, actual, operator, expected_value)?;
                continue;
            }
            "exit" => {
                check_text(check, &state.exit.to_string(), operator, expected_value)?;
                continue;
            }
            _ => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "ball.x|y|vx|vy, left.y, right.y, score.left|right, outcome, exit"
                        .to_string(),
                    actual: path.to_string(),
                });
            }
        };
        check_float_comparison(path, actual, operator, expected_value)?;
    }

    Ok(())
}

/// Equality check on a word value ("left", "true", ...)
fn check_text(check: &str, actual: &str, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let expected = expected.trim_matches('"');
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => false,
    };
    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.1,
        "!=" => (actual - value).abs() >= 0.1,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.1})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.1}", actual),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MatchEvent;

    fn expect(event: &str, player: Option<&str>) -> ExpectedEvent {
        ExpectedEvent {
            event: event.to_string(),
            player: player.map(str::to_string),
            frame_min: None,
            frame_max: None,
        }
    }

    fn captured() -> Vec<CapturedEvent> {
        [
            FrameEvent { frame: 3, event: MatchEvent::WallBounce },
            FrameEvent { frame: 9, event: MatchEvent::PaddleHit { side: Side::Right } },
            FrameEvent { frame: 20, event: MatchEvent::Goal { scorer: Side::Left, left: 1, right: 0 } },
        ]
        .iter()
        .map(CapturedEvent::from_frame_event)
        .collect()
    }

    #[test]
    fn test_sequence_in_order() {
        let expected = vec![expect("PaddleHit", Some("p2")), expect("Goal", Some("left"))];
        assert!(check_sequence(&expected, &captured()).is_ok());
    }

    #[test]
    fn test_sequence_unknown_player_is_an_error() {
        let expected = vec![expect("Goal", Some("middle"))];
        let err = check_sequence(&expected, &captured()).unwrap_err();
        assert!(err.message.contains("Unknown player 'middle'"));
        assert!(!err.message.contains("not found"));
    }

    #[test]
    fn test_sequence_out_of_order_fails() {
        let expected = vec![expect("Goal", None), expect("WallBounce", None)];
        let err = check_sequence(&expected, &captured()).unwrap_err();
        assert!(err.message.contains("not found"));
    }

    #[test]
    fn test_sequence_frame_window() {
        let mut late = expect("Goal", None);
        late.frame_max = Some(15);
        let err = check_sequence(&[late], &captured()).unwrap_err();
        assert!(err.message.contains("too late"));
    }

    #[test]
    fn test_state_checks() {
        let state = WorldState::capture(&MatchState::default(), false);
        let assertion = StateAssertion {
            after_frame: 0,
            checks: vec![
                "ball.x = 400".to_string(),
                "ball.vy > 0".to_string(),
                "left.y = 225".to_string(),
                "score.right = 0".to_string(),
                "outcome = none".to_string(),
                "exit = false".to_string(),
            ],
        };
        assert!(check_state(&assertion, &state).is_ok());

        let failing = StateAssertion {
            after_frame: 0,
            checks: vec!["ball.y < 100".to_string()],
        };
        assert!(check_state(&failing, &state).is_err());

        let unknown = StateAssertion {
            after_frame: 0,
            checks: vec!["paddle.z = 1".to_string()],
        };
        assert!(check_state(&unknown, &state).is_err());
    }
}
