//! TOML test file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::paddle::PaddleKeys;

/// Complete test definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: TestExpectations,
}

/// Starting state of the match. Anything left out keeps its fresh-match value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestSetup {
    pub seed: Option<u64>,
    pub ball: Option<BallDef>,
    pub left_y: Option<f32>,
    pub right_y: Option<f32>,
    #[serde(default)]
    pub score_left: u32,
    #[serde(default)]
    pub score_right: u32,
    /// Override the horizontal serve speed (zero in the shipped rules)
    pub ball_speed_x: Option<f32>,
}

/// Ball placement for the first frame
#[derive(Debug, Clone, Deserialize)]
pub struct BallDef {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub velocity_x: f32,
    #[serde(default)]
    pub velocity_y: f32,
}

/// Input changes at a specific frame (1 = first physics step).
/// Held keys persist until changed; `tracked_y` is a single sample.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    /// "up", "down" or "none"
    pub left: Option<String>,
    pub right: Option<String>,
    pub tracked_y: Option<f32>,
    pub restart: Option<bool>,
    pub quit: Option<bool>,
}

/// Parse the keys held for one paddle
pub fn parse_direction(value: &str) -> Result<PaddleKeys, String> {
    match value.to_ascii_lowercase().as_str() {
        "up" => Ok(PaddleKeys::UP),
        "down" => Ok(PaddleKeys::DOWN),
        "both" => Ok(PaddleKeys::BOTH),
        "none" | "" => Ok(PaddleKeys::NONE),
        other => Err(format!(
            "Unknown direction '{}' (expected up, down, both or none)",
            other
        )),
    }
}

/// Expected test outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    /// "left" or "right"
    pub player: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a frame
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Parse a test definition held in memory
pub fn parse_test_str(content: &str) -> Result<TestDefinition, String> {
    toml::from_str(content).map_err(|e| format!("Failed to parse test: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
[setup]
seed = 7
score_left = 4
[setup.ball]
x = 400.0
y = 300.0
velocity_y = -5.0

[[input]]
frame = 3
left = "down"
tracked_y = 120.0

[[expect.sequence]]
event = "Goal"
player = "left"

[[expect.state]]
after_frame = 10
checks = ["ball.x = 400"]
"#;
        let def: TestDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.setup.seed, Some(7));
        assert_eq!(def.setup.score_left, 4);
        assert_eq!(def.setup.ball.as_ref().unwrap().velocity_x, 0.0);
        assert_eq!(def.input[0].left.as_deref(), Some("down"));
        assert_eq!(def.input[0].tracked_y, Some(120.0));
        assert_eq!(def.expect.sequence[0].event, "Goal");
        assert_eq!(def.expect.state[0].after_frame, 10);
    }

    #[test]
    fn test_minimal_file() {
        let def: TestDefinition = toml::from_str(r#"name = "Empty""#).unwrap();
        assert!(def.setup.ball.is_none());
        assert!(def.input.is_empty());
        assert!(def.expect.sequence.is_empty());
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("UP"), Ok(PaddleKeys::UP));
        assert_eq!(parse_direction("down"), Ok(PaddleKeys::DOWN));
        assert_eq!(parse_direction("Both"), Ok(PaddleKeys::BOTH));
        assert_eq!(parse_direction("none"), Ok(PaddleKeys::NONE));
        assert!(parse_direction("sideways").is_err());
    }
}
