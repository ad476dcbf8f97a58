//! Scripted input injection for tests

use bevy::prelude::*;
use std::collections::HashMap;

use crate::input::PaddleInput;
use crate::tracking::TrackedPaddle;

use super::parser::{FrameInput, parse_direction};

/// Resource holding scripted inputs for a test
#[derive(Resource, Debug, Default)]
pub struct ScriptedInputs {
    /// Map of frame -> input changes
    pub frames: HashMap<u64, FrameInput>,
    /// Held keys (persist between frames)
    pub current: PaddleInput,
    /// Last frame stepped (0 before the first step)
    pub current_frame: u64,
    /// Maximum frame to run
    pub max_frame: u64,
}

impl ScriptedInputs {
    /// Create from parsed frame inputs. Fails on an unknown direction.
    pub fn from_inputs(inputs: &[FrameInput]) -> Result<Self, String> {
        let mut frames = HashMap::new();
        let mut max_frame = 0u64;

        for fi in inputs {
            for direction in [&fi.left, &fi.right].into_iter().flatten() {
                parse_direction(direction).map_err(|e| format!("frame {}: {}", fi.frame, e))?;
            }
            max_frame = max_frame.max(fi.frame);
            frames.insert(fi.frame, fi.clone());
        }

        Ok(Self {
            frames,
            current: PaddleInput::default(),
            current_frame: 0,
            max_frame,
        })
    }

    /// Set max frame (for state assertions)
    pub fn set_max_frame(&mut self, frame: u64) {
        self.max_frame = self.max_frame.max(frame);
    }

    /// Advance to the next frame. Returns the held keys and any tracked sample.
    pub fn advance_frame(&mut self) -> (PaddleInput, Option<f32>) {
        self.current_frame += 1;
        let Some(changes) = self.frames.get(&self.current_frame) else {
            return (self.current.clone(), None);
        };

        if let Some(left) = &changes.left {
            self.current.left = parse_direction(left).unwrap_or_default();
        }
        if let Some(right) = &changes.right {
            self.current.right = parse_direction(right).unwrap_or_default();
        }
        if let Some(restart) = changes.restart {
            self.current.restart_held = restart;
        }
        if let Some(quit) = changes.quit {
            self.current.quit_held = quit;
        }
        (self.current.clone(), changes.tracked_y)
    }

    /// Check if simulation should continue
    pub fn should_continue(&self) -> bool {
        self.current_frame < self.max_frame
    }
}

/// Copy this frame's scripted keys into `PaddleInput` and publish any
/// tracked sample. Runs right before `step_match`.
pub fn input_injection(
    mut scripted: ResMut<ScriptedInputs>,
    mut input: ResMut<PaddleInput>,
    tracked: Option<Res<TrackedPaddle>>,
) {
    let (keys, tracked_y) = scripted.advance_frame();
    *input = keys;
    if let (Some(y), Some(cell)) = (tracked_y, tracked) {
        cell.publish(y);
    }
}
