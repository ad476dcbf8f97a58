//! Paddle movement from keyboard and tracking input

use crate::config::GameConfig;

use super::Paddle;

/// Up/down keys held for one paddle this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleKeys {
    pub up: bool,
    pub down: bool,
}

impl PaddleKeys {
    pub const NONE: Self = Self { up: false, down: false };
    pub const UP: Self = Self { up: true, down: false };
    pub const DOWN: Self = Self { up: false, down: true };
    pub const BOTH: Self = Self { up: true, down: true };
}

/// Move a paddle by one frame of keyboard input.
///
/// Up is applied first, then down, each as its own clamped step. Both held
/// in open field cancel out, but against the top edge the up step is a
/// no-op and the paddle still moves down. Clamping to
/// `[0, height - paddle_height]` also pulls in a paddle that tracking input
/// left off screen.
pub fn move_paddle(paddle: &mut Paddle, keys: PaddleKeys, config: &GameConfig) {
    if keys.up {
        step_paddle(paddle, -config.paddle_speed, config);
    }
    if keys.down {
        step_paddle(paddle, config.paddle_speed, config);
    }
}

fn step_paddle(paddle: &mut Paddle, delta: f32, config: &GameConfig) {
    paddle.y = (paddle.y + delta).clamp(0.0, config.paddle_max_y());
}

/// Overwrite a paddle's y with a tracked sample. No clamping or smoothing.
pub fn apply_tracked_y(paddle: &mut Paddle, tracked_y: f32) {
    paddle.y = tracked_y;
}
