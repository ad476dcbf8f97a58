//! Immutable game configuration shared by the simulation and tracking loops

use bevy::prelude::*;

use crate::constants::*;

/// Fixed rules and dimensions of a match.
///
/// Built once at startup and handed to `MatchState` and the tracking thread.
/// Nothing mutates it afterwards.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub fps: f64,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_x: f32,
    pub ball_speed_y: f32,
    pub win_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: TARGET_FPS,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,
            paddle_speed: PADDLE_SPEED,
            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,
            win_score: WIN_SCORE,
        }
    }
}

impl GameConfig {
    /// Centre of the playfield in screen space (floored to whole pixels)
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Lowest y a keyboard-driven paddle may take
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Vertically centred paddle top edge
    pub fn paddle_start_y(&self) -> f32 {
        ((self.height - self.paddle_height) / 2.0).floor()
    }

    /// Left edge x of the left (player 1) paddle
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// Left edge x of the right (player 2) paddle
    pub fn right_paddle_x(&self) -> f32 {
        self.width - self.paddle_margin - self.paddle_width
    }

    /// Where the ball parks while the match-over prompt is shown
    pub fn frozen_ball_position(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), FROZEN_BALL_Y)
    }

    /// Convert a screen-space point (origin top-left, y down) to world space
    /// (origin centre, y up).
    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        Vec2::new(screen.x - self.width / 2.0, self.height / 2.0 - screen.y)
    }
}
