//! Gameplay constants for MpPong
//!
//! These are the fixed rules of the game. They seed `GameConfig` and are not
//! loaded from disk.

use bevy::prelude::*;

// =============================================================================
// SCREEN
// =============================================================================

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const TARGET_FPS: f64 = 60.0;
pub const WINDOW_TITLE: &str = "MpPong";

// =============================================================================
// PADDLES AND BALL
// =============================================================================

pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 150.0;
pub const PADDLE_MARGIN: f32 = 50.0; // Distance from the side walls to the paddle's outer edge
pub const PADDLE_SPEED: f32 = 5.0; // Pixels per frame while a key is held
pub const BALL_RADIUS: f32 = 10.0;
// Horizontal speed is zero in the shipped rules, so the ball only travels vertically
// unless a scenario gives it horizontal velocity.
pub const BALL_SPEED_X: f32 = 0.0;
pub const BALL_SPEED_Y: f32 = 5.0;

// =============================================================================
// MATCH
// =============================================================================

pub const WIN_SCORE: u32 = 5;
pub const FROZEN_BALL_Y: f32 = 50.0; // Where the ball parks while the match-over prompt shows
pub const SCORE_TEXT_Y: f32 = 50.0;
pub const PROMPT_OFFSET_Y: f32 = 100.0; // Restart prompt sits this far below the winner line

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::BLACK;
pub const PADDLE_COLOR: Color = Color::srgb(0.0, 1.0, 0.0); // Green
pub const BALL_COLOR: Color = Color::srgb(1.0, 165.0 / 255.0, 0.0); // Orange
pub const TEXT_PRIMARY: Color = Color::WHITE;
pub const TEXT_PROMPT: Color = Color::srgb(128.0 / 255.0, 0.0, 128.0 / 255.0); // Purple

// =============================================================================
// TEXT
// =============================================================================

/// Every HUD line shares one font size
pub const HUD_FONT_SIZE: f32 = 50.0;

// =============================================================================
// ASSETS
// =============================================================================

/// Background track, relative to the assets directory
pub const MUSIC_TRACK: &str = "bg-music-1.mp3";
