//! MpPong - two-player Pong with optional hand tracking, built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod audio;
pub mod config;
pub mod constants;
pub mod events;
pub mod settings;
pub mod simulation;
pub mod testing;
pub mod tracking;

// Game logic modules
pub mod ball;
pub mod game;
pub mod input;
pub mod paddle;
pub mod scoring;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallSprite};
pub use config::GameConfig;
pub use constants::*;
pub use events::{EventBus, FrameEvent, MatchEvent};
pub use game::{MatchRng, MatchState, step_match};
pub use input::PaddleInput;
pub use paddle::{Paddle, PaddleSprite, Side};
pub use scoring::{MatchOutcome, Score};
pub use settings::{TRACKING_SETTINGS_FILE, TrackingSettings};
pub use simulation::HeadlessAppBuilder;
pub use tracking::{TrackedPaddle, TrackingError, TrackingLink};
pub use ui::{RestartPrompt, ScoreText, WinnerText};
