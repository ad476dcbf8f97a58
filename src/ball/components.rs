//! Ball state and render marker

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;

/// Ball centre and velocity in screen space, in pixels per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl Ball {
    /// Ball at the centre moving with the configured speeds (no random sign)
    pub fn kickoff(config: &GameConfig) -> Self {
        Self {
            position: config.center(),
            velocity: Vec2::new(config.ball_speed_x, config.ball_speed_y),
        }
    }

    /// Recentre after a goal with a random horizontal direction.
    /// Vertical speed goes back to the configured value.
    pub fn serve(&mut self, config: &GameConfig, rng: &mut impl Rng) {
        let direction = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.position = config.center();
        self.velocity = Vec2::new(config.ball_speed_x * direction, config.ball_speed_y);
    }

    /// Park the ball for the match-over prompt
    pub fn freeze(&mut self, config: &GameConfig) {
        self.position = config.frozen_ball_position();
        self.velocity = Vec2::ZERO;
    }

    pub fn is_frozen(&self) -> bool {
        self.velocity == Vec2::ZERO
    }
}

/// Marker for the ball mesh entity
#[derive(Component)]
pub struct BallSprite;
