//! Ball physics: movement, wall and paddle reflection, goal detection
//!
//! All checks are position based and run after the move. Nothing is swept, so
//! a ball faster than a paddle's width per frame can pass through it.

use crate::config::GameConfig;
use crate::paddle::{Paddle, Side};

use super::Ball;

impl Ball {
    /// Add velocity to position
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Reflect vertical velocity when the centre reaches the top or bottom edge.
    /// The position is left as is, so the ball can sit past the edge for a frame.
    pub fn bounce_off_walls(&mut self, config: &GameConfig) -> bool {
        if self.position.y <= 0.0 || self.position.y >= config.height {
            self.velocity.y = -self.velocity.y;
            return true;
        }
        false
    }

    /// Whether the ball's centre is at or past the paddle's inner face and within
    /// its vertical span
    pub fn touches_paddle(&self, paddle: &Paddle, side: Side, config: &GameConfig) -> bool {
        let reached = match side {
            Side::Left => self.position.x <= paddle.x + config.paddle_width,
            Side::Right => self.position.x >= paddle.x,
        };
        reached && paddle.spans_y(self.position.y, config.paddle_height)
    }

    /// Pure horizontal reflection off a paddle. Impact point does not matter
    /// and speed is unchanged.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle, side: Side, config: &GameConfig) -> bool {
        if self.touches_paddle(paddle, side, config) {
            self.velocity.x = -self.velocity.x;
            return true;
        }
        false
    }

    /// Player awarded a point if the ball has left the field this frame
    pub fn scorer(&self, config: &GameConfig) -> Option<Side> {
        if self.position.x <= config.ball_radius {
            Some(Side::Right)
        } else if self.position.x >= config.width - config.ball_radius {
            Some(Side::Left)
        } else {
            None
        }
    }
}
