//! Paddle state and render markers

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which player a paddle (or point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1, keyboard W/S or hand tracking
    Left,
    /// Player 2, keyboard Up/Down
    Right,
}

impl Side {
    /// The player on the other side of the net
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Player number shown to humans
    pub fn player_number(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    /// Accepts `left`/`p1`/`player1` and `right`/`p2`/`player2`, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "p1" | "player1" => Ok(Side::Left),
            "right" | "p2" | "player2" => Ok(Side::Right),
            other => Err(format!("Unknown player '{}' (expected left or right)", other)),
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.player_number())
    }
}

/// Paddle rectangle in screen space (origin top-left, y down).
///
/// `x` is fixed after construction; width and height come from `GameConfig`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether `y` lies within the paddle's vertical span (edges inclusive)
    pub fn spans_y(&self, y: f32, height: f32) -> bool {
        self.y <= y && y <= self.y + height
    }
}

/// Marker for the sprite that draws a paddle
#[derive(Component)]
pub struct PaddleSprite(pub Side);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parses_player_aliases() {
        assert_eq!("left".parse::<Side>(), Ok(Side::Left));
        assert_eq!("P1".parse::<Side>(), Ok(Side::Left));
        assert_eq!("player2".parse::<Side>(), Ok(Side::Right));
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_opponent_and_numbers() {
        assert_eq!(Side::Left.opponent(), Side::Right);
        assert_eq!(Side::Right.player_number(), 2);
        assert_eq!(Side::Left.to_string(), "Player 1");
    }
}
