//! Scoring module - score tracking and the derived match outcome

use crate::paddle::Side;

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,  // Player 1
    pub right: u32, // Player 2
}

impl Score {
    /// Add exactly one point for `side`
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Winner once a score reaches `win_score`. Player 1 is checked first.
    pub fn winner(&self, win_score: u32) -> Option<Side> {
        if self.left >= win_score {
            Some(Side::Left)
        } else if self.right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Result of a finished match. Derived from `Score` every frame, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: Side,
}

impl MatchOutcome {
    pub fn from_score(score: &Score, win_score: u32) -> Option<Self> {
        score.winner(win_score).map(|winner| Self { winner })
    }

    /// Headline shown on the match-over screen
    pub fn headline(&self) -> String {
        format!("{} wins!", self.winner)
    }
}
