//! Match event definitions

use serde::{Deserialize, Serialize};

use crate::paddle::Side;

/// Everything a physics step can report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Ball reflected off the top or bottom edge
    WallBounce,
    /// Ball reflected off a paddle
    PaddleHit { side: Side },
    /// Ball left the field; `scorer` is the player awarded the point
    Goal { scorer: Side, left: u32, right: u32 },
    /// A score reached the win threshold
    MatchOver { winner: Side },
    /// Match state was reinitialised after a win
    Restart,
}

impl MatchEvent {
    /// Short name used by scenario expectations
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::WallBounce => "WallBounce",
            MatchEvent::PaddleHit { .. } => "PaddleHit",
            MatchEvent::Goal { .. } => "Goal",
            MatchEvent::MatchOver { .. } => "MatchOver",
            MatchEvent::Restart => "Restart",
        }
    }

    /// Player the event is about, if any
    pub fn side(&self) -> Option<Side> {
        match self {
            MatchEvent::PaddleHit { side } => Some(*side),
            MatchEvent::Goal { scorer, .. } => Some(*scorer),
            MatchEvent::MatchOver { winner } => Some(*winner),
            MatchEvent::WallBounce | MatchEvent::Restart => None,
        }
    }
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::WallBounce => write!(f, "wall bounce"),
            MatchEvent::PaddleHit { side } => write!(f, "{} paddle hit", side),
            MatchEvent::Goal { scorer, left, right } => {
                write!(f, "goal for {} ({} - {})", scorer, left, right)
            }
            MatchEvent::MatchOver { winner } => write!(f, "{} wins", winner),
            MatchEvent::Restart => write!(f, "restart"),
        }
    }
}
