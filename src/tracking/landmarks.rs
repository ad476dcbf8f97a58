//! Hand landmark data produced by the detector

use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES (21-point hand model)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Landmark that steers player 1's paddle
pub const CONTROL_LANDMARK: usize = INDEX_TIP;

/// Hand skeleton connections for the debug overlay
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

/// A single landmark (x, y normalized to 0-1 across the frame)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32, // Relative depth, unused by the game
}

impl HandLandmark {
    /// Pixel coordinate in a frame of the given size (truncated toward zero)
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        ((self.x * width as f32) as i32, (self.y * height as f32) as i32)
    }
}

/// One detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub landmarks: Vec<HandLandmark>,
}

impl Hand {
    pub fn landmark(&self, index: usize) -> Option<&HandLandmark> {
        self.landmarks.get(index)
    }

    /// Pixel position of the control landmark, if the hand has one
    pub fn control_point(&self, width: u32, height: u32) -> Option<(i32, i32)> {
        self.landmark(CONTROL_LANDMARK)
            .map(|landmark| landmark.to_pixel(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_with_tip(x: f32, y: f32) -> Hand {
        let mut landmarks = vec![HandLandmark::default(); LANDMARK_COUNT];
        landmarks[INDEX_TIP] = HandLandmark { x, y, z: 0.0 };
        Hand { landmarks }
    }

    #[test]
    fn test_to_pixel_truncates() {
        let landmark = HandLandmark { x: 0.5, y: 0.2599, z: 0.0 };
        assert_eq!(landmark.to_pixel(640, 480), (320, 124));
    }

    #[test]
    fn test_control_point_uses_index_tip() {
        let hand = hand_with_tip(0.25, 0.75);
        assert_eq!(hand.control_point(640, 480), Some((160, 360)));
    }

    #[test]
    fn test_partial_hand_has_no_control_point() {
        let hand = Hand {
            landmarks: vec![HandLandmark::default(); 5],
        };
        assert_eq!(hand.control_point(640, 480), None);
    }
}
