//! Hand tracking - camera frames in, player 1 paddle position out
//!
//! Runs on its own thread. The only things it shares with the game are the
//! `TrackingLink` (paddle cell plus stop flags) and a one-slot channel of
//! annotated frames for the debug window.

mod camera;
mod debug_view;
mod detector;
mod frame;
pub mod landmarks;
mod shared;
mod worker;

pub use camera::{FrameSource, open_camera};
pub use debug_view::{
    DEBUG_WINDOW_TITLE, DebugFrames, DebugView, DebugViewSprite, DebugViewWindow,
    close_debug_view_when_finished, frame_to_image, handle_debug_view_keys, spawn_debug_view,
    upload_debug_frame,
};
pub use detector::{HandDetector, PipeDetector, ProcessDetector, parse_reply};
pub use frame::{CameraFrame, ChannelOrder, annotate};
pub use landmarks::{Hand, HandLandmark};
pub use shared::{TrackedPaddle, TrackingLink, stop_tracking_on_exit};
pub use worker::{TrackingExit, TrackingHandle, run_tracking_loop, spawn_tracking};

/// Failures on the tracking side. None of them stop the game.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingError {
    /// Camera could not be opened; tracking stays off
    CameraUnavailable(String),
    /// A single frame could not be read; retried
    Capture(String),
    /// Detector could not start or answer; tracking ends
    Detector(String),
    /// The tracking thread could not be started
    Thread(String),
}

impl std::fmt::Display for TrackingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingError::CameraUnavailable(msg) => write!(f, "camera unavailable: {}", msg),
            TrackingError::Capture(msg) => write!(f, "frame capture failed: {}", msg),
            TrackingError::Detector(msg) => write!(f, "hand detector failed: {}", msg),
            TrackingError::Thread(msg) => write!(f, "tracking thread failed: {}", msg),
        }
    }
}

impl std::error::Error for TrackingError {}
