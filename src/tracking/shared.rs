//! State shared between the tracking thread and the game

use bevy::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Quiet NaN bit pattern marking "no new sample"
const EMPTY: u32 = 0x7fc0_0000;

/// Latest player 1 paddle y published by the tracking thread.
///
/// One word wide, so a read never sees half a write. Each sample is consumed
/// at most once; if several arrive between frames only the last one counts.
#[derive(Resource, Clone, Debug)]
pub struct TrackedPaddle(Arc<AtomicU32>);

impl Default for TrackedPaddle {
    fn default() -> Self {
        Self(Arc::new(AtomicU32::new(EMPTY)))
    }
}

impl TrackedPaddle {
    pub fn publish(&self, y: f32) {
        self.0.store(y.to_bits(), Ordering::Release);
    }

    /// Take the pending sample, if any
    pub fn take(&self) -> Option<f32> {
        let value = f32::from_bits(self.0.swap(EMPTY, Ordering::AcqRel));
        (!value.is_nan()).then_some(value)
    }
}

/// Coordination between the game and the tracking thread.
///
/// Either side can ask the loop to stop; the loop marks itself finished after
/// it has released the camera.
#[derive(Resource, Clone, Debug, Default)]
pub struct TrackingLink {
    pub paddle: TrackedPaddle,
    stop_requested: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl TrackingLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

/// Ask the tracking thread to stop when the app is exiting
pub fn stop_tracking_on_exit(mut exits: MessageReader<AppExit>, link: Option<Res<TrackingLink>>) {
    if exits.read().next().is_none() {
        return;
    }
    if let Some(link) = link {
        info!("Game exiting, stopping hand tracking");
        link.request_stop();
    }
}
