//! The tracking loop and its thread

use bevy::log::{error, info, warn};
use crossbeam_channel::{Sender, TrySendError};
use image::RgbImage;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::settings::TrackingSettings;

use super::camera::{FrameSource, open_camera};
use super::detector::{HandDetector, ProcessDetector};
use super::frame::annotate;
use super::shared::TrackingLink;
use super::TrackingError;

/// Why the tracking loop ended
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingExit {
    /// The game exited or the debug view asked to stop
    StopRequested,
    /// The camera stopped producing frames for good
    CameraClosed,
    /// Camera or detector could not be set up, or the detector broke mid-run
    Failed(TrackingError),
}

/// Pull frames until told to stop or the camera goes away.
///
/// Each detected hand overwrites player 1's paddle with its index fingertip
/// row, in camera pixels. Failed reads are logged and retried without delay.
pub fn run_tracking_loop(
    source: &mut dyn FrameSource,
    detector: &mut dyn HandDetector,
    link: &TrackingLink,
    debug_frames: Option<&Sender<RgbImage>>,
) -> TrackingExit {
    loop {
        if link.stop_requested() {
            return TrackingExit::StopRequested;
        }
        if !source.is_open() {
            return TrackingExit::CameraClosed;
        }

        let frame = match source.read() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Ignoring empty camera frame. ({})", e);
                continue;
            }
        };

        let mut image = frame.into_mirrored_rgb();
        let hands = match detector.detect(&image) {
            Ok(hands) => hands,
            Err(e) => return TrackingExit::Failed(e),
        };

        let (width, height) = image.dimensions();
        for hand in &hands {
            if let Some((_, y)) = hand.control_point(width, height) {
                link.paddle.publish(y as f32);
            }
        }

        if let Some(sender) = debug_frames {
            annotate(&mut image, &hands);
            match sender.try_send(image) {
                // Viewer still has the previous frame; drop this one
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => {}
            }
        }
    }
}

/// How long `shutdown` waits for the loop before giving up on it
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);
const SHUTDOWN_POLL: Duration = Duration::from_millis(10);

/// Owns the tracking thread
pub struct TrackingHandle {
    link: TrackingLink,
    thread: Option<JoinHandle<TrackingExit>>,
}

impl TrackingHandle {
    pub fn link(&self) -> &TrackingLink {
        &self.link
    }

    /// Ask the loop to stop and wait up to `SHUTDOWN_TIMEOUT` for it to release the camera
    pub fn shutdown(self) -> Option<TrackingExit> {
        self.shutdown_within(SHUTDOWN_TIMEOUT)
    }

    /// Ask the loop to stop and wait at most `timeout` for it.
    ///
    /// A loop stuck inside a camera read or a detector call cannot see the
    /// stop flag, so past the deadline the thread is detached and left to
    /// die with the process.
    pub fn shutdown_within(mut self, timeout: Duration) -> Option<TrackingExit> {
        self.link.request_stop();
        let thread = self.thread.take()?;

        let deadline = Instant::now() + timeout;
        while !thread.is_finished() {
            if Instant::now() >= deadline {
                warn!(
                    "Tracking thread did not stop within {:?}, leaving it to process exit",
                    timeout
                );
                return None;
            }
            std::thread::sleep(SHUTDOWN_POLL);
        }

        match thread.join() {
            Ok(exit) => Some(exit),
            Err(_) => {
                error!("Tracking thread panicked");
                None
            }
        }
    }
}

/// Start the tracking thread.
///
/// Fails up front when no detector command is configured. The camera and
/// detector are opened on the new thread and dropped there when the loop
/// ends, so the device is released before `finished` is set.
pub fn spawn_tracking(
    settings: &TrackingSettings,
    link: TrackingLink,
    debug_frames: Option<Sender<RgbImage>>,
) -> Result<TrackingHandle, TrackingError> {
    let Some(detector_argv) = settings.detector_argv() else {
        return Err(TrackingError::Detector(
            "no detector_command configured".to_string(),
        ));
    };
    let camera_index = settings.camera_index;

    spawn_worker(link, move |link| {
        track(camera_index, &detector_argv, link, debug_frames.as_ref())
    })
}

/// Run `work` on the named tracking thread, logging its exit and marking the link finished
fn spawn_worker<F>(link: TrackingLink, work: F) -> Result<TrackingHandle, TrackingError>
where
    F: FnOnce(&TrackingLink) -> TrackingExit + Send + 'static,
{
    let thread_link = link.clone();
    let thread = std::thread::Builder::new()
        .name("hand-tracking".into())
        .spawn(move || {
            let exit = work(&thread_link);
            match &exit {
                TrackingExit::Failed(e) => error!("Hand tracking stopped: {}", e),
                other => info!("Hand tracking stopped: {:?}", other),
            }
            thread_link.mark_finished();
            exit
        })
        .map_err(|e| TrackingError::Thread(e.to_string()))?;

    Ok(TrackingHandle {
        link,
        thread: Some(thread),
    })
}

fn track(
    camera_index: u32,
    detector_argv: &[String],
    link: &TrackingLink,
    debug_frames: Option<&Sender<RgbImage>>,
) -> TrackingExit {
    let mut source = match open_camera(camera_index) {
        Ok(source) => source,
        Err(e) => return TrackingExit::Failed(e),
    };
    let mut detector = match ProcessDetector::spawn(detector_argv) {
        Ok(detector) => detector,
        Err(e) => return TrackingExit::Failed(e),
    };

    info!("Hand tracking running on camera {}", camera_index);
    run_tracking_loop(source.as_mut(), &mut detector, link, debug_frames)
}
