//! Video capture sources

use super::TrackingError;
use super::frame::CameraFrame;

/// A camera, or anything else that produces frames
pub trait FrameSource {
    /// False once the device can no longer be read
    fn is_open(&self) -> bool;

    /// Grab the next frame. Failures are transient; the caller retries.
    fn read(&mut self) -> Result<CameraFrame, TrackingError>;
}

/// Open the capture device at `index`
#[cfg(feature = "webcam")]
pub fn open_camera(index: u32) -> Result<Box<dyn FrameSource>, TrackingError> {
    Ok(Box::new(webcam::Webcam::open(index)?))
}

/// Open the capture device at `index`
#[cfg(not(feature = "webcam"))]
pub fn open_camera(index: u32) -> Result<Box<dyn FrameSource>, TrackingError> {
    Err(TrackingError::CameraUnavailable(format!(
        "camera {} requested but this build has no webcam support (enable the `webcam` feature)",
        index
    )))
}

#[cfg(feature = "webcam")]
mod webcam {
    use image::RgbImage;
    use nokhwa::Camera;
    use nokhwa::pixel_format::RgbFormat;
    use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};

    use super::{CameraFrame, FrameSource, TrackingError};

    pub struct Webcam {
        camera: Camera,
    }

    impl Webcam {
        pub fn open(index: u32) -> Result<Self, TrackingError> {
            let format =
                RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
            let mut camera = Camera::new(CameraIndex::Index(index), format)
                .map_err(|e| TrackingError::CameraUnavailable(e.to_string()))?;
            camera
                .open_stream()
                .map_err(|e| TrackingError::CameraUnavailable(e.to_string()))?;
            bevy::log::info!("Opened camera {}", index);
            Ok(Self { camera })
        }
    }

    impl FrameSource for Webcam {
        fn is_open(&self) -> bool {
            self.camera.is_stream_open()
        }

        fn read(&mut self) -> Result<CameraFrame, TrackingError> {
            let buffer = self
                .camera
                .frame()
                .map_err(|e| TrackingError::Capture(e.to_string()))?;
            let decoded = buffer
                .decode_image::<RgbFormat>()
                .map_err(|e| TrackingError::Capture(e.to_string()))?;
            let (width, height) = (decoded.width(), decoded.height());
            let pixels = RgbImage::from_raw(width, height, decoded.into_raw())
                .ok_or_else(|| TrackingError::Capture("frame size mismatch".to_string()))?;
            // nokhwa decodes to RGB already
            Ok(CameraFrame::rgb(pixels))
        }
    }

    impl Drop for Webcam {
        fn drop(&mut self) {
            if let Err(e) = self.camera.stop_stream() {
                bevy::log::warn!("Failed to stop camera stream: {}", e);
            }
        }
    }
}

#[cfg(all(test, not(feature = "webcam")))]
mod tests {
    use super::*;

    #[test]
    fn test_open_camera_without_backend_fails() {
        assert!(matches!(
            open_camera(0),
            Err(TrackingError::CameraUnavailable(_))
        ));
    }
}
