//! Camera frames: mirroring, color order, and the landmark overlay

use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use super::landmarks::{CONTROL_LANDMARK, HAND_CONNECTIONS, Hand};

const CONNECTION_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const LANDMARK_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const CONTROL_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
const LANDMARK_RADIUS: i32 = 3;
const CONTROL_RADIUS: i32 = 15;

/// Byte order of the three channels a camera delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// One raw frame as it came off the camera
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub pixels: RgbImage,
    pub order: ChannelOrder,
}

impl CameraFrame {
    pub fn rgb(pixels: RgbImage) -> Self {
        Self {
            pixels,
            order: ChannelOrder::Rgb,
        }
    }

    pub fn bgr(pixels: RgbImage) -> Self {
        Self {
            pixels,
            order: ChannelOrder::Bgr,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Mirror horizontally so moving your hand right moves it right on screen,
    /// and normalise to RGB for the detector.
    pub fn into_mirrored_rgb(self) -> RgbImage {
        let mut mirrored = imageops::flip_horizontal(&self.pixels);
        if self.order == ChannelOrder::Bgr {
            for pixel in mirrored.pixels_mut() {
                pixel.0.swap(0, 2);
            }
        }
        mirrored
    }
}

/// Draw each hand's skeleton and landmarks, with a large dot on the control point
pub fn annotate(image: &mut RgbImage, hands: &[Hand]) {
    let (width, height) = image.dimensions();
    for hand in hands {
        for &(from, to) in HAND_CONNECTIONS.iter() {
            let (Some(a), Some(b)) = (hand.landmark(from), hand.landmark(to)) else {
                continue;
            };
            let (ax, ay) = a.to_pixel(width, height);
            let (bx, by) = b.to_pixel(width, height);
            draw_line_segment_mut(
                image,
                (ax as f32, ay as f32),
                (bx as f32, by as f32),
                CONNECTION_COLOR,
            );
        }

        for (index, landmark) in hand.landmarks.iter().enumerate() {
            let center = landmark.to_pixel(width, height);
            if index == CONTROL_LANDMARK {
                draw_filled_circle_mut(image, center, CONTROL_RADIUS, CONTROL_COLOR);
            } else {
                draw_filled_circle_mut(image, center, LANDMARK_RADIUS, LANDMARK_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::landmarks::{HandLandmark, INDEX_TIP, LANDMARK_COUNT};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| Rgb([x as u8, 10, 200]))
    }

    #[test]
    fn test_mirror_flips_columns() {
        let frame = CameraFrame::rgb(gradient(4, 2));
        let mirrored = frame.into_mirrored_rgb();
        assert_eq!(mirrored.get_pixel(0, 0), &Rgb([3, 10, 200]));
        assert_eq!(mirrored.get_pixel(3, 1), &Rgb([0, 10, 200]));
    }

    #[test]
    fn test_bgr_is_swapped_to_rgb() {
        let frame = CameraFrame::bgr(gradient(4, 2));
        let mirrored = frame.into_mirrored_rgb();
        assert_eq!(mirrored.get_pixel(0, 0), &Rgb([200, 10, 3]));
    }

    #[test]
    fn test_annotate_marks_control_point() {
        let mut image = RgbImage::new(100, 100);
        let mut landmarks = vec![HandLandmark { x: 0.1, y: 0.1, z: 0.0 }; LANDMARK_COUNT];
        landmarks[INDEX_TIP] = HandLandmark { x: 0.5, y: 0.5, z: 0.0 };
        annotate(&mut image, &[Hand { landmarks }]);

        assert_eq!(image.get_pixel(50, 50), &CONTROL_COLOR);
        assert_eq!(image.get_pixel(60, 50), &CONTROL_COLOR);
        assert_eq!(image.get_pixel(90, 90), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_annotate_without_hands_is_noop() {
        let mut image = gradient(8, 8);
        let before = image.clone();
        annotate(&mut image, &[]);
        assert_eq!(image, before);
    }
}
