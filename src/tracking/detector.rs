//! Hand-landmark detection
//!
//! The model itself runs outside this crate. `HandDetector` is the seam; the
//! shipped implementation talks to a helper process over stdin/stdout:
//!
//! - request: `"<width> <height>\n"` followed by `width * height * 3` RGB bytes
//! - reply: one JSON line, `{"hands": [[{"x": .., "y": .., "z": ..}, ...], ...]}`

use image::RgbImage;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use super::TrackingError;
use super::landmarks::{Hand, HandLandmark};

/// Anything that can find hands in an RGB frame
pub trait HandDetector {
    /// Zero or more hands, landmarks normalized to the frame size
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>, TrackingError>;
}

#[derive(Debug, Deserialize)]
struct DetectorReply {
    #[serde(default)]
    hands: Vec<Vec<HandLandmark>>,
}

/// Parse one reply line from the helper
pub fn parse_reply(line: &str) -> Result<Vec<Hand>, TrackingError> {
    let reply: DetectorReply = serde_json::from_str(line.trim())
        .map_err(|e| TrackingError::Detector(format!("bad reply: {}", e)))?;
    Ok(reply
        .hands
        .into_iter()
        .map(|landmarks| Hand { landmarks })
        .collect())
}

/// Line protocol over any writer/reader pair
pub struct PipeDetector<W: Write, R: BufRead> {
    writer: W,
    reader: R,
    line: String,
}

impl<W: Write, R: BufRead> PipeDetector<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self {
            writer,
            reader,
            line: String::new(),
        }
    }

    fn io_error(e: std::io::Error) -> TrackingError {
        TrackingError::Detector(format!("pipe error: {}", e))
    }
}

impl<W: Write, R: BufRead> HandDetector for PipeDetector<W, R> {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>, TrackingError> {
        writeln!(self.writer, "{} {}", frame.width(), frame.height()).map_err(Self::io_error)?;
        self.writer.write_all(frame.as_raw()).map_err(Self::io_error)?;
        self.writer.flush().map_err(Self::io_error)?;

        self.line.clear();
        let read = self.reader.read_line(&mut self.line).map_err(Self::io_error)?;
        if read == 0 {
            return Err(TrackingError::Detector("detector closed its output".to_string()));
        }
        parse_reply(&self.line)
    }
}

/// Detector running as a child process
pub struct ProcessDetector {
    child: Child,
    pipe: PipeDetector<ChildStdin, BufReader<ChildStdout>>,
}

impl ProcessDetector {
    /// Start the helper. `argv[0]` is the program.
    pub fn spawn(argv: &[String]) -> Result<Self, TrackingError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| TrackingError::Detector("empty detector command".to_string()))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| TrackingError::Detector(format!("failed to start {}: {}", program, e)))?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            return Err(TrackingError::Detector("detector pipes unavailable".to_string()));
        };

        bevy::log::info!("Started hand detector: {}", argv.join(" "));
        Ok(Self {
            child,
            pipe: PipeDetector::new(stdin, BufReader::new(stdout)),
        })
    }
}

impl HandDetector for ProcessDetector {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<Hand>, TrackingError> {
        self.pipe.detect(frame)
    }
}

impl Drop for ProcessDetector {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
