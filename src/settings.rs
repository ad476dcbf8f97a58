//! Hand-tracking settings
//!
//! Loads camera and detector plumbing from config/tracking.json. Gameplay
//! rules are fixed and never read from disk.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Path to the settings file
pub const TRACKING_SETTINGS_FILE: &str = "config/tracking.json";

fn default_confidence() -> f32 {
    0.5
}

fn default_true() -> bool {
    true
}

/// How the tracking thread finds its camera and detector
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Start the tracking thread at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Video capture device index (0 = default camera)
    #[serde(default)]
    pub camera_index: u32,
    /// Helper process that runs the hand-landmark model (program followed by args).
    /// Empty = no detector, tracking stays off.
    #[serde(default)]
    pub detector_command: Vec<String>,
    /// Passed to the detector as --min-detection-confidence
    #[serde(default = "default_confidence")]
    pub min_detection_confidence: f32,
    /// Passed to the detector as --min-tracking-confidence
    #[serde(default = "default_confidence")]
    pub min_tracking_confidence: f32,
    /// Open the annotated camera window
    #[serde(default = "default_true")]
    pub show_debug_view: bool,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            camera_index: 0,
            detector_command: Vec::new(),
            min_detection_confidence: default_confidence(),
            min_tracking_confidence: default_confidence(),
            show_debug_view: true,
        }
    }
}

impl TrackingSettings {
    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(TRACKING_SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using default tracking settings", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Path::new(TRACKING_SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved tracking settings to {}", path.display());
        Ok(())
    }

    /// Full detector argv with the confidence thresholds appended
    pub fn detector_argv(&self) -> Option<Vec<String>> {
        if self.detector_command.is_empty() {
            return None;
        }
        let mut argv = self.detector_command.clone();
        argv.push("--min-detection-confidence".to_string());
        argv.push(self.min_detection_confidence.to_string());
        argv.push("--min-tracking-confidence".to_string());
        argv.push(self.min_tracking_confidence.to_string());
        Some(argv)
    }
}
