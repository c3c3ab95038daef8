//! Configuration management for gaze estimation sessions.

use crate::camera::CameraIntrinsics;
use crate::constants::DETECTION_CERTAINTY_THRESHOLD;
use crate::frame::GazeFrameProcessor;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera calibration; zero values are derived from the frame size
    pub camera: CameraIntrinsics,

    /// Tracker reliability gating
    pub detection: DetectionConfig,
}

/// Detection gating parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Certainty below which a detection is trusted; the tracker's validator
    /// outputs -1 for perfect alignment, 1 for bad
    pub certainty_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraIntrinsics::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            certainty_threshold: DETECTION_CERTAINTY_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is outside its valid range.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("fx", self.camera.fx),
            ("fy", self.camera.fy),
            ("cx", self.camera.cx),
            ("cy", self.camera.cy),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "camera parameter {name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !(-1.0..=1.0).contains(&self.detection.certainty_threshold) {
            return Err(Error::Config(
                "certainty threshold must be between -1.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    /// Create a frame processor from this configuration
    #[must_use]
    pub fn frame_processor(&self) -> GazeFrameProcessor {
        GazeFrameProcessor::new(self.camera).with_certainty_threshold(self.detection.certainty_threshold)
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Gaze Estimation Configuration

# Camera calibration; leave at 0 to derive from the frame size
camera:
  fx: 0.0
  fy: 0.0
  cx: 0.0
  cy: 0.0

# Tracker reliability gating
detection:
  certainty_threshold: 0.2
"#;
