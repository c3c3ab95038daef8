//! Camera intrinsic parameters and the fallback calibration heuristic.

use crate::constants::{FALLBACK_FOCAL_BASE, FALLBACK_REFERENCE_HEIGHT, FALLBACK_REFERENCE_WIDTH};
use serde::{Deserialize, Serialize};

/// Pinhole camera intrinsics: focal lengths and optical axis centre.
///
/// A zero value means "not calibrated"; `resolve` derives the missing
/// parameters from the frame dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length along the x axis, in pixels
    pub fx: f64,
    /// Focal length along the y axis, in pixels
    pub fy: f64,
    /// Optical axis centre x, in pixels
    pub cx: f64,
    /// Optical axis centre y, in pixels
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Create fully-calibrated intrinsics
    #[must_use]
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Resolve uncalibrated (zero) parameters against the frame dimensions.
    ///
    /// The optical centre defaults to the frame centre. Focal lengths default
    /// to `500 * ((width / 640 + height / 480) / 2)`, applied to both axes.
    /// If either member of a pair is zero the whole pair falls back.
    /// Calibrated values pass through unchanged. This heuristic is an
    /// external-interface contract and must not be altered.
    #[must_use]
    pub fn resolve(self, frame_width: f64, frame_height: f64) -> Self {
        let (cx, cy) = if self.cx == 0.0 || self.cy == 0.0 {
            (frame_width / 2.0, frame_height / 2.0)
        } else {
            (self.cx, self.cy)
        };

        let (fx, fy) = if self.fx == 0.0 || self.fy == 0.0 {
            let fx = FALLBACK_FOCAL_BASE * (frame_width / FALLBACK_REFERENCE_WIDTH);
            let fy = FALLBACK_FOCAL_BASE * (frame_height / FALLBACK_REFERENCE_HEIGHT);
            let focal = (fx + fy) / 2.0;
            (focal, focal)
        } else {
            (self.fx, self.fy)
        };

        Self { fx, fy, cx, cy }
    }

    /// Whether all four parameters are calibrated (non-zero)
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.fx != 0.0 && self.fy != 0.0 && self.cx != 0.0 && self.cy != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_reference_frame() {
        let resolved = CameraIntrinsics::default().resolve(640.0, 480.0);
        assert_eq!(resolved.fx, 500.0);
        assert_eq!(resolved.fy, 500.0);
        assert_eq!(resolved.cx, 320.0);
        assert_eq!(resolved.cy, 240.0);
    }

    #[test]
    fn test_resolve_scaled_frame() {
        // Double the reference resolution doubles the derived focal length
        let resolved = CameraIntrinsics::default().resolve(1280.0, 960.0);
        assert_eq!(resolved.fx, 1000.0);
        assert_eq!(resolved.fy, 1000.0);
        assert_eq!(resolved.cx, 640.0);
        assert_eq!(resolved.cy, 480.0);
    }

    #[test]
    fn test_calibrated_passes_through() {
        let calibrated = CameraIntrinsics::new(600.0, 610.0, 310.0, 250.0);
        let resolved = calibrated.resolve(640.0, 480.0);
        assert_eq!(resolved, calibrated);
        assert!(resolved.is_calibrated());
    }

    #[test]
    fn test_partial_pair_falls_back() {
        // One unset member of a pair invalidates the whole pair
        let partial = CameraIntrinsics::new(600.0, 0.0, 310.0, 0.0);
        let resolved = partial.resolve(640.0, 480.0);
        assert_eq!(resolved.fx, 500.0);
        assert_eq!(resolved.fy, 500.0);
        assert_eq!(resolved.cx, 320.0);
        assert_eq!(resolved.cy, 240.0);
    }
}
