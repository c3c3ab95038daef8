//! Per-frame processing adapter decoupling the gaze core from host frameworks.
//!
//! A host (plugin runtime, capture loop, test harness) implements its own
//! scheduling and hands each frame's tracked-model snapshot to a
//! [`FrameConsumer`]. The default [`GazeFrameProcessor`] runs the gaze
//! pipeline for both eyes and guarantees exactly one output per input frame,
//! degrading to sentinel estimates when the tracker reported failure.

use crate::camera::CameraIntrinsics;
use crate::constants::DETECTION_CERTAINTY_THRESHOLD;
use crate::gaze::{Eye, GazeEstimate, GazeSession};
use crate::tracked_model::TrackedModel;

/// Gaze output for one processed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGaze {
    /// Left-eye gaze estimate
    pub left: GazeEstimate,
    /// Right-eye gaze estimate
    pub right: GazeEstimate,
    /// Left pupil pixel position, when the eye sub-model produced one
    pub pupil_left: Option<(i32, i32)>,
    /// Right pupil pixel position, when the eye sub-model produced one
    pub pupil_right: Option<(i32, i32)>,
}

impl FrameGaze {
    /// Output for a frame where nothing could be computed
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            left: GazeEstimate::Unknown,
            right: GazeEstimate::Unknown,
            pupil_left: None,
            pupil_right: None,
        }
    }
}

/// Capability interface a host implements to feed tracked frames through the
/// core.
///
/// The host guarantees calls are serialized: one frame's computation
/// completes before the next begins. Implementations must produce exactly one
/// output per input frame, never skipping a frame silently.
pub trait FrameConsumer {
    /// Consume one frame's tracked-model snapshot and produce a gaze output
    fn consume_frame(&mut self, model: &TrackedModel, frame_width: u32, frame_height: u32) -> FrameGaze;
}

/// Default frame processor running the gaze pipeline for both eyes.
///
/// Holds the configured (possibly uncalibrated) intrinsics and resolves them
/// against the frame dimensions, rebuilding the session whenever the frame
/// size changes.
pub struct GazeFrameProcessor {
    configured: CameraIntrinsics,
    certainty_threshold: f64,
    session: Option<GazeSession>,
    frame_size: (u32, u32),
    frame_count: u64,
}

impl GazeFrameProcessor {
    /// Create a processor from configured intrinsics; zero parameters are
    /// derived from the frame size once frames arrive
    #[must_use]
    pub fn new(configured: CameraIntrinsics) -> Self {
        Self {
            configured,
            certainty_threshold: DETECTION_CERTAINTY_THRESHOLD,
            session: None,
            frame_size: (0, 0),
            frame_count: 0,
        }
    }

    /// Override the detection certainty threshold
    #[must_use]
    pub fn with_certainty_threshold(mut self, threshold: f64) -> Self {
        self.certainty_threshold = threshold;
        self
    }

    /// Number of frames consumed so far
    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frame_count
    }

    /// Session for the current frame size, if any frame has been consumed
    #[must_use]
    pub fn session(&self) -> Option<&GazeSession> {
        self.session.as_ref()
    }
}

impl FrameConsumer for GazeFrameProcessor {
    fn consume_frame(&mut self, model: &TrackedModel, frame_width: u32, frame_height: u32) -> FrameGaze {
        self.frame_count += 1;

        if self.session.is_none() || self.frame_size != (frame_width, frame_height) {
            let resolved = self.configured.resolve(f64::from(frame_width), f64::from(frame_height));
            log::debug!(
                "intrinsics resolved for {frame_width}x{frame_height}: fx={} fy={} cx={} cy={}",
                resolved.fx,
                resolved.fy,
                resolved.cx,
                resolved.cy
            );
            self.session = Some(GazeSession::new(resolved));
            self.frame_size = (frame_width, frame_height);
        }
        let Some(session) = self.session.as_ref() else {
            return FrameGaze::unknown();
        };

        if !model.is_reliable(self.certainty_threshold) {
            log::debug!(
                "unreliable detection (success={}, certainty={:.3}); emitting sentinel gaze",
                model.detection_success(),
                model.detection_certainty()
            );
            return FrameGaze::unknown();
        }

        let left = session.estimate_gaze(model, Eye::Left);
        let right = session.estimate_gaze(model, Eye::Right);

        FrameGaze {
            left,
            right,
            pupil_left: session.pupil_pixel_position(model, left, Eye::Left).ok(),
            pupil_right: session.pupil_pixel_position(model, right, Eye::Right).ok(),
        }
    }
}
