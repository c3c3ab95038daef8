//! Constants used throughout the gaze estimation library

/// Number of facial landmarks for the full face model
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Number of landmarks in a hierarchical eye sub-model
pub const EYE_MODEL_LANDMARKS: usize = 28;

/// Number of iris-ring landmarks at the start of an eye landmark cloud
pub const IRIS_RING_LANDMARKS: usize = 8;

/// Eyeball sphere radius in millimetres, calibrated for the reference face-model scale
pub const EYEBALL_RADIUS_MM: f64 = 12.0;

/// Offset from the eye-corner midpoint to the eyeball centre, in head-local
/// coordinates (millimetres); rotated into the head pose before use
pub const EYEBALL_CENTRE_OFFSET_MM: [f64; 3] = [0.0, -3.5, 0.0];

/// Length of the rendered gaze ray segment in millimetres
pub const GAZE_RAY_LENGTH_MM: f64 = 50.0;

/// Hierarchical sub-model name for the left eye
pub const LEFT_EYE_MODEL: &str = "left_eye_28";

/// Hierarchical sub-model name for the right eye
pub const RIGHT_EYE_MODEL: &str = "right_eye_28";

/// Canonical eye-corner landmark rows in the full face model, left eye
pub const LEFT_EYE_CORNERS: (usize, usize) = (36, 39);

/// Canonical eye-corner landmark rows in the full face model, right eye
pub const RIGHT_EYE_CORNERS: (usize, usize) = (42, 45);

/// Detection certainty below which a tracked frame is trusted.
/// The tracker's validator outputs -1 for perfect alignment, 1 for bad.
pub const DETECTION_CERTAINTY_THRESHOLD: f64 = 0.2;

/// Base focal length for the intrinsics fallback heuristic
pub const FALLBACK_FOCAL_BASE: f64 = 500.0;

/// Reference frame width for the intrinsics fallback heuristic
pub const FALLBACK_REFERENCE_WIDTH: f64 = 640.0;

/// Reference frame height for the intrinsics fallback heuristic
pub const FALLBACK_REFERENCE_HEIGHT: f64 = 480.0;

/// Sentinel gaze direction: "undetermined, assume forward-facing"
pub const SENTINEL_GAZE: [f64; 3] = [0.0, 0.0, -1.0];

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
