//! Camera-space head pose derived from tracked model global parameters.

use crate::camera::CameraIntrinsics;
use crate::tracked_model::GlobalParams;
use nalgebra::Vector3;

/// 6-DOF head pose in camera space: translation in millimetres plus a 3-axis
/// Euler rotation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadPose {
    /// Translation of the head origin in camera space
    pub translation: Vector3<f64>,
    /// Euler rotation about the x, y and z axes
    pub rotation: Vector3<f64>,
}

impl HeadPose {
    /// The all-zero pose emitted when no face is being tracked
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether this is the degenerate zero pose
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Derive the camera-space head pose from the tracker's global parameters.
///
/// Inverts the weak-perspective camera model: the tracker's uniform scale
/// factor determines depth given the known focal length (`Z = fx / scale`),
/// and the 2D translation is lifted to camera space at that depth. Rotation
/// angles pass through unchanged. A zero scale means nothing was detected
/// this frame and yields the zero pose; this is the documented degenerate
/// case, not an error.
#[must_use]
pub fn extract_pose(params: &GlobalParams, intrinsics: &CameraIntrinsics) -> HeadPose {
    if params.scale == 0.0 {
        return HeadPose::zero();
    }

    let z = intrinsics.fx / params.scale;
    let x = ((params.tx - intrinsics.cx) / intrinsics.fx) * z;
    let y = ((params.ty - intrinsics.cy) / intrinsics.fy) * z;

    HeadPose {
        translation: Vector3::new(x, y, z),
        rotation: params.rotation,
    }
}
