//! Read-only per-frame snapshot of the external landmark tracker's output.
//!
//! The tracker itself (detection, fitting, hierarchical refinement) lives
//! outside this crate. What the gaze core consumes is one frame's fitted
//! state: global pose parameters, the full-face landmark set, any named
//! hierarchical sub-models, and the tracker's detection verdict.

use crate::camera::CameraIntrinsics;
use crate::constants::DETECTION_CERTAINTY_THRESHOLD;
use crate::head_pose::{extract_pose, HeadPose};
use crate::{Error, Result};
use nalgebra::Vector3;
use ndarray::Array2;
use std::collections::HashMap;

/// Global pose parameters fitted by the tracker: uniform scale, 3-axis Euler
/// rotation and 2D translation in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalParams {
    /// Weak-perspective scale factor; zero when nothing was detected
    pub scale: f64,
    /// Euler rotation about the x, y and z axes
    pub rotation: Vector3<f64>,
    /// Horizontal translation in pixels
    pub tx: f64,
    /// Vertical translation in pixels
    pub ty: f64,
}

/// One fitted landmark set: 2D positions plus per-landmark depth offsets
/// about the set's mean depth plane, at the scale the set was fitted at.
///
/// Hierarchical sub-models (e.g. a 28-point eye region) carry their own
/// scale, which may differ from the face model's global scale.
#[derive(Debug, Clone)]
pub struct SubModel {
    landmarks_2d: Array2<f64>,
    depth_offsets: Vec<f64>,
    scale: f64,
}

impl SubModel {
    /// Create a landmark set from fitted 2D positions and depth offsets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the landmark matrix is not 2-wide,
    /// if the depth offsets do not match it row for row, or if the scale is
    /// negative or not finite.
    pub fn new(landmarks_2d: Array2<f64>, depth_offsets: Vec<f64>, scale: f64) -> Result<Self> {
        if landmarks_2d.ncols() != 2 {
            return Err(Error::InvalidInput(format!(
                "landmark matrix must have 2 columns, got {}",
                landmarks_2d.ncols()
            )));
        }
        if depth_offsets.len() != landmarks_2d.nrows() {
            return Err(Error::InvalidInput(format!(
                "{} depth offsets supplied for {} landmarks",
                depth_offsets.len(),
                landmarks_2d.nrows()
            )));
        }
        if !scale.is_finite() || scale < 0.0 {
            return Err(Error::InvalidInput(format!("invalid model scale: {scale}")));
        }
        Ok(Self {
            landmarks_2d,
            depth_offsets,
            scale,
        })
    }

    /// Number of landmarks in this set
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks_2d.nrows()
    }

    /// Whether this set holds no landmarks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks_2d.nrows() == 0
    }

    /// Scale factor this set was fitted at
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Back-project the fitted 2D landmarks into camera-space 3D points.
    ///
    /// Weak-perspective inversion: the set's mean depth plane sits at
    /// `Z = fx / scale` and each landmark is displaced from it by its fitted
    /// depth offset, then the pixel position is lifted to that depth. A zero
    /// scale (nothing detected) produces an all-zero cloud.
    #[must_use]
    pub fn project_3d(&self, intrinsics: &CameraIntrinsics) -> Array2<f64> {
        let n = self.landmarks_2d.nrows();
        let mut shape = Array2::zeros((n, 3));
        if self.scale == 0.0 {
            return shape;
        }

        let z_avg = intrinsics.fx / self.scale;
        for i in 0..n {
            let z = z_avg + self.depth_offsets[i];
            shape[[i, 0]] = z * ((self.landmarks_2d[[i, 0]] - intrinsics.cx) / intrinsics.fx);
            shape[[i, 1]] = z * ((self.landmarks_2d[[i, 1]] - intrinsics.cy) / intrinsics.fy);
            shape[[i, 2]] = z;
        }
        shape
    }
}

/// Per-frame snapshot of the tracked face model
#[derive(Debug, Clone)]
pub struct TrackedModel {
    global: GlobalParams,
    face: SubModel,
    sub_models: HashMap<String, SubModel>,
    detection_success: bool,
    detection_certainty: f64,
}

impl TrackedModel {
    /// Assemble a frame snapshot from the tracker's fitted state.
    ///
    /// The full-face landmark set is back-projected at the global scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the face landmark data is malformed.
    pub fn new(
        global: GlobalParams,
        face_landmarks_2d: Array2<f64>,
        face_depth_offsets: Vec<f64>,
        detection_success: bool,
        detection_certainty: f64,
    ) -> Result<Self> {
        let face = SubModel::new(face_landmarks_2d, face_depth_offsets, global.scale)?;
        Ok(Self {
            global,
            face,
            sub_models: HashMap::new(),
            detection_success,
            detection_certainty,
        })
    }

    /// Attach a named hierarchical sub-model (e.g. `"left_eye_28"`)
    pub fn insert_sub_model(&mut self, name: impl Into<String>, model: SubModel) {
        self.sub_models.insert(name.into(), model);
    }

    /// Global pose parameters for this frame
    #[must_use]
    pub fn global_params(&self) -> &GlobalParams {
        &self.global
    }

    /// The full-face landmark set
    #[must_use]
    pub fn face(&self) -> &SubModel {
        &self.face
    }

    /// Look up a hierarchical sub-model by name
    #[must_use]
    pub fn sub_model(&self, name: &str) -> Option<&SubModel> {
        self.sub_models.get(name)
    }

    /// Back-project the full-face landmarks into camera space
    #[must_use]
    pub fn project_3d(&self, intrinsics: &CameraIntrinsics) -> Array2<f64> {
        self.face.project_3d(intrinsics)
    }

    /// Camera-space head pose for this frame.
    ///
    /// The zero pose is returned when no landmarks were fitted or the global
    /// scale is zero.
    #[must_use]
    pub fn pose(&self, intrinsics: &CameraIntrinsics) -> HeadPose {
        if self.face.is_empty() {
            return HeadPose::zero();
        }
        extract_pose(&self.global, intrinsics)
    }

    /// Whether the tracker reported a successful detection this frame
    #[must_use]
    pub fn detection_success(&self) -> bool {
        self.detection_success
    }

    /// Validator certainty for this frame; -1 is perfect alignment, 1 is bad
    #[must_use]
    pub fn detection_certainty(&self) -> f64 {
        self.detection_certainty
    }

    /// Whether this frame's detection clears the given certainty threshold
    #[must_use]
    pub fn is_reliable(&self, certainty_threshold: f64) -> bool {
        self.detection_success && self.detection_certainty < certainty_threshold
    }
}

/// Default reliability check using [`DETECTION_CERTAINTY_THRESHOLD`]
#[must_use]
pub fn is_reliable(model: &TrackedModel) -> bool {
    model.is_reliable(DETECTION_CERTAINTY_THRESHOLD)
}
