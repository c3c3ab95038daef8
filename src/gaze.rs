//! Gaze direction estimation for the eyes of a tracked face.
//!
//! The estimator walks one eye per call: head pose from the tracker's global
//! parameters, pupil centre from the eye sub-model's iris ring, then a ray
//! from the camera through the pupil intersected with the eyeball sphere.
//! Every degenerate case collapses to [`GazeEstimate::Unknown`] so a frame
//! always yields an output.

use crate::camera::CameraIntrinsics;
use crate::constants::{
    EPSILON, EYEBALL_CENTRE_OFFSET_MM, EYEBALL_RADIUS_MM, LEFT_EYE_CORNERS, LEFT_EYE_MODEL,
    RIGHT_EYE_CORNERS, RIGHT_EYE_MODEL, SENTINEL_GAZE,
};
use crate::eye_geometry::pupil_position;
use crate::projection::{gaze_segment, project_pixel};
use crate::ray_sphere;
use crate::rotation::euler_to_rotation_matrix;
use crate::tracked_model::TrackedModel;
use crate::{Error, Result};
use nalgebra::{Matrix3, Vector3};
use std::cell::Cell;

/// Which eye to estimate gaze for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Image-left eye, tracked by the `left_eye_28` sub-model
    Left,
    /// Image-right eye, tracked by the `right_eye_28` sub-model
    Right,
}

impl Eye {
    /// Name of the hierarchical sub-model for this eye
    #[must_use]
    pub fn sub_model_name(self) -> &'static str {
        match self {
            Eye::Left => LEFT_EYE_MODEL,
            Eye::Right => RIGHT_EYE_MODEL,
        }
    }

    /// Canonical eye-corner landmark rows in the full face model
    #[must_use]
    pub fn corner_indices(self) -> (usize, usize) {
        match self {
            Eye::Left => LEFT_EYE_CORNERS,
            Eye::Right => RIGHT_EYE_CORNERS,
        }
    }
}

/// Gaze direction estimate for one eye.
///
/// `Unknown` covers every way a frame can degenerate (eye model absent, too
/// few iris landmarks, ray missing the eyeball sphere) without conflating
/// those with a genuinely computed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GazeEstimate {
    /// Unit direction from the eyeball centre toward the pupil-ray intersection
    Valid(Vector3<f64>),
    /// Geometry degenerated this frame; assume forward-facing
    Unknown,
}

impl GazeEstimate {
    /// Direction vector, substituting the forward-facing sentinel when unknown
    #[must_use]
    pub fn direction(self) -> Vector3<f64> {
        match self {
            GazeEstimate::Valid(v) => v,
            GazeEstimate::Unknown => sentinel_gaze(),
        }
    }

    /// Whether a direction was actually computed
    #[must_use]
    pub fn is_valid(self) -> bool {
        matches!(self, GazeEstimate::Valid(_))
    }
}

/// The sentinel "look straight ahead" direction
#[must_use]
pub fn sentinel_gaze() -> Vector3<f64> {
    Vector3::from(SENTINEL_GAZE)
}

/// Per-session gaze estimation context.
///
/// Owns the resolved camera intrinsics for the session, so the per-frame
/// entry points are pure functions of their inputs with no hidden shared
/// state. A missing eye sub-model is a configuration mismatch and is logged
/// once per session; every later frame degrades silently.
#[derive(Debug)]
pub struct GazeSession {
    intrinsics: CameraIntrinsics,
    eye_model_warned: Cell<bool>,
}

impl GazeSession {
    /// Create a session with resolved camera intrinsics
    #[must_use]
    pub fn new(intrinsics: CameraIntrinsics) -> Self {
        Self {
            intrinsics,
            eye_model_warned: Cell::new(false),
        }
    }

    /// Camera intrinsics this session computes with
    #[must_use]
    pub fn intrinsics(&self) -> &CameraIntrinsics {
        &self.intrinsics
    }

    /// Estimate the gaze direction of one eye for the current frame.
    ///
    /// Returns `Valid` with a unit vector when the pupil ray intersects the
    /// eyeball sphere, and `Unknown` for every degenerate case. Never fails
    /// the frame.
    #[must_use]
    pub fn estimate_gaze(&self, model: &TrackedModel, eye: Eye) -> GazeEstimate {
        let pose = model.pose(&self.intrinsics);
        let rot = euler_to_rotation_matrix(pose.rotation);

        let sub_model = match model.sub_model(eye.sub_model_name()) {
            Some(m) => m,
            None => {
                if !self.eye_model_warned.replace(true) {
                    let err = Error::EyeModelNotFound(eye.sub_model_name().to_string());
                    log::warn!("{err}; emitting sentinel gaze");
                }
                return GazeEstimate::Unknown;
            }
        };

        let eye_cloud = sub_model.project_3d(&self.intrinsics);
        let pupil = match pupil_position(eye_cloud.view()) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("pupil estimate unavailable for {eye:?}: {err}");
                return GazeEstimate::Unknown;
            }
        };

        // Ray from the camera origin through the pupil
        let ray_dir = match pupil.try_normalize(EPSILON) {
            Some(dir) => dir,
            None => return GazeEstimate::Unknown,
        };

        let centre = match eyeball_centre(model, eye, &rot, &self.intrinsics) {
            Some(c) => c,
            None => return GazeEstimate::Unknown,
        };

        match ray_sphere::intersect(Vector3::zeros(), ray_dir, centre, EYEBALL_RADIUS_MM) {
            Some(hit) => match (hit - centre).try_normalize(EPSILON) {
                Some(dir) => GazeEstimate::Valid(dir),
                None => GazeEstimate::Unknown,
            },
            // Expected geometric case, not worth logging
            None => GazeEstimate::Unknown,
        }
    }

    /// Pixel position of one eye's pupil, for visualization pipelines.
    ///
    /// Projects the pupil endpoint of the gaze segment through the pinhole
    /// model and rounds to the nearest integer pixel. Not part of the gaze
    /// computation proper.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EyeModelNotFound`] if the eye sub-model is absent and
    /// [`Error::InsufficientLandmarks`] if its iris ring is malformed.
    pub fn pupil_pixel_position(&self, model: &TrackedModel, gaze: GazeEstimate, eye: Eye) -> Result<(i32, i32)> {
        let sub_model = model
            .sub_model(eye.sub_model_name())
            .ok_or_else(|| Error::EyeModelNotFound(eye.sub_model_name().to_string()))?;

        let eye_cloud = sub_model.project_3d(&self.intrinsics);
        let pupil = pupil_position(eye_cloud.view())?;

        let segment = gaze_segment(pupil, gaze.direction());
        Ok(project_pixel(segment[0], &self.intrinsics))
    }
}

/// Eyeball-sphere centre for one eye: midpoint of the canonical eye-corner
/// landmarks plus the anatomical offset rotated into the head pose.
///
/// `None` when the face landmark cloud is too small to hold the corner rows.
fn eyeball_centre(
    model: &TrackedModel,
    eye: Eye,
    rot: &Matrix3<f64>,
    intrinsics: &CameraIntrinsics,
) -> Option<Vector3<f64>> {
    let face = model.project_3d(intrinsics);
    let (first, second) = eye.corner_indices();
    if face.nrows() <= second.max(first) {
        return None;
    }

    let corner = |row: usize| Vector3::new(face[[row, 0]], face[[row, 1]], face[[row, 2]]);
    let midpoint = (corner(first) + corner(second)) / 2.0;
    Some(midpoint + rot * Vector3::from(EYEBALL_CENTRE_OFFSET_MM))
}
