//! Pinhole projection of 3D pupil geometry into image pixels.

use crate::camera::CameraIntrinsics;
use crate::constants::GAZE_RAY_LENGTH_MM;
use nalgebra::Vector3;

/// Two-point 3D segment from the pupil along the gaze direction.
///
/// The second endpoint extends the gaze by a fixed 50 mm so downstream
/// renderers get a visible ray; the length is a rendering scale, not part of
/// the gaze computation.
#[must_use]
pub fn gaze_segment(pupil: Vector3<f64>, gaze_direction: Vector3<f64>) -> [Vector3<f64>; 2] {
    [pupil, pupil + gaze_direction * GAZE_RAY_LENGTH_MM]
}

/// Project a camera-space point to the nearest integer pixel.
///
/// Standard pinhole model: `px = fx * x / z + cx`, `py = fy * y / z + cy`.
#[must_use]
pub fn project_pixel(point: Vector3<f64>, intrinsics: &CameraIntrinsics) -> (i32, i32) {
    let px = intrinsics.fx * (point.x / point.z) + intrinsics.cx;
    let py = intrinsics.fy * (point.y / point.z) + intrinsics.cy;
    (px.round() as i32, py.round() as i32)
}
