//! Eye-region landmark geometry: pupil position from the iris ring.

use crate::constants::IRIS_RING_LANDMARKS;
use crate::{Error, Result};
use nalgebra::Vector3;
use ndarray::{s, ArrayView2, Axis};

/// Mean 3D position of the iris-ring landmarks of one eye.
///
/// Only the first eight rows of the eye landmark cloud form the iris ring;
/// the eyelid contour points are excluded from the pupil estimate.
///
/// # Errors
///
/// Returns [`Error::InsufficientLandmarks`] if the cloud has fewer than eight
/// rows, and [`Error::InvalidInput`] if its rows are not 3-wide.
pub fn pupil_position(eye_cloud: ArrayView2<f64>) -> Result<Vector3<f64>> {
    if eye_cloud.ncols() != 3 {
        return Err(Error::InvalidInput(format!(
            "eye landmark cloud must have 3 columns, got {}",
            eye_cloud.ncols()
        )));
    }
    if eye_cloud.nrows() < IRIS_RING_LANDMARKS {
        return Err(Error::InsufficientLandmarks {
            required: IRIS_RING_LANDMARKS,
            found: eye_cloud.nrows(),
        });
    }

    let iris = eye_cloud.slice(s![..IRIS_RING_LANDMARKS, ..]);
    let sum = iris.sum_axis(Axis(0));
    let inv = 1.0 / IRIS_RING_LANDMARKS as f64;
    Ok(Vector3::new(sum[0] * inv, sum[1] * inv, sum[2] * inv))
}
