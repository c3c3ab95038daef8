//! Euler angle to rotation matrix conversion.

use nalgebra::{Matrix3, Vector3};

/// Convert a 3-axis Euler rotation into a 3x3 rotation matrix.
///
/// Uses the fixed-axis composition of rotations about x, y and z. The result
/// is always orthonormal with determinant 1; the function is total over all
/// real inputs.
#[must_use]
pub fn euler_to_rotation_matrix(euler: Vector3<f64>) -> Matrix3<f64> {
    let (s1, c1) = euler.x.sin_cos();
    let (s2, c2) = euler.y.sin_cos();
    let (s3, c3) = euler.z.sin_cos();

    Matrix3::new(
        c2 * c3,
        -c2 * s3,
        s2,
        c1 * s3 + c3 * s1 * s2,
        c1 * c3 - s1 * s2 * s3,
        -c2 * s1,
        s1 * s3 - c1 * c3 * s2,
        c3 * s1 + c1 * s2 * s3,
        c1 * c2,
    )
}
