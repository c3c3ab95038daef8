//! Ray and sphere intersection.

use nalgebra::Vector3;

/// Nearest intersection of a ray with a sphere, or `None` when the ray misses.
///
/// Solves the quadratic `a*t^2 + b*t + c = 0` for the ray parameter and takes
/// the near root, so the returned point lies on the camera-facing side of the
/// sphere. Evaluated in millimetre-scale face-model coordinates, in f64 to
/// keep intersections stable across frames.
#[must_use]
pub fn intersect(
    origin: Vector3<f64>,
    direction: Vector3<f64>,
    centre: Vector3<f64>,
    radius: f64,
) -> Option<Vector3<f64>> {
    let a = direction.norm_squared();
    let b = 2.0 * direction.dot(&(origin - centre));
    let c = centre.norm_squared() + origin.norm_squared() - 2.0 * centre.dot(&origin) - radius * radius;

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let t = (-b - disc.sqrt()) / (2.0 * a);
    Some(origin + direction * t)
}
