//! Vector helpers for movement on the ground plane.
//!
//! The world is Y-up and characters walk on the XZ plane. These helpers keep
//! normalisation safe near zero length and provide the few planar operations
//! the steering and waypoint code share.
use glam::Vec3;

use crate::DISTANCE_EPSILON;

/// Returns the unit vector along `vector`, or `None` when it is too short.
///
/// Vectors with non-finite components or a length at or below `epsilon`
/// have no usable direction.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use warband::vector_math::try_direction;
///
/// let dir = try_direction(Vec3::new(3.0, 0.0, 4.0), 0.001).unwrap();
/// assert!((dir.x - 0.6).abs() < 1e-6);
/// assert!((dir.z - 0.8).abs() < 1e-6);
///
/// assert!(try_direction(Vec3::ZERO, 0.001).is_none());
/// assert!(try_direction(Vec3::new(f32::NAN, 1.0, 0.0), 0.001).is_none());
/// ```
#[must_use]
pub fn try_direction(vector: Vec3, epsilon: f32) -> Option<Vec3> {
    if !vector.is_finite() {
        return None;
    }
    let length = vector.length();
    (length > epsilon).then(|| vector / length)
}

/// Returns the unit vector along `vector`, falling back to `fallback`.
///
/// Uses [`DISTANCE_EPSILON`] as the zero-length threshold.
#[must_use]
pub fn direction_or(vector: Vec3, fallback: Vec3) -> Vec3 {
    try_direction(vector, DISTANCE_EPSILON).unwrap_or(fallback)
}

/// Drops the vertical component, projecting onto the ground plane.
#[must_use]
pub const fn flatten(vector: Vec3) -> Vec3 {
    Vec3::new(vector.x, 0.0, vector.z)
}

/// Returns the two ground-plane unit vectors perpendicular to `direction`.
///
/// The first is a quarter turn counter-clockwise seen from above, the second
/// clockwise. Both are zero when `direction` has no horizontal extent.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use warband::vector_math::ground_perpendiculars;
///
/// let [left, right] = ground_perpendiculars(Vec3::X);
/// assert_eq!(left, Vec3::new(0.0, 0.0, 1.0));
/// assert_eq!(right, Vec3::new(0.0, 0.0, -1.0));
/// ```
#[must_use]
pub fn ground_perpendiculars(direction: Vec3) -> [Vec3; 2] {
    let Some(planar) = try_direction(flatten(direction), DISTANCE_EPSILON) else {
        return [Vec3::ZERO, Vec3::ZERO];
    };
    [
        Vec3::new(-planar.z, 0.0, planar.x),
        Vec3::new(planar.z, 0.0, -planar.x),
    ]
}

/// Point on a horizontal circle around `centre` at `angle` radians.
///
/// The angle is measured from +X toward +Z. The height of `centre` is kept.
#[must_use]
pub fn ring_point(centre: Vec3, radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    centre + Vec3::new(cos * radius, 0.0, sin * radius)
}

/// Shortest distance from `point` to the segment `start..=end`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use warband::vector_math::distance_to_segment;
///
/// let d = distance_to_segment(Vec3::new(1.0, 0.0, 2.0), Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
/// assert!((d - 2.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn distance_to_segment(point: Vec3, start: Vec3, end: Vec3) -> f32 {
    let span = end - start;
    let length_sq = span.length_squared();
    if length_sq <= DISTANCE_EPSILON * DISTANCE_EPSILON {
        return point.distance(start);
    }
    let t = ((point - start).dot(span) / length_sq).clamp(0.0, 1.0);
    point.distance(start + span * t)
}

/// Fraction along `start..end` where a point first comes within `reach` of
/// `centre`.
///
/// Returns `None` when `start` is already within `reach`, when the segment is
/// degenerate, or when the segment never gets that close.
#[must_use]
pub fn segment_entry(start: Vec3, end: Vec3, centre: Vec3, reach: f32) -> Option<f32> {
    let span = end - start;
    let length_sq = span.length_squared();
    let from_centre = start - centre;
    let outside = from_centre.length_squared() - reach * reach;
    if outside <= 0.0 || length_sq <= DISTANCE_EPSILON * DISTANCE_EPSILON {
        return None;
    }
    let half_b = from_centre.dot(span);
    let discriminant = half_b * half_b - length_sq * outside;
    if half_b >= 0.0 || discriminant < 0.0 {
        return None;
    }
    let t = (-half_b - discriminant.sqrt()) / length_sq;
    (t <= 1.0).then(|| t.max(0.0))
}
