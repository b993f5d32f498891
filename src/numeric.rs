//! Numeric conversion helpers used across the project.
//!
//! Sampling code counts in `usize` while geometry works in `f32`, and the
//! frame driver measures time in `f64`. These helpers keep those casts in one
//! place and assert their assumptions in debug builds.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value.abs() <= f64::from(f32::MAX),
        "f64 value {value} exceeds the f32 range"
    );
    value as f32
}

/// Convert a small count or index into `f32`.
///
/// Counts used here (ring samples, rounds) stay far below 2^24, so the
/// conversion is exact.
#[expect(
    clippy::cast_precision_loss,
    reason = "Sample counts are tiny and convert exactly."
)]
#[must_use]
pub fn count_to_f32(value: usize) -> f32 {
    debug_assert!(value < (1 << 24), "count {value} loses precision as f32");
    value as f32
}

/// Fraction of a full turn for sample `index` out of `samples`, in radians.
///
/// Returns `0.0` when `samples` is zero.
///
/// # Examples
/// ```
/// use warband::numeric::sample_angle;
/// let quarter = sample_angle(4, 16);
/// assert!((quarter - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// ```
#[must_use]
pub fn sample_angle(index: usize, samples: usize) -> f32 {
    if samples == 0 {
        return 0.0;
    }
    std::f32::consts::TAU * count_to_f32(index) / count_to_f32(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_seconds_round_trip() {
        assert_relative_eq!(expect_f32(1.0 / 60.0), 1.0 / 60.0_f32);
    }

    #[test]
    fn zero_samples_yield_zero_angle() {
        assert_relative_eq!(sample_angle(3, 0), 0.0);
    }

    #[test]
    fn angles_cover_full_turn() {
        assert_relative_eq!(sample_angle(8, 16), std::f32::consts::PI, epsilon = 1e-6);
    }
}
