// expo-index/src/scaled.rs

//! Approximate index formulas for positive scales.
//!
//! All three compute `ceil(log2(value) * 2^scale) - 1` up to floating-point
//! rounding near bucket edges. They are only meant for `scale >= 1`; scales at
//! or below zero go through the exact exponent path in [`crate::mapper`].

use std::f64::consts::LOG2_E;

/// Largest scale covered by [`ScaleFactors`].
pub const MAX_TABLE_SCALE: i32 = 20;

/// Largest scale [`map_fraction`] accepts: `1024 << 52` still fits an `i64`.
pub const MAX_FRACTION_SCALE: i32 = 52;

const TABLE_LEN: usize = MAX_TABLE_SCALE as usize + 1;

/// `2^scale / ln 2` for every scale in `0..=MAX_TABLE_SCALE`.
///
/// Built once and only ever read through a shared reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleFactors {
    factors: [f64; TABLE_LEN],
}

impl ScaleFactors {
    pub fn new() -> Self {
        Self {
            factors: std::array::from_fn(|scale| libm::ldexp(LOG2_E, scale as i32)),
        }
    }

    /// `None` when `scale` is outside the table.
    pub fn get(&self, scale: i32) -> Option<f64> {
        usize::try_from(scale)
            .ok()
            .and_then(|scale| self.factors.get(scale))
            .copied()
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::new()
    }
}

/// `floor(ln(value) * 2^scale / ln 2)`.
///
/// Exact powers of two are not special-cased, so `2^e` usually comes out one
/// bucket too high. Any `scale` is accepted; past about 52 the result
/// saturates at the `i64` limits.
pub fn map_logarithm(value: f64, scale: i32) -> i64 {
    let scale_factor = libm::ldexp(LOG2_E, scale);
    (value.ln() * scale_factor).floor() as i64
}

/// `exp * 2^scale + trunc(log2(fraction) * 2^scale) - 1`, with
/// `value = fraction * 2^exp` and `fraction` in `[0.5, 1)`.
///
/// `frexp`'s exponent is one above the `[1, 2)` convention; the `- 1` and the
/// truncation toward zero (a ceiling, since `log2(fraction)` is negative)
/// together land on the upper-inclusive bucket.
///
/// # Panics
///
/// If `scale` is outside `0..=MAX_FRACTION_SCALE`.
pub fn map_fraction(value: f64, scale: i32) -> i64 {
    assert!(
        (0..=MAX_FRACTION_SCALE).contains(&scale),
        "scale {scale} outside 0..={MAX_FRACTION_SCALE}"
    );
    let (fraction, exponent) = libm::frexp(value);
    let sub_buckets = (fraction.log2() * libm::ldexp(1.0, scale)) as i64;
    ((exponent as i64) << scale) + sub_buckets - 1
}

/// Like [`map_fraction`], but with `ln(fraction) * factors[scale]` in place of
/// the base-2 logarithm. `None` when the table doesn't cover `scale`.
pub fn map_fraction_table(value: f64, scale: i32, factors: &ScaleFactors) -> Option<i64> {
    let factor = factors.get(scale)?;
    let (fraction, exponent) = libm::frexp(value);
    let sub_buckets = (fraction.ln() * factor) as i64;
    Some(((exponent as i64) << scale) + sub_buckets - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_on_demand_factor() {
        let factors = ScaleFactors::new();
        assert_eq!(factors.get(0), Some(LOG2_E));
        assert_eq!(factors.get(20), Some(LOG2_E * 1048576.0));
        assert_eq!(factors.get(21), None);
        assert_eq!(factors.get(-1), None);
        for scale in 0..=MAX_TABLE_SCALE {
            assert_eq!(factors.get(scale), Some(libm::ldexp(LOG2_E, scale)));
        }
    }

    #[test]
    fn fraction_places_octave_interiors() {
        // 1.5 sits in (1, 2], bucket 0 at scale 0 and 1 at scale 1
        // (boundary sqrt(2) < 1.5).
        assert_eq!(map_fraction(1.5, 1), 1);
        assert_eq!(map_fraction(1.25, 1), 0);
        assert_eq!(map_fraction(3.0, 1), 3);
        assert_eq!(map_fraction(0.75, 1), -1);
    }

    #[test]
    fn fraction_handles_powers_of_two() {
        // log2(0.5) is exactly -1, so powers of two need no special case.
        for scale in 1..=MAX_TABLE_SCALE {
            assert_eq!(map_fraction(1.0, scale), -1);
            assert_eq!(map_fraction(8.0, scale), (3 << scale) - 1);
            assert_eq!(map_fraction(0.25, scale), (-2 << scale) - 1);
        }
    }

    #[test]
    fn fraction_at_largest_scale() {
        assert_eq!(map_fraction(1.0, MAX_FRACTION_SCALE), -1);
        assert_eq!(map_fraction(f64::MAX, MAX_FRACTION_SCALE), (1 << 62) - 1);
        assert_eq!(
            map_fraction(f64::from_bits(1), MAX_FRACTION_SCALE),
            (-1074i64 << 52) - 1
        );
    }

    #[test]
    #[should_panic(expected = "scale 64 outside")]
    fn fraction_rejects_oversized_scale() {
        map_fraction(1.5, 64);
    }

    #[test]
    #[should_panic(expected = "scale -1 outside")]
    fn fraction_rejects_negative_scale() {
        map_fraction(1.5, -1);
    }

    #[test]
    fn logarithm_survives_extreme_scales() {
        assert_eq!(map_logarithm(3.0, i32::MAX), i64::MAX);
        assert_eq!(map_logarithm(0.5, i32::MAX), i64::MIN);
        assert_eq!(map_logarithm(3.0, i32::MIN), 0);
    }

    #[test]
    fn logarithm_interior_values() {
        assert_eq!(map_logarithm(1.5, 1), 1);
        assert_eq!(map_logarithm(1.25, 1), 0);
        assert_eq!(map_logarithm(3.0, 3), 12);
    }

    #[test]
    fn fraction_table_rejects_uncovered_scales() {
        let factors = ScaleFactors::new();
        assert_eq!(map_fraction_table(1.5, 21, &factors), None);
        assert_eq!(map_fraction_table(1.5, 1, &factors), Some(1));
    }
}
