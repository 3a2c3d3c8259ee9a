// expo-index/src/exact.rs

use crate::ieee754::{self, EXPONENT_BIAS};

// A subnormal's (mantissa - 1), seen as a u64, has 12 leading zeros for the
// sign and exponent fields. Each extra leading zero is one binade lower.
const SUBNORMAL_LEADING_ZEROS: i32 = 12;

/// Scale-0 bucket index, computed from the bit pattern alone.
///
/// Bucket `i` owns `(2^i, 2^(i+1)]`, so exact powers of two land one bucket
/// below their exponent. The value must be positive, finite and non-zero.
pub fn map_exact(value: f64) -> i64 {
    let decomposed = ieee754::decompose(value);
    let mut raw_exponent = decomposed.biased_exponent as i32;

    if decomposed.is_subnormal() {
        // No hidden bit: the leading set bit of (mantissa - 1) gives the
        // binade, already shifted down by one for subnormal powers of two.
        // E.g. 2^-1023 has (mantissa - 1) = 0x0007ffffffffffff, 13 leading
        // zeros, so the exponent becomes -1 - 1023 = -1024.
        let leading_zeros = decomposed.mantissa.wrapping_sub(1).leading_zeros() as i32;
        raw_exponent -= leading_zeros - SUBNORMAL_LEADING_ZEROS;
    }

    let exponent = (raw_exponent - EXPONENT_BIAS) as i64;

    // Mantissa and exponent field both zero would be 0.0, which is outside
    // the domain.
    if decomposed.mantissa == 0 {
        exponent - 1
    } else {
        exponent
    }
}

/// Scale-0 bucket index via `frexp`.
///
/// `frexp` returns a fraction in `[0.5, 1)`, so its exponent is one above the
/// `[1, 2)` convention, and a fraction of exactly 0.5 marks a power of two.
/// Must agree with [`map_exact`] for every positive finite value.
pub fn map_frexp(value: f64) -> i64 {
    let (fraction, exponent) = libm::frexp(value);
    let exponent = exponent as i64 - 1;
    if fraction == 0.5 {
        exponent - 1
    } else {
        exponent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_of_two_fall_below() {
        assert_eq!(map_exact(1.0), -1);
        assert_eq!(map_exact(2.0), 0);
        assert_eq!(map_exact(4.0), 1);
        assert_eq!(map_exact(0.5), -2);
        assert_eq!(map_frexp(1.0), -1);
        assert_eq!(map_frexp(4.0), 1);
    }

    #[test]
    fn inside_octaves() {
        assert_eq!(map_exact(1.5), 0);
        assert_eq!(map_exact(3.0), 1);
        assert_eq!(map_exact(0.75), -1);
        assert_eq!(map_exact(ieee754::next_up(1.0)), 0);
        assert_eq!(map_exact(ieee754::next_down(2.0)), 0);
    }

    #[test]
    fn extremes() {
        // Smallest subnormal is 2^-1074, a power of two.
        assert_eq!(map_exact(f64::from_bits(1)), -1075);
        assert_eq!(map_frexp(f64::from_bits(1)), -1075);
        // 3 * 2^-1074 lies in (2^-1073, 2^-1072].
        assert_eq!(map_exact(f64::from_bits(3)), -1073);
        assert_eq!(map_exact(f64::MIN_POSITIVE / 2.0), -1024);
        assert_eq!(map_exact(f64::MIN_POSITIVE), -1023);
        assert_eq!(map_exact(ieee754::next_down(f64::MIN_POSITIVE)), -1023);
        assert_eq!(map_exact(f64::MAX), 1023);
        assert_eq!(map_frexp(f64::MAX), 1023);
    }
}
