// expo-index/src/ieee754.rs

pub const SIGNIFICAND_BITS: u32 = 52;
pub const EXPONENT_BITS: u32 = 11;
pub const SIGNIFICAND_MASK: u64 = (1 << SIGNIFICAND_BITS) - 1;
pub const EXPONENT_MASK: u64 = ((1 << EXPONENT_BITS) - 1) << SIGNIFICAND_BITS;
pub const EXPONENT_BIAS: i32 = (1 << (EXPONENT_BITS - 1)) - 1;

/// The two non-sign fields of a binary64 value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposed {
    /// 11-bit biased exponent. Zero marks a subnormal, 2047 an Inf or NaN.
    pub biased_exponent: u16,
    /// 52-bit fraction. For normal values this is `significand - 1` scaled by
    /// `2^52`, where the significand is in `[1, 2)`.
    pub mantissa: u64,
}

/// Splits `value` into its biased exponent and mantissa fraction.
///
/// The value must be positive, finite and non-zero. Nothing is checked here:
/// the sign bit is dropped and Inf/NaN come back with an all-ones exponent.
pub fn decompose(value: f64) -> Decomposed {
    let bits = value.to_bits();
    Decomposed {
        biased_exponent: ((bits & EXPONENT_MASK) >> SIGNIFICAND_BITS) as u16,
        mantissa: bits & SIGNIFICAND_MASK,
    }
}

impl Decomposed {
    pub fn is_subnormal(&self) -> bool {
        self.biased_exponent == 0
    }

    /// True for exact powers of two in the normal range. Subnormal powers of
    /// two carry a single set bit in the mantissa instead.
    pub fn is_normal_power_of_two(&self) -> bool {
        self.mantissa == 0 && !self.is_subnormal()
    }
}

/// The next representable value toward zero. `0.0` stays put.
pub fn next_down(value: f64) -> f64 {
    let bits = value.to_bits();
    if bits == 0 {
        value
    } else {
        f64::from_bits(bits - 1)
    }
}

/// The next representable value away from zero. Positive infinity stays put.
pub fn next_up(value: f64) -> f64 {
    if value == f64::INFINITY {
        value
    } else {
        f64::from_bits(value.to_bits() + 1)
    }
}
