//! Exact powers of two via the IEEE-754 binary64 layout.
//!
//! The squaring count of the exponential is decided here, so it has to be
//! bit-exact and branch-stable rather than routed through `log2`/`powi`.

const MANTISSA_BITS: u32 = 52;
const EXPONENT_BIAS: i32 = 1023;
const MIN_NORMAL_EXP: i32 = 1 - EXPONENT_BIAS;
const MIN_SUBNORMAL_EXP: i32 = MIN_NORMAL_EXP - MANTISSA_BITS as i32;

/// `ceil(log2(x))` for `x >= 1`, read straight off the exponent field.
///
/// Subtracting one from the bit pattern moves exact powers of two down into
/// the previous binade, so every other value rounds up.
///
/// # Panics
///
/// Panics if `x < 1` or `x` is NaN.
#[inline]
pub fn log2ceil(x: f64) -> u32 {
    assert!(x >= 1.0, "log2ceil requires x >= 1, got {}", x);
    let u = x.to_bits() - 1;
    ((u >> MANTISSA_BITS) as u32) - (EXPONENT_BIAS as u32 - 1)
}

/// `2^k` built from its bit pattern.
///
/// Overflows to `+inf` above the largest exponent, produces subnormals down to
/// `2^-1074`, and underflows to `0.0` below that.
#[inline]
pub fn exp2(k: i32) -> f64 {
    if k > EXPONENT_BIAS {
        f64::INFINITY
    } else if k >= MIN_NORMAL_EXP {
        f64::from_bits(((k + EXPONENT_BIAS) as u64) << MANTISSA_BITS)
    } else if k >= MIN_SUBNORMAL_EXP {
        f64::from_bits(1u64 << (k - MIN_SUBNORMAL_EXP))
    } else {
        0.0
    }
}
