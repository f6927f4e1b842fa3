//! Absolute value, rounding and sign.
//!
//! These keep the sign of zero wherever the runtime requires it:
//! `floor(-0)`, `ceil(-0.5)`, `round(-0.2)`, `trunc(-0)` and `sign(-0)`
//! all produce `-0`, while `abs(-0)` is `+0`.

const TWO_POW_31: f64 = 2_147_483_648.0;

/// `|x|`, with `abs(-0) == +0` and `abs(NaN)` NaN.
pub fn abs(x: f64) -> f64 {
    x.abs()
}

/// Largest integer not greater than `x`.
///
/// Values in `(0, 2^31)` take the integer path; zero is excluded so
/// that `floor(-0)` stays `-0`.
pub fn floor(x: f64) -> f64 {
    if x < TWO_POW_31 && x > 0.0 {
        f64::from(x as u32)
    } else {
        x.floor()
    }
}

/// Smallest integer not less than `x`, computed as `-floor(-x)`.
pub fn ceil(x: f64) -> f64 {
    -floor(-x)
}

/// Rounds half-way cases toward `+Infinity`.
///
/// Inputs in `[-0.5, 0)` round to `-0`. Non-finite values, zeros and
/// magnitudes at or above `2^52` (already integral) are returned as is.
pub fn round(x: f64) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    if x > 0.0 && x < 0.5 {
        return 0.0;
    }
    if x < 0.0 && x >= -0.5 {
        return -0.0;
    }
    let r = floor(x);
    // x - r is exact here, unlike x + 0.5 which can round up at
    // 0.5 - ulp.
    if x - r >= 0.5 { r + 1.0 } else { r }
}

/// `1` for positive, `-1` for negative, `x` itself for `±0`, NaN
/// otherwise.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else if x == 0.0 {
        x
    } else {
        f64::NAN
    }
}

/// Integer part of `x`, rounding toward zero.
pub fn trunc(x: f64) -> f64 {
    if x > 0.0 {
        floor(x)
    } else if x < 0.0 {
        ceil(x)
    } else if x == 0.0 {
        x
    } else {
        f64::NAN
    }
}
