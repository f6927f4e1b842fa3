//! Exponential, logarithmic, power, inverse-trigonometric and
//! hyperbolic functions.
//!
//! The platform routines are used where their edge cases already agree
//! with the runtime; `pow` and the hyperbolic family add the runtime's
//! own rules on top.

use crate::constants::{LN2, LOG2E, LOG10E};
use crate::rounding::{abs, sign};

/// Above this magnitude `tanh` is `±1` to double precision, and the
/// exponential form would divide infinity by infinity.
const TANH_SATURATION: f64 = 22.0;

/// Above this, `x*x + 1` rounds to `x*x` and `asinh` is `ln(2x)`.
const ASINH_LARGE: f64 = 268_435_456.0;

pub fn acos(x: f64) -> f64 {
    x.acos()
}

pub fn asin(x: f64) -> f64 {
    x.asin()
}

pub fn atan(x: f64) -> f64 {
    x.atan()
}

/// Angle of the point `(x, y)`; argument order follows the runtime
/// (`y` first).
pub fn atan2(y: f64, x: f64) -> f64 {
    y.atan2(x)
}

pub fn exp(x: f64) -> f64 {
    x.exp()
}

/// Natural logarithm.
pub fn log(x: f64) -> f64 {
    x.ln()
}

pub fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

/// `base^exponent`.
///
/// Differs from `powf` in two places: a NaN exponent always gives NaN
/// (even for base `1`), and `(±1)^(±Infinity)` is NaN.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() {
        return f64::NAN;
    }
    if exponent.is_infinite() && base.abs() == 1.0 {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Idempotent for NaN, `±0` and `±Infinity`.
pub fn sinh(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    (exp(x) - exp(-x)) / 2.0
}

pub fn cosh(x: f64) -> f64 {
    if !x.is_finite() {
        return abs(x);
    }
    (exp(x) + exp(-x)) / 2.0
}

/// Idempotent for `±0`, `±1` at the infinities and beyond saturation.
pub fn tanh(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    if !x.is_finite() || x.abs() > TANH_SATURATION {
        return sign(x);
    }
    let exp1 = exp(x);
    let exp2 = exp(-x);
    (exp1 - exp2) / (exp1 + exp2)
}

/// Idempotent for NaN, `±0` and `±Infinity`. Negative inputs are
/// computed as `-asinh(-x)` to avoid cancellation.
pub fn asinh(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    if x < 0.0 {
        return -asinh(-x);
    }
    if x > ASINH_LARGE {
        return log(x) + LN2;
    }
    log(x + sqrt(x * x + 1.0))
}

/// NaN below `1`; idempotent for NaN and `+Infinity`.
pub fn acosh(x: f64) -> f64 {
    if x < 1.0 {
        return f64::NAN;
    }
    if !x.is_finite() {
        return x;
    }
    log(x + sqrt(x + 1.0) * sqrt(x - 1.0))
}

/// Idempotent for `±0`; NaN for non-finite input.
pub fn atanh(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    if !x.is_finite() {
        return f64::NAN;
    }
    0.5 * log((1.0 + x) / (1.0 - x))
}

/// `log(x) · log10(e)`.
pub fn log10(x: f64) -> f64 {
    log(x) * LOG10E
}

/// `log(x) · log2(e)`.
pub fn log2(x: f64) -> f64 {
    log(x) * LOG2E
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_pow_runtime_rules() {
        assert!(pow(1.0, f64::NAN).is_nan());
        assert!(pow(1.0, f64::INFINITY).is_nan());
        assert!(pow(-1.0, f64::NEG_INFINITY).is_nan());
        assert_eq!(pow(f64::NAN, 0.0), 1.0);
        assert_eq!(pow(2.0, 10.0), 1024.0);
        assert_eq!(pow(0.5, f64::INFINITY), 0.0);
        assert!(pow(-8.0, 1.0 / 3.0).is_nan());
        assert!(pow(-0.0, -1.0).is_sign_negative());
    }

    #[test]
    fn test_sinh_cosh() {
        assert!(sinh(-0.0).is_sign_negative());
        assert_eq!(sinh(f64::NEG_INFINITY), f64::NEG_INFINITY);
        assert!(sinh(f64::NAN).is_nan());
        assert_relative_eq!(sinh(1.0), 1.0_f64.sinh(), max_relative = 1e-14);
        assert_eq!(cosh(f64::NEG_INFINITY), f64::INFINITY);
        assert!(cosh(f64::NAN).is_nan());
        assert_eq!(cosh(0.0), 1.0);
        assert_relative_eq!(cosh(-2.0), 2.0_f64.cosh(), max_relative = 1e-14);
    }

    #[test]
    fn test_tanh() {
        assert!(tanh(-0.0).is_sign_negative());
        assert_eq!(tanh(f64::INFINITY), 1.0);
        assert_eq!(tanh(f64::NEG_INFINITY), -1.0);
        assert_eq!(tanh(1000.0), 1.0);
        assert_eq!(tanh(-800.0), -1.0);
        assert!(tanh(f64::NAN).is_nan());
        assert_relative_eq!(tanh(0.5), 0.5_f64.tanh(), max_relative = 1e-14);
    }

    #[test]
    fn test_inverse_hyperbolics() {
        assert!(asinh(-0.0).is_sign_negative());
        assert_eq!(asinh(f64::INFINITY), f64::INFINITY);
        assert_relative_eq!(asinh(-2.0), (-2.0_f64).asinh(), max_relative = 1e-14);
        assert_relative_eq!(asinh(1e300), 1e300_f64.asinh(), max_relative = 1e-14);
        assert!(acosh(0.5).is_nan());
        assert_eq!(acosh(1.0), 0.0);
        assert_eq!(acosh(f64::INFINITY), f64::INFINITY);
        assert!(acosh(f64::NAN).is_nan());
        assert_relative_eq!(acosh(3.0), 3.0_f64.acosh(), max_relative = 1e-14);
        assert!(atanh(-0.0).is_sign_negative());
        assert!(atanh(f64::INFINITY).is_nan());
        assert_eq!(atanh(1.0), f64::INFINITY);
        assert_relative_eq!(atanh(0.5), 0.5_f64.atanh(), max_relative = 1e-14);
    }

    #[test]
    fn test_logarithms() {
        assert_abs_diff_eq!(log10(1000.0), 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(log2(8.0), 3.0, epsilon = 1e-15);
        assert_eq!(log10(0.0), f64::NEG_INFINITY);
        assert!(log2(-1.0).is_nan());
        assert_eq!(log(1.0), 0.0);
    }

    #[test]
    fn test_atan2_argument_order() {
        assert_abs_diff_eq!(atan2(1.0, 0.0), std::f64::consts::FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(atan2(0.0, -1.0), std::f64::consts::PI, epsilon = 1e-15);
        assert!(atan2(-0.0, 1.0).is_sign_negative());
    }
}
