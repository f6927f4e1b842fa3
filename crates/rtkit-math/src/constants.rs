//! Values installed on the runtime's `Math` object.

/// Euler's number.
pub const E: f64 = 2.718_281_828_459_045;

/// Natural logarithm of 10.
pub const LN10: f64 = 2.302_585_092_994_046;

/// Natural logarithm of 2.
pub const LN2: f64 = 0.693_147_180_559_945_3;

/// Base-2 logarithm of e.
pub const LOG2E: f64 = 1.442_695_040_888_963_4;

/// Base-10 logarithm of e.
pub const LOG10E: f64 = 0.434_294_481_903_251_8;

/// Ratio of a circle's circumference to its diameter.
pub const PI: f64 = 3.141_592_653_589_793;

/// Square root of 1/2.
pub const SQRT1_2: f64 = 0.707_106_781_186_547_6;

/// Square root of 2.
pub const SQRT2: f64 = 1.414_213_562_373_095_1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_match_platform_values() {
        assert_eq!(E, std::f64::consts::E);
        assert_eq!(LN10, std::f64::consts::LN_10);
        assert_eq!(LN2, std::f64::consts::LN_2);
        assert_eq!(LOG2E, std::f64::consts::LOG2_E);
        assert_eq!(LOG10E, std::f64::consts::LOG10_E);
        assert_eq!(PI, std::f64::consts::PI);
        assert_eq!(SQRT1_2, std::f64::consts::FRAC_1_SQRT_2);
        assert_eq!(SQRT2, std::f64::consts::SQRT_2);
    }
}
