//! `expm1` and `log1p` near zero.
//!
//! Close to zero, `exp(x) - 1` and `log(1 + x)` lose most of their
//! significant bits to cancellation. Inside each magnitude band a
//! truncated Taylor series with just enough terms is used instead;
//! outside the widest band the direct formula is accurate.

/// `e^x - 1`.
pub fn expm1(x: f64) -> f64 {
    let xabs = x.abs();
    if xabs < 2e-7 {
        x * (1.0 + x * (1.0 / 2.0))
    } else if xabs < 6e-5 {
        x * (1.0 + x * (1.0 / 2.0 + x * (1.0 / 6.0)))
    } else if xabs < 2e-2 {
        x * (1.0
            + x * (1.0 / 2.0
                + x * (1.0 / 6.0 + x * (1.0 / 24.0 + x * (1.0 / 120.0 + x * (1.0 / 720.0))))))
    } else {
        x.exp() - 1.0
    }
}

/// `ln(1 + x)`.
pub fn log1p(x: f64) -> f64 {
    let xabs = x.abs();
    if xabs < 1e-7 {
        x * (1.0 - x * (1.0 / 2.0))
    } else if xabs < 3e-5 {
        x * (1.0 - x * (1.0 / 2.0 - x * (1.0 / 3.0)))
    } else if xabs < 7e-3 {
        x * (1.0
            - x * (1.0 / 2.0
                - x * (1.0 / 3.0
                    - x * (1.0 / 4.0 - x * (1.0 / 5.0 - x * (1.0 / 6.0 - x * (1.0 / 7.0)))))))
    } else {
        (1.0 + x).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_expm1_bands_match_platform() {
        for x in [1e-10, 1.5e-7, 3e-6, 5e-5, 1e-3, 1.5e-2, 0.5, 3.0, -1e-10, -1e-4, -1e-2, -2.0] {
            assert_relative_eq!(expm1(x), x.exp_m1(), max_relative = 1e-14);
        }
    }

    #[test]
    fn test_log1p_bands_match_platform() {
        for x in [1e-10, 5e-8, 2e-5, 6e-3, 0.5, 10.0, -1e-10, -2e-5, -5e-3, -0.5] {
            assert_relative_eq!(log1p(x), x.ln_1p(), max_relative = 1e-14);
        }
    }

    #[test]
    fn test_edge_values() {
        assert!(expm1(-0.0).is_sign_negative());
        assert_eq!(expm1(f64::INFINITY), f64::INFINITY);
        assert_eq!(expm1(f64::NEG_INFINITY), -1.0);
        assert!(expm1(f64::NAN).is_nan());
        assert!(log1p(-0.0).is_sign_negative());
        assert_eq!(log1p(-1.0), f64::NEG_INFINITY);
        assert!(log1p(-2.0).is_nan());
        assert_eq!(log1p(f64::INFINITY), f64::INFINITY);
    }
}
