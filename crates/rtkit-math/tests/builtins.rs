//! Integration tests exercising the public `Math` surface end to end:
//! name lookup → coercion → evaluation.

use rtkit_math::{
    CoercionError, MathConstant, MathFunction, ToNumber, cbrt, cos, hypot, max, min, seed_random,
    sign, sin,
};

fn call(name: &str, args: &[f64]) -> f64 {
    name.parse::<MathFunction>()
        .expect("known function")
        .call(args)
        .expect("numbers always convert")
}

fn is_neg_zero(x: f64) -> bool {
    x == 0.0 && x.is_sign_negative()
}

#[test]
fn max_min_signed_zero() {
    let r = call("max", &[0.0, -0.0]);
    assert!(r == 0.0 && r.is_sign_positive());
    let r = call("min", &[0.0, -0.0]);
    assert!(is_neg_zero(r));

    // N-ary path applies the same rule at each step.
    assert!(max(&[-0.0, -0.0, 0.0]).is_sign_positive());
    assert!(is_neg_zero(min(&[0.0, 0.0, -0.0])));
}

#[test]
fn sign_contract() {
    assert!(is_neg_zero(sign(-0.0)));
    assert!(sign(0.0) == 0.0 && sign(0.0).is_sign_positive());
    assert!(sign(f64::NAN).is_nan());
    assert_eq!(sign(-5.0), -1.0);
    assert_eq!(call("sign", &[-5.0]), -1.0);
}

#[test]
fn trig_bounded_with_unit_pythagorean_identity() {
    let mut x = -1e7;
    while x < 1e7 {
        let s = sin(x);
        let c = cos(x);
        assert!(s.abs() <= 1.0 + f64::EPSILON);
        assert!(c.abs() <= 1.0 + f64::EPSILON);
        assert!((s * s + c * c - 1.0).abs() < 1e-12, "x = {x}");
        x += 9_876.54321;
    }
}

#[test]
fn cbrt_cubes_back() {
    for x in [-1e200, -343.0, -1e-7, 1e-250, 0.125, 10.0, 6.02e23] {
        let r = cbrt(x);
        assert!(((r * r * r - x) / x).abs() < 1e-13, "x = {x}, r = {r}");
    }
}

#[test]
fn hypot_contract() {
    assert_eq!(call("hypot", &[3.0, 4.0]), 5.0);
    assert_eq!(call("hypot", &[f64::INFINITY, f64::NAN]), f64::INFINITY);
    assert!(hypot(&[1e300, 1e300]).is_finite());
    assert!(call("hypot", &[1e300, 1e300]).is_finite());
}

#[test]
fn random_is_reproducible_after_seeding() {
    seed_random(1234);
    let a: Vec<f64> = (0..5).map(|_| call("random", &[])).collect();
    seed_random(1234);
    let b: Vec<f64> = (0..5).map(|_| call("random", &[])).collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn every_function_accepts_its_declared_length() {
    for f in MathFunction::ALL {
        let args = vec![0.5; f.length()];
        let result = f.call(&args).expect("numbers always convert");
        assert!(!result.is_nan() || matches!(f, MathFunction::Acosh), "{f} gave NaN");
    }
}

#[test]
fn coercion_failure_is_the_only_error() {
    struct Throws;
    impl ToNumber for Throws {
        fn to_number(&self) -> rtkit_math::Result<f64> {
            Err(CoercionError::Host("boom".to_string()))
        }
    }
    for f in MathFunction::ALL {
        if f == MathFunction::Random {
            continue;
        }
        assert_eq!(
            f.call(&[Throws]),
            Err(CoercionError::Host("boom".to_string())),
            "{f}"
        );
    }
}

#[test]
fn json_arguments_convert_like_runtime_values() {
    let args = [serde_json::json!("9"), serde_json::json!(null)];
    assert_eq!(MathFunction::Max.call(&args), Ok(9.0));
    let err = MathFunction::Abs.call(&[serde_json::json!([1])]).unwrap_err();
    assert_eq!(err, CoercionError::NotPrimitive("array".to_string()));
}

#[test]
fn constants_table() {
    let names: Vec<&str> = MathConstant::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        ["E", "LN10", "LN2", "LOG2E", "LOG10E", "PI", "SQRT1_2", "SQRT2"]
    );
}
