//! `max`, `min` and `hypot` over any number of arguments.

/// Two-argument maximum. NaN wins; `max2(+0, -0)` is `+0` in either
/// order.
pub fn max2(a: f64, b: f64) -> f64 {
    if b > a {
        return b;
    }
    if a > b {
        return a;
    }
    if a == b {
        return if a == 0.0 && a.is_sign_negative() { b } else { a };
    }
    f64::NAN
}

/// Two-argument minimum. NaN wins; `min2(+0, -0)` is `-0` in either
/// order.
pub fn min2(a: f64, b: f64) -> f64 {
    if b > a {
        return a;
    }
    if a > b {
        return b;
    }
    if a == b {
        return if a == 0.0 && a.is_sign_negative() { a } else { b };
    }
    f64::NAN
}

/// N-ary maximum. `max(&[])` is `-Infinity`.
pub fn max(values: &[f64]) -> f64 {
    if let [a, b] = *values {
        return max2(a, b);
    }
    values.iter().fold(f64::NEG_INFINITY, |r, &n| {
        if n.is_nan() || n > r || (r == 0.0 && n == 0.0 && r.is_sign_negative()) {
            n
        } else {
            r
        }
    })
}

/// N-ary minimum. `min(&[])` is `+Infinity`.
pub fn min(values: &[f64]) -> f64 {
    if let [a, b] = *values {
        return min2(a, b);
    }
    values.iter().fold(f64::INFINITY, |r, &n| {
        if n.is_nan() || n < r || (r == 0.0 && n == 0.0 && n.is_sign_negative()) {
            n
        } else {
            r
        }
    })
}

/// Square root of the sum of squares.
///
/// An infinite argument anywhere gives `+Infinity`, even alongside NaN.
/// Otherwise every argument is scaled by the largest magnitude before
/// squaring so that neither overflow nor underflow occurs, and the
/// squares are accumulated with Kahan compensation.
pub fn hypot(values: &[f64]) -> f64 {
    let mut max = 0.0_f64;
    for &n in values {
        if n.is_infinite() {
            return f64::INFINITY;
        }
        let n = n.abs();
        if n > max {
            max = n;
        }
    }
    if max == 0.0 {
        max = 1.0;
    }

    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for &n in values {
        let n = n.abs() / max;
        let summand = n * n - compensation;
        let preliminary = sum + summand;
        compensation = (preliminary - sum) - summand;
        sum = preliminary;
    }
    sum.sqrt() * max
}
