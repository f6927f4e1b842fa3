/// Bias added to one third of the high word; puts the initial guess
/// within a few percent of the true root.
const CBRT_BIAS: u32 = 0x2A9F_7893;

/// Cube root.
///
/// `±0`, `±Infinity` and NaN are returned unchanged. Negative inputs
/// are computed as `-cbrt(-x)`.
pub fn cbrt(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    if x >= 0.0 { cube_root(x) } else { -cube_root(-x) }
}

/// Exponent-bit initial guess followed by four Newton steps.
fn cube_root(x: f64) -> f64 {
    let hi = (x.to_bits() >> 32) as u32;
    let mut approx = f64::from_bits(u64::from(hi / 3 + CBRT_BIAS) << 32);
    for _ in 0..4 {
        approx = newton_step(x, approx);
    }
    approx
}

fn newton_step(x: f64, approx: f64) -> f64 {
    (1.0 / 3.0) * (x / (approx * approx) + 2.0 * approx)
}
