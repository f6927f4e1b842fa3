//! Table-driven sine, cosine and tangent.
//!
//! # Algorithm
//!
//! 1. Reduce `x` to the first quadrant `[0, π/2]`, counting quadrants in
//!    `phase`. π/2 is split into a 26-bit head and a tail so that
//!    `multiple * head` is exact. Arguments beyond `2^27` are first
//!    brought down in coarse steps of `2^26` quadrants.
//! 2. For odd quadrants, mirror to `π/2 - x`.
//! 3. Look up the two samples around `x` and their derivatives
//!    (`d/dx sin = cos`, pre-multiplied by the sample interval).
//! 4. Cubic Hermite interpolation between the two samples.
//! 5. Negate in the third and fourth quadrant, then add `+0` so the
//!    result is never `-0`.

use std::f64::consts::{FRAC_2_PI, FRAC_PI_2};
use std::sync::LazyLock;

use crate::rounding::floor;

/// Number of sample intervals over `[0, π/2]`.
pub const SAMPLES: usize = 1800;

const S26: f64 = 67_108_864.0;
const TWO_STEP_THRESHOLD: f64 = 134_217_728.0;
const INVERSE_PI_HALF_S26: f64 = FRAC_2_PI / S26;

/// π/2 rounded up.
const PI_HALF: f64 = f64::from_bits(0x3FF9_21FB_5444_2D19);
/// High part of π/2 with only 26 significant mantissa bits.
const PI_HALF_1: f64 = f64::from_bits(0x3FF9_21FB_5400_0000);
/// Low part, `PI_HALF_1 + PI_HALF_2 < PI_HALF`.
const PI_HALF_2: f64 = f64::from_bits(0x3E11_0B46_11A6_2633);

/// Immutable sample tables, built once per process.
struct TrigTables {
    sin: Vec<f64>,
    cos_interval: Vec<f64>,
    index_convert: f64,
}

impl TrigTables {
    fn build() -> Self {
        let interval = FRAC_PI_2 / SAMPLES as f64;
        // Two extra samples: the mirrored index of a slightly negative
        // reduced argument lands on SAMPLES and reads SAMPLES + 1.
        let len = SAMPLES + 2;
        let mut sin = Vec::with_capacity(len);
        let mut cos_interval = Vec::with_capacity(len);
        for i in 0..len {
            let x = i as f64 * interval;
            sin.push(x.sin());
            cos_interval.push(x.cos() * interval);
        }
        tracing::debug!(samples = SAMPLES, "built trigonometric sample tables");
        Self {
            sin,
            cos_interval,
            index_convert: SAMPLES as f64 / FRAC_PI_2,
        }
    }
}

static TABLES: LazyLock<TrigTables> = LazyLock::new(TrigTables::build);

/// Forces table construction. Hosts call this during startup so the
/// first `sin`/`cos` does not pay for it.
pub fn warm_up() {
    LazyLock::force(&TABLES);
}

/// Sine of `x` (radians). `sin(-0)` is `-0`; non-finite input is NaN.
///
/// Negative arguments are evaluated as `-sin(-x)` so that `sin` and
/// `cos` of the same angle always share one reduced argument.
pub fn sin(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    if !x.is_finite() {
        return f64::NAN;
    }
    if x < 0.0 {
        return -interpolate(-x, 0) + 0.0;
    }
    interpolate(x, 0)
}

/// Cosine of `x` (radians). Non-finite input is NaN.
pub fn cos(x: f64) -> f64 {
    let x = x.abs();
    if !x.is_finite() {
        return f64::NAN;
    }
    interpolate(x, 1)
}

/// `sin(x) / cos(x)`.
pub fn tan(x: f64) -> f64 {
    sin(x) / cos(x)
}

/// Reduces finite `x` into `[0, π/2]` and returns it with the number of
/// quadrants removed.
///
/// The coarse loop runs only above `2^27`. Each step subtracts a
/// multiple of `2^26` quadrants that is non-zero (because
/// `2^27 · 2/π / 2^26 > 1`) and within `(1 ± π/4)·|x|`, so `|x|` shrinks
/// by at least a factor `π/4` per step and drops under the threshold.
fn reduce(mut x: f64) -> (f64, i64) {
    if (0.0..=PI_HALF).contains(&x) {
        return (x, 0);
    }
    while !(-TWO_STEP_THRESHOLD..=TWO_STEP_THRESHOLD).contains(&x) {
        let multiple = floor(x * INVERSE_PI_HALF_S26) * S26;
        let next = x - multiple * PI_HALF_1 - multiple * PI_HALF_2;
        debug_assert!(next.abs() < x.abs(), "coarse reduction stalled at {x}");
        x = next;
    }
    let multiple = floor(x * FRAC_2_PI);
    x = x - multiple * PI_HALF_1 - multiple * PI_HALF_2;
    (x, multiple as i64)
}

fn interpolate(x: f64, phase: i64) -> f64 {
    let (x, quadrants) = reduce(x);
    let phase = phase + quadrants;
    let tables = &*TABLES;

    let mut double_index = x * tables.index_convert;
    if phase & 1 != 0 {
        double_index = SAMPLES as f64 - double_index;
    }
    // Truncates toward zero; a slightly negative index clamps to 0.
    let index = (double_index as usize).min(SAMPLES);
    let t1 = double_index - index as f64;
    let t2 = 1.0 - t1;

    let y1 = tables.sin[index];
    let y2 = tables.sin[index + 1];
    let dy = y2 - y1;
    let c1 = tables.cos_interval[index];
    let c2 = tables.cos_interval[index + 1];

    let value = t2 * y1 + t1 * y2 + t1 * t2 * ((c1 - dy) * t2 + (dy - c2) * t1);
    let sign = if phase & 2 != 0 { -1.0 } else { 1.0 };
    value * sign + 0.0
}
