//! 32-bit integer views of doubles.

use crate::coerce::{to_int32, to_uint32};

/// Number of leading zero bits in the 32-bit unsigned form of `x`.
/// `clz32(0)` is `32`.
pub fn clz32(x: f64) -> u32 {
    let mut x = to_uint32(x);
    if x == 0 {
        return 32;
    }
    let mut result = 0;
    if x & 0xFFFF_0000 == 0 {
        x <<= 16;
        result += 16;
    }
    if x & 0xFF00_0000 == 0 {
        x <<= 8;
        result += 8;
    }
    if x & 0xF000_0000 == 0 {
        x <<= 4;
        result += 4;
    }
    if x & 0xC000_0000 == 0 {
        x <<= 2;
        result += 2;
    }
    if x & 0x8000_0000 == 0 {
        result += 1;
    }
    result
}

/// C-style 32-bit multiplication: both operands are taken modulo `2^32`
/// as signed integers and the product wraps.
pub fn imul(a: f64, b: f64) -> i32 {
    to_int32(a).wrapping_mul(to_int32(b))
}

/// Nearest single-precision value, widened back to double.
pub fn fround(x: f64) -> f64 {
    f64::from(x as f32)
}
