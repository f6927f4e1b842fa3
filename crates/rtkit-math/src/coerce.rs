//! Conversion of host values to numbers.
//!
//! A hosting runtime implements [`ToNumber`] for its own value type;
//! the impls here cover Rust primitives, strings (runtime string
//! literal grammar), `Option` as the undefined value, and JSON.

use crate::error::{CoercionError, Result};

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Converts a value to an IEEE-754 double the way the runtime's
/// abstract `ToNumber` operation does.
pub trait ToNumber {
    fn to_number(&self) -> Result<f64>;
}

impl<T: ToNumber + ?Sized> ToNumber for &T {
    fn to_number(&self) -> Result<f64> {
        (**self).to_number()
    }
}

impl ToNumber for f64 {
    fn to_number(&self) -> Result<f64> {
        Ok(*self)
    }
}

impl ToNumber for f32 {
    fn to_number(&self) -> Result<f64> {
        Ok(f64::from(*self))
    }
}

macro_rules! impl_to_number_for_int {
    ($($t:ty),*) => {
        $(
            impl ToNumber for $t {
                fn to_number(&self) -> Result<f64> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

impl_to_number_for_int!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl ToNumber for bool {
    fn to_number(&self) -> Result<f64> {
        Ok(if *self { 1.0 } else { 0.0 })
    }
}

impl ToNumber for str {
    fn to_number(&self) -> Result<f64> {
        Ok(string_to_number(self))
    }
}

impl ToNumber for String {
    fn to_number(&self) -> Result<f64> {
        Ok(string_to_number(self))
    }
}

/// `None` stands for the undefined value, which converts to NaN.
impl<T: ToNumber> ToNumber for Option<T> {
    fn to_number(&self) -> Result<f64> {
        match self {
            Some(v) => v.to_number(),
            None => Ok(f64::NAN),
        }
    }
}

/// JSON null is `0`. Arrays and objects carry no conversion hook and
/// are rejected.
impl ToNumber for serde_json::Value {
    fn to_number(&self) -> Result<f64> {
        use serde_json::Value;
        match self {
            Value::Null => Ok(0.0),
            Value::Bool(b) => b.to_number(),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| CoercionError::NotPrimitive(format!("number {n}"))),
            Value::String(s) => Ok(string_to_number(s)),
            Value::Array(_) => Err(CoercionError::NotPrimitive("array".to_string())),
            Value::Object(_) => Err(CoercionError::NotPrimitive("object".to_string())),
        }
    }
}

/// Whitespace and line terminators the runtime strips around numeric
/// strings. NEL (U+0085) is Unicode whitespace but not runtime whitespace.
fn is_runtime_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Parses a string with the runtime's numeric literal grammar.
///
/// Surrounding whitespace is ignored and the empty string is `0`.
/// Accepts `Infinity` with an optional sign, unsigned `0x`/`0o`/`0b`
/// integers, and signed decimal literals with optional fraction and
/// exponent. Anything else is NaN.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_runtime_whitespace);
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix_integer(&s[2..], radix);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Accumulates in `f64` so that literals wider than 64 bits still
/// round instead of failing.
fn parse_radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    value
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Modular conversion to an unsigned 32-bit integer.
///
/// NaN and the infinities map to `0`; everything else is truncated
/// toward zero and reduced modulo `2^32`.
pub fn to_uint32(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    x.trunc().rem_euclid(TWO_POW_32) as u32
}

/// Modular conversion to a signed 32-bit integer.
pub fn to_int32(x: f64) -> i32 {
    to_uint32(x) as i32
}
