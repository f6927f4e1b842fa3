//! Name-based surface of the numeric builtins, as a runtime installs
//! them on its `Math` object.
//!
//! [`MathFunction::call`] takes host values, converts them with
//! [`ToNumber`] left to right and evaluates. The first conversion
//! failure is returned unchanged; no builtin adds an error of its own.

use std::fmt;
use std::str::FromStr;

use crate::coerce::ToNumber;
use crate::error::Result;
use crate::{bits, cbrt, compare, constants, elementary, random, rounding, series, trig};

/// One of the functions installed on `Math`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Abs,
    Acos,
    Asin,
    Atan,
    Atan2,
    Ceil,
    Cos,
    Exp,
    Floor,
    Log,
    Round,
    Sin,
    Sqrt,
    Tan,
    Pow,
    Max,
    Min,
    Imul,
    Sign,
    Trunc,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Log10,
    Log2,
    Hypot,
    Fround,
    Clz32,
    Cbrt,
    Log1p,
    Expm1,
    Random,
}

impl MathFunction {
    pub const ALL: [MathFunction; 35] = [
        MathFunction::Abs,
        MathFunction::Acos,
        MathFunction::Asin,
        MathFunction::Atan,
        MathFunction::Atan2,
        MathFunction::Ceil,
        MathFunction::Cos,
        MathFunction::Exp,
        MathFunction::Floor,
        MathFunction::Log,
        MathFunction::Round,
        MathFunction::Sin,
        MathFunction::Sqrt,
        MathFunction::Tan,
        MathFunction::Pow,
        MathFunction::Max,
        MathFunction::Min,
        MathFunction::Imul,
        MathFunction::Sign,
        MathFunction::Trunc,
        MathFunction::Sinh,
        MathFunction::Cosh,
        MathFunction::Tanh,
        MathFunction::Asinh,
        MathFunction::Acosh,
        MathFunction::Atanh,
        MathFunction::Log10,
        MathFunction::Log2,
        MathFunction::Hypot,
        MathFunction::Fround,
        MathFunction::Clz32,
        MathFunction::Cbrt,
        MathFunction::Log1p,
        MathFunction::Expm1,
        MathFunction::Random,
    ];

    /// Property name on `Math`.
    pub fn name(self) -> &'static str {
        match self {
            MathFunction::Abs => "abs",
            MathFunction::Acos => "acos",
            MathFunction::Asin => "asin",
            MathFunction::Atan => "atan",
            MathFunction::Atan2 => "atan2",
            MathFunction::Ceil => "ceil",
            MathFunction::Cos => "cos",
            MathFunction::Exp => "exp",
            MathFunction::Floor => "floor",
            MathFunction::Log => "log",
            MathFunction::Round => "round",
            MathFunction::Sin => "sin",
            MathFunction::Sqrt => "sqrt",
            MathFunction::Tan => "tan",
            MathFunction::Pow => "pow",
            MathFunction::Max => "max",
            MathFunction::Min => "min",
            MathFunction::Imul => "imul",
            MathFunction::Sign => "sign",
            MathFunction::Trunc => "trunc",
            MathFunction::Sinh => "sinh",
            MathFunction::Cosh => "cosh",
            MathFunction::Tanh => "tanh",
            MathFunction::Asinh => "asinh",
            MathFunction::Acosh => "acosh",
            MathFunction::Atanh => "atanh",
            MathFunction::Log10 => "log10",
            MathFunction::Log2 => "log2",
            MathFunction::Hypot => "hypot",
            MathFunction::Fround => "fround",
            MathFunction::Clz32 => "clz32",
            MathFunction::Cbrt => "cbrt",
            MathFunction::Log1p => "log1p",
            MathFunction::Expm1 => "expm1",
            MathFunction::Random => "random",
        }
    }

    /// Declared parameter count (the function's `length`).
    pub fn length(self) -> usize {
        match self {
            MathFunction::Random => 0,
            MathFunction::Atan2
            | MathFunction::Pow
            | MathFunction::Max
            | MathFunction::Min
            | MathFunction::Imul
            | MathFunction::Hypot => 2,
            _ => 1,
        }
    }

    /// Whether the function folds over any number of arguments.
    pub fn is_variadic(self) -> bool {
        matches!(
            self,
            MathFunction::Max | MathFunction::Min | MathFunction::Hypot
        )
    }

    /// Converts `args` and evaluates. Missing arguments are undefined
    /// (NaN); extra arguments of fixed-arity functions are still
    /// converted, matching argument evaluation order.
    pub fn call<T: ToNumber>(self, args: &[T]) -> Result<f64> {
        if self == MathFunction::Hypot {
            return call_hypot(args);
        }

        let numbers = args
            .iter()
            .map(ToNumber::to_number)
            .collect::<Result<Vec<f64>>>()?;
        let arg = |i: usize| numbers.get(i).copied().unwrap_or(f64::NAN);

        let value = match self {
            MathFunction::Abs => rounding::abs(arg(0)),
            MathFunction::Acos => elementary::acos(arg(0)),
            MathFunction::Asin => elementary::asin(arg(0)),
            MathFunction::Atan => elementary::atan(arg(0)),
            MathFunction::Atan2 => elementary::atan2(arg(0), arg(1)),
            MathFunction::Ceil => rounding::ceil(arg(0)),
            MathFunction::Cos => trig::cos(arg(0)),
            MathFunction::Exp => elementary::exp(arg(0)),
            MathFunction::Floor => rounding::floor(arg(0)),
            MathFunction::Log => elementary::log(arg(0)),
            MathFunction::Round => rounding::round(arg(0)),
            MathFunction::Sin => trig::sin(arg(0)),
            MathFunction::Sqrt => elementary::sqrt(arg(0)),
            MathFunction::Tan => trig::tan(arg(0)),
            MathFunction::Pow => elementary::pow(arg(0), arg(1)),
            MathFunction::Max => compare::max(&numbers),
            MathFunction::Min => compare::min(&numbers),
            MathFunction::Imul => f64::from(bits::imul(arg(0), arg(1))),
            MathFunction::Sign => rounding::sign(arg(0)),
            MathFunction::Trunc => rounding::trunc(arg(0)),
            MathFunction::Sinh => elementary::sinh(arg(0)),
            MathFunction::Cosh => elementary::cosh(arg(0)),
            MathFunction::Tanh => elementary::tanh(arg(0)),
            MathFunction::Asinh => elementary::asinh(arg(0)),
            MathFunction::Acosh => elementary::acosh(arg(0)),
            MathFunction::Atanh => elementary::atanh(arg(0)),
            MathFunction::Log10 => elementary::log10(arg(0)),
            MathFunction::Log2 => elementary::log2(arg(0)),
            MathFunction::Fround => bits::fround(arg(0)),
            MathFunction::Clz32 => f64::from(bits::clz32(arg(0))),
            MathFunction::Cbrt => cbrt::cbrt(arg(0)),
            MathFunction::Log1p => series::log1p(arg(0)),
            MathFunction::Expm1 => series::expm1(arg(0)),
            MathFunction::Random => random::random(),
            MathFunction::Hypot => compare::hypot(&numbers),
        };
        Ok(value)
    }
}

/// Stops converting at the first infinite argument.
fn call_hypot<T: ToNumber>(args: &[T]) -> Result<f64> {
    let mut numbers = Vec::with_capacity(args.len());
    for arg in args {
        let n = arg.to_number()?;
        if n.is_infinite() {
            return Ok(f64::INFINITY);
        }
        numbers.push(n);
    }
    Ok(compare::hypot(&numbers))
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a name that is not a `Math` function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFunction(pub String);

impl fmt::Display for UnknownFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Math.{} is not a function", self.0)
    }
}

impl std::error::Error for UnknownFunction {}

impl FromStr for MathFunction {
    type Err = UnknownFunction;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MathFunction::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFunction(s.to_string()))
    }
}

/// One of the value properties installed on `Math`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MathConstant {
    E,
    Ln10,
    Ln2,
    Log2E,
    Log10E,
    Pi,
    Sqrt1_2,
    Sqrt2,
}

impl MathConstant {
    pub const ALL: [MathConstant; 8] = [
        MathConstant::E,
        MathConstant::Ln10,
        MathConstant::Ln2,
        MathConstant::Log2E,
        MathConstant::Log10E,
        MathConstant::Pi,
        MathConstant::Sqrt1_2,
        MathConstant::Sqrt2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MathConstant::E => "E",
            MathConstant::Ln10 => "LN10",
            MathConstant::Ln2 => "LN2",
            MathConstant::Log2E => "LOG2E",
            MathConstant::Log10E => "LOG10E",
            MathConstant::Pi => "PI",
            MathConstant::Sqrt1_2 => "SQRT1_2",
            MathConstant::Sqrt2 => "SQRT2",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            MathConstant::E => constants::E,
            MathConstant::Ln10 => constants::LN10,
            MathConstant::Ln2 => constants::LN2,
            MathConstant::Log2E => constants::LOG2E,
            MathConstant::Log10E => constants::LOG10E,
            MathConstant::Pi => constants::PI,
            MathConstant::Sqrt1_2 => constants::SQRT1_2,
            MathConstant::Sqrt2 => constants::SQRT2,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        MathConstant::ALL.into_iter().find(|c| c.name() == name)
    }
}
