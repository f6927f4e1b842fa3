//! Runtime numeric builtins with exact edge-case behavior.
//!
//! Every function here follows the runtime's contract for signed zero,
//! NaN propagation and overflow rather than the platform's `libm`
//! defaults. Sine and cosine are evaluated from process-wide sample
//! tables with cubic Hermite interpolation after a two-part reduction
//! to `[0, π/2]`.
//!
//! Zero I/O. Host values enter through the [`ToNumber`] trait; the
//! name-based surface a runtime installs lives in [`builtins`].

pub mod bits;
pub mod builtins;
pub mod cbrt;
pub mod coerce;
pub mod compare;
pub mod constants;
pub mod elementary;
pub mod error;
pub mod random;
pub mod rounding;
pub mod series;
pub mod trig;

pub use bits::{clz32, fround, imul};
pub use builtins::{MathConstant, MathFunction, UnknownFunction};
pub use cbrt::cbrt;
pub use coerce::{ToNumber, string_to_number, to_int32, to_uint32};
pub use compare::{hypot, max, max2, min, min2};
pub use constants::{E, LN2, LN10, LOG2E, LOG10E, PI, SQRT1_2, SQRT2};
pub use elementary::{
    acos, acosh, asin, asinh, atan, atan2, atanh, cosh, exp, log, log2, log10, pow, sinh, sqrt,
    tanh,
};
pub use error::{CoercionError, Result};
pub use random::{MathRandom, random, seed_random};
pub use rounding::{abs, ceil, floor, round, sign, trunc};
pub use series::{expm1, log1p};
pub use trig::{cos, sin, tan, warm_up};
