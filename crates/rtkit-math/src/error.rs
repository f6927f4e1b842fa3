use std::fmt;

/// A host value could not be converted to a number.
///
/// Numeric builtins never raise errors of their own; this is the only
/// failure they report, and it is passed through exactly as the
/// conversion produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The value has no numeric interpretation (e.g. a structured value
    /// without a primitive form).
    NotPrimitive(String),
    /// The host's own conversion hook failed.
    Host(String),
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionError::NotPrimitive(what) => {
                write!(f, "cannot convert {what} to a number")
            }
            CoercionError::Host(msg) => write!(f, "numeric conversion failed: {msg}"),
        }
    }
}

impl std::error::Error for CoercionError {}

pub type Result<T> = std::result::Result<T, CoercionError>;
