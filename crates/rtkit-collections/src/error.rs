use std::fmt;

use crate::value::Value;

/// Errors raised by the collection builtins and the iteration protocol.
///
/// Every variant corresponds to a runtime `TypeError`, except
/// [`Thrown`](CollectionError::Thrown), which carries a value raised
/// by host code (a callback, an `@@iterator` or `next` closure) back
/// to the caller unchanged.
#[derive(Debug, Clone)]
pub enum CollectionError {
    /// A constructor source has no callable `@@iterator`.
    NotIterable(String),
    /// `@@iterator` returned something other than an object.
    NotAnIterator(String),
    IteratorResultNotObject(String),
    /// A Map source produced an entry that is not an object.
    IteratorValueNotObject(String),
    IncompatibleReceiver {
        method: &'static str,
        receiver: String,
    },
    NotCallable(String),
    Thrown(Value),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::NotIterable(v) => write!(f, "{v} is not iterable"),
            CollectionError::NotAnIterator(v) => write!(f, "{v} is not an iterator"),
            CollectionError::IteratorResultNotObject(v) => {
                write!(f, "iterator result {v} is not an object")
            }
            CollectionError::IteratorValueNotObject(v) => {
                write!(f, "iterator value {v} is not an entry object")
            }
            CollectionError::IncompatibleReceiver { method, receiver } => {
                write!(f, "method {method} called on incompatible receiver {receiver}")
            }
            CollectionError::NotCallable(v) => write!(f, "{v} is not a function"),
            CollectionError::Thrown(v) => write!(f, "uncaught {v}"),
        }
    }
}

impl std::error::Error for CollectionError {}

pub type Result<T> = std::result::Result<T, CollectionError>;
