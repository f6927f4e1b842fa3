//! Insertion-ordered `Set` and `Map` with live iteration.
//!
//! Both collections sit on one table: an arena of entries addressed by
//! position plus a hash index from key to slot. Deletion leaves a
//! tombstone, so iterators walking the arena by position observe
//! additions made during the walk and skip entries deleted before they
//! reach them.
//!
//! Two layers:
//! - typed handles [`Set`] and [`Map`] for Rust callers;
//! - a host value model ([`Value`], [`Object`]) with receiver-checked
//!   [`Builtin`] methods and the constructor/iteration protocol, for a
//!   runtime that exposes the collections to scripts.
//!
//! Single-threaded. Handles are `Rc`-based and neither `Send` nor `Sync`.

pub mod builtins;
mod cursor;
pub mod error;
pub mod map;
pub mod set;
mod table;
pub mod value;

pub use builtins::{Builtin, CollectionKind, construct, construct_into, get_iterator, iterator_step};
pub use error::{CollectionError, Result};
pub use map::Map;
pub use set::Set;
pub use value::{CollectionIterator, Function, HostFn, ITERATOR_KEY, IterationKind, Object, ObjectKind, Value};
