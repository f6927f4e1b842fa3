//! Host value model the collection builtins operate on.
//!
//! Values are cheap to clone. Objects are reference counted and compare
//! by identity; every other variant compares by content. Equality and
//! hashing follow SameValueZero, so a `Value` can key a [`Set`] or
//! [`Map`] directly.
//!
//! Reference cycles (a set that contains itself) are not collected.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::builtins::{self, Builtin};
use crate::cursor::Cursor;
use crate::error::{CollectionError, Result};
use crate::map::Map;
use crate::set::Set;

/// Property key under which an object exposes its iteration method.
pub const ITERATOR_KEY: &str = "@@iterator";

/// Signature of a function supplied by the host.
pub type HostFn = dyn Fn(&Value, &[Value]) -> Result<Value>;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Rc<str>),
    Object(Object),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_callable(&self) -> bool {
        self.as_object().is_some_and(Object::is_callable)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// Property read. Primitives have no properties here.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(o) => o.get(key),
            _ => Value::Undefined,
        }
    }

    /// Calls `self` with `this` and `args`, failing with
    /// [`CollectionError::NotCallable`] when `self` is not a function.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Value::Object(o) => match o.kind() {
                ObjectKind::Function(f) => f.call(this, args),
                _ => Err(CollectionError::NotCallable(self.to_string())),
            },
            _ => Err(CollectionError::NotCallable(self.to_string())),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(o) if o.is_callable() => "function",
            Value::Object(_) => "object",
        }
    }

    /// Converts to JSON. Sets become arrays of values and maps arrays of
    /// `[key, value]` pairs, both in iteration order. Values JSON cannot
    /// express (undefined, non-finite numbers, functions, iterators,
    /// cyclic references) become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut visiting = Vec::new();
        to_json_inner(self, &mut visiting)
    }
}

fn to_json_inner(value: &Value, visiting: &mut Vec<*const ObjectData>) -> serde_json::Value {
    use serde_json::Value as Json;

    match value {
        Value::Undefined | Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => Json::String(s.to_string()),
        Value::Object(o) => {
            let ptr = Rc::as_ptr(&o.0);
            if visiting.contains(&ptr) {
                return Json::Null;
            }
            visiting.push(ptr);
            let json = match o.kind() {
                ObjectKind::Ordinary => {
                    let fields = o
                        .0
                        .properties
                        .entries()
                        .map(|(k, v)| (k, to_json_inner(&v, visiting)))
                        .collect();
                    Json::Object(fields)
                }
                ObjectKind::Array(items) => {
                    let items = items.borrow().clone();
                    Json::Array(items.iter().map(|v| to_json_inner(v, visiting)).collect())
                }
                ObjectKind::Set(set) => {
                    Json::Array(set.values().map(|v| to_json_inner(&v, visiting)).collect())
                }
                ObjectKind::Map(map) => Json::Array(
                    map.entries()
                        .map(|(k, v)| {
                            Json::Array(vec![
                                to_json_inner(&k, visiting),
                                to_json_inner(&v, visiting),
                            ])
                        })
                        .collect(),
                ),
                ObjectKind::Function(_) | ObjectKind::Iterator(_) => Json::Null,
            };
            visiting.pop();
            json
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

impl From<&serde_json::Value> for Value {
    /// JSON arrays become array objects, JSON objects ordinary objects.
    fn from(json: &serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => Value::string(s.as_str()),
            Json::Array(items) => Value::Object(Object::array(items.iter().map(Value::from).collect())),
            Json::Object(fields) => {
                let object = Object::ordinary();
                for (k, v) in fields {
                    object.set_property(k.clone(), Value::from(v));
                }
                Value::Object(object)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from(&json)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Builtin> for Value {
    fn from(b: Builtin) -> Self {
        Value::Object(Object::function(Function::Native(b)))
    }
}

/// Bits used for SameValueZero: one NaN, one zero.
fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Undefined | Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::String(s) => s.hash(state),
            Value::Object(o) => Rc::as_ptr(&o.0).hash(state),
        }
    }
}

/// Runtime `ToString`-like rendering, used in error messages.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) if *n == 0.0 => f.write_str("0"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Object(o) => write!(f, "[object {}]", o.class_name()),
        }
    }
}

/// Does not descend into objects, so self-referencing values print.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

/// A callable.
#[derive(Clone)]
pub enum Function {
    Native(Builtin),
    Host(Rc<HostFn>),
}

impl Function {
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Function::Native(builtin) => builtin.call(this, args),
            Function::Host(f) => f(this, args),
        }
    }
}

pub enum ObjectKind {
    Ordinary,
    Array(RefCell<Vec<Value>>),
    Function(Function),
    Set(Set<Value>),
    Map(Map<Value, Value>),
    Iterator(RefCell<CollectionIterator>),
}

struct ObjectData {
    kind: ObjectKind,
    properties: Map<String, Value>,
}

/// Reference to a heap object. Clones alias the same object.
#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

impl Object {
    pub fn new(kind: ObjectKind) -> Self {
        Object(Rc::new(ObjectData {
            kind,
            properties: Map::new(),
        }))
    }

    pub fn ordinary() -> Self {
        Object::new(ObjectKind::Ordinary)
    }

    /// Ordinary object with the given own properties.
    pub fn with_properties<'a>(properties: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let object = Object::ordinary();
        for (key, value) in properties {
            object.set_property(key, value);
        }
        object
    }

    pub fn array(items: Vec<Value>) -> Self {
        Object::new(ObjectKind::Array(RefCell::new(items)))
    }

    pub fn function(function: Function) -> Self {
        Object::new(ObjectKind::Function(function))
    }

    pub fn host_function<F>(f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value> + 'static,
    {
        Object::function(Function::Host(Rc::new(f)))
    }

    pub fn set(set: Set<Value>) -> Self {
        Object::new(ObjectKind::Set(set))
    }

    pub fn map(map: Map<Value, Value>) -> Self {
        Object::new(ObjectKind::Map(map))
    }

    pub(crate) fn iterator(iterator: CollectionIterator) -> Self {
        Object::new(ObjectKind::Iterator(RefCell::new(iterator)))
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.0.kind
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.0.kind, ObjectKind::Function(_))
    }

    /// Own property first, then the properties every object of this
    /// kind inherits (collection methods, `size`, `@@iterator`, array
    /// elements and `length`).
    pub fn get(&self, key: &str) -> Value {
        if let Some(value) = self.own_property(key) {
            return value;
        }
        builtins::inherited_property(self, key).unwrap_or_default()
    }

    pub fn own_property(&self, key: &str) -> Option<Value> {
        self.0.properties.get(&key.to_owned())
    }

    pub fn set_property(&self, key: impl Into<String>, value: Value) {
        self.0.properties.set(key.into(), value);
    }

    /// Array element, `None` past the end or for non-arrays.
    pub fn element(&self, index: usize) -> Option<Value> {
        match &self.0.kind {
            ObjectKind::Array(items) => items.borrow().get(index).cloned(),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn class_name(&self) -> &'static str {
        match &self.0.kind {
            ObjectKind::Ordinary => "Object",
            ObjectKind::Array(_) => "Array",
            ObjectKind::Function(_) => "Function",
            ObjectKind::Set(_) => "Set",
            ObjectKind::Map(_) => "Map",
            ObjectKind::Iterator(it) => it.try_borrow().map_or("Iterator", |it| it.class_name()),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Object {}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({} @ {:p})", self.class_name(), Rc::as_ptr(&self.0))
    }
}

/// Which part of each entry an iterator yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IterationKind {
    Values,
    Keys,
    Entries,
}

enum IteratorSource {
    Set(Cursor<Value, ()>),
    Map(Cursor<Value, Value>),
    Array { array: Object, index: usize },
    Done,
}

/// State behind a collection or array iterator object.
pub struct CollectionIterator {
    source: IteratorSource,
    kind: IterationKind,
    class_name: &'static str,
}

impl CollectionIterator {
    pub(crate) fn over_set(set: &Set<Value>, kind: IterationKind) -> Self {
        Self {
            source: IteratorSource::Set(set.cursor()),
            kind,
            class_name: "Set Iterator",
        }
    }

    pub(crate) fn over_map(map: &Map<Value, Value>, kind: IterationKind) -> Self {
        Self {
            source: IteratorSource::Map(map.cursor()),
            kind,
            class_name: "Map Iterator",
        }
    }

    pub(crate) fn over_array(array: &Object, kind: IterationKind) -> Self {
        Self {
            source: IteratorSource::Array {
                array: array.clone(),
                index: 0,
            },
            kind,
            class_name: "Array Iterator",
        }
    }

    pub fn kind(&self) -> IterationKind {
        self.kind
    }

    pub fn is_done(&self) -> bool {
        matches!(self.source, IteratorSource::Done)
    }

    fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Next item, or `None` once the source is exhausted. After the
    /// first `None` the iterator stays exhausted.
    pub(crate) fn step(&mut self) -> Option<Value> {
        let kind = self.kind;
        let item = match &mut self.source {
            IteratorSource::Set(cursor) => cursor.next_entry().map(|(k, ())| match kind {
                IterationKind::Entries => pair(k.clone(), k),
                IterationKind::Values | IterationKind::Keys => k,
            }),
            IteratorSource::Map(cursor) => cursor.next_entry().map(|(k, v)| match kind {
                IterationKind::Entries => pair(k, v),
                IterationKind::Keys => k,
                IterationKind::Values => v,
            }),
            IteratorSource::Array { array, index } => {
                let element = array.element(*index);
                let position = Value::Number(*index as f64);
                *index += 1;
                element.map(|v| match kind {
                    IterationKind::Entries => pair(position, v),
                    IterationKind::Keys => position,
                    IterationKind::Values => v,
                })
            }
            IteratorSource::Done => None,
        };
        if item.is_none() {
            self.source = IteratorSource::Done;
        }
        item
    }
}

fn pair(first: Value, second: Value) -> Value {
    Value::Object(Object::array(vec![first, second]))
}
