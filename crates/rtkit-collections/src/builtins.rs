//! Receiver-checked collection methods, the constructors and the
//! iteration protocol.
//!
//! A runtime installs each [`Builtin`] as a native function. Objects of
//! kind set, map, array and iterator inherit them through
//! [`Object::get`]; there are no prototype objects to patch.

use std::fmt;

use crate::error::{CollectionError, Result};
use crate::map::Map;
use crate::set::Set;
use crate::value::{CollectionIterator, ITERATOR_KEY, IterationKind, Object, ObjectKind, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    SetAdd,
    SetHas,
    SetDelete,
    SetClear,
    SetSize,
    SetForEach,
    SetValues,
    SetKeys,
    SetEntries,
    MapGet,
    MapSet,
    MapHas,
    MapDelete,
    MapClear,
    MapSize,
    MapForEach,
    MapValues,
    MapKeys,
    MapEntries,
    ArrayValues,
    IteratorNext,
    IteratorSelf,
}

impl Builtin {
    /// Qualified name used in receiver errors.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::SetAdd => "Set.prototype.add",
            Builtin::SetHas => "Set.prototype.has",
            Builtin::SetDelete => "Set.prototype.delete",
            Builtin::SetClear => "Set.prototype.clear",
            Builtin::SetSize => "Set.prototype.size",
            Builtin::SetForEach => "Set.prototype.forEach",
            Builtin::SetValues => "Set.prototype.values",
            Builtin::SetKeys => "Set.prototype.keys",
            Builtin::SetEntries => "Set.prototype.entries",
            Builtin::MapGet => "Map.prototype.get",
            Builtin::MapSet => "Map.prototype.set",
            Builtin::MapHas => "Map.prototype.has",
            Builtin::MapDelete => "Map.prototype.delete",
            Builtin::MapClear => "Map.prototype.clear",
            Builtin::MapSize => "Map.prototype.size",
            Builtin::MapForEach => "Map.prototype.forEach",
            Builtin::MapValues => "Map.prototype.values",
            Builtin::MapKeys => "Map.prototype.keys",
            Builtin::MapEntries => "Map.prototype.entries",
            Builtin::ArrayValues => "Array.prototype.values",
            Builtin::IteratorNext => "%CollectionIteratorPrototype%.next",
            Builtin::IteratorSelf => "%CollectionIteratorPrototype%[@@iterator]",
        }
    }

    /// Invokes the method with `this` as receiver. Missing arguments
    /// read as `undefined`.
    pub fn call(self, this: &Value, args: &[Value]) -> Result<Value> {
        let arg = |i: usize| args.get(i).cloned().unwrap_or_default();
        let method = self.name();

        match self {
            Builtin::SetAdd => {
                receiver_set(this, method)?.add(arg(0));
                Ok(this.clone())
            }
            Builtin::SetHas => Ok(Value::Boolean(receiver_set(this, method)?.has(&arg(0)))),
            Builtin::SetDelete => Ok(Value::Boolean(receiver_set(this, method)?.delete(&arg(0)))),
            Builtin::SetClear => {
                receiver_set(this, method)?.clear();
                Ok(Value::Undefined)
            }
            Builtin::SetSize => Ok(size_value(receiver_set(this, method)?.size())),
            Builtin::SetForEach => {
                let set = receiver_set(this, method)?;
                let callback = callable(arg(0))?;
                let receiver = arg(1);
                set.try_for_each(|value, key, _| {
                    callback
                        .call(&receiver, &[value.clone(), key.clone(), this.clone()])
                        .map(drop)
                })?;
                Ok(Value::Undefined)
            }
            Builtin::SetValues | Builtin::SetKeys | Builtin::SetEntries => {
                let set = receiver_set(this, method)?;
                let kind = match self {
                    Builtin::SetEntries => IterationKind::Entries,
                    _ => IterationKind::Values,
                };
                Ok(iterator_object(CollectionIterator::over_set(set, kind)))
            }
            Builtin::MapGet => Ok(receiver_map(this, method)?.get(&arg(0)).unwrap_or_default()),
            Builtin::MapSet => {
                receiver_map(this, method)?.set(arg(0), arg(1));
                Ok(this.clone())
            }
            Builtin::MapHas => Ok(Value::Boolean(receiver_map(this, method)?.has(&arg(0)))),
            Builtin::MapDelete => Ok(Value::Boolean(receiver_map(this, method)?.delete(&arg(0)))),
            Builtin::MapClear => {
                receiver_map(this, method)?.clear();
                Ok(Value::Undefined)
            }
            Builtin::MapSize => Ok(size_value(receiver_map(this, method)?.size())),
            Builtin::MapForEach => {
                let map = receiver_map(this, method)?;
                let callback = callable(arg(0))?;
                let receiver = arg(1);
                map.try_for_each(|value, key, _| {
                    callback
                        .call(&receiver, &[value.clone(), key.clone(), this.clone()])
                        .map(drop)
                })?;
                Ok(Value::Undefined)
            }
            Builtin::MapValues | Builtin::MapKeys | Builtin::MapEntries => {
                let map = receiver_map(this, method)?;
                let kind = match self {
                    Builtin::MapValues => IterationKind::Values,
                    Builtin::MapKeys => IterationKind::Keys,
                    _ => IterationKind::Entries,
                };
                Ok(iterator_object(CollectionIterator::over_map(map, kind)))
            }
            Builtin::ArrayValues => match this {
                Value::Object(o) if matches!(o.kind(), ObjectKind::Array(_)) => Ok(iterator_object(
                    CollectionIterator::over_array(o, IterationKind::Values),
                )),
                _ => Err(incompatible(method, this)),
            },
            Builtin::IteratorNext => {
                let Some(ObjectKind::Iterator(state)) = this.as_object().map(Object::kind) else {
                    return Err(incompatible(method, this));
                };
                let item = state.borrow_mut().step();
                Ok(iterator_result(item))
            }
            Builtin::IteratorSelf => match this.as_object().map(Object::kind) {
                Some(ObjectKind::Iterator(_)) => Ok(this.clone()),
                _ => Err(incompatible(method, this)),
            },
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn incompatible(method: &'static str, receiver: &Value) -> CollectionError {
    CollectionError::IncompatibleReceiver {
        method,
        receiver: receiver.to_string(),
    }
}

fn receiver_set<'a>(this: &'a Value, method: &'static str) -> Result<&'a Set<Value>> {
    match this.as_object().map(Object::kind) {
        Some(ObjectKind::Set(set)) => Ok(set),
        _ => Err(incompatible(method, this)),
    }
}

fn receiver_map<'a>(this: &'a Value, method: &'static str) -> Result<&'a Map<Value, Value>> {
    match this.as_object().map(Object::kind) {
        Some(ObjectKind::Map(map)) => Ok(map),
        _ => Err(incompatible(method, this)),
    }
}

fn callable(value: Value) -> Result<Value> {
    if value.is_callable() {
        Ok(value)
    } else {
        Err(CollectionError::NotCallable(value.to_string()))
    }
}

fn size_value(size: usize) -> Value {
    Value::Number(size as f64)
}

fn iterator_object(iterator: CollectionIterator) -> Value {
    Value::Object(Object::iterator(iterator))
}

/// `{ value, done }` step result.
fn iterator_result(item: Option<Value>) -> Value {
    let done = item.is_none();
    Value::Object(Object::with_properties([
        ("value", item.unwrap_or_default()),
        ("done", Value::Boolean(done)),
    ]))
}

/// Properties every object of a kind inherits. `size` is evaluated as
/// an accessor on read.
pub(crate) fn inherited_property(object: &Object, key: &str) -> Option<Value> {
    let builtin = match (object.kind(), key) {
        (ObjectKind::Set(set), "size") => return Some(size_value(set.size())),
        (ObjectKind::Map(map), "size") => return Some(size_value(map.size())),
        (ObjectKind::Array(items), "length") => return Some(size_value(items.borrow().len())),
        (ObjectKind::Array(_), _) => match key.parse::<usize>() {
            Ok(index) if index.to_string() == key => return object.element(index),
            _ if key == ITERATOR_KEY => Builtin::ArrayValues,
            _ => return None,
        },
        (ObjectKind::Set(_), "add") => Builtin::SetAdd,
        (ObjectKind::Set(_), "has") => Builtin::SetHas,
        (ObjectKind::Set(_), "delete") => Builtin::SetDelete,
        (ObjectKind::Set(_), "clear") => Builtin::SetClear,
        (ObjectKind::Set(_), "forEach") => Builtin::SetForEach,
        (ObjectKind::Set(_), "values" | ITERATOR_KEY) => Builtin::SetValues,
        (ObjectKind::Set(_), "keys") => Builtin::SetKeys,
        (ObjectKind::Set(_), "entries") => Builtin::SetEntries,
        (ObjectKind::Map(_), "get") => Builtin::MapGet,
        (ObjectKind::Map(_), "set") => Builtin::MapSet,
        (ObjectKind::Map(_), "has") => Builtin::MapHas,
        (ObjectKind::Map(_), "delete") => Builtin::MapDelete,
        (ObjectKind::Map(_), "clear") => Builtin::MapClear,
        (ObjectKind::Map(_), "forEach") => Builtin::MapForEach,
        (ObjectKind::Map(_), "values") => Builtin::MapValues,
        (ObjectKind::Map(_), "keys") => Builtin::MapKeys,
        (ObjectKind::Map(_), "entries" | ITERATOR_KEY) => Builtin::MapEntries,
        (ObjectKind::Iterator(_), "next") => Builtin::IteratorNext,
        (ObjectKind::Iterator(_), ITERATOR_KEY) => Builtin::IteratorSelf,
        _ => return None,
    };
    Some(Value::from(builtin))
}

/// The two collection constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionKind {
    Set,
    Map,
}

impl CollectionKind {
    pub fn of(value: &Value) -> Option<Self> {
        match value.as_object().map(Object::kind) {
            Some(ObjectKind::Set(_)) => Some(CollectionKind::Set),
            Some(ObjectKind::Map(_)) => Some(CollectionKind::Map),
            _ => None,
        }
    }

    /// Method the constructor feeds each source item to.
    pub fn adder(self) -> &'static str {
        match self {
            CollectionKind::Set => "add",
            CollectionKind::Map => "set",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Set => "Set",
            CollectionKind::Map => "Map",
        }
    }
}

/// `new Set(iterable)` / `new Map(iterable)`.
pub fn construct(kind: CollectionKind, iterable: &Value) -> Result<Value> {
    let instance = Value::Object(match kind {
        CollectionKind::Set => Object::set(Set::new()),
        CollectionKind::Map => Object::map(Map::new()),
    });
    construct_into(&instance, iterable)?;
    Ok(instance)
}

/// Runs the constructor steps against an existing instance.
///
/// The source iterator is obtained and the adder read from `instance`
/// before the instance is reset. An error while feeding leaves the
/// entries added so far in place.
pub fn construct_into(instance: &Value, iterable: &Value) -> Result<()> {
    let kind = CollectionKind::of(instance)
        .ok_or_else(|| incompatible("Set or Map constructor", instance))?;

    let source = if iterable.is_nullish() {
        None
    } else {
        let iterator = get_iterator(iterable)?;
        let adder = instance.get(kind.adder());
        if !adder.is_callable() {
            return Err(CollectionError::NotCallable(format!(
                "property '{}' of {instance}",
                kind.adder()
            )));
        }
        Some((iterator, adder))
    };

    match instance.as_object().map(Object::kind) {
        Some(ObjectKind::Set(set)) => set.clear(),
        Some(ObjectKind::Map(map)) => map.clear(),
        _ => {}
    }

    let Some((iterator, adder)) = source else {
        return Ok(());
    };
    let mut fed = 0usize;
    while let Some(item) = iterator_step(&iterator)? {
        match kind {
            CollectionKind::Set => adder.call(instance, &[item])?,
            CollectionKind::Map => {
                let Value::Object(entry) = &item else {
                    return Err(CollectionError::IteratorValueNotObject(item.to_string()));
                };
                adder.call(instance, &[entry.get("0"), entry.get("1")])?
            }
        };
        fed += 1;
    }
    tracing::debug!(kind = kind.name(), fed, "constructed collection from iterable");
    Ok(())
}

/// Calls `iterable[@@iterator]()` and checks that it produced an object.
pub fn get_iterator(iterable: &Value) -> Result<Object> {
    let method = iterable.get(ITERATOR_KEY);
    if !method.is_callable() {
        return Err(CollectionError::NotIterable(iterable.to_string()));
    }
    match method.call(iterable, &[])? {
        Value::Object(iterator) => Ok(iterator),
        other => Err(CollectionError::NotAnIterator(other.to_string())),
    }
}

/// Calls `iterator.next()`. `Ok(None)` once the result reports `done`.
pub fn iterator_step(iterator: &Object) -> Result<Option<Value>> {
    let this = Value::Object(iterator.clone());
    let result = this.get("next").call(&this, &[])?;
    let Value::Object(result) = result else {
        return Err(CollectionError::IteratorResultNotObject(result.to_string()));
    };
    if result.get("done").is_truthy() {
        return Ok(None);
    }
    Ok(Some(result.get("value")))
}
