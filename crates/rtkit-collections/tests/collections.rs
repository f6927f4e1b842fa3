//! Iteration-order and mutation-during-walk behavior through both the
//! typed handles and the host value protocol.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use rtkit_collections::{
    Builtin, CollectionError, CollectionKind, Map, Object, Set, Value, construct,
};

fn array(items: Vec<Value>) -> Value {
    Value::Object(Object::array(items))
}

fn map_abc() -> Value {
    let pairs = ["a", "b", "c"]
        .iter()
        .zip(1..)
        .map(|(k, v)| array(vec![Value::from(*k), Value::from(v)]))
        .collect();
    construct(CollectionKind::Map, &array(pairs)).expect("pairs are objects")
}

/// Runs `Map.prototype.forEach` with a host callback that records the
/// visited key and then applies `mutate`.
fn walk_map(map: &Value, mutate: impl Fn(&Value, &Value) + 'static) -> Vec<String> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let callback = Object::host_function(move |_, args| {
        let key = args[1].clone();
        sink.borrow_mut().push(key.to_string());
        mutate(&args[2], &key);
        Ok(Value::Undefined)
    });
    Builtin::MapForEach
        .call(map, &[Value::Object(callback)])
        .expect("callback never fails");
    seen.take()
}

#[test]
fn set_from_array_dedups() {
    let set = construct(
        CollectionKind::Set,
        &array([1, 2, 2, 3].into_iter().map(Value::from).collect()),
    )
    .unwrap();
    assert_eq!(set.get("size"), Value::Number(3.0));
    assert_eq!(
        Builtin::SetHas.call(&set, &[Value::from(2)]).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn map_for_each_insertion_order() {
    assert_eq!(walk_map(&map_abc(), |_, _| {}), ["a", "b", "c"]);
}

#[test]
fn map_for_each_delete_current_not_revisited() {
    let seen = walk_map(&map_abc(), |map, key| {
        Builtin::MapDelete.call(map, &[key.clone()]).unwrap();
    });
    assert_eq!(seen, ["a", "b", "c"]);
}

#[test]
fn map_for_each_add_is_visited() {
    let seen = walk_map(&map_abc(), |map, key| {
        if key == &Value::from("a") {
            Builtin::MapSet
                .call(map, &[Value::from("d"), Value::from(4)])
                .unwrap();
        }
    });
    assert_eq!(seen, ["a", "b", "c", "d"]);
}

#[test]
fn map_for_each_delete_next_skipped() {
    let seen = walk_map(&map_abc(), |map, key| {
        if key == &Value::from("a") {
            Builtin::MapDelete.call(map, &[Value::from("b")]).unwrap();
        }
    });
    assert_eq!(seen, ["a", "c"]);
}

#[test]
fn clear_resets_size_and_membership() {
    let map = map_abc();
    Builtin::MapClear.call(&map, &[]).unwrap();
    assert_eq!(Builtin::MapSize.call(&map, &[]).unwrap(), Value::Number(0.0));
    for key in ["a", "b", "c"] {
        assert_eq!(
            Builtin::MapHas.call(&map, &[Value::from(key)]).unwrap(),
            Value::Boolean(false)
        );
    }
}

#[test]
fn map_from_non_iterable() {
    for source in [Value::from(1), Value::from("ab"), Value::Boolean(true)] {
        let err = construct(CollectionKind::Map, &source).unwrap_err();
        assert!(matches!(err, CollectionError::NotIterable(_)), "{source:?}");
    }
}

#[test]
fn map_round_trips_json_pairs() {
    let json = serde_json::json!([["x", 1], ["y", [true, null]], ["x", 3]]);
    let map = construct(CollectionKind::Map, &Value::from(&json)).unwrap();
    assert_eq!(map.to_json(), serde_json::json!([["x", 3], ["y", [true, null]]]));
}

#[test]
fn iterator_keeps_set_alive_after_handle_dropped() {
    let set: Set<i32> = (0..3).collect();
    let values = set.values();
    drop(set);
    assert_eq!(values.collect::<Vec<_>>(), [0, 1, 2]);
}

#[test]
fn many_deletes_during_walk_with_compaction_pressure() {
    let map: Map<u32, u32> = (0..100).map(|i| (i, i)).collect();
    let mut seen = Vec::new();
    map.for_each(|_, k, m| {
        seen.push(*k);
        m.delete(k);
        if *k < 100 && *k % 10 == 0 {
            m.set(k + 1000, 0);
        }
    });
    assert_eq!(seen.len(), 110);
    assert!(map.is_empty());

    // Deletes after the walk keep insertion order.
    for i in 0..50 {
        map.set(i, i);
    }
    for i in (0..50).step_by(2) {
        map.delete(&i);
    }
    assert_eq!(map.keys().collect::<Vec<_>>(), (1..50).step_by(2).collect::<Vec<_>>());
}

#[derive(Clone, Debug)]
enum Op {
    Add(u8),
    Delete(u8),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<u8>().prop_map(|k| Op::Add(k % 32)),
        3 => any::<u8>().prop_map(|k| Op::Delete(k % 32)),
        1 => Just(Op::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn set_matches_ordered_model(ops in proptest::collection::vec(op(), 0..200)) {
        let set: Set<u8> = Set::new();
        let mut model: Vec<u8> = Vec::new();
        for op in ops {
            match op {
                Op::Add(k) => {
                    let inserted = set.add(k);
                    prop_assert_eq!(inserted, !model.contains(&k));
                    if inserted {
                        model.push(k);
                    }
                }
                Op::Delete(k) => {
                    let existed = model.contains(&k);
                    model.retain(|&m| m != k);
                    prop_assert_eq!(set.delete(&k), existed);
                }
                Op::Clear => {
                    set.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(set.size(), model.len());
        }
        prop_assert_eq!(set.values().collect::<Vec<_>>(), model);
    }

    #[test]
    fn walk_never_revisits(ops in proptest::collection::vec(op(), 0..60)) {
        let set: Set<u8> = (0..16).collect();
        let ops = RefCell::new(ops.into_iter());
        let mut seen = Vec::new();
        set.for_each(|_, k, s| {
            seen.push(*k);
            match ops.borrow_mut().next() {
                Some(Op::Add(k)) => { s.add(k); }
                Some(Op::Delete(k)) => { s.delete(&k); }
                Some(Op::Clear) => s.clear(),
                None => {}
            }
        });
        // A key may only reappear after it was deleted and re-added, and
        // re-adding appends; so consecutive duplicates never occur.
        for pair in seen.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }
}
