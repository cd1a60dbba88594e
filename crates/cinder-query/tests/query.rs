mod common;
use common::*;

use std::collections::HashSet;

use cinder_query::{Bound, Direction, FieldFilter, FieldPath, Filter, Operator, Query, Value};

// ── Equality & hashing ──────────────────────────────────────────

#[test]
fn equal_queries_hash_equal() {
    let foo = query("foo");
    let foo_dup = query("foo");
    let bar = query("bar");

    assert_eq!(foo, foo_dup);
    assert_ne!(foo, bar);

    assert_eq!(hash_of(&foo), hash_of(&foo_dup));
    assert_ne!(hash_of(&foo), hash_of(&bar));
}

fn full_query() -> Query {
    query("rooms/eros/messages")
        .filter(and_filters([
            or_filters([filter("a", "==", "b"), filter("c", ">", "d")]),
            or_filters([filter("a", "==", "b"), filter("c", "!=", "d")]),
        ]))
        .filter(filter("r", "<", "s"))
        .order_by(field("sent"), Direction::Descending)
        .limit_to_first(20)
        .start_at(Bound {
            position: vec![Value::Int(1)],
            inclusive: true,
        })
}

#[test]
fn independently_built_queries_are_equal() {
    let a = full_query();
    let b = full_query();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.canonical_id(), b.canonical_id());
}

#[test]
fn filter_order_matters() {
    let ab = query("c")
        .filter(filter("a", "==", 1))
        .filter(filter("b", "==", 2));
    let ba = query("c")
        .filter(filter("b", "==", 2))
        .filter(filter("a", "==", 1));
    assert_ne!(ab, ba);
}

#[test]
fn composite_child_order_matters() {
    let ab = query("c").filter(and_filters([filter("a", "==", 1), filter("b", "==", 2)]));
    let ba = query("c").filter(and_filters([filter("b", "==", 2), filter("a", "==", 1)]));
    assert_ne!(ab, ba);
    assert_ne!(ab.canonical_id(), ba.canonical_id());
}

#[test]
fn every_clause_participates() {
    let base = full_query();
    assert_ne!(base, full_query().filter(filter("x", "==", 1)));
    assert_ne!(base, full_query().order_by(field("x"), Direction::Ascending));
    assert_ne!(base, full_query().limit_to_first(21));
    assert_ne!(
        base,
        full_query().end_at(Bound {
            position: vec![Value::Int(9)],
            inclusive: false,
        })
    );
}

#[test]
fn canonical_id_separates_field_from_operator() {
    let not_in = query("c").filter(filter("a", "not-in", vec![1]));
    let shifted = query("c").filter(filter("anot-", "in", vec![1]));
    assert_ne!(not_in, shifted);
    assert_ne!(not_in.canonical_id(), shifted.canonical_id());
}

#[test]
fn canonical_id_separates_path_segments() {
    let nested = query("c").filter(filter("a.b", "==", 1));
    let flat = query("c").filter(FieldFilter::new(
        FieldPath::from_segments(["ab"]).unwrap(),
        Operator::Equal,
        1,
    ));
    assert_ne!(nested.canonical_id(), flat.canonical_id());
}

#[test]
fn field_and_composite_never_equal() {
    let leaf: Filter = filter("a", "==", "b").into();
    let wrapped: Filter = and_filters([filter("a", "==", "b")]).into();
    assert_ne!(leaf, wrapped);
    assert_ne!(query("c").filter(leaf), query("c").filter(wrapped));
}

#[test]
fn queries_work_as_set_keys() {
    let mut set = HashSet::new();
    set.insert(full_query());
    set.insert(full_query());
    set.insert(query("foo"));
    assert_eq!(set.len(), 2);
    assert!(set.contains(&full_query()));
}

#[test]
fn serde_round_trip_keeps_identity() {
    let q = full_query();
    let json = serde_json::to_string(&q).unwrap();
    let back: Query = serde_json::from_str(&json).unwrap();
    assert_eq!(q, back);
}
