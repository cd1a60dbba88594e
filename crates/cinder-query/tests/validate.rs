mod common;
use common::*;

use cinder_query::{Operator, QueryError, QueryRules, Value};

fn operand(op: Operator) -> Value {
    if op.is_list_operator() {
        Value::from(vec![1, 2])
    } else {
        Value::Int(1)
    }
}

fn conflicts(existing: Operator, new: Operator) -> bool {
    let rules = QueryRules::default();
    let q = query("coll")
        .try_filter(filter("a", existing.symbol(), operand(existing)), &rules)
        .unwrap();
    match q.try_filter(filter("b", new.symbol(), operand(new)), &rules) {
        Ok(_) => false,
        Err(QueryError::ConflictingOperators { existing: e, new: n }) => {
            assert_eq!((e, n), (existing, new));
            true
        }
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn conflict_matrix() {
    let expected = [
        (Operator::NotEqual, Operator::NotEqual),
        (Operator::NotEqual, Operator::NotIn),
        (Operator::ArrayContains, Operator::ArrayContains),
        (Operator::ArrayContains, Operator::ArrayContainsAny),
        (Operator::ArrayContainsAny, Operator::ArrayContains),
        (Operator::ArrayContainsAny, Operator::ArrayContainsAny),
        (Operator::ArrayContainsAny, Operator::NotIn),
        (Operator::In, Operator::NotIn),
        (Operator::NotIn, Operator::NotEqual),
        (Operator::NotIn, Operator::ArrayContainsAny),
        (Operator::NotIn, Operator::In),
        (Operator::NotIn, Operator::NotIn),
    ];
    for existing in Operator::ALL {
        for new in Operator::ALL {
            assert_eq!(
                conflicts(existing, new),
                expected.contains(&(existing, new)),
                "{existing} then {new}"
            );
        }
    }
}

#[test]
fn conflict_found_inside_existing_composite() {
    let rules = QueryRules::default();
    let q = query("coll").filter(and_filters([or_filters([
        filter("x", "==", 1),
        filter("tags", "array-contains", "a"),
    ])]));
    let err = q
        .try_filter(filter("tags", "array-contains-any", vec!["b"]), &rules)
        .unwrap_err();
    assert_eq!(
        err,
        QueryError::ConflictingOperators {
            existing: Operator::ArrayContains,
            new: Operator::ArrayContainsAny,
        }
    );
}

#[test]
fn depth_limit_counts_existing_filters() {
    let rules = QueryRules {
        max_filter_depth: 2,
        ..QueryRules::default()
    };
    let q = query("coll").filter(and_filters([or_filters([filter("x", "==", 1)])]));
    let err = q.try_filter(filter("y", "==", 2), &rules).unwrap_err();
    assert_eq!(err, QueryError::FilterTooDeep { max: 2 });
}

#[test]
fn accepted_filters_are_appended() {
    let rules = QueryRules::default();
    let q = query("coll")
        .try_filter(filter("a", "in", vec![1, 2, 3]), &rules)
        .unwrap()
        .try_filter(filter("b", ">", 4), &rules)
        .unwrap();
    assert_eq!(q.filters().len(), 2);
    assert_eq!(
        q,
        query("coll")
            .filter(filter("a", "in", vec![1, 2, 3]))
            .filter(filter("b", ">", 4))
    );
}
