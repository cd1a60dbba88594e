#![allow(dead_code)]

use cinder_query::{
    CompositeFilter, CompositeOperator, FieldFilter, FieldPath, Filter, Query, ResourcePath, Value,
};

pub fn query(path: &str) -> Query {
    Query::new(ResourcePath::parse(path).unwrap())
}

pub fn field(path: &str) -> FieldPath {
    FieldPath::parse(path).unwrap()
}

/// `filter("a", "==", "b")`
pub fn filter(path: &str, op: &str, value: impl Into<Value>) -> FieldFilter {
    FieldFilter::new(field(path), op.parse().unwrap(), value)
}

pub fn and_filters(filters: impl IntoIterator<Item = impl Into<Filter>>) -> CompositeFilter {
    CompositeFilter::new(
        CompositeOperator::And,
        filters.into_iter().map(Into::into).collect(),
    )
}

pub fn or_filters(filters: impl IntoIterator<Item = impl Into<Filter>>) -> CompositeFilter {
    CompositeFilter::new(
        CompositeOperator::Or,
        filters.into_iter().map(Into::into).collect(),
    )
}

pub fn hash_of<T: std::hash::Hash>(value: &T) -> u64 {
    use std::hash::{DefaultHasher, Hasher};
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
