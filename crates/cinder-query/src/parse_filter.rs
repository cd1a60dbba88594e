use bson::{Bson, Document};

use crate::error::QueryError;
use crate::filter::Filter;
use crate::operator::Operator;
use crate::path::FieldPath;
use crate::value::Value;

/// Builds top-level filters from a Mongo-style filter document.
///
/// - Each top-level entry becomes one filter; together they are an implicit AND
/// - `{ "field": value }` is `field == value`
/// - `{ "field": { "$gt": v } }` uses operator sub-documents; several operators
///   on one field are wrapped in an AND
/// - `{ "$or": [...] }` / `{ "$and": [...] }` become composite filters
///
/// An empty document yields no filters.
pub fn parse_filter(doc: &Document) -> Result<Vec<Filter>, QueryError> {
    let mut filters = Vec::with_capacity(doc.len());

    for (key, value) in doc {
        let filter = match key.as_str() {
            "$and" => parse_logical_array(key, value, Filter::and)?,
            "$or" => parse_logical_array(key, value, Filter::or)?,
            k if k.starts_with('$') => {
                return Err(QueryError::UnknownOperator(k.to_string()));
            }
            _ => parse_field_condition(key, value)?,
        };
        filters.push(filter);
    }

    tracing::trace!(count = filters.len(), "parsed filter document");
    Ok(filters)
}

fn parse_logical_array(
    key: &str,
    value: &Bson,
    make: fn(Vec<Filter>) -> Filter,
) -> Result<Filter, QueryError> {
    let arr = match value {
        Bson::Array(a) => a,
        _ => {
            return Err(QueryError::InvalidFilterDocument(format!(
                "{key} value must be an array"
            )));
        }
    };
    if arr.is_empty() {
        return Err(QueryError::InvalidFilterDocument(format!(
            "{key} array must not be empty"
        )));
    }

    let mut children = Vec::with_capacity(arr.len());
    for elem in arr {
        let sub_doc = match elem {
            Bson::Document(d) => d,
            _ => {
                return Err(QueryError::InvalidFilterDocument(format!(
                    "{key} array elements must be documents"
                )));
            }
        };
        let mut parsed = parse_filter(sub_doc)?;
        match parsed.len() {
            0 => {
                return Err(QueryError::InvalidFilterDocument(format!(
                    "{key} array elements must not be empty"
                )));
            }
            1 => children.extend(parsed.pop()),
            _ => children.push(Filter::and(parsed)),
        }
    }

    Ok(make(children))
}

/// Either an implicit `==` or an operator sub-document.
fn parse_field_condition(field: &str, value: &Bson) -> Result<Filter, QueryError> {
    let path = FieldPath::parse(field)?;

    if let Bson::Document(sub_doc) = value {
        if sub_doc.is_empty() || sub_doc.keys().next().is_some_and(|k| k.starts_with('$')) {
            return parse_operator_doc(path, sub_doc);
        }
    }

    Ok(Filter::field(path, Operator::Equal, Value::try_from(value)?))
}

fn parse_operator_doc(path: FieldPath, doc: &Document) -> Result<Filter, QueryError> {
    let mut conditions = Vec::with_capacity(doc.len());

    for (op_key, op_value) in doc {
        let operator = match op_key.as_str() {
            "$eq" => Operator::Equal,
            "$ne" => Operator::NotEqual,
            "$lt" => Operator::LessThan,
            "$lte" => Operator::LessThanOrEqual,
            "$gt" => Operator::GreaterThan,
            "$gte" => Operator::GreaterThanOrEqual,
            "$in" => Operator::In,
            "$nin" => Operator::NotIn,
            "$arrayContains" => Operator::ArrayContains,
            "$arrayContainsAny" => Operator::ArrayContainsAny,
            k => return Err(QueryError::UnknownOperator(k.to_string())),
        };
        conditions.push(Filter::field(path.clone(), operator, Value::try_from(op_value)?));
    }

    match conditions.len() {
        0 => Err(QueryError::InvalidFilterDocument(format!(
            "empty operator document for field {path}"
        ))),
        1 => Ok(conditions.remove(0)),
        _ => Ok(Filter::and(conditions)),
    }
}
