use crate::config::QueryRules;
use crate::error::QueryError;
use crate::filter::{FieldFilter, Filter};
use crate::operator::Operator;
use crate::query::Query;
use crate::search::find_filter_with_operator;
use crate::value::Value;

/// Operators that may not appear in the same query as `op`.
pub fn conflicting_operators(op: Operator) -> &'static [Operator] {
    match op {
        Operator::NotEqual => &[Operator::NotEqual, Operator::NotIn],
        Operator::ArrayContains => &[Operator::ArrayContains, Operator::ArrayContainsAny],
        Operator::ArrayContainsAny => &[
            Operator::ArrayContains,
            Operator::ArrayContainsAny,
            Operator::NotIn,
        ],
        Operator::In => &[Operator::NotIn],
        Operator::NotIn => &[
            Operator::ArrayContainsAny,
            Operator::In,
            Operator::NotIn,
            Operator::NotEqual,
        ],
        Operator::Equal
        | Operator::LessThan
        | Operator::LessThanOrEqual
        | Operator::GreaterThan
        | Operator::GreaterThanOrEqual => &[],
    }
}

/// Checks that `filter` can be added to `query`.
///
/// Every leaf of `filter` is checked against the query's filters and against
/// the leaves of `filter` that precede it.
pub fn validate_new_filter(
    query: &Query,
    filter: &Filter,
    rules: &QueryRules,
) -> Result<(), QueryError> {
    let depth = query
        .filters()
        .iter()
        .chain(std::iter::once(filter))
        .map(Filter::depth)
        .max()
        .unwrap_or(0);
    if depth > rules.max_filter_depth {
        let error = QueryError::FilterTooDeep {
            max: rules.max_filter_depth,
        };
        tracing::debug!(depth, %error, "rejected filter");
        return Err(error);
    }

    let mut accepted: Vec<Filter> = Vec::new();
    for leaf in filter.flattened_filters() {
        validate_operand(leaf, rules)?;

        let conflicts = conflicting_operators(leaf.operator());
        let existing = find_filter_with_operator(query.filters(), conflicts)
            .or_else(|| find_filter_with_operator(&accepted, conflicts));
        if let Some(existing) = existing {
            let error = QueryError::ConflictingOperators {
                existing,
                new: leaf.operator(),
            };
            tracing::debug!(operator = %leaf.operator(), %existing, %error, "rejected filter");
            return Err(error);
        }
        accepted.push(Filter::Field(leaf.clone()));
    }
    Ok(())
}

fn validate_operand(leaf: &FieldFilter, rules: &QueryRules) -> Result<(), QueryError> {
    let operator = leaf.operator();
    if !operator.is_list_operator() {
        return Ok(());
    }

    let invalid = |reason: &str| {
        let error = QueryError::InvalidOperand {
            operator,
            reason: reason.to_string(),
        };
        tracing::debug!(%operator, field = %leaf.field(), %error, "rejected filter");
        error
    };

    let items = match leaf.value() {
        Value::Array(items) => items,
        _ => return Err(invalid("operand must be an array")),
    };
    if items.is_empty() {
        return Err(invalid("operand must be a non-empty array"));
    }
    if items.len() > rules.max_disjunction_values {
        let error = QueryError::TooManyValues {
            operator,
            max: rules.max_disjunction_values,
            actual: items.len(),
        };
        tracing::debug!(%operator, field = %leaf.field(), %error, "rejected filter");
        return Err(error);
    }
    if operator == Operator::NotIn && items.iter().any(Value::is_null) {
        return Err(invalid("operand may not contain null"));
    }
    Ok(())
}
