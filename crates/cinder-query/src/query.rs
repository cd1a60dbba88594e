use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::config::QueryRules;
use crate::error::QueryError;
use crate::filter::Filter;
use crate::operator::Operator;
use crate::path::{FieldPath, ResourcePath};
use crate::search;
use crate::sort::{Bound, Direction, Limit, LimitKind, OrderBy};
use crate::validate;

/// Immutable description of a collection read.
///
/// Builder methods consume the query and return a new one. Two queries are
/// equal, and hash equal, when every clause matches, filters in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    path: ResourcePath,
    filters: Vec<Filter>,
    order_by: Vec<OrderBy>,
    limit: Option<Limit>,
    start_at: Option<Bound>,
    end_at: Option<Bound>,
}

impl Query {
    pub fn new(path: ResourcePath) -> Self {
        Self {
            path,
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            start_at: None,
            end_at: None,
        }
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn order_by_clauses(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn limit(&self) -> Option<Limit> {
        self.limit
    }

    pub fn start_bound(&self) -> Option<&Bound> {
        self.start_at.as_ref()
    }

    pub fn end_bound(&self) -> Option<&Bound> {
        self.end_at.as_ref()
    }

    /// Appends a filter without validation.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Appends a filter after checking it against the existing ones.
    pub fn try_filter(
        self,
        filter: impl Into<Filter>,
        rules: &QueryRules,
    ) -> Result<Self, QueryError> {
        let filter = filter.into();
        validate::validate_new_filter(&self, &filter, rules)?;
        Ok(self.filter(filter))
    }

    pub fn order_by(mut self, field: FieldPath, direction: Direction) -> Self {
        self.order_by.push(OrderBy { field, direction });
        self
    }

    pub fn limit_to_first(mut self, count: usize) -> Self {
        self.limit = Some(Limit {
            count,
            kind: LimitKind::First,
        });
        self
    }

    pub fn limit_to_last(mut self, count: usize) -> Self {
        self.limit = Some(Limit {
            count,
            kind: LimitKind::Last,
        });
        self
    }

    pub fn start_at(mut self, bound: Bound) -> Self {
        self.start_at = Some(bound);
        self
    }

    pub fn end_at(mut self, bound: Bound) -> Self {
        self.end_at = Some(bound);
        self
    }

    /// See [`search::find_filter_with_operator`].
    pub fn find_filter_with_operator(
        filters: &[Filter],
        operators: &[Operator],
    ) -> Option<Operator> {
        search::find_filter_with_operator(filters, operators)
    }

    /// Searches this query's own filters.
    pub fn find_operator(&self, operators: &[Operator]) -> Option<Operator> {
        search::find_filter_with_operator(&self.filters, operators)
    }

    /// Distinct fields that carry an inequality, in order of first appearance.
    pub fn inequality_fields(&self) -> Vec<&FieldPath> {
        let mut fields: Vec<&FieldPath> = Vec::new();
        for filter in &self.filters {
            for field_filter in filter.flattened_filters() {
                if field_filter.is_inequality() && !fields.contains(&field_filter.field()) {
                    fields.push(field_filter.field());
                }
            }
        }
        fields
    }

    /// Deterministic string identity; equal queries produce equal ids.
    pub fn canonical_id(&self) -> String {
        let mut id = self.path.to_string();
        id.push_str("|f:");
        for filter in &self.filters {
            let _ = write!(id, "{filter};");
        }
        id.push_str("|ob:");
        for order in &self.order_by {
            let _ = write!(id, "{order};");
        }
        if let Some(limit) = self.limit {
            let kind = match limit.kind {
                LimitKind::First => 'f',
                LimitKind::Last => 'l',
            };
            let _ = write!(id, "|l:{}{}", kind, limit.count);
        }
        if let Some(bound) = &self.start_at {
            let _ = write!(id, "|lb:{bound}");
        }
        if let Some(bound) = &self.end_at {
            let _ = write!(id, "|ub:{bound}");
        }
        id
    }
}
