use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operator::{CompositeOperator, Operator};
use crate::path::FieldPath;
use crate::value::Value;

/// Leaf predicate comparing one field to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldFilter {
    field: FieldPath,
    operator: Operator,
    value: Value,
}

impl FieldFilter {
    pub fn new(field: FieldPath, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_inequality(&self) -> bool {
        self.operator.is_inequality()
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} {}", self.field.to_string(), self.operator, self.value)
    }
}

/// AND / OR over an ordered list of child filters.
///
/// Equality is order-sensitive: `and(a, b)` and `and(b, a)` are different
/// filters even though they select the same documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeFilter {
    operator: CompositeOperator,
    filters: Vec<Filter>,
}

impl CompositeFilter {
    pub fn new(operator: CompositeOperator, filters: Vec<Filter>) -> Self {
        Self { operator, filters }
    }

    pub fn operator(&self) -> CompositeOperator {
        self.operator
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn is_conjunction(&self) -> bool {
        self.operator == CompositeOperator::And
    }

    pub fn is_disjunction(&self) -> bool {
        self.operator == CompositeOperator::Or
    }

    /// True when no child is itself a composite.
    pub fn is_flat(&self) -> bool {
        self.filters.iter().all(|f| matches!(f, Filter::Field(_)))
    }

    /// Every leaf beneath this node, pre-order, left to right.
    pub fn field_filters(&self) -> Vec<&FieldFilter> {
        let mut out = Vec::new();
        for child in &self.filters {
            child.collect_field_filters(&mut out);
        }
        out
    }
}

impl fmt::Display for CompositeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operator)?;
        for (i, child) in self.filters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

/// A node in a filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    Field(FieldFilter),
    Composite(CompositeFilter),
}

impl Filter {
    pub fn field(field: FieldPath, operator: Operator, value: impl Into<Value>) -> Self {
        Filter::Field(FieldFilter::new(field, operator, value))
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Composite(CompositeFilter::new(CompositeOperator::And, filters))
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Composite(CompositeFilter::new(CompositeOperator::Or, filters))
    }

    /// Every [`FieldFilter`] in this subtree, pre-order, left to right.
    pub fn flattened_filters(&self) -> Vec<&FieldFilter> {
        let mut out = Vec::new();
        self.collect_field_filters(&mut out);
        out
    }

    /// Number of levels in this subtree; a lone field filter has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Filter::Field(_) => 1,
            Filter::Composite(c) => 1 + c.filters.iter().map(Filter::depth).max().unwrap_or(0),
        }
    }

    fn collect_field_filters<'a>(&'a self, out: &mut Vec<&'a FieldFilter>) {
        match self {
            Filter::Field(f) => out.push(f),
            Filter::Composite(c) => {
                for child in &c.filters {
                    child.collect_field_filters(out);
                }
            }
        }
    }
}

impl From<FieldFilter> for Filter {
    fn from(f: FieldFilter) -> Self {
        Filter::Field(f)
    }
}

impl From<CompositeFilter> for Filter {
    fn from(c: CompositeFilter) -> Self {
        Filter::Composite(c)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Field(field) => write!(f, "{field}"),
            Filter::Composite(composite) => write!(f, "{composite}"),
        }
    }
}
