use serde::{Deserialize, Serialize};

/// Limits applied when a filter is added to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRules {
    /// Maximum number of candidates in an `in`, `not-in` or
    /// `array-contains-any` operand.
    #[serde(default = "default_max_disjunction_values")]
    pub max_disjunction_values: usize,
    /// Maximum nesting of composite filters across the whole query.
    #[serde(default = "default_max_filter_depth")]
    pub max_filter_depth: usize,
}

fn default_max_disjunction_values() -> usize {
    30
}

fn default_max_filter_depth() -> usize {
    32
}

impl Default for QueryRules {
    fn default() -> Self {
        Self {
            max_disjunction_values: default_max_disjunction_values(),
            max_filter_depth: default_max_filter_depth(),
        }
    }
}
