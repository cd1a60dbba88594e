use crate::operator::Operator;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("invalid field path: {0:?}")]
    InvalidFieldPath(String),

    #[error("invalid resource path: {0:?}")]
    InvalidResourcePath(String),

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("invalid operand for '{operator}': {reason}")]
    InvalidOperand { operator: Operator, reason: String },

    #[error("'{operator}' supports at most {max} values, got {actual}")]
    TooManyValues {
        operator: Operator,
        max: usize,
        actual: usize,
    },

    #[error("cannot use '{new}' filters with '{existing}' filters")]
    ConflictingOperators { existing: Operator, new: Operator },

    #[error("filter nesting exceeds the maximum depth of {max}")]
    FilterTooDeep { max: usize },

    #[error("invalid filter document: {0}")]
    InvalidFilterDocument(String),
}
