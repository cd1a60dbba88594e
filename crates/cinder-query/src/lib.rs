mod config;
mod error;
mod filter;
mod operator;
mod parse_filter;
mod path;
mod query;
mod search;
mod sort;
pub mod validate;
mod value;

pub use config::QueryRules;
pub use error::QueryError;
pub use filter::{CompositeFilter, FieldFilter, Filter};
pub use operator::{CompositeOperator, Operator};
pub use parse_filter::parse_filter;
pub use path::{FieldPath, KEY_FIELD_NAME, ResourcePath};
pub use query::Query;
pub use search::find_filter_with_operator;
pub use sort::{Bound, Direction, Limit, LimitKind, OrderBy};
pub use validate::validate_new_filter;
pub use value::Value;
