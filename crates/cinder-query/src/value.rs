use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Comparison operand of a field filter.
///
/// Equality and hashing are total so values can sit inside hashed query keys.
/// Doubles compare by bit pattern after folding `-0.0` into `0.0` and every
/// NaN into a single canonical NaN. `Int(1)` and `Double(1.0)` stay distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    /// Milliseconds since the Unix epoch.
    Timestamp(i64),
    String(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

fn canonical_bits(d: f64) -> u64 {
    if d.is_nan() {
        f64::NAN.to_bits()
    } else if d == 0.0 {
        0.0f64.to_bits()
    } else {
        d.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Double(d) => canonical_bits(*d).hash(state),
            Value::Timestamp(t) => t.hash(state),
            Value::String(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Map(map) => map.hash(state),
        }
    }
}

impl Value {
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Double(d) if d.is_nan())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` so doubles never print like ints.
            Value::Double(d) => write!(f, "{d:?}"),
            Value::Timestamp(t) => write!(f, "time({t})"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{k:?}:{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<&Bson> for Value {
    type Error = QueryError;

    fn try_from(bson: &Bson) -> Result<Self, Self::Error> {
        match bson {
            Bson::Null => Ok(Value::Null),
            Bson::Boolean(b) => Ok(Value::Bool(*b)),
            Bson::Int32(i) => Ok(Value::Int(i64::from(*i))),
            Bson::Int64(i) => Ok(Value::Int(*i)),
            Bson::Double(d) => Ok(Value::Double(*d)),
            Bson::DateTime(dt) => Ok(Value::Timestamp(dt.timestamp_millis())),
            Bson::String(s) => Ok(Value::String(s.clone())),
            Bson::Array(items) => items
                .iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Bson::Document(doc) => doc
                .iter()
                .map(|(k, v)| Ok((k.to_string(), Value::try_from(v)?)))
                .collect::<Result<BTreeMap<_, _>, QueryError>>()
                .map(Value::Map),
            other => Err(QueryError::UnsupportedValue(format!(
                "{:?}",
                other.element_type()
            ))),
        }
    }
}

impl From<&Value> for Bson {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Bson::Null,
            Value::Bool(b) => Bson::Boolean(*b),
            Value::Int(i) => Bson::Int64(*i),
            Value::Double(d) => Bson::Double(*d),
            Value::Timestamp(t) => Bson::DateTime(bson::DateTime::from_millis(*t)),
            Value::String(s) => Bson::String(s.clone()),
            Value::Array(items) => Bson::Array(items.iter().map(Bson::from).collect()),
            Value::Map(map) => Bson::Document(
                map.iter()
                    .map(|(k, v)| (k.clone(), Bson::from(v)))
                    .collect(),
            ),
        }
    }
}
