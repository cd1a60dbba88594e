use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Name of the pseudo-field that refers to a document's own key.
pub const KEY_FIELD_NAME: &str = "__name__";

/// Dotted reference to a (possibly nested) document field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(dotted: &str) -> Result<Self, QueryError> {
        if dotted.is_empty() || dotted.split('.').any(str::is_empty) {
            return Err(QueryError::InvalidFieldPath(dotted.to_string()));
        }
        Ok(Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        })
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(|s| s.is_empty() || s.contains('.')) {
            return Err(QueryError::InvalidFieldPath(segments.join(".")));
        }
        Ok(Self { segments })
    }

    pub fn key_field() -> Self {
        Self {
            segments: vec![KEY_FIELD_NAME.to_string()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_key_field(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == KEY_FIELD_NAME
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Slash-separated path naming a collection, e.g. `rooms/eros/messages`.
///
/// The empty path is the database root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn parse(path: &str) -> Result<Self, QueryError> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed.split('/').any(str::is_empty) {
            return Err(QueryError::InvalidResourcePath(path.to_string()));
        }
        Ok(Self {
            segments: trimmed.split('/').map(str::to_string).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn child(&self, segment: impl Into<String>) -> Result<Self, QueryError> {
        let segment = segment.into();
        if segment.is_empty() || segment.contains('/') {
            return Err(QueryError::InvalidResourcePath(segment));
        }
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self { segments })
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
