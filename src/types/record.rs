//! Record capability
//!
//! Every entity that can be listed through the query engine exposes its
//! fields by name instead of being inspected structurally.

use std::cmp::Ordering;
use std::fmt;

/// A single field value extracted from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    /// Lowercased string form used for keyword matching.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_lowercase(),
            FieldValue::Number(n) => n.to_string(),
        }
    }

    /// Compare two values for sorting.
    ///
    /// Text compares case-insensitively and numbers numerically. When the
    /// kinds differ, numbers order before text.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (FieldValue::Number(a), FieldValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
            (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n as f64)
    }
}

/// An entity readable by the query engine.
pub trait Record: Clone {
    /// Entity name used in error context (e.g. "user").
    const ENTITY: &'static str;

    /// Fields matched against a search keyword.
    const SEARCHABLE_FIELDS: &'static [&'static str];

    /// Stable identity key.
    fn id(&self) -> &str;

    /// Extract a field by its wire name. Unknown names yield `None`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}
