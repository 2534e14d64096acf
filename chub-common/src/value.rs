//! Leaf values and field paths produced by flattening a catalog record

use serde_json::{Number, Value};
use std::fmt;

/// A terminal value reached while walking a nested record.
///
/// Borrowed from the record being walked. Mappings and sequences never
/// appear here; the flattener descends into them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    /// JSON number, kept in its source form so decimal conversion stays exact
    Number(&'a Number),
    Text(&'a str),
}

impl<'a> Scalar<'a> {
    /// Classify a JSON value as a scalar.
    ///
    /// Returns `None` for objects and arrays.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => Some(Scalar::Number(n)),
            Value::String(s) => Some(Scalar::Text(s.as_str())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Ordered sequence of mapping keys locating a leaf inside a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: &str) {
        self.0.push(segment.to_string());
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Canonical `a.b.c` form
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// Last segment, used as the tag mapper's lookup key
    pub fn short_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// One (path, value) pair yielded by [`crate::flatten()`]
#[derive(Debug, Clone, PartialEq)]
pub struct LeafEntry<'a> {
    pub path: FieldPath,
    pub value: Scalar<'a>,
}
