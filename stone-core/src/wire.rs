//! # Wire Values
//!
//! The universal interchange type. A wire value is restricted to the closed set
//! `{null, boolean, number, string, list, mapping}`, which is exactly what
//! [`serde_json::Value`] models, so we use it directly instead of a parallel tree.
use std::fmt;

/// A dynamically typed, JSON-shaped value.
pub type WireValue = serde_json::Value;

/// The mapping variant of a [`WireValue`]. Keys are unique.
pub type WireObject = serde_json::Map<String, WireValue>;

/// The runtime shape of a [`WireValue`], used to report what a converter found
/// when it was expecting something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Null,
    Boolean,
    Number,
    String,
    List,
    Mapping,
}

impl WireKind {
    /// Returns the shape of `value`.
    pub fn of(value: &WireValue) -> Self {
        match value {
            WireValue::Null => WireKind::Null,
            WireValue::Bool(_) => WireKind::Boolean,
            WireValue::Number(_) => WireKind::Number,
            WireValue::String(_) => WireKind::String,
            WireValue::Array(_) => WireKind::List,
            WireValue::Object(_) => WireKind::Mapping,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WireKind::Null => "null",
            WireKind::Boolean => "boolean",
            WireKind::Number => "number",
            WireKind::String => "string",
            WireKind::List => "list",
            WireKind::Mapping => "mapping",
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
