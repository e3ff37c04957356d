//! # Serialization Errors
//!
//! Converters never recover from a bad input. They fail immediately with a
//! [`SerializationError`] and let the caller decide what to do with it.
//!
//! Every error carries a [`FieldPath`] pointing at the offending spot inside the wire value.
//! Converters raise errors relative to the value they were handed (the root, `$`), and
//! composite converters prepend the field name or list index they were working on as the
//! error travels outwards. The kind of the error never changes on the way up.
use crate::wire::{WireKind, WireValue};
use std::fmt;

/// A single step into a wire value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a value inside a wire value tree, rendered as `$.entries[2].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The path of the value handed to the converter.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializationError {
    /// The runtime shape of the wire value is not the one the converter expects.
    #[error("Type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: WireKind,
    },

    /// A mapping is missing a required key, or a value has the right shape but unusable contents.
    #[error("Malformed input at '{path}': {reason}")]
    MalformedInput { path: FieldPath, reason: String },

    /// A date/time text does not match the date pattern (or the pattern itself is unusable).
    #[error("Invalid date/time at '{path}': '{value}' does not match pattern '{pattern}': {reason}")]
    Format {
        path: FieldPath,
        value: String,
        pattern: String,
        reason: String,
    },
}

impl SerializationError {
    pub fn type_mismatch(expected: &'static str, found: &WireValue) -> Self {
        Self::TypeMismatch {
            path: FieldPath::root(),
            expected,
            found: WireKind::of(found),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: FieldPath::root(),
            reason: reason.into(),
        }
    }

    /// A required key is absent from a mapping. The key becomes part of the path.
    pub fn missing_field(field: &str) -> Self {
        Self::malformed("missing required field").in_field(field)
    }

    pub fn format(
        value: impl Into<String>,
        pattern: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        Self::Format {
            path: FieldPath::root(),
            value: value.into(),
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Re-raises this error as if it happened inside the field `name` of a mapping.
    pub fn in_field(self, name: &str) -> Self {
        self.nested(PathSegment::Field(name.to_string()))
    }

    /// Re-raises this error as if it happened inside element `index` of a list.
    pub fn at_index(self, index: usize) -> Self {
        self.nested(PathSegment::Index(index))
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::MalformedInput { path, .. }
            | Self::Format { path, .. } => path,
        }
    }

    fn nested(mut self, segment: PathSegment) -> Self {
        match &mut self {
            Self::TypeMismatch { path, .. }
            | Self::MalformedInput { path, .. }
            | Self::Format { path, .. } => path.prepend(segment),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_display() {
        assert_eq!(FieldPath::root().to_string(), "$");
        assert!(FieldPath::root().is_root());
    }

    #[test]
    fn test_nesting_prepends_segments() {
        let err = SerializationError::type_mismatch("string", &json!(3))
            .in_field("name")
            .at_index(2)
            .in_field("entries");

        assert_eq!(err.path().to_string(), "$.entries[2].name");
        assert_eq!(
            err.to_string(),
            "Type mismatch at '$.entries[2].name': expected string, found number"
        );
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let err = SerializationError::missing_field("path_lower");

        assert!(matches!(err, SerializationError::MalformedInput { .. }));
        assert_eq!(err.path().to_string(), "$.path_lower");
        assert!(err.to_string().contains("missing required field"));
    }

    #[test]
    fn test_nesting_keeps_the_kind() {
        let err = SerializationError::format("nope", "yyyy", "invalid year").at_index(0);
        assert!(matches!(err, SerializationError::Format { .. }));
    }
}
