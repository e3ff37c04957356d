//! # Aggregate Helpers
//!
//! Building blocks for generated structs and unions, which marshal themselves to and from a
//! mapping-shaped wire value field by field.
//!
//! ## Structs
//!
//! Reading goes through [`expect_object`] and then [`required`] / [`optional`] per field (or
//! their `_with` variants when the field needs an explicit converter, like a timestamp with its
//! pattern). Errors raised for a field carry the field name in their path. Keys nobody asks for
//! are ignored, so a server can add fields without breaking older clients.
//!
//! Writing goes through [`ObjectBuilder`].
//!
//! ## Unions
//!
//! A union variant travels either as its bare tag (`"other"`) or as a mapping holding the tag
//! under `".tag"` next to the variant's fields (`{".tag": "malformed_path", "malformed_path": "/a"}`).
//! [`union_tag`] reads both forms; [`bare_tag`] and [`tagged`] write them.
use crate::{Serializable, SerializationError, WireObject, WireValue};

/// Key holding the variant name of a union serialized as a mapping.
pub const TAG_KEY: &str = ".tag";

pub fn expect_object(wire: &WireValue) -> Result<&WireObject, SerializationError> {
    wire.as_object()
        .ok_or_else(|| SerializationError::type_mismatch("mapping", wire))
}

/// Reads the required field `name` with its canonical converter.
pub fn required<T: Serializable>(object: &WireObject, name: &str) -> Result<T, SerializationError> {
    required_with(object, name, T::deserialize)
}

/// Reads the optional field `name`. An absent key and an explicit `null` are both `None`.
pub fn optional<T: Serializable>(
    object: &WireObject,
    name: &str,
) -> Result<Option<T>, SerializationError> {
    optional_with(object, name, T::deserialize)
}

pub fn required_with<T, F>(object: &WireObject, name: &str, convert: F) -> Result<T, SerializationError>
where
    F: FnOnce(&WireValue) -> Result<T, SerializationError>,
{
    let value = object
        .get(name)
        .ok_or_else(|| SerializationError::missing_field(name))?;

    convert(value).map_err(|e| e.in_field(name))
}

pub fn optional_with<T, F>(
    object: &WireObject,
    name: &str,
    convert: F,
) -> Result<Option<T>, SerializationError>
where
    F: FnOnce(&WireValue) -> Result<T, SerializationError>,
{
    match object.get(name) {
        None | Some(WireValue::Null) => Ok(None),
        Some(value) => convert(value).map(Some).map_err(|e| e.in_field(name)),
    }
}

/// Accumulates the fields of a mapping-shaped wire value.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    fields: WireObject,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, value: WireValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Adds the field only when there is a value. Absent optional fields are omitted
    /// rather than written as `null`.
    pub fn optional_field(self, name: &str, value: Option<WireValue>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    pub fn build(self) -> WireValue {
        WireValue::Object(self.fields)
    }

    pub fn into_object(self) -> WireObject {
        self.fields
    }
}

/// The variant a union wire value selects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnionTag<'a> {
    pub tag: &'a str,
    /// The whole mapping when the variant was sent in mapping form, `None` for a bare tag.
    pub fields: Option<&'a WireObject>,
}

impl<'a> UnionTag<'a> {
    /// Reads the value a variant carries under its own name (`{".tag": "t", "t": value}`).
    pub fn value<T: Serializable>(&self) -> Result<T, SerializationError> {
        self.value_with(T::deserialize)
    }

    pub fn value_with<T, F>(&self, convert: F) -> Result<T, SerializationError>
    where
        F: FnOnce(&WireValue) -> Result<T, SerializationError>,
    {
        match self.fields {
            Some(fields) => required_with(fields, self.tag, convert),
            None => Err(SerializationError::missing_field(self.tag)),
        }
    }

    /// The fields of a variant carrying a struct inline next to its tag.
    pub fn fields(&self) -> Result<&'a WireObject, SerializationError> {
        self.fields
            .ok_or_else(|| SerializationError::malformed(format!("variant '{}' requires fields", self.tag)))
    }
}

pub fn union_tag(wire: &WireValue) -> Result<UnionTag<'_>, SerializationError> {
    match wire {
        WireValue::String(tag) => Ok(UnionTag { tag, fields: None }),
        WireValue::Object(fields) => {
            let tag = match fields.get(TAG_KEY) {
                Some(WireValue::String(tag)) => tag,
                Some(other) => {
                    return Err(SerializationError::type_mismatch("string", other).in_field(TAG_KEY));
                }
                None => return Err(SerializationError::missing_field(TAG_KEY)),
            };
            Ok(UnionTag {
                tag,
                fields: Some(fields),
            })
        }
        other => Err(SerializationError::type_mismatch("string or mapping", other)),
    }
}

/// Writes a variant that carries no value.
pub fn bare_tag(tag: &str) -> WireValue {
    WireValue::String(tag.to_string())
}

/// Writes a variant as a mapping: the tag under [`TAG_KEY`] merged with `fields`.
pub fn tagged(tag: &str, fields: ObjectBuilder) -> WireValue {
    let mut object = WireObject::new();
    object.insert(TAG_KEY.to_string(), bare_tag(tag));
    object.extend(fields.into_object());
    WireValue::Object(object)
}

/// Reports a tag the union does not know about.
pub fn unknown_tag(tag: &str) -> SerializationError {
    SerializationError::malformed(format!("unknown union tag '{tag}'")).in_field(TAG_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::timestamp;
    use serde_json::json;

    #[test]
    fn test_required_and_optional_fields() {
        let wire = json!({"name": "a.txt", "size": 12, "rev": null, "extra": "ignored"});
        let object = expect_object(&wire).unwrap();

        assert_eq!(required::<String>(object, "name").unwrap(), "a.txt");
        assert_eq!(required::<u64>(object, "size").unwrap(), 12);
        assert_eq!(optional::<String>(object, "rev").unwrap(), None);
        assert_eq!(optional::<String>(object, "missing").unwrap(), None);
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let wire = json!({"name": "a.txt"});
        let object = expect_object(&wire).unwrap();

        let err = required::<u64>(object, "size").unwrap_err();
        assert!(matches!(err, SerializationError::MalformedInput { .. }));
        assert_eq!(err.path().to_string(), "$.size");
    }

    #[test]
    fn test_wrong_field_shape_is_named() {
        let wire = json!({"size": "12", "tags": ["a", 2]});
        let object = expect_object(&wire).unwrap();

        let err = required::<u64>(object, "size").unwrap_err();
        assert!(matches!(err, SerializationError::TypeMismatch { .. }));
        assert_eq!(err.path().to_string(), "$.size");

        let err = optional::<Vec<String>>(object, "tags").unwrap_err();
        assert_eq!(err.path().to_string(), "$.tags[1]");
    }

    #[test]
    fn test_field_with_explicit_converter() {
        let wire = json!({"modified": "2023-01-15"});
        let object = expect_object(&wire).unwrap();

        let modified = required_with(object, "modified", |v| timestamp::deserialize(v, "yyyy-MM-dd"));
        assert!(modified.is_ok());

        let err = required_with(object, "modified", |v| timestamp::deserialize(v, "dd.MM.yyyy"))
            .unwrap_err();
        assert!(matches!(err, SerializationError::Format { .. }));
        assert_eq!(err.path().to_string(), "$.modified");
    }

    #[test]
    fn test_expect_object_rejects_lists() {
        assert!(matches!(
            expect_object(&json!([])),
            Err(SerializationError::TypeMismatch {
                expected: "mapping",
                ..
            })
        ));
    }

    #[test]
    fn test_builder_omits_absent_optionals() {
        let wire = ObjectBuilder::new()
            .field("name", json!("a.txt"))
            .optional_field("rev", None)
            .optional_field("size", Some(json!(3)))
            .build();

        assert_eq!(wire, json!({"name": "a.txt", "size": 3}));
    }

    #[test]
    fn test_union_tag_forms() {
        let bare = json!("other");
        let tag = union_tag(&bare).unwrap();
        assert_eq!(tag.tag, "other");
        assert!(tag.fields.is_none());

        let with_value = tagged("malformed_path", ObjectBuilder::new().field("malformed_path", json!("/a")));
        assert_eq!(with_value, json!({".tag": "malformed_path", "malformed_path": "/a"}));

        let tag = union_tag(&with_value).unwrap();
        assert_eq!(tag.tag, "malformed_path");
        assert_eq!(tag.value::<String>().unwrap(), "/a");
    }

    #[test]
    fn test_union_tag_errors() {
        assert!(matches!(
            union_tag(&json!({"malformed_path": "/a"})),
            Err(SerializationError::MalformedInput { .. })
        ));
        assert!(matches!(
            union_tag(&json!({".tag": 1})),
            Err(SerializationError::TypeMismatch { .. })
        ));
        assert!(matches!(
            union_tag(&json!(3)),
            Err(SerializationError::TypeMismatch { .. })
        ));

        let bare = json!("malformed_path");
        let err = union_tag(&bare).unwrap().value::<String>().unwrap_err();
        assert_eq!(err.path().to_string(), "$.malformed_path");

        assert_eq!(unknown_tag("nope").path().to_string(), "$..tag");
    }
}
