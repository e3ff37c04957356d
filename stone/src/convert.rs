//! # Scalar Conversions
//!
//! Glue between the textual values typed on the command line and the built-in converters of
//! `stone-core`. Timestamps are read and shown in RFC 3339; on the wire they use the date
//! pattern given on the command line.
use crate::cli::ValueKind;
use anyhow::{Context, bail};
use stone_core::{
    Serializable, SerializationError, WireValue,
    converters::{boolean, bytes, collection, number, text, timestamp},
};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Converts each textual value with the `kind` converter. Without `list`, exactly one value is
/// expected and its wire value is returned as is.
pub fn encode(
    kind: ValueKind,
    values: &[String],
    list: bool,
    pattern: &str,
) -> anyhow::Result<WireValue> {
    let mut encoded = values
        .iter()
        .map(|value| encode_one(kind, value, pattern))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if list {
        return Ok(collection::serialize(&encoded, WireValue::clone));
    }

    match (encoded.pop(), encoded.is_empty()) {
        (Some(wire), true) => Ok(wire),
        _ => bail!("expected exactly one value, got {} (use --list)", values.len()),
    }
}

fn encode_one(kind: ValueKind, value: &str, pattern: &str) -> anyhow::Result<WireValue> {
    let wire = match kind {
        ValueKind::Text => text::serialize(value),
        ValueKind::Number => {
            let parsed: serde_json::Number = serde_json::from_str(value)
                .with_context(|| format!("'{value}' is not a number"))?;
            number::serialize(parsed)
        }
        ValueKind::Boolean => {
            let parsed: bool = value
                .parse()
                .with_context(|| format!("'{value}' is not 'true' or 'false'"))?;
            boolean::serialize(parsed)
        }
        ValueKind::Timestamp => {
            let instant = OffsetDateTime::parse(value, &Rfc3339)
                .with_context(|| format!("'{value}' is not an RFC 3339 timestamp"))?;
            timestamp::serialize(&instant, pattern)?
        }
        ValueKind::Bytes => bytes::serialize(value.as_bytes()),
    };

    Ok(wire)
}

/// Decodes `wire` with the `kind` converter, or with the collection converter around it when
/// `list` is set, and describes the result.
pub fn decode(
    kind: ValueKind,
    wire: &WireValue,
    list: bool,
    pattern: &str,
) -> Result<String, SerializationError> {
    if !list {
        return decode_one(kind, wire, pattern);
    }

    let elements = collection::deserialize(wire, |element| decode_one(kind, element, pattern))?;
    Ok(format!("[{}]", elements.join(", ")))
}

fn decode_one(kind: ValueKind, wire: &WireValue, pattern: &str) -> Result<String, SerializationError> {
    match kind {
        ValueKind::Text => String::deserialize(wire).map(|value| value.describe()),
        ValueKind::Number => number::deserialize(wire).map(|value| value.to_string()),
        ValueKind::Boolean => bool::deserialize(wire).map(|value| value.describe()),
        ValueKind::Timestamp => {
            let instant = timestamp::deserialize(wire, pattern)?;
            Ok(instant.format(&Rfc3339).unwrap_or_else(|_| instant.to_string()))
        }
        ValueKind::Bytes => {
            bytes::deserialize(wire).map(|value| format!("b\"{}\"", value.escape_ascii()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_encode_scalars() {
        let pattern = "yyyy-MM-dd";

        assert_eq!(encode(ValueKind::Boolean, &strings(&["true"]), false, pattern).unwrap(), json!(1));
        assert_eq!(encode(ValueKind::Number, &strings(&["2.5"]), false, pattern).unwrap(), json!(2.5));
        assert_eq!(encode(ValueKind::Text, &strings(&["hi"]), false, pattern).unwrap(), json!("hi"));
        assert_eq!(encode(ValueKind::Bytes, &strings(&["hi"]), false, pattern).unwrap(), json!("aGk="));
        assert_eq!(
            encode(ValueKind::Timestamp, &strings(&["2023-01-15T00:00:00Z"]), false, pattern).unwrap(),
            json!("2023-01-15")
        );
    }

    #[test]
    fn test_encode_list() {
        let wire = encode(ValueKind::Number, &strings(&["3", "1", "3"]), true, "").unwrap();
        assert_eq!(wire, json!([3, 1, 3]));
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        assert!(encode(ValueKind::Number, &strings(&["one"]), false, "").is_err());
        assert!(encode(ValueKind::Boolean, &strings(&["1"]), false, "").is_err());
        assert!(encode(ValueKind::Text, &strings(&["a", "b"]), false, "").is_err());
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode(ValueKind::Boolean, &json!(42), false, "").unwrap(), "true");
        assert_eq!(decode(ValueKind::Text, &json!(["a", "b"]), true, "").unwrap(), r#"["a", "b"]"#);
        assert_eq!(
            decode(ValueKind::Timestamp, &json!("2023-01-15"), false, "yyyy-MM-dd").unwrap(),
            "2023-01-15T00:00:00Z"
        );
        assert_eq!(decode(ValueKind::Bytes, &json!("aGk="), false, "").unwrap(), r#"b"hi""#);
        assert_eq!(decode(ValueKind::Bytes, &json!("/2E="), false, "").unwrap(), r#"b"\xffa""#);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode(ValueKind::Number, &json!("1"), false, ""),
            Err(SerializationError::TypeMismatch { .. })
        ));

        let err = decode(ValueKind::Number, &json!([1, "2"]), true, "").unwrap_err();
        assert_eq!(err.path().to_string(), "$[1]");
    }
}
