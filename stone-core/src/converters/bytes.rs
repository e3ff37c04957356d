//! Binary converter. Bytes travel as standard, padded base64 text.
use crate::{SerializationError, WireValue};
use base64::{Engine, engine::general_purpose::STANDARD};

pub fn serialize(value: &[u8]) -> WireValue {
    WireValue::String(STANDARD.encode(value))
}

pub fn deserialize(wire: &WireValue) -> Result<Vec<u8>, SerializationError> {
    let WireValue::String(encoded) = wire else {
        return Err(SerializationError::type_mismatch("base64 string", wire));
    };

    STANDARD
        .decode(encoded)
        .map_err(|e| SerializationError::malformed(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bytes_are_base64() {
        assert_eq!(serialize(b"hello"), json!("aGVsbG8="));
        assert_eq!(deserialize(&json!("aGVsbG8=")).unwrap(), b"hello");
        assert_eq!(serialize(&[]), json!(""));
    }

    #[test]
    fn test_invalid_base64_is_malformed() {
        assert!(matches!(
            deserialize(&json!("not base64!")),
            Err(SerializationError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_bytes_reject_lists() {
        assert!(matches!(
            deserialize(&json!([104, 105])),
            Err(SerializationError::TypeMismatch { .. })
        ));
    }
}
