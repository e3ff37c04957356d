//! Boolean converter.
//!
//! Booleans travel as a `0`/`1` number, the encoding the generated SDKs have always used.
//! Decoding is lenient: any nonzero number is `true`, and a native JSON boolean is accepted
//! as well. Only `0` (or `false`) decodes to `false`.
use crate::{Serializable, SerializationError, WireValue};

pub fn serialize(value: bool) -> WireValue {
    WireValue::from(u8::from(value))
}

pub fn deserialize(wire: &WireValue) -> Result<bool, SerializationError> {
    match wire {
        WireValue::Bool(value) => Ok(*value),
        WireValue::Number(number) => {
            let is_zero = match (number.as_u64(), number.as_i64(), number.as_f64()) {
                (Some(value), _, _) => value == 0,
                (_, Some(value), _) => value == 0,
                (_, _, Some(value)) => value == 0.0,
                (None, None, None) => false,
            };
            Ok(!is_zero)
        }
        other => Err(SerializationError::type_mismatch("number", other)),
    }
}

impl Serializable for bool {
    fn serialize(&self) -> WireValue {
        serialize(*self)
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        deserialize(wire)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bool_serializes_to_zero_or_one() {
        assert_eq!(true.serialize(), json!(1));
        assert_eq!(false.serialize(), json!(0));
    }

    #[test]
    fn test_bool_round_trip() {
        assert!(bool::deserialize(&json!(1)).unwrap());
        assert!(!bool::deserialize(&json!(0)).unwrap());
        assert!(bool::deserialize(&true.serialize()).unwrap());
        assert!(!bool::deserialize(&false.serialize()).unwrap());
    }

    // Deliberately looser than a strict {0, 1} check. Tightening it is a contract change.
    #[test]
    fn test_any_nonzero_number_is_true() {
        assert!(bool::deserialize(&json!(42)).unwrap());
        assert!(bool::deserialize(&json!(-1)).unwrap());
        assert!(bool::deserialize(&json!(0.5)).unwrap());
        assert!(!bool::deserialize(&json!(0.0)).unwrap());
    }

    #[test]
    fn test_native_json_booleans_are_accepted() {
        assert!(bool::deserialize(&json!(true)).unwrap());
        assert!(!bool::deserialize(&json!(false)).unwrap());
    }

    #[test]
    fn test_bool_rejects_text() {
        assert!(matches!(
            bool::deserialize(&json!("true")),
            Err(SerializationError::TypeMismatch { .. })
        ));
        assert!(matches!(
            bool::deserialize(&json!(null)),
            Err(SerializationError::TypeMismatch { .. })
        ));
    }
}
