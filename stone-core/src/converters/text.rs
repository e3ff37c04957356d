//! Text converter. Identity on well formed strings; escaping is the JSON encoder's job.
use crate::{Serializable, SerializationError, WireValue};

pub fn serialize(value: &str) -> WireValue {
    WireValue::String(value.to_string())
}

pub fn deserialize(wire: &WireValue) -> Result<String, SerializationError> {
    match wire {
        WireValue::String(value) => Ok(value.clone()),
        other => Err(SerializationError::type_mismatch("string", other)),
    }
}

impl Serializable for String {
    fn serialize(&self) -> WireValue {
        serialize(self)
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        deserialize(wire)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_is_identity() {
        let value = "/Homework/math \"quoted\"".to_string();

        assert_eq!(value.serialize(), json!("/Homework/math \"quoted\""));
        assert_eq!(String::deserialize(&value.serialize()).unwrap(), value);
    }

    #[test]
    fn test_text_rejects_other_shapes() {
        for wire in [json!(null), json!(1), json!(true), json!(["a"]), json!({"a": 1})] {
            let err = String::deserialize(&wire).unwrap_err();
            assert!(matches!(
                err,
                SerializationError::TypeMismatch {
                    expected: "string",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_describe_empty_text_is_not_empty() {
        assert_eq!(String::new().describe(), "\"\"");
    }
}
