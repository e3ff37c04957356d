//! Optional values: `None` travels as `null`, `Some(v)` as the wire form of `v`.
use crate::{Serializable, SerializationError, WireValue};

impl<T: Serializable> Serializable for Option<T> {
    fn serialize(&self) -> WireValue {
        match self {
            Some(value) => value.serialize(),
            None => WireValue::Null,
        }
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        match wire {
            WireValue::Null => Ok(None),
            other => T::deserialize(other).map(Some),
        }
    }

    fn describe(&self) -> String {
        match self {
            Some(value) => value.describe(),
            None => "null".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_maps_none_to_null() {
        assert_eq!(None::<String>.serialize(), json!(null));
        assert_eq!(Option::<String>::deserialize(&json!(null)).unwrap(), None);
        assert_eq!(None::<u64>.describe(), "null");
    }

    #[test]
    fn test_option_delegates_to_inner_converter() {
        assert_eq!(Some(false).serialize(), json!(0));
        assert_eq!(Option::<u32>::deserialize(&json!(5)).unwrap(), Some(5));
        assert!(Option::<u32>::deserialize(&json!("5")).is_err());
    }
}
