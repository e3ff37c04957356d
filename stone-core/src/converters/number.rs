//! Numeric converter.
//!
//! Identity on numeric wire values: a number is never coerced from a string or a boolean.
//! The typed implementations additionally check that the number fits the Rust type.
use crate::{Serializable, SerializationError, WireValue};
use serde_json::Number;

pub fn serialize(value: Number) -> WireValue {
    WireValue::Number(value)
}

pub fn deserialize(wire: &WireValue) -> Result<Number, SerializationError> {
    match wire {
        WireValue::Number(value) => Ok(value.clone()),
        other => Err(SerializationError::type_mismatch("number", other)),
    }
}

fn out_of_range(value: &Number, type_name: &str) -> SerializationError {
    SerializationError::malformed(format!("{value} is not a valid {type_name}"))
}

macro_rules! integer_serializable {
    ($ty:ty, $name:literal, $as_wide:ident) => {
        impl Serializable for $ty {
            fn serialize(&self) -> WireValue {
                WireValue::from(*self)
            }

            fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
                let value = deserialize(wire)?;
                value
                    .$as_wide()
                    .and_then(|wide| <$ty>::try_from(wide).ok())
                    .ok_or_else(|| out_of_range(&value, $name))
            }

            fn describe(&self) -> String {
                self.to_string()
            }
        }
    };
}

integer_serializable!(i32, "int32", as_i64);
integer_serializable!(i64, "int64", as_i64);
integer_serializable!(u32, "uint32", as_u64);
integer_serializable!(u64, "uint64", as_u64);

impl Serializable for f64 {
    /// Non-finite values have no JSON representation and serialize to `null`.
    fn serialize(&self) -> WireValue {
        WireValue::from(*self)
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let value = deserialize(wire)?;
        value
            .as_f64()
            .ok_or_else(|| out_of_range(&value, "float64"))
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl Serializable for f32 {
    fn serialize(&self) -> WireValue {
        f64::from(*self).serialize()
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        let wide = f64::deserialize(wire)?;
        let narrow = wide as f32;
        if narrow.is_infinite() {
            return Err(SerializationError::malformed(format!("{wide} is not a valid float32")));
        }
        Ok(narrow)
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}
