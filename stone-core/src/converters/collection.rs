//! Collection converter.
//!
//! Lifts a per-element converter over an ordered sequence. The element converter is handed
//! in per call, so the same code serves every element type, nested lists included. Elements
//! are never inspected here, only threaded through the element converter in order.
use crate::{Serializable, SerializationError, WireValue};

/// Serializes every item in order. Duplicates are kept and an empty sequence becomes `[]`.
pub fn serialize<'a, T, I, F>(items: I, serialize_element: F) -> WireValue
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    F: FnMut(&'a T) -> WireValue,
{
    WireValue::Array(items.into_iter().map(serialize_element).collect())
}

/// Deserializes every element in order.
///
/// # Errors
///
/// Fails with a `TypeMismatch` if `wire` is not a list. Otherwise the first element the
/// element converter rejects fails the whole call, with its index added to the error path;
/// no partial result is produced.
pub fn deserialize<T, F>(wire: &WireValue, mut deserialize_element: F) -> Result<Vec<T>, SerializationError>
where
    F: FnMut(&WireValue) -> Result<T, SerializationError>,
{
    let WireValue::Array(elements) = wire else {
        return Err(SerializationError::type_mismatch("list", wire));
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| deserialize_element(element).map_err(|e| e.at_index(index)))
        .collect()
}

impl<T: Serializable> Serializable for Vec<T> {
    fn serialize(&self) -> WireValue {
        serialize(self, T::serialize)
    }

    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError> {
        deserialize(wire, T::deserialize)
    }

    fn describe(&self) -> String {
        let elements: Vec<String> = self.iter().map(T::describe).collect();
        format!("[{}]", elements.join(", "))
    }
}
