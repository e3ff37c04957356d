//! # Serializable Capability
//!
//! [`Serializable`] is the uniform shape every converter exposes, so calling code can
//! treat built-in and generated converters interchangeably. There is exactly one
//! implementation per domain type and it is dispatched statically wherever the concrete
//! type is known.
//!
//! The transport layer is the one place where that is not the case: it has to treat every
//! [`crate::RouteDescriptor`] the same way regardless of the payload types of the endpoint.
//! For that, a route holds [`ConverterRef`]s, which are capability references ("whatever
//! implements `Serializable` for `T`") rather than instances, and decoding through one yields
//! a type-erased [`DynValue`].
use crate::{error::SerializationError, wire::WireValue};
use std::any::{Any, TypeId};
use std::fmt;

/// A stateless serialize/deserialize pair bound to the implementing domain type.
///
/// Implementations must uphold the round-trip law: for every value `v`,
/// `T::deserialize(&v.serialize())` is equal in meaning to `v`.
pub trait Serializable: Sized {
    /// Converts the value into a wire value fully representing it. Never fails.
    fn serialize(&self) -> WireValue;

    /// Rebuilds a value from its wire representation.
    ///
    /// # Errors
    ///
    /// Fails with a [`SerializationError`] when the wire value has the wrong shape,
    /// is missing required fields or carries unusable contents.
    fn deserialize(wire: &WireValue) -> Result<Self, SerializationError>;

    /// Human readable representation for diagnostics. Never empty.
    fn describe(&self) -> String;
}

/// Object safe mirror of [`Serializable`] for boxed values.
trait ErasedValue: Any + Send + Sync + fmt::Debug {
    fn erased_serialize(&self) -> WireValue;
    fn erased_describe(&self) -> String;
    fn erased_type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T> ErasedValue for T
where
    T: Serializable + Any + Send + Sync + fmt::Debug,
{
    fn erased_serialize(&self) -> WireValue {
        Serializable::serialize(self)
    }

    fn erased_describe(&self) -> String {
        Serializable::describe(self)
    }

    fn erased_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A domain value whose concrete type is only known at runtime.
///
/// Produced when a payload is decoded through a [`ConverterRef`]. Callers that know
/// the expected type recover it with [`DynValue::downcast`].
pub struct DynValue(Box<dyn ErasedValue>);

impl DynValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Serializable + Any + Send + Sync + fmt::Debug,
    {
        Self(Box::new(value))
    }

    pub fn serialize(&self) -> WireValue {
        self.0.erased_serialize()
    }

    pub fn describe(&self) -> String {
        self.0.erased_describe()
    }

    /// Fully qualified name of the concrete type (e.g. `stone_files::files::FileMetadata`).
    pub fn type_name(&self) -> &'static str {
        self.0.erased_type_name()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Recovers the concrete value, or gives the `DynValue` back if it holds another type.
    pub fn downcast<T: Any>(self) -> Result<T, DynValue> {
        if !self.is::<T>() {
            return Err(self);
        }

        let value = self
            .0
            .into_any()
            .downcast::<T>()
            .expect("concrete type checked above");

        Ok(*value)
    }
}

impl fmt::Debug for DynValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// A capability reference to the [`Serializable`] implementation of some type `T`.
///
/// It owns no data, only the recipe for decoding a payload of that type. It is `Copy`
/// and can be built in `const` context, so generated route tables reference converters
/// without instantiating anything.
#[derive(Clone, Copy)]
pub struct ConverterRef {
    type_name: fn() -> &'static str,
    type_id: fn() -> TypeId,
    deserialize: fn(&WireValue) -> Result<DynValue, SerializationError>,
}

impl ConverterRef {
    pub const fn of<T>() -> Self
    where
        T: Serializable + Any + Send + Sync + fmt::Debug,
    {
        Self {
            type_name: std::any::type_name::<T>,
            type_id: TypeId::of::<T>,
            deserialize: deserialize_erased::<T>,
        }
    }

    /// Fully qualified name of the domain type this converter handles.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Returns `true` when this is the converter of `T`.
    pub fn handles<T: Any>(&self) -> bool {
        (self.type_id)() == TypeId::of::<T>()
    }

    /// Decodes `wire` with the referenced converter.
    ///
    /// # Errors
    ///
    /// Whatever the referenced [`Serializable::deserialize`] fails with.
    pub fn deserialize(&self, wire: &WireValue) -> Result<DynValue, SerializationError> {
        (self.deserialize)(wire)
    }
}

fn deserialize_erased<T>(wire: &WireValue) -> Result<DynValue, SerializationError>
where
    T: Serializable + Any + Send + Sync + fmt::Debug,
{
    T::deserialize(wire).map(DynValue::new)
}

impl PartialEq for ConverterRef {
    fn eq(&self, other: &Self) -> bool {
        (self.type_id)() == (other.type_id)()
    }
}

impl Eq for ConverterRef {}

impl fmt::Debug for ConverterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConverterRef")
            .field(&self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const STRINGS: ConverterRef = ConverterRef::of::<Vec<String>>();

    #[test]
    fn test_converter_ref_decodes_through_the_referenced_type() {
        let value = STRINGS.deserialize(&json!(["a", "b"])).unwrap();

        assert!(value.is::<Vec<String>>());
        assert_eq!(value.serialize(), json!(["a", "b"]));
        assert_eq!(value.downcast::<Vec<String>>().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_converter_ref_propagates_errors() {
        let err = STRINGS.deserialize(&json!(["a", 1])).unwrap_err();

        assert!(matches!(err, SerializationError::TypeMismatch { .. }));
        assert_eq!(err.path().to_string(), "$[1]");
    }

    #[test]
    fn test_converter_ref_identity() {
        assert!(STRINGS.handles::<Vec<String>>());
        assert!(!STRINGS.handles::<String>());
        assert_eq!(STRINGS, ConverterRef::of::<Vec<String>>());
        assert_ne!(STRINGS, ConverterRef::of::<u64>());
        assert_eq!(STRINGS.type_name(), std::any::type_name::<Vec<String>>());
    }

    #[test]
    fn test_downcast_to_the_wrong_type_gives_the_value_back() {
        let value = DynValue::new(7u64);

        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(value.downcast_ref::<u64>(), Some(&7));
        assert_eq!(value.describe(), "7");
        assert_eq!(value.type_name(), "u64");
    }
}
