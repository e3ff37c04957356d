//! # Stone Core
//!
//! `stone-core` is the runtime support layer consumed by generated SDK code. It converts
//! strongly typed domain values to and from a dynamic, JSON-shaped wire value, and it
//! carries the declarative metadata that describes a remote procedure call endpoint.
//!
//! ## Key Components
//!
//! * **[`Serializable`]:** The contract every converter satisfies, built-in or generated.
//!   One implementation per domain type, dispatched statically.
//! * **[`converters`]:** The built-in primitive converters (text, numbers, booleans, timestamps,
//!   bytes), the collection converter and the helpers generated aggregate types are assembled from.
//! * **[`RouteDescriptor`]:** An immutable record describing one endpoint: its name, namespace,
//!   deprecation flag, free-form attributes and capability references ([`ConverterRef`]) to the
//!   converters of its result and error payloads.
//! * **[`response`]:** Decoding of an already received HTTP response against a route, keeping
//!   contract violations apart from transport failures.
//!
//! ## Wire values
//!
//! The wire representation is [`serde_json::Value`]. Turning it into JSON text (and back) is
//! left to `serde_json`; nothing in this crate performs I/O.
//!
//! ```rust
//! use stone_core::{Serializable, serde_json::json};
//!
//! assert_eq!(true.serialize(), json!(1));
//! assert_eq!(bool::deserialize(&json!(42)).unwrap(), true);
//! assert_eq!(Vec::<String>::deserialize(&json!(["a", "b"])).unwrap(), vec!["a", "b"]);
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports `serde_json` and `time` so generated code and its consumers
//! use compatible versions of both.
pub mod converters;
pub mod error;
pub mod response;
pub mod route;
pub mod serializable;
pub mod wire;

pub use error::{FieldPath, SerializationError};
pub use route::{RouteDescriptor, RouteStyle};
pub use serializable::{ConverterRef, DynValue, Serializable};
pub use wire::{WireKind, WireObject, WireValue};

// Re-exports
pub use serde_json;
pub use time;
