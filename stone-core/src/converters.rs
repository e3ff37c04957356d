//! # Built-in Converters
//!
//! Every converter here is a set of free functions over one scalar kind, plus the
//! [`crate::Serializable`] implementation of the matching Rust type where one exists.
//! Generated code composes them field by field.
//!
//! | Module          | Domain type                   | Wire shape                         |
//! |-----------------|-------------------------------|------------------------------------|
//! | [`text`]        | `String`                      | string                             |
//! | [`number`]      | `i32` `i64` `u32` `u64` `f32` `f64` | number                       |
//! | [`boolean`]     | `bool`                        | number, `0` or `1`                 |
//! | [`timestamp`]   | `time::OffsetDateTime`        | string, per a caller given pattern |
//! | [`bytes`]       | `Vec<u8>`                     | base64 string                      |
//! | [`collection`]  | `Vec<T>`                      | list                               |
//! | [`nullable`]    | `Option<T>`                   | `null` or the inner shape          |
//!
//! [`object`] holds the helpers generated structs and unions are built from.
pub mod boolean;
pub mod bytes;
pub mod collection;
pub mod nullable;
pub mod number;
pub mod object;
pub mod text;
pub mod timestamp;
