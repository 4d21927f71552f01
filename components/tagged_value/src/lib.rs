//! Dynamic values crossing the native/script boundary.
//!
//! This crate provides the closed tagged union exchanged with an embedded
//! scripting runtime, its lenient numeric literal parser, its text
//! rendering, and the conversion protocol to and from runtime handles.
//!
//! # Overview
//!
//! - [`TaggedValue`] - one of undefined, null, boolean, three numeric
//!   kinds, date, string, native object, runtime handle, or a placeholder
//! - [`ValueKind`] - discriminant of a `TaggedValue`
//! - [`parse_numeric_literal`] - text to `Integer`/`Long`/`Number`
//! - [`format_number`] - `%.16g` rendering used for `Number`
//! - [`Bridge`] - classification of runtime handles and conversion back,
//!   over the [`RuntimeValue`], [`ObjectRegistry`] and [`ValueFactory`]
//!   collaborators
//! - [`PersistentHandle`] - reference-counted handle that outlives a call
//!
//! # Examples
//!
//! ```
//! use tagged_value::{TaggedValue, ValueKind};
//!
//! let n: TaggedValue<()> = TaggedValue::parse_number("9999999999");
//! assert_eq!(n.kind(), ValueKind::Long);
//! assert_eq!(n.render(), ("9999999999".to_string(), true));
//!
//! let u: TaggedValue<()> = TaggedValue::Undefined;
//! assert_eq!(u.render(), ("undefined".to_string(), false));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bridge;
mod handle;
mod number;
mod render;
mod value;

pub use bridge::{Bridge, BridgeConfig, HandleLifetime, ObjectRegistry, RuntimeValue, ValueFactory};
pub use date_value::{DatePart, DateValue};
pub use handle::PersistentHandle;
pub use number::{parse_numeric_bytes, parse_numeric_literal, NumericLiteral};
pub use render::format_number;
pub use value::{ObjectId, TaggedValue, ValueKind};
