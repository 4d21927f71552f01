//! In-memory scripting runtime for the tagged value bridge
//!
//! `ScriptValue` models the values a dynamic scripting engine hands to
//! native code, and `ScriptHeap` tracks the native objects exposed to it.
//! Together they implement every collaborator [`tagged_value::Bridge`]
//! needs, which makes this crate both a test runtime and the template for
//! adapting a real engine.
//!
//! # Example
//!
//! ```
//! use script_host::{ScriptHeap, ScriptValue};
//! use tagged_value::{BridgeConfig, TaggedValue};
//!
//! let heap = ScriptHeap::new();
//! let bridge = heap.bridge(BridgeConfig::default());
//!
//! let value = bridge.classify(&ScriptValue::number(42.0));
//! assert_eq!(value, TaggedValue::Integer(42));
//! assert_eq!(bridge.to_handle(&value), ScriptValue::number(42.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod heap;
pub mod value;

pub use error::HostError;
pub use heap::ScriptHeap;
pub use value::{FunctionData, ObjectData, ScriptValue};
