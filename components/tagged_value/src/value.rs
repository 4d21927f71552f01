//! The tagged value crossing the native/script boundary.
//!
//! This module provides the `TaggedValue` enum holding exactly one of a
//! closed set of kinds, plus the `ValueKind` discriminant used for logging
//! and dispatch.

use std::fmt;

use date_value::DateValue;
use num_traits::ToPrimitive;

use crate::handle::PersistentHandle;

/// Identifier of a native object registered with the script runtime.
///
/// This is a non-owning back-reference: the object registry resolves it at
/// conversion time and may report it as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Represents any value exchanged with the scripting runtime.
///
/// `H` is the runtime's value handle type. Reassigning a `TaggedValue`
/// drops the previous payload first, so an owned string is freed and a
/// persistent handle loses one reference before the new payload is
/// installed.
///
/// Transient handles are only valid for the call they were taken in;
/// cloning one does not extend that.
///
/// # Examples
///
/// ```
/// use tagged_value::{TaggedValue, ValueKind};
///
/// let v: TaggedValue<()> = TaggedValue::from_integer(1 << 40);
/// assert_eq!(v.kind(), ValueKind::Long);
///
/// let n: TaggedValue<()> = TaggedValue::parse_number("12.5e2");
/// assert_eq!(n, TaggedValue::Number(1250.0));
/// ```
#[derive(Clone)]
pub enum TaggedValue<H> {
    /// Absence of value, script-visible as `undefined`
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Boolean(bool),
    /// Exact integer in 32-bit range
    Integer(i32),
    /// Exact integer outside 32-bit range
    Long(i64),
    /// Floating point value
    Number(f64),
    /// Calendar instant
    Date(DateValue),
    /// Owned UTF-8 text
    String(String),
    /// Registered native object (non-owning)
    Object(ObjectId),
    /// Runtime handle borrowed for the current call
    TransientHandle(H),
    /// Runtime handle holding its own reference
    PersistentHandle(PersistentHandle<H>),
    /// Structural placeholder, behaves as null
    Type,
    /// Structural placeholder, behaves as null
    PersistentMarker,
}

/// Discriminant of a [`TaggedValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `TaggedValue::Undefined`
    Undefined,
    /// `TaggedValue::Null`
    Null,
    /// `TaggedValue::Boolean`
    Boolean,
    /// `TaggedValue::Integer`
    Integer,
    /// `TaggedValue::Long`
    Long,
    /// `TaggedValue::Number`
    Number,
    /// `TaggedValue::Date`
    Date,
    /// `TaggedValue::String`
    String,
    /// `TaggedValue::Object`
    Object,
    /// Either handle variant
    RuntimeHandle,
    /// `TaggedValue::Type`
    Type,
    /// `TaggedValue::PersistentMarker`
    PersistentMarker,
}

impl ValueKind {
    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Long => "long",
            ValueKind::Number => "number",
            ValueKind::Date => "date",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::RuntimeHandle => "handle",
            ValueKind::Type => "type",
            ValueKind::PersistentMarker => "persistent",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<H> TaggedValue<H> {
    /// Classify an exact integer: `Integer` when it fits 32 bits, else `Long`.
    pub fn from_integer(n: i64) -> Self {
        match i32::try_from(n) {
            Ok(small) => TaggedValue::Integer(small),
            Err(_) => TaggedValue::Long(n),
        }
    }

    /// Classify a script number.
    ///
    /// Integral values representable as `i64` become `Integer` or `Long`;
    /// everything else (fractions, NaN, infinities, huge magnitudes) stays a
    /// bit-identical `Number`.
    pub fn classify_number(n: f64) -> Self {
        match n.to_i64() {
            Some(num) if num as f64 == n => TaggedValue::from_integer(num),
            _ => TaggedValue::Number(n),
        }
    }

    /// The active kind.
    pub fn kind(&self) -> ValueKind {
        match self {
            TaggedValue::Undefined => ValueKind::Undefined,
            TaggedValue::Null => ValueKind::Null,
            TaggedValue::Boolean(_) => ValueKind::Boolean,
            TaggedValue::Integer(_) => ValueKind::Integer,
            TaggedValue::Long(_) => ValueKind::Long,
            TaggedValue::Number(_) => ValueKind::Number,
            TaggedValue::Date(_) => ValueKind::Date,
            TaggedValue::String(_) => ValueKind::String,
            TaggedValue::Object(_) => ValueKind::Object,
            TaggedValue::TransientHandle(_) | TaggedValue::PersistentHandle(_) => {
                ValueKind::RuntimeHandle
            }
            TaggedValue::Type => ValueKind::Type,
            TaggedValue::PersistentMarker => ValueKind::PersistentMarker,
        }
    }

    /// Reset to `Undefined`, releasing whatever the previous kind owned.
    pub fn clear(&mut self) {
        *self = TaggedValue::Undefined;
    }

    /// Whether this is `Undefined`.
    pub fn is_undefined(&self) -> bool {
        matches!(self, TaggedValue::Undefined)
    }

    /// Whether this converts to a script null (`Null` or a placeholder).
    pub fn is_null(&self) -> bool {
        matches!(
            self,
            TaggedValue::Null | TaggedValue::Type | TaggedValue::PersistentMarker
        )
    }

    /// Whether this holds a handle with its own reference.
    pub fn is_persistent(&self) -> bool {
        matches!(self, TaggedValue::PersistentHandle(_))
    }

    /// The boolean payload.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TaggedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload of `Integer` or `Long`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TaggedValue::Integer(n) => Some(i64::from(*n)),
            TaggedValue::Long(n) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TaggedValue::Integer(n) => Some(f64::from(*n)),
            TaggedValue::Long(n) => Some(*n as f64),
            TaggedValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TaggedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Mutable access to the string payload.
    pub fn as_mut_string(&mut self) -> Option<&mut String> {
        match self {
            TaggedValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The date payload.
    pub fn as_date(&self) -> Option<&DateValue> {
        match self {
            TaggedValue::Date(d) => Some(d),
            _ => None,
        }
    }

    /// The object back-reference.
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            TaggedValue::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// The held runtime handle, whichever lifetime mode it uses.
    pub fn as_handle(&self) -> Option<&H> {
        match self {
            TaggedValue::TransientHandle(h) => Some(h),
            TaggedValue::PersistentHandle(p) => Some(p.get()),
            _ => None,
        }
    }
}

impl<H> Default for TaggedValue<H> {
    fn default() -> Self {
        TaggedValue::Undefined
    }
}

impl<H> fmt::Debug for TaggedValue<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::Undefined => write!(f, "Undefined"),
            TaggedValue::Null => write!(f, "Null"),
            TaggedValue::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            TaggedValue::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            TaggedValue::Long(n) => f.debug_tuple("Long").field(n).finish(),
            TaggedValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            TaggedValue::Date(d) => f.debug_tuple("Date").field(d).finish(),
            TaggedValue::String(s) => f.debug_tuple("String").field(s).finish(),
            TaggedValue::Object(id) => f.debug_tuple("Object").field(&id.0).finish(),
            TaggedValue::TransientHandle(_) => write!(f, "TransientHandle(...)"),
            TaggedValue::PersistentHandle(p) => f.debug_tuple("PersistentHandle").field(p).finish(),
            TaggedValue::Type => write!(f, "Type"),
            TaggedValue::PersistentMarker => write!(f, "PersistentMarker"),
        }
    }
}

impl<H: PartialEq> PartialEq for TaggedValue<H> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TaggedValue::Undefined, TaggedValue::Undefined) => true,
            (TaggedValue::Null, TaggedValue::Null) => true,
            (TaggedValue::Boolean(a), TaggedValue::Boolean(b)) => a == b,
            (TaggedValue::Integer(a), TaggedValue::Integer(b)) => a == b,
            (TaggedValue::Long(a), TaggedValue::Long(b)) => a == b,
            (TaggedValue::Number(a), TaggedValue::Number(b)) => a == b,
            (TaggedValue::Date(a), TaggedValue::Date(b)) => a == b,
            (TaggedValue::String(a), TaggedValue::String(b)) => a == b,
            (TaggedValue::Object(a), TaggedValue::Object(b)) => a == b,
            (TaggedValue::TransientHandle(a), TaggedValue::TransientHandle(b)) => a == b,
            (TaggedValue::PersistentHandle(a), TaggedValue::PersistentHandle(b)) => a.ptr_eq(b),
            (TaggedValue::Type, TaggedValue::Type) => true,
            (TaggedValue::PersistentMarker, TaggedValue::PersistentMarker) => true,
            _ => false,
        }
    }
}

impl<H> From<bool> for TaggedValue<H> {
    fn from(b: bool) -> Self {
        TaggedValue::Boolean(b)
    }
}

impl<H> From<i32> for TaggedValue<H> {
    fn from(n: i32) -> Self {
        TaggedValue::Integer(n)
    }
}

impl<H> From<i64> for TaggedValue<H> {
    fn from(n: i64) -> Self {
        TaggedValue::Long(n)
    }
}

impl<H> From<f64> for TaggedValue<H> {
    fn from(n: f64) -> Self {
        TaggedValue::Number(n)
    }
}

impl<H> From<&str> for TaggedValue<H> {
    fn from(s: &str) -> Self {
        TaggedValue::String(s.to_string())
    }
}

impl<H> From<String> for TaggedValue<H> {
    fn from(s: String) -> Self {
        TaggedValue::String(s)
    }
}

impl<H> From<DateValue> for TaggedValue<H> {
    fn from(d: DateValue) -> Self {
        TaggedValue::Date(d)
    }
}

impl<H> From<ObjectId> for TaggedValue<H> {
    fn from(id: ObjectId) -> Self {
        TaggedValue::Object(id)
    }
}
