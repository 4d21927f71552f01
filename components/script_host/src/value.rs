//! Script-side value representation
//!
//! Primitives are held inline; objects and functions are shared through
//! `Rc`, so cloning a `ScriptValue` clones a reference, as script
//! assignment does.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tagged_value::{ObjectId, RuntimeValue};

/// Internal object data
#[derive(Debug, Default)]
pub struct ObjectData {
    /// Native object this script object wraps, while it is registered
    pub native: Option<ObjectId>,
    /// Own properties
    pub properties: HashMap<String, ScriptValue>,
}

/// Internal function data
pub struct FunctionData {
    /// Function name, for diagnostics
    pub name: String,
    /// The function implementation
    pub func: Box<dyn Fn(&[ScriptValue]) -> ScriptValue>,
}

impl fmt::Debug for FunctionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionData").field("name", &self.name).finish()
    }
}

/// A value as the script engine sees it.
#[derive(Clone, Default)]
pub enum ScriptValue {
    /// Handle that refers to nothing
    Empty,
    /// undefined
    #[default]
    Undefined,
    /// null
    Null,
    /// Boolean primitive
    Boolean(bool),
    /// Number primitive (IEEE 754 double)
    Number(f64),
    /// String primitive
    String(String),
    /// Date object holding epoch milliseconds (NaN when invalid)
    Date(f64),
    /// `new Boolean(..)`
    BooleanObject(bool),
    /// `new Number(..)`
    NumberObject(f64),
    /// `new String(..)`
    StringObject(String),
    /// Plain or native-backed object
    Object(Rc<RefCell<ObjectData>>),
    /// Callable
    Function(Rc<FunctionData>),
}

impl ScriptValue {
    /// Create undefined value
    pub fn undefined() -> Self {
        ScriptValue::Undefined
    }

    /// Create null value
    pub fn null() -> Self {
        ScriptValue::Null
    }

    /// Create boolean value
    pub fn boolean(v: bool) -> Self {
        ScriptValue::Boolean(v)
    }

    /// Create number value
    pub fn number(v: f64) -> Self {
        ScriptValue::Number(v)
    }

    /// Create string value
    pub fn string(s: impl Into<String>) -> Self {
        ScriptValue::String(s.into())
    }

    /// Create date value
    pub fn date(millis: f64) -> Self {
        ScriptValue::Date(millis)
    }

    /// Create an empty plain object
    pub fn object() -> Self {
        ScriptValue::Object(Rc::new(RefCell::new(ObjectData::default())))
    }

    /// Create a function value
    pub fn function<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[ScriptValue]) -> ScriptValue + 'static,
    {
        ScriptValue::Function(Rc::new(FunctionData {
            name: name.into(),
            func: Box::new(func),
        }))
    }

    /// Result of the `typeof` operator
    pub fn type_of(&self) -> &'static str {
        match self {
            ScriptValue::Empty | ScriptValue::Undefined => "undefined",
            ScriptValue::Boolean(_) => "boolean",
            ScriptValue::Number(_) => "number",
            ScriptValue::String(_) => "string",
            ScriptValue::Function(_) => "function",
            ScriptValue::Null
            | ScriptValue::Date(_)
            | ScriptValue::BooleanObject(_)
            | ScriptValue::NumberObject(_)
            | ScriptValue::StringObject(_)
            | ScriptValue::Object(_) => "object",
        }
    }

    /// Native object id, if this is a wrapper that is still attached
    pub fn native_id(&self) -> Option<ObjectId> {
        match self {
            ScriptValue::Object(data) => data.borrow().native,
            _ => None,
        }
    }

    /// Get property from object
    pub fn get(&self, key: &str) -> ScriptValue {
        match self {
            ScriptValue::Object(data) => data
                .borrow()
                .properties
                .get(key)
                .cloned()
                .unwrap_or(ScriptValue::Undefined),
            _ => ScriptValue::Undefined,
        }
    }

    /// Set property on object. Ignored on primitives.
    pub fn set(&self, key: impl Into<String>, value: ScriptValue) {
        if let ScriptValue::Object(data) = self {
            data.borrow_mut().properties.insert(key.into(), value);
        }
    }

    /// Call a function value; `None` when the value is not callable
    pub fn call(&self, args: &[ScriptValue]) -> Option<ScriptValue> {
        match self {
            ScriptValue::Function(data) => Some((data.func)(args)),
            _ => None,
        }
    }

    /// Number of live references to a shared object or function
    pub fn ref_count(&self) -> Option<usize> {
        match self {
            ScriptValue::Object(data) => Some(Rc::strong_count(data)),
            ScriptValue::Function(data) => Some(Rc::strong_count(data)),
            _ => None,
        }
    }
}

impl fmt::Debug for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Empty => write!(f, "<empty>"),
            ScriptValue::Undefined => write!(f, "undefined"),
            ScriptValue::Null => write!(f, "null"),
            ScriptValue::Boolean(b) => write!(f, "{b}"),
            ScriptValue::Number(n) => write!(f, "{n}"),
            ScriptValue::String(s) => write!(f, "{s:?}"),
            ScriptValue::Date(ms) => write!(f, "Date({ms})"),
            ScriptValue::BooleanObject(b) => write!(f, "Boolean({b})"),
            ScriptValue::NumberObject(n) => write!(f, "Number({n})"),
            ScriptValue::StringObject(s) => write!(f, "String({s:?})"),
            ScriptValue::Object(data) => match data.borrow().native {
                Some(id) => write!(f, "[object native#{}]", id.0),
                None => write!(f, "[object Object]"),
            },
            ScriptValue::Function(data) => write!(f, "[Function: {}]", data.name),
        }
    }
}

/// Strict equality: primitives by value, objects and functions by identity.
///
/// `NaN` is unequal to itself, dates included.
impl PartialEq for ScriptValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScriptValue::Empty, ScriptValue::Empty) => true,
            (ScriptValue::Undefined, ScriptValue::Undefined) => true,
            (ScriptValue::Null, ScriptValue::Null) => true,
            (ScriptValue::Boolean(a), ScriptValue::Boolean(b)) => a == b,
            (ScriptValue::Number(a), ScriptValue::Number(b)) => a == b,
            (ScriptValue::String(a), ScriptValue::String(b)) => a == b,
            (ScriptValue::Date(a), ScriptValue::Date(b)) => a == b,
            (ScriptValue::BooleanObject(a), ScriptValue::BooleanObject(b)) => a == b,
            (ScriptValue::NumberObject(a), ScriptValue::NumberObject(b)) => a == b,
            (ScriptValue::StringObject(a), ScriptValue::StringObject(b)) => a == b,
            (ScriptValue::Object(a), ScriptValue::Object(b)) => Rc::ptr_eq(a, b),
            (ScriptValue::Function(a), ScriptValue::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl RuntimeValue for ScriptValue {
    fn is_empty(&self) -> bool {
        matches!(self, ScriptValue::Empty)
    }

    fn is_undefined(&self) -> bool {
        matches!(self, ScriptValue::Undefined)
    }

    fn is_null(&self) -> bool {
        matches!(self, ScriptValue::Null)
    }

    fn is_date(&self) -> bool {
        matches!(self, ScriptValue::Date(_))
    }

    fn is_boolean(&self) -> bool {
        matches!(self, ScriptValue::Boolean(_))
    }

    fn is_boolean_wrapper(&self) -> bool {
        matches!(self, ScriptValue::BooleanObject(_))
    }

    fn is_number(&self) -> bool {
        matches!(self, ScriptValue::Number(_))
    }

    fn is_number_wrapper(&self) -> bool {
        matches!(self, ScriptValue::NumberObject(_))
    }

    fn is_string(&self) -> bool {
        matches!(self, ScriptValue::String(_))
    }

    fn is_string_wrapper(&self) -> bool {
        matches!(self, ScriptValue::StringObject(_))
    }

    fn boolean_value(&self) -> bool {
        matches!(
            self,
            ScriptValue::Boolean(true) | ScriptValue::BooleanObject(true)
        )
    }

    fn number_value(&self) -> f64 {
        match self {
            ScriptValue::Number(n) | ScriptValue::NumberObject(n) | ScriptValue::Date(n) => *n,
            _ => f64::NAN,
        }
    }

    fn string_value(&self) -> String {
        match self {
            ScriptValue::String(s) | ScriptValue::StringObject(s) => s.clone(),
            _ => String::new(),
        }
    }
}
