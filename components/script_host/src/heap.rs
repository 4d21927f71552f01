//! Native object registry and value factory.

use std::collections::HashMap;

use tagged_value::{Bridge, BridgeConfig, ObjectId, ObjectRegistry, ValueFactory};

use crate::error::HostError;
use crate::value::ScriptValue;

/// Owns the script wrappers of registered native objects.
///
/// A wrapper stays reachable from script after its native object is
/// released; it is then detached, and back-references to the released id
/// convert to `null`.
#[derive(Debug, Default)]
pub struct ScriptHeap {
    wrappers: HashMap<ObjectId, ScriptValue>,
    next_id: usize,
}

impl ScriptHeap {
    /// Create an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new native object and return its id and script wrapper.
    pub fn register(&mut self) -> (ObjectId, ScriptValue) {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        let wrapper = ScriptValue::object();
        if let ScriptValue::Object(data) = &wrapper {
            data.borrow_mut().native = Some(id);
        }
        self.wrappers.insert(id, wrapper.clone());
        tracing::debug!(object = id.0, "registered native object");
        (id, wrapper)
    }

    /// Release a native object, detaching its wrapper.
    pub fn release(&mut self, id: ObjectId) -> Result<ScriptValue, HostError> {
        let wrapper = self
            .wrappers
            .remove(&id)
            .ok_or(HostError::UnknownObject(id.0))?;
        if let ScriptValue::Object(data) = &wrapper {
            data.borrow_mut().native = None;
        }
        tracing::debug!(object = id.0, "released native object");
        Ok(wrapper)
    }

    /// Whether `id` is currently registered
    pub fn is_live(&self, id: ObjectId) -> bool {
        self.wrappers.contains_key(&id)
    }

    /// Number of registered native objects
    pub fn live_count(&self) -> usize {
        self.wrappers.len()
    }

    /// A bridge that uses this heap as both factory and registry.
    pub fn bridge(&self, config: BridgeConfig) -> Bridge<'_, Self, Self> {
        Bridge::new(self, self, config)
    }
}

impl ObjectRegistry<ScriptValue> for ScriptHeap {
    fn resolve(&self, handle: &ScriptValue) -> Option<ObjectId> {
        handle.native_id().filter(|id| self.is_live(*id))
    }
}

impl ValueFactory for ScriptHeap {
    type Handle = ScriptValue;

    fn undefined(&self) -> ScriptValue {
        ScriptValue::Undefined
    }

    fn null(&self) -> ScriptValue {
        ScriptValue::Null
    }

    fn boolean(&self, value: bool) -> ScriptValue {
        ScriptValue::Boolean(value)
    }

    fn int32(&self, value: i32) -> ScriptValue {
        ScriptValue::Number(f64::from(value))
    }

    fn number(&self, value: f64) -> ScriptValue {
        ScriptValue::Number(value)
    }

    fn date(&self, millis: f64) -> ScriptValue {
        ScriptValue::Date(millis)
    }

    fn string(&self, value: &str) -> ScriptValue {
        ScriptValue::String(value.to_string())
    }

    fn wrap_object(&self, id: ObjectId) -> Option<ScriptValue> {
        self.wrappers.get(&id).cloned()
    }
}
