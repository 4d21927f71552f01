//! Two-way conversion between tagged values and runtime value handles.
//!
//! The runtime is reached only through the collaborators passed to
//! [`Bridge::new`]; there is no implicit engine context.

use date_value::DateValue;

use crate::handle::PersistentHandle;
use crate::value::{ObjectId, TaggedValue};

/// Read access to a scripting runtime value.
///
/// Wrapper predicates default to `false` for runtimes without boxed
/// primitives.
pub trait RuntimeValue {
    /// Handle refers to nothing at all.
    fn is_empty(&self) -> bool {
        false
    }
    /// `undefined`
    fn is_undefined(&self) -> bool;
    /// `null`
    fn is_null(&self) -> bool;
    /// A date object; its instant is [`RuntimeValue::number_value`].
    fn is_date(&self) -> bool;
    /// Boolean primitive
    fn is_boolean(&self) -> bool;
    /// Boxed boolean
    fn is_boolean_wrapper(&self) -> bool {
        false
    }
    /// Number primitive
    fn is_number(&self) -> bool;
    /// Boxed number
    fn is_number_wrapper(&self) -> bool {
        false
    }
    /// String primitive
    fn is_string(&self) -> bool;
    /// Boxed string
    fn is_string_wrapper(&self) -> bool {
        false
    }
    /// Boolean payload
    fn boolean_value(&self) -> bool;
    /// Numeric payload (epoch milliseconds for dates)
    fn number_value(&self) -> f64;
    /// String payload as UTF-8
    fn string_value(&self) -> String;
}

/// Maps runtime handles back to registered native objects.
pub trait ObjectRegistry<H> {
    /// The native object `handle` wraps, if any.
    fn resolve(&self, handle: &H) -> Option<ObjectId>;
}

/// Builds runtime handles.
pub trait ValueFactory {
    /// Handle type produced
    type Handle;

    /// `undefined`
    fn undefined(&self) -> Self::Handle;
    /// `null`
    fn null(&self) -> Self::Handle;
    /// Boolean
    fn boolean(&self, value: bool) -> Self::Handle;
    /// 32-bit integer
    fn int32(&self, value: i32) -> Self::Handle;
    /// Float
    fn number(&self, value: f64) -> Self::Handle;
    /// Date from epoch milliseconds (NaN for an invalid date)
    fn date(&self, millis: f64) -> Self::Handle;
    /// String from UTF-8 text
    fn string(&self, value: &str) -> Self::Handle;
    /// The wrapper of a registered native object; `None` once it is gone.
    fn wrap_object(&self, id: ObjectId) -> Option<Self::Handle>;
}

/// How catch-all runtime handles are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleLifetime {
    /// Borrow the handle for the current call only
    #[default]
    Transient,
    /// Take an independent reference that may outlive the call
    Persistent,
}

/// Bridge settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BridgeConfig {
    /// Lifetime policy for handles stored as `TransientHandle`/`PersistentHandle`
    pub lifetime: HandleLifetime,
}

impl BridgeConfig {
    /// Config that stores catch-all handles persistently.
    pub fn persistent() -> Self {
        BridgeConfig {
            lifetime: HandleLifetime::Persistent,
        }
    }
}

/// Conversion context for one runtime.
///
/// Built per call site from the runtime's factory and registry; the
/// lifetime policy in its [`BridgeConfig`] applies to every handle it
/// stores.
pub struct Bridge<'a, F, R> {
    factory: &'a F,
    registry: &'a R,
    config: BridgeConfig,
}

impl<'a, F, R> Bridge<'a, F, R>
where
    F: ValueFactory,
    F::Handle: RuntimeValue + Clone,
    R: ObjectRegistry<F::Handle>,
{
    /// Create a bridge over the given collaborators.
    pub fn new(factory: &'a F, registry: &'a R, config: BridgeConfig) -> Self {
        Bridge {
            factory,
            registry,
            config,
        }
    }

    /// Same collaborators, different handle lifetime policy.
    pub fn with_lifetime(self, lifetime: HandleLifetime) -> Self {
        Bridge {
            config: BridgeConfig { lifetime },
            ..self
        }
    }

    /// The active settings.
    pub fn config(&self) -> BridgeConfig {
        self.config
    }

    /// Classify a runtime value. Never fails: anything unrecognized is kept
    /// as a handle.
    pub fn classify(&self, handle: &F::Handle) -> TaggedValue<F::Handle> {
        let value = self.classify_inner(handle);
        tracing::trace!(kind = %value.kind(), "classified runtime value");
        value
    }

    fn classify_inner(&self, handle: &F::Handle) -> TaggedValue<F::Handle> {
        if handle.is_empty() || handle.is_undefined() {
            return TaggedValue::Undefined;
        }
        if handle.is_null() {
            return TaggedValue::Null;
        }
        if handle.is_date() {
            return TaggedValue::Date(DateValue::from_millis(handle.number_value()));
        }
        if handle.is_boolean() || handle.is_boolean_wrapper() {
            return TaggedValue::Boolean(handle.boolean_value());
        }
        if handle.is_number() || handle.is_number_wrapper() {
            return TaggedValue::classify_number(handle.number_value());
        }
        if handle.is_string() || handle.is_string_wrapper() {
            return TaggedValue::String(handle.string_value());
        }
        if let Some(id) = self.registry.resolve(handle) {
            return TaggedValue::Object(id);
        }

        tracing::debug!(lifetime = ?self.config.lifetime, "storing unclassified runtime value as handle");
        match self.config.lifetime {
            HandleLifetime::Transient => TaggedValue::TransientHandle(handle.clone()),
            HandleLifetime::Persistent => {
                TaggedValue::PersistentHandle(PersistentHandle::new(handle.clone()))
            }
        }
    }

    /// Replace `target` with the classification of `handle`.
    ///
    /// The previous payload is released before the new one is stored.
    pub fn assign(&self, target: &mut TaggedValue<F::Handle>, handle: &F::Handle) {
        target.clear();
        *target = self.classify(handle);
    }

    /// Convert back into a runtime value.
    pub fn to_handle(&self, value: &TaggedValue<F::Handle>) -> F::Handle {
        let f = self.factory;
        match value {
            TaggedValue::Undefined => f.undefined(),
            TaggedValue::Null | TaggedValue::Type | TaggedValue::PersistentMarker => f.null(),
            TaggedValue::Boolean(b) => f.boolean(*b),
            TaggedValue::Integer(n) => f.int32(*n),
            TaggedValue::Long(n) => f.number(*n as f64),
            TaggedValue::Number(n) => f.number(*n),
            TaggedValue::Date(d) => f.date(d.millis()),
            TaggedValue::Object(id) => f.wrap_object(*id).unwrap_or_else(|| {
                tracing::debug!(object = id.0, "stale object reference converts to null");
                f.null()
            }),
            TaggedValue::TransientHandle(h) => h.clone(),
            TaggedValue::PersistentHandle(p) => p.get().clone(),
            TaggedValue::String(s) => f.string(s),
        }
    }
}
