//! Reference-counted runtime handles.

use std::fmt;
use std::rc::Rc;

/// A runtime value reference that outlives the call it was taken in.
///
/// Clones share one reference count; the underlying handle is released when
/// the last clone is dropped. `Rc` keeps this `!Send`, so the release always
/// happens on the thread that owns the engine.
pub struct PersistentHandle<H> {
    inner: Rc<H>,
}

impl<H> PersistentHandle<H> {
    /// Take an independent reference to `handle`.
    pub fn new(handle: H) -> Self {
        PersistentHandle {
            inner: Rc::new(handle),
        }
    }

    /// Borrow the held handle without transferring ownership.
    pub fn get(&self) -> &H {
        &self.inner
    }

    /// Number of live references to this handle.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Whether two persistent references share the same handle.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Drop this reference explicitly.
    pub fn release(self) {}
}

impl<H> Clone for PersistentHandle<H> {
    fn clone(&self) -> Self {
        PersistentHandle {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H> fmt::Debug for PersistentHandle<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentHandle")
            .field("refs", &self.ref_count())
            .finish()
    }
}
