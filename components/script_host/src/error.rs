//! Errors raised by the script heap.

use thiserror::Error;

/// Failures of native object bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The id was never registered, or was already released
    #[error("native object {0} is not registered")]
    UnknownObject(usize),
}
