//! Error types for the ring and its collaborators.

use thiserror::Error;

/// Result type alias for ring operations.
pub type Result<T> = std::result::Result<T, RingError>;

/// Errors a [`crate::ring::Ring`] or [`crate::allocator::SingleWayAllocator`]
/// can report.
///
/// `put` has exactly one failure mode: overflow. `get` reports "nothing
/// ready" through `Option`, not through this type, because an empty ring is
/// an ordinary poll outcome, not a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// `wcount - rcount` has already reached capacity; the publish was
    /// refused and all shared state is unchanged from before the call.
    #[error("ring buffer overrun: no free slot for sequence")]
    Overrun,

    /// A runtime-configured collaborator (the allocator) was asked for an
    /// invalid capacity. The ring itself can't hit this: its capacity is a
    /// compile-time const generic checked by `const` assertions at
    /// monomorphization.
    #[error("invalid capacity: {message}")]
    InvalidCapacity {
        /// Description of why the capacity was rejected.
        message: String,
    },
}

impl RingError {
    pub fn invalid_capacity(message: impl Into<String>) -> Self {
        Self::InvalidCapacity {
            message: message.into(),
        }
    }

    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Overrun)
    }
}
