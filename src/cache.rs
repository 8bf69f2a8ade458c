//! Cache-line padding to prevent false sharing between independently-mutated
//! atomics.
//!
//! The two sequence counters (`wcount`, mutated by every producer, and
//! `rcount`, mutated only by the consumer) are each wrapped in a padded cell
//! so neither counter's cache line is invalidated by traffic on the other.

#[cfg(loom)]
use loom::sync::atomic::AtomicU64;
#[cfg(not(loom))]
use std::sync::atomic::AtomicU64;

use crate::constants::CACHE_LINE_SIZE;

/// An `AtomicU64` padded out to a full cache line.
#[repr(align(64))]
pub struct PaddedSequence {
    pub value: AtomicU64,
    _padding: [u8; CACHE_LINE_SIZE - std::mem::size_of::<u64>()],
}

impl PaddedSequence {
    // loom's atomics aren't const-constructible (they carry extra model
    // bookkeeping), so only the real std version can be a const fn.
    #[cfg(not(loom))]
    pub const fn new(initial: u64) -> Self {
        Self {
            value: AtomicU64::new(initial),
            _padding: [0; CACHE_LINE_SIZE - std::mem::size_of::<u64>()],
        }
    }

    #[cfg(loom)]
    pub fn new(initial: u64) -> Self {
        Self {
            value: AtomicU64::new(initial),
            _padding: [0; CACHE_LINE_SIZE - std::mem::size_of::<u64>()],
        }
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    // loom's AtomicU64 carries extra model-checking state, so the exact
    // cache-line-size guarantee only holds for the real std atomic.
    #[test]
    fn padded_sequence_is_cache_line_sized() {
        assert_eq!(std::mem::size_of::<PaddedSequence>(), CACHE_LINE_SIZE);
    }
}
