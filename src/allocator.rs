//! A bounded, lock-free, single-shot index allocator.
//!
//! A companion to the ring, not on its put/get/size path. A fixed arena of
//! `T` is claimed strictly once per slot via a monotonically increasing
//! `AtomicUsize`, advanced by CAS. There is no free list and no reuse; once
//! a slot is handed out, this allocator forgets about it.
//!
//! Typical use alongside [`crate::ring::Ring`]: a producer calls
//! `allocate_one` to get a place to construct a payload, writes it, and
//! publishes the resulting pointer with `Ring::put`.

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, RingError};

/// A fixed-capacity arena that hands out each slot exactly once.
pub struct SingleWayAllocator<T> {
    next: AtomicUsize,
    storage: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

impl<T> SingleWayAllocator<T> {
    /// Create an allocator with room for `capacity` values.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(RingError::invalid_capacity("capacity must be nonzero"));
        }

        let storage = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Ok(Self {
            next: AtomicUsize::new(0),
            storage,
        })
    }

    /// Total number of slots this allocator can ever hand out.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Claim the next free slot, if any remain.
    ///
    /// Returns a pointer to uninitialized storage; the caller must write a
    /// value into it (e.g. via `NonNull::write`) before reading from it or
    /// handing it to anything that expects an initialized `T`.
    pub fn allocate_one(&self) -> Option<NonNull<MaybeUninit<T>>> {
        let mut i = self.next.load(Ordering::Relaxed);
        loop {
            if i >= self.storage.len() {
                return None;
            }
            // Can be weakened to relaxed success ordering: on a false
            // negative we simply retry with the freshly observed index.
            match self
                .next
                .compare_exchange_weak(i, i + 1, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => {
                    let cell = &self.storage[i];
                    return NonNull::new(cell.get());
                }
                Err(observed) => i = observed,
            }
        }
    }
}

// SAFETY: slots are handed out exactly once via CAS on `next`, so two
// threads never receive the same slot; writing through the returned
// pointer is exclusive by construction.
unsafe impl<T: Send> Send for SingleWayAllocator<T> {}
unsafe impl<T: Send> Sync for SingleWayAllocator<T> {}
