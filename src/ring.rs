//! The bounded lock-free MPSC pointer ring.
//!
//! The claim strategy and the slot publish are the same compare-and-set
//! operation: the tag scheme lets a slot arbitrate who may write it, instead
//! of relying on a separate claim cursor.

use std::marker::PhantomData;
use std::ptr::NonNull;

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(loom))]
use std::sync::atomic::{AtomicU64, Ordering};

use static_assertions::const_assert_eq;

use crate::cache::PaddedSequence;
use crate::constants::COUNTER_WIDTH_BITS;
use crate::error::RingError;
use crate::tag;
use crate::telemetry;

// The counter word really is 64 bits wide, independent of any Ring
// instantiation; check it once at the crate level rather than per generic.
const_assert_eq!(COUNTER_WIDTH_BITS, 64u32);

/// A bounded, lock-free, multi-producer / single-consumer ring of opaque
/// payload pointers.
///
/// `SIZE_MAGNITUDE` fixes the capacity at `2^SIZE_MAGNITUDE` slots at compile
/// time; it must stay strictly below `W - 1` (`W` = 64, the counter width) so
/// the overrun/unreachable sentinels can live outside `[0, 2^SIZE_MAGNITUDE)`.
/// `T` must have alignment at least 2 so a payload pointer's low bit is free
/// for the pointer/tag discriminator. Both are enforced by `const`
/// assertions the first time a given `Ring<T, SIZE_MAGNITUDE>` is
/// monomorphized.
///
/// Construction is the only infallible path: there is no runtime capacity to
/// validate, so `new()` returns `Self`, not a `Result`.
pub struct Ring<T, const SIZE_MAGNITUDE: u32> {
    slots: Box<[AtomicU64]>,
    mask: u64,
    wcount: PaddedSequence,
    rcount: PaddedSequence,
    _payload: PhantomData<fn() -> T>,
}

impl<T, const SIZE_MAGNITUDE: u32> Ring<T, SIZE_MAGNITUDE> {
    const CAPACITY: usize = 1usize << SIZE_MAGNITUDE;

    const ASSERT_MAGNITUDE_LEAVES_SENTINEL_ROOM: () = assert!(
        SIZE_MAGNITUDE < COUNTER_WIDTH_BITS - 1,
        "ring size magnitude must be strictly less than the counter width minus one"
    );

    const ASSERT_PAYLOAD_ALIGNMENT: () = assert!(
        std::mem::align_of::<T>() >= 2,
        "payload type must be at least 2-byte aligned so its low pointer bit is free for tagging"
    );

    /// Create an empty ring: both counters at zero, every slot holding the
    /// legal initial empty-tag (sequence 0's tag, which is numerically zero
    /// under the per-epoch scheme, coinciding with freshly-zeroed memory).
    pub fn new() -> Self {
        // Referencing these forces their evaluation for this monomorphization.
        let () = Self::ASSERT_MAGNITUDE_LEAVES_SENTINEL_ROOM;
        let () = Self::ASSERT_PAYLOAD_ALIGNMENT;

        let slots = (0..Self::CAPACITY).map(|_| AtomicU64::new(0)).collect::<Vec<_>>().into_boxed_slice();

        Self {
            slots,
            mask: (Self::CAPACITY - 1) as u64,
            wcount: PaddedSequence::new(0),
            rcount: PaddedSequence::new(0),
            _payload: PhantomData,
        }
    }

    /// Ring capacity, `2^SIZE_MAGNITUDE`.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        Self::CAPACITY
    }

    #[inline(always)]
    fn capacity_u64(&self) -> u64 {
        Self::CAPACITY as u64
    }

    /// Publish `ptr` into the ring. Multi-producer safe: any number of
    /// threads may call this concurrently.
    ///
    /// On success, returns the slot index the payload landed in (not a
    /// sequence number) and ownership of `ptr` transfers to the ring. On
    /// `RingError::Overrun`, the ring's shared state is left exactly as if
    /// the call had never been attempted, and `ptr` is still owned by the
    /// caller.
    pub fn put(&self, ptr: NonNull<T>) -> Result<usize, RingError> {
        let push_it = tag::encode_pointer(ptr);

        // Acquire: orders this load both against the slot load below and
        // against a reordered rcount load that could misreport overflow.
        let mut w = self.wcount.value.load(Ordering::Acquire);

        loop {
            let r = self.rcount.value.load(Ordering::Relaxed);

            if w.wrapping_sub(r) >= self.capacity_u64() {
                telemetry::record_overrun();
                return Err(RingError::Overrun);
            }

            let idx = (w & self.mask) as usize;
            let expected = tag::mk_tag(w, self.mask);
            let slot = &self.slots[idx];

            // Strong CAS: a spurious weak failure here would let the
            // unconditional counter CAS below advance wcount past a
            // sequence that was never actually published.
            let slot_outcome = slot.compare_exchange(expected, push_it, Ordering::AcqRel, Ordering::Acquire);

            // Helping CAS: attempt to advance wcount for sequence w whether
            // or not our own slot CAS won. If another producer already won
            // slot `idx` for sequence `w` and then stalled before advancing
            // wcount, this is what lets us (or a third producer) complete
            // its operation on its behalf and keep the ring lock-free.
            let counter_outcome = self.wcount.value.compare_exchange_weak(w, w + 1, Ordering::AcqRel, Ordering::Relaxed);

            match slot_outcome {
                Ok(_) => {
                    telemetry::record_publish(idx);
                    return Ok(idx);
                }
                Err(_) => {
                    w = match counter_outcome {
                        Ok(_) => w + 1,
                        Err(observed) => observed,
                    };
                }
            }
        }
    }

    /// Drain the oldest unread payload, if any. Must only ever be called
    /// from a single consumer thread; concurrent calls from multiple
    /// threads are a contract violation the type system does not prevent.
    pub fn get(&self) -> Option<NonNull<T>> {
        let w = self.wcount.value.load(Ordering::Acquire);
        let r = self.rcount.value.load(Ordering::Relaxed);

        if w == r {
            return None;
        }

        let idx = (r & self.mask) as usize;
        let slot = &self.slots[idx];

        // Must synchronize-with the producer's release at the slot CAS.
        let word = slot.load(Ordering::Acquire);

        if !tag::is_pointer(word) {
            // wcount says sequence r exists, but the producer's slot CAS
            // for it hasn't landed yet. Transient; the caller polls again.
            telemetry::record_in_progress_publish();
            return None;
        }

        // Next-epoch empty tag, written before rcount advances so a
        // producer for sequence r + capacity never sees a stale tag and
        // wastes a retry.
        slot.store(tag::mk_tag(r + self.capacity_u64(), self.mask), Ordering::Release);
        self.rcount.value.store(r + 1, Ordering::Release);

        telemetry::record_drain(idx);

        // SAFETY: word's low bit is 1 (checked above), so it was produced
        // by encode_pointer for a payload the ring has not yet returned.
        Some(unsafe { tag::decode_pointer(word) })
    }

    /// Advisory lower bound on the number of unread payloads. Never an
    /// overestimate in the steady state, but an in-flight producer that has
    /// claimed a sequence without yet completing its slot CAS or counter
    /// advance is invisible to this call.
    pub fn size(&self) -> usize {
        let w = self.wcount.value.load(Ordering::Relaxed);
        let r = self.rcount.value.load(Ordering::Relaxed);
        let diff = w.wrapping_sub(r) as i64;
        if diff > 0 { diff as usize } else { 0 }
    }
}

impl<T, const SIZE_MAGNITUDE: u32> Default for Ring<T, SIZE_MAGNITUDE> {
    fn default() -> Self {
        Self::new()
    }
}

// SAFETY: the ring only ever moves a `NonNull<T>` bit pattern between
// threads under the put/get protocol above; it never dereferences T itself.
// Soundness of transporting T across threads requires T: Send, matching the
// ownership-transfer contract in the module docs.
unsafe impl<T: Send, const SIZE_MAGNITUDE: u32> Send for Ring<T, SIZE_MAGNITUDE> {}
unsafe impl<T: Send, const SIZE_MAGNITUDE: u32> Sync for Ring<T, SIZE_MAGNITUDE> {}
