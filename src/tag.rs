//! Slot encoding and the per-epoch tag scheme.
//!
//! A slot is a single `u64` holding either a pointer-record (payload pointer
//! with its low bit forced to 1) or an empty-tag (the numeric tag for the
//! next sequence expected to land in that slot, low bit 0). The word is
//! `u64` rather than `usize` so it stays at least as wide as the counter
//! word on 32-bit targets too, per the buffer's invariant that a slot's word
//! width is `>= max(pointer_width, W)`.
//!
//! Grounded on `lfstructs::CircularBuffer`'s `pointer2record`/`mkTag`
//! (`cybuff.h`), using that header's later per-epoch tag revision:
//! `mkTag(c) = c & ~idx_mask` rather than the per-sequence `c << 2`.

use std::ptr::NonNull;

/// Force the low bit of a payload pointer to 1 so it is distinguishable from
/// any empty-tag. Requires `align_of::<T>() >= 2`, which callers enforce at
/// compile time before this is ever called (see `Ring`'s const assertions).
#[inline(always)]
pub fn encode_pointer<T>(ptr: NonNull<T>) -> u64 {
    (ptr.as_ptr() as u64) | 1
}

/// Recover the payload pointer from a pointer-record. Only meaningful when
/// `is_pointer(word)` holds.
///
/// # Safety
/// `word` must have been produced by `encode_pointer` for a live `NonNull<T>`
/// whose pointee is still valid; the ring only hands back words it itself
/// stored via `encode_pointer`, so callers going through `Ring::get` never
/// need to call this directly.
#[inline(always)]
pub unsafe fn decode_pointer<T>(word: u64) -> NonNull<T> {
    debug_assert!(is_pointer(word), "decode_pointer called on an empty-tag word");
    NonNull::new_unchecked((word & !1) as usize as *mut T)
}

/// Low bit discriminator: 1 means pointer-record, 0 means empty-tag.
#[inline(always)]
pub fn is_pointer(word: u64) -> bool {
    word & 1 == 1
}

/// The empty-state tag for the sequence number `seq`, per the per-epoch
/// scheme: all slots sharing an epoch (one full revolution of `mask + 1`
/// sequence numbers) advertise the same tag, taken from the high bits of
/// `seq` above the index bits. `mask` is `capacity - 1`.
#[inline(always)]
pub fn mk_tag(seq: u64, mask: u64) -> u64 {
    seq & !mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_law() {
        let mut x: u64 = 42;
        let ptr = NonNull::new(&mut x as *mut u64).unwrap();
        let encoded = encode_pointer(ptr);
        assert!(is_pointer(encoded));
        let decoded: NonNull<u64> = unsafe { decode_pointer(encoded) };
        assert_eq!(decoded, ptr);
    }

    #[test]
    fn initial_zero_is_a_legal_empty_tag_for_sequence_zero() {
        // sequence 0's tag must equal the all-zero initial slot state.
        assert_eq!(mk_tag(0, 7), 0);
        assert!(!is_pointer(0));
    }

    #[test]
    fn epoch_tag_is_shared_across_a_full_revolution() {
        let mask = 7u64; // capacity 8
        let first_epoch_tags: Vec<u64> = (0..8).map(|s| mk_tag(s, mask)).collect();
        assert!(first_epoch_tags.iter().all(|&t| t == 0));

        let second_epoch_tags: Vec<u64> = (8..16).map(|s| mk_tag(s, mask)).collect();
        assert!(second_epoch_tags.iter().all(|&t| t == 8));
    }

    #[test]
    fn tag_changes_by_capacity_on_every_wrap() {
        let mask = 3u64; // capacity 4
        assert_eq!(mk_tag(0, mask), 0);
        assert_eq!(mk_tag(4, mask), 4);
        assert_eq!(mk_tag(8, mask), 8);
    }
}
