//! Shared constants used across the ring and its collaborators.

/// Cache line size for padding (64 bytes on most CPUs).
pub const CACHE_LINE_SIZE: usize = 64;

/// Counter word width in bits (`wcount`/`rcount` are `u64`). The ring's size
/// magnitude `M` must stay strictly below `COUNTER_WIDTH_BITS - 1` so that
/// `BUFFER_OVERRUN`/`IMPOSSIBLE_VALUE` sentinels near the top of the counter
/// range never collide with a valid slot index in `[0, 2^M)`.
pub const COUNTER_WIDTH_BITS: u32 = 64;
