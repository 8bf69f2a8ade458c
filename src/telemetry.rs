//! Zero-cost observability for the ring's put/get protocol.
//!
//! Every function here compiles to a genuine no-op when the `tracing`
//! feature is off, and to a `tracing` span/event when it's on. No call site
//! has to `#[cfg]` itself out; the two definitions of each function already
//! do that.

/// A payload was published at the given slot index.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_publish(slot_index: usize) {
    tracing::trace!(slot_index, "put: published");
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_publish(_slot_index: usize) {}

/// A payload was drained from the given slot index.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_drain(slot_index: usize) {
    tracing::trace!(slot_index, "get: drained");
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_drain(_slot_index: usize) {}

/// `put` refused a publish because the ring was at capacity.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_overrun() {
    tracing::warn!("put: buffer overrun");
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_overrun() {}

/// `get` observed `wcount > rcount` but the producer's slot CAS for the next
/// sequence hadn't landed yet. A transient, expected race, not an error.
#[cfg(feature = "tracing")]
#[inline]
pub fn record_in_progress_publish() {
    tracing::debug!("get: observed in-progress publish, retry on next poll");
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub fn record_in_progress_publish() {}

/// Install a `tracing_subscriber` fmt layer on stderr. Call once at process
/// startup; a no-op when the `tracing` feature is disabled.
#[cfg(feature = "tracing")]
pub fn init_fmt_subscriber() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[cfg(not(feature = "tracing"))]
pub fn init_fmt_subscriber() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_calls_compile_and_run() {
        record_publish(0);
        record_drain(0);
        record_overrun();
        record_in_progress_publish();
        init_fmt_subscriber();
    }
}
