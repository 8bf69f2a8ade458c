//! `seqring` is a bounded, lock-free, multi-producer / single-consumer
//! circular buffer that transports opaque data pointers between threads
//! without mutual exclusion.
//!
//! ## Why tags, not just a slot lock
//!
//! Producers publish by CAS-ing a pointer into a slot chosen by a
//! monotonically increasing write sequence; the slot's *empty* state is
//! tagged with the sequence number that is allowed to write it next. That
//! tag is what eliminates the ABA hazard inherent in reusing the same slot
//! across buffer wraps, not a separate lock or generation counter: a
//! producer's CAS can only succeed when it is genuinely the producer the
//! current tag designates, or when a rival has already completed that exact
//! sequence, in which case the CAS fails and the producer re-reads the
//! counter and retries.
//!
//! See [`ring::Ring`] for the full protocol, [`tag`] for the slot encoding
//! and tag derivation, and [`allocator::SingleWayAllocator`] for the
//! companion bounded index allocator mentioned alongside the ring.
//!
//! ## Non-goals
//!
//! Multiple concurrent readers, unbounded growth, dynamic resize, blocking
//! primitives (callers poll or back off), fairness among producers, and
//! exact occupancy reporting under contention (only a lower bound is
//! promised) are all explicitly out of scope. Payloads must be at least
//! 2-byte aligned; the ring enforces this with a compile-time assertion.

pub mod allocator;
pub mod cache;
pub mod constants;
pub mod error;
pub mod ring;
pub mod tag;
pub mod telemetry;

pub use allocator::SingleWayAllocator;
pub use error::{Result, RingError};
pub use ring::Ring;
