//! Exhaustive interleaving exploration of the put/get protocol, the
//! Rust-ecosystem counterpart to the original header's Relacy harness.
//!
//! Only compiled when invoked with `RUSTFLAGS="--cfg loom" cargo test
//! --test loom_model --release`; iteration counts stay tiny because loom
//! explores every legal thread interleaving, not a sample of them.
#![cfg(loom)]

use loom::sync::atomic::{AtomicUsize, Ordering};
use loom::sync::Arc;
use loom::thread;
use seqring::{Ring, RingError};
use std::ptr::NonNull;

#[repr(align(8))]
struct Slot(usize);

fn leak(value: usize) -> NonNull<Slot> {
    NonNull::new(Box::into_raw(Box::new(Slot(value)))).unwrap()
}

unsafe fn reclaim(ptr: NonNull<Slot>) -> usize {
    Box::from_raw(ptr.as_ptr()).0
}

/// S1 under loom: one producer, one consumer, two items. Every interleaving
/// must still drain exactly the two published values, in order.
#[test]
fn loom_s1_spsc_basic() {
    loom::model(|| {
        let ring: Arc<Ring<Slot, 1>> = Arc::new(Ring::new()); // capacity 2

        let producer = {
            let ring = ring.clone();
            thread::spawn(move || {
                ring.put(leak(0)).unwrap();
                ring.put(leak(1)).unwrap();
            })
        };

        let mut drained = Vec::new();
        while drained.len() < 2 {
            if let Some(ptr) = ring.get() {
                drained.push(unsafe { reclaim(ptr) });
            } else {
                thread::yield_now();
            }
        }

        producer.join().unwrap();
        assert_eq!(drained, vec![0, 1]);
    });
}

/// S4 under loom: a capacity-1 ring makes the overrun path unavoidable on
/// the second put unless the consumer has already drained the first.
#[test]
fn loom_s4_overflow_path() {
    loom::model(|| {
        let ring: Ring<Slot, 0> = Ring::new(); // capacity 1
        ring.put(leak(7)).unwrap();
        assert_eq!(ring.put(leak(8)), Err(RingError::Overrun));

        let ptr = ring.get().unwrap();
        assert_eq!(unsafe { reclaim(ptr) }, 7);
        assert!(ring.get().is_none());

        ring.put(leak(8)).unwrap();
        let ptr = ring.get().unwrap();
        assert_eq!(unsafe { reclaim(ptr) }, 8);
    });
}

/// S5 under loom: two producers race for the same sequence on a capacity-2
/// ring. Whichever loses its slot CAS must observe the rival's value or
/// land in the next slot via the helping CAS. It must never spin forever
/// or silently drop its payload. The consumer must see exactly one copy of
/// each published value and nothing else.
#[test]
fn loom_s5_helping_correctness() {
    loom::model(|| {
        let ring: Arc<Ring<Slot, 1>> = Arc::new(Ring::new()); // capacity 2
        let published = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = [10usize, 20usize]
            .into_iter()
            .map(|value| {
                let ring = ring.clone();
                let published = published.clone();
                thread::spawn(move || {
                    ring.put(leak(value)).unwrap();
                    published.fetch_add(1, Ordering::Release);
                })
            })
            .collect();

        let mut drained = Vec::new();
        while drained.len() < 2 {
            if let Some(ptr) = ring.get() {
                drained.push(unsafe { reclaim(ptr) });
            } else {
                thread::yield_now();
            }
        }

        for handle in handles {
            handle.join().unwrap();
        }

        drained.sort_unstable();
        assert_eq!(drained, vec![10, 20]);
        assert_eq!(published.load(Ordering::Acquire), 2);
    });
}
