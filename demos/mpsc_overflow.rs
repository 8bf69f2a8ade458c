//! Multiple producers publishing into a small ring while one consumer
//! drains it, backing off on `RingError::Overrun` until the consumer frees
//! a slot.

use seqring::{Ring, RingError};
use std::ptr::NonNull;
use std::sync::Arc;
use std::thread;

#[repr(align(8))]
struct Event {
    producer: u64,
    seq: u64,
}

fn main() {
    let ring: Arc<Ring<Event, 2>> = Arc::new(Ring::new()); // capacity 4
    let producers = 4u64;
    let per_producer = 25u64;

    let handles: Vec<_> = (0..producers)
        .map(|producer| {
            let ring = ring.clone();
            thread::spawn(move || {
                for seq in 0..per_producer {
                    let ptr = NonNull::new(Box::into_raw(Box::new(Event { producer, seq }))).unwrap();
                    let mut pending = Some(ptr);
                    while let Some(p) = pending {
                        match ring.put(p) {
                            Ok(_) => pending = None,
                            Err(RingError::Overrun) => {
                                pending = Some(p);
                                std::hint::spin_loop();
                            }
                            Err(other) => panic!("unexpected error: {other:?}"),
                        }
                    }
                }
            })
        })
        .collect();

    let total = producers * per_producer;
    let mut drained = 0u64;
    while drained < total {
        if let Some(ptr) = ring.get() {
            let event = unsafe { Box::from_raw(ptr.as_ptr()) };
            drained += 1;
            let _ = (event.producer, event.seq);
        } else {
            std::hint::spin_loop();
        }
    }

    for handle in handles {
        handle.join().unwrap();
    }

    println!("drained all {drained} events from {producers} producers through a capacity-4 ring");
}
