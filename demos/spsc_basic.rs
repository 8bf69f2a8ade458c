//! Single-producer/single-consumer walkthrough: publish values 0..20, then
//! drain them in order, polling `get()` until data shows up.

use seqring::Ring;

#[repr(align(8))]
struct Reading(u64);

fn main() {
    let ring: Ring<Reading, 5> = Ring::new(); // capacity 32, comfortably holds all 20 readings

    for value in 0..20u64 {
        let ptr = std::ptr::NonNull::new(Box::into_raw(Box::new(Reading(value)))).unwrap();
        loop {
            match ring.put(ptr) {
                Ok(_) => break,
                Err(_) => std::hint::spin_loop(),
            }
        }
    }

    let mut drained = Vec::new();
    while drained.len() < 20 {
        match ring.get() {
            Some(ptr) => {
                let boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
                drained.push(boxed.0);
            }
            None => std::hint::spin_loop(),
        }
    }

    println!("drained {} readings in order: {:?}", drained.len(), drained);
    assert_eq!(drained, (0..20u64).collect::<Vec<_>>());
}
