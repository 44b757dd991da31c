//! Double-hashing probe sequences over a prime-sized bucket array.

/// Base of the hash that picks the first slot.
pub const PRIME_A: u64 = 151;
/// Base of the hash that picks the step size.
pub const PRIME_B: u64 = 163;

/// Polynomial hash of `s` in base `prime`, reduced modulo `modulus` after
/// every byte so intermediate values stay below `modulus * prime`.
pub fn string_hash(s: &str, prime: u64, modulus: usize) -> usize {
    debug_assert!(modulus > 0);
    let m = modulus as u128;
    let a = prime as u128;
    s.bytes()
        .fold(0u128, |acc, b| (acc * a + b as u128) % m) as usize
}

/// Step between consecutive attempts, always in `[1, capacity)` for
/// `capacity >= 2`. `hash_b + 1` only wraps to zero when `hash_b` is the
/// last slot index.
fn step_for(key: &str, capacity: usize) -> usize {
    let step = (string_hash(key, PRIME_B, capacity) + 1) % capacity;
    if step == 0 {
        1
    } else {
        step
    }
}

/// Slot probed by `attempt` for `key`: `(hash_a + attempt * step) mod capacity`.
pub fn slot_for(key: &str, capacity: usize, attempt: usize) -> usize {
    let start = string_hash(key, PRIME_A, capacity) as u128;
    let step = step_for(key, capacity) as u128;
    ((start + attempt as u128 * step) % capacity as u128) as usize
}

/// The slots `slot_for(key, capacity, 0..capacity)` in attempt order.
///
/// With a prime capacity the step is coprime to it, so the sequence visits
/// every slot exactly once and then ends.
#[derive(Clone, Debug)]
pub struct ProbeSeq {
    next: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    pub fn new(key: &str, capacity: usize) -> Self {
        debug_assert!(capacity >= 2, "bucket arrays are at least 2 slots");
        Self {
            next: string_hash(key, PRIME_A, capacity),
            step: step_for(key, capacity),
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let slot = self.next;
        // slot and step are both below capacity; subtract instead of adding
        // past it.
        self.next = if slot >= self.capacity - self.step {
            slot - (self.capacity - self.step)
        } else {
            slot + self.step
        };
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
