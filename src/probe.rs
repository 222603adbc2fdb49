//! String hashing and the double-hashing probe sequence.
//!
//! Both hashes treat the key as its UTF-8 bytes and evaluate the
//! polynomial `Σ byte[i] * prime^(len-1-i)` modulo the table capacity.
//! The second hash, plus one, is the probe step.
//!
//! Limitation: with a prime capacity every step in `1..capacity` is
//! coprime to it, so the sequence visits every bucket within `capacity`
//! attempts. A step equal to `capacity` (second hash == capacity - 1) is
//! congruent to zero and the sequence stays on its first bucket. Callers
//! bound each walk to `capacity` attempts and handle exhaustion.

/// Multiplier for the home-bucket hash.
pub const HASH_PRIME_A: u64 = 151;
/// Multiplier for the step hash.
pub const HASH_PRIME_B: u64 = 163;

/// Polynomial hash of `key` modulo `modulus`, by Horner's rule.
#[inline]
pub fn hash(key: &str, prime: u64, modulus: usize) -> usize {
    debug_assert!(modulus > 0);
    let m = modulus as u128;
    let p = prime as u128;
    let mut h: u128 = 0;
    for &b in key.as_bytes() {
        h = (h * p + b as u128) % m;
    }
    h as usize
}

/// Bucket index for `key` after `attempt` collisions.
pub fn probe_index(key: &str, capacity: usize, attempt: usize) -> usize {
    let hash_a = hash(key, HASH_PRIME_A, capacity) as u128;
    let hash_b = hash(key, HASH_PRIME_B, capacity) as u128;
    ((hash_a + attempt as u128 * (hash_b + 1)) % capacity as u128) as usize
}

/// Bounded walk over a key's probe sequence: yields `capacity` indices,
/// starting with attempt 0.
#[derive(Clone, Debug)]
pub struct Probe {
    index: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl Probe {
    pub fn new(key: &str, capacity: usize) -> Self {
        let home = hash(key, HASH_PRIME_A, capacity);
        let step = (hash(key, HASH_PRIME_B, capacity) + 1) % capacity;
        Probe {
            index: home,
            step,
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = ((current as u128 + self.step as u128) % self.capacity as u128) as usize;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// Invariant: Horner evaluation equals the explicit polynomial.
    #[test]
    fn hash_matches_polynomial() {
        let key = "city";
        let m = 53u64;
        let bytes = key.as_bytes();
        let mut expected = 0u64;
        for (i, &b) in bytes.iter().enumerate() {
            let exp = (bytes.len() - 1 - i) as u32;
            expected = (expected + (b as u64) * HASH_PRIME_A.pow(exp)) % m;
        }
        assert_eq!(hash(key, HASH_PRIME_A, m as usize), expected as usize);
    }

    #[test]
    fn hash_of_empty_key_is_zero() {
        assert_eq!(hash("", HASH_PRIME_A, 53), 0);
        assert_eq!(probe_index("", 53, 0), 0);
    }

    /// Invariant: long keys do not overflow and stay below the modulus.
    #[test]
    fn hash_long_key_in_range() {
        let key = "x".repeat(10_000);
        for m in [53usize, 107, 1_000_003] {
            assert!(hash(&key, HASH_PRIME_B, m) < m);
        }
    }

    /// Invariant: the iterator yields exactly `probe_index` for attempts
    /// `0..capacity`.
    #[test]
    fn iterator_agrees_with_probe_index() {
        for key in ["name", "age", "city", "", "a longer key with spaces"] {
            let expected: Vec<usize> = (0..53).map(|a| probe_index(key, 53, a)).collect();
            let got: Vec<usize> = Probe::new(key, 53).collect();
            assert_eq!(got, expected, "key {key:?}");
        }
    }

    /// Invariant: a nonzero step over a prime capacity covers every bucket.
    #[test]
    fn nonzero_step_covers_all_buckets() {
        let cap = 53;
        for i in 0..200 {
            let key = format!("k{i}");
            if (hash(&key, HASH_PRIME_B, cap) + 1) % cap == 0 {
                continue;
            }
            let seen: HashSet<usize> = Probe::new(&key, cap).collect();
            assert_eq!(seen.len(), cap, "key {key:?}");
        }
    }

    /// Invariant: a step congruent to zero pins the walk to the home bucket.
    #[test]
    fn zero_step_pins_home_bucket() {
        let cap = 53;
        let key = (0..100_000)
            .map(|i| format!("z{i}"))
            .find(|k| hash(k, HASH_PRIME_B, cap) == cap - 1)
            .expect("some key hashes to capacity - 1");
        let seen: HashSet<usize> = Probe::new(&key, cap).collect();
        assert_eq!(seen.len(), 1);
        assert_eq!(Probe::new(&key, cap).len(), cap);
    }
}
