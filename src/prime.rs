//! Prime helpers used to size the bucket array.

/// Outcome of a primality test.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primality {
    Prime,
    NotPrime,
    /// Primality is not defined for values below 2.
    Undefined,
}

impl Primality {
    pub fn is_prime(self) -> bool {
        self == Primality::Prime
    }
}

/// Trial division by odd numbers up to `floor(sqrt(x))`.
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }
    let mut i = 3;
    // `i <= x / i` is `i * i <= x` without the overflow.
    while i <= x / i {
        if x % i == 0 {
            return Primality::NotPrime;
        }
        i += 2;
    }
    Primality::Prime
}

/// Smallest prime `>= x`, or `None` if it does not fit in `usize`.
pub fn checked_next_prime(mut x: usize) -> Option<usize> {
    loop {
        if is_prime(x).is_prime() {
            return Some(x);
        }
        x = x.checked_add(1)?;
    }
}

/// Smallest prime `>= x`.
///
/// Brute force: increments and re-tests until a prime is hit. Table sizes
/// are small and resizes rare, so the scan stays short in practice.
///
/// # Panics
///
/// Panics if no prime `>= x` is representable in `usize`. Use
/// [`checked_next_prime`] when `x` comes from untrusted input.
pub fn next_prime(x: usize) -> usize {
    match checked_next_prime(x) {
        Some(p) => p,
        None => panic!("no prime >= {x} fits in usize"),
    }
}
