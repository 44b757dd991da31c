//! Prime sizing for bucket arrays.
//!
//! The table only asks one question of this module: "what is the smallest
//! prime at or above this base size?". Trial division is plenty for the
//! sizes a string table reaches.

/// Classification returned by [`is_prime`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Primality {
    Prime,
    Composite,
    /// Primality is not defined below 2.
    Undefined,
}

pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::Undefined;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::Composite;
    }
    let mut d = 3;
    // `d <= x / d` is `d * d <= x` without the overflow.
    while d <= x / d {
        if x % d == 0 {
            return Primality::Composite;
        }
        d += 2;
    }
    Primality::Prime
}

/// Smallest prime `>= x`. Inputs below 2 advance to 2. `None` when no
/// such prime fits in a `usize`.
pub fn next_prime(mut x: usize) -> Option<usize> {
    while is_prime(x) != Primality::Prime {
        x = x.checked_add(1)?;
    }
    Some(x)
}
