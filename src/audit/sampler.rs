//! Seeded subset selection

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reduce `candidates` to at most `k` elements using a seeded shuffle.
///
/// When `candidates.len() <= k` the input is returned untouched, order
/// included. Otherwise a Fisher–Yates shuffle driven by `StdRng` seeded with
/// `seed` runs over the whole list (walking from the last index down, swapping
/// index `i` with a uniform `j` in `0..=i`) and the first `k` elements are kept.
/// The same seed and input order always yield the same output.
#[must_use]
pub fn sample<T>(mut candidates: Vec<T>, k: usize, seed: u64) -> Vec<T> {
    if candidates.len() <= k {
        return candidates;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for i in (1..candidates.len()).rev() {
        let j = rng.gen_range(0..=i);
        candidates.swap(i, j);
    }
    candidates.truncate(k);
    candidates
}
