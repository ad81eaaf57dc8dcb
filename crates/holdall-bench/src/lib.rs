//! Benchmark workloads for the holdall container.
//!
//! Provides deterministic, seed-driven workload builders shared by the
//! criterion benches:
//!
//! - [`seeded_array`]: a [`DynArray`] filled with a reproducible value
//!   sequence.
//! - [`access_pattern`]: a reproducible sequence of in-bounds indices for
//!   random-access benchmarks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use holdall::DynArray;
use holdall_test_utils::seed_values;

/// Build an array of `len` deterministic values from `seed`.
pub fn seeded_array(seed: u64, len: usize) -> DynArray<u64> {
    let mut arr = DynArray::with_capacity(len);
    for v in seed_values(seed, len) {
        arr.push(v);
    }
    arr
}

/// Build `count` deterministic in-bounds indices for an array of `len`
/// elements.
pub fn access_pattern(seed: u64, len: usize, count: usize) -> Vec<usize> {
    assert!(len > 0, "access pattern needs a non-empty target");
    seed_values(seed, count)
        .into_iter()
        .map(|v| (v % len as u64) as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_array_is_deterministic() {
        let a = seeded_array(42, 256);
        let b = seeded_array(42, 256);
        assert_eq!(a, b);
        assert_eq!(a.len(), 256);
    }

    #[test]
    fn access_pattern_stays_in_bounds() {
        let pattern = access_pattern(7, 100, 1000);
        assert_eq!(pattern.len(), 1000);
        assert!(pattern.iter().all(|&i| i < 100));
    }
}
