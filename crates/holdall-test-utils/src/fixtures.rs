//! Reusable container test fixtures.
//!
//! - [`DropTally`] / [`TallyItem`] — counts constructions (including clones)
//!   and drops, so a test can assert that every element a container ever
//!   held was dropped exactly once.
//! - [`seed_values`] — deterministic pseudo-random value sequence from a
//!   seed, for order-preservation checks without a rand dependency.

use std::cell::Cell;
use std::rc::Rc;

/// Shared construction/drop ledger for [`TallyItem`]s.
///
/// Create one tally per test, mint items with [`DropTally::item`], and
/// finish with [`DropTally::assert_balanced`] once everything the container
/// held should be gone.
#[derive(Clone, Default)]
pub struct DropTally {
    created: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl DropTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new tracked item, counting one construction.
    pub fn item(&self) -> TallyItem {
        self.created.set(self.created.get() + 1);
        TallyItem {
            tally: self.clone(),
        }
    }

    /// Total constructions so far, clones included.
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Total drops so far.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Number of items currently alive.
    pub fn live(&self) -> usize {
        self.created.get() - self.dropped.get()
    }

    /// Assert that every item ever constructed has been dropped exactly once.
    ///
    /// # Panics
    ///
    /// Panics with the construction/drop counts when they disagree.
    pub fn assert_balanced(&self) {
        assert_eq!(
            self.created.get(),
            self.dropped.get(),
            "drop tally out of balance: {} created, {} dropped",
            self.created.get(),
            self.dropped.get()
        );
    }
}

/// An element whose clones and drops are counted by its [`DropTally`].
///
/// Deliberately not `Copy`, so containers must move or clone it explicitly.
pub struct TallyItem {
    tally: DropTally,
}

impl Clone for TallyItem {
    fn clone(&self) -> Self {
        self.tally.item()
    }
}

impl Drop for TallyItem {
    fn drop(&mut self) {
        self.tally.dropped.set(self.tally.dropped.get() + 1);
    }
}

/// Generate `count` deterministic pseudo-random values from `seed`.
///
/// Same sequence for the same seed on every run; a linear congruential
/// mix, good enough for order checks and bench access patterns.
pub fn seed_values(seed: u64, count: usize) -> Vec<u64> {
    let mut values = Vec::with_capacity(count);
    let mut state = seed;
    for _ in 0..count {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        values.push(state);
    }
    values
}
