//! Test fixtures for holdall development.
//!
//! Provides [`DropTally`], a construction/drop accounting fixture for
//! verifying that containers drop every element exactly once, and
//! [`seed_values`], a deterministic value generator for order-preservation
//! tests and benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{seed_values, DropTally, TallyItem};
