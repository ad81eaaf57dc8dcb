//! Owning, contiguous, growable sequence container with generation-tracked
//! cursors.
//!
//! [`DynArray<T>`] keeps its elements in a single exclusively-owned buffer:
//! amortized-O(1) append, O(1) random access, single-shift bulk
//! insertion/removal, and explicit capacity control (`reserve`,
//! `shrink_to_fit`, `release`).
//!
//! # Architecture
//!
//! ```text
//! DynArray<T> (container: length, generation, element bookkeeping)
//! ├── RawBuf<T> (allocation layer: NonNull buffer + capacity)
//! ├── Cursor (generation-scoped position references)
//! ├── Drain<'_, T> (removing range iterator)
//! └── IntoIter<T> (consuming iterator)
//! ```
//!
//! # Checked and unchecked access
//!
//! The container deliberately keeps three access paths rather than a single
//! uniformly-checked one: recoverable (`get`, cursor resolution), panicking
//! (`array[i]`), and unchecked (`get_unchecked`, `unsafe`) for hot loops
//! that have already established their bounds. See [`DynArray`] for the
//! full policy.
//!
//! # Cursors
//!
//! Stored positions are a classic invalidation hazard: a reallocation or a
//! shifting operation changes what an offset means. [`Cursor`] captures the
//! array's generation at creation and resolution fails with
//! [`ArrayError::StaleCursor`] once the generation has moved on, turning the
//! hazard into a recoverable error. See [`cursor`] for the invalidation
//! rules.
//!
//! # Unsafe policy
//!
//! `unsafe` is confined to the allocation layer (`raw`) and the
//! element-move modules ([`array`], [`drain`], [`iter`]); every block
//! carries a `// SAFETY:` comment. The length field always tracks exactly the initialized prefix,
//! so a panic mid-operation can leak elements but never double-drop them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod array;
mod cmp;
pub mod cursor;
pub mod drain;
pub mod error;
pub mod iter;
mod raw;

// Public re-exports for the primary API surface.
pub use array::DynArray;
pub use cursor::Cursor;
pub use drain::Drain;
pub use error::ArrayError;
pub use iter::IntoIter;
