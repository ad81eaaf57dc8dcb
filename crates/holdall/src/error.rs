//! Container-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during checked container operations.
///
/// The unchecked access paths (slice indexing via `Deref`, raw pointer
/// offsetting) deliberately do not produce these errors; see the crate-level
/// documentation for the checked/unchecked access policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A checked access referred to an index at or past the live length.
    OutOfBounds {
        /// The index that was requested.
        index: usize,
        /// The live length at the time of the access.
        len: usize,
    },
    /// A [`Cursor`](crate::Cursor) from a generation that has been
    /// invalidated by a removing, shifting, or reallocating operation.
    StaleCursor {
        /// The generation captured by the cursor.
        cursor_generation: u64,
        /// The array's current generation.
        array_generation: u64,
    },
    /// A requested capacity exceeds the maximum the allocator can represent
    /// (`isize::MAX` bytes).
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The allocator failed to provide a buffer on a fallible path.
    ///
    /// Infallible growth paths report this condition through
    /// [`std::alloc::handle_alloc_error`] instead.
    AllocationFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
    },
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::StaleCursor {
                cursor_generation,
                array_generation,
            } => {
                write!(
                    f,
                    "stale cursor: generation {cursor_generation}, array is at {array_generation}"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} slots requested")
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "allocation of {bytes} bytes failed")
            }
        }
    }
}

impl Error for ArrayError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let e = ArrayError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(e.to_string(), "index 7 out of bounds for length 3");

        let e = ArrayError::StaleCursor {
            cursor_generation: 2,
            array_generation: 5,
        };
        assert!(e.to_string().contains("generation 2"));
        assert!(e.to_string().contains("at 5"));
    }

    #[test]
    fn error_is_std_error() {
        fn takes_error(_: &dyn Error) {}
        takes_error(&ArrayError::AllocationFailed { bytes: 64 });
    }
}
