//! Generation-scoped position references.
//!
//! A [`Cursor`] denotes an offset into a [`DynArray`]. It captures the
//! array's invalidation generation at creation time, allowing an O(1)
//! staleness check at resolution time: if the array has since removed,
//! shifted, or relocated elements, resolving the cursor reports
//! [`ArrayError::StaleCursor`] instead of silently reading a slot whose
//! meaning has changed.
//!
//! This is the recoverable-error rendering of iterator invalidation.
//! Borrowed iterators and slices get the same protection from the borrow
//! checker; cursors exist for the cases where a position must outlive a
//! borrow — stored positions, positions returned from mutating calls.
//!
//! After [`DynArray::swap`], cursors remain valid against the array that now
//! owns the buffer they were captured from, since generations travel with
//! the buffer.

use std::fmt;

use crate::array::DynArray;
use crate::error::ArrayError;

/// A position reference into a [`DynArray`], scoped to the generation it was
/// captured at.
///
/// Plain value handle: copying it is free and it holds no borrow. All
/// validation happens at resolution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl Cursor {
    /// The offset this cursor denotes.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The array generation this cursor was captured at.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor(index={}, gen={})", self.index, self.generation)
    }
}

impl<T> DynArray<T> {
    /// Capture a cursor to `index` at the current generation.
    ///
    /// `index` is not bounds-checked here; a cursor one past the end is
    /// valid for [`DynArray::insert_at`]. Bounds are checked at resolution.
    #[must_use]
    pub fn cursor(&self, index: usize) -> Cursor {
        Cursor {
            index,
            generation: self.generation,
        }
    }

    /// Resolve a cursor to a shared element reference.
    ///
    /// Fails with [`ArrayError::StaleCursor`] if an invalidating operation
    /// has run since the cursor was captured, or [`ArrayError::OutOfBounds`]
    /// if the cursor denotes a slot at or past the live length.
    pub fn get_at(&self, cursor: Cursor) -> Result<&T, ArrayError> {
        self.check_generation(cursor)?;
        self.as_slice()
            .get(cursor.index)
            .ok_or(ArrayError::OutOfBounds {
                index: cursor.index,
                len: self.len,
            })
    }

    /// Resolve a cursor to a mutable element reference.
    ///
    /// Same failure modes as [`DynArray::get_at`].
    pub fn get_at_mut(&mut self, cursor: Cursor) -> Result<&mut T, ArrayError> {
        self.check_generation(cursor)?;
        let len = self.len;
        self.as_mut_slice()
            .get_mut(cursor.index)
            .ok_or(ArrayError::OutOfBounds {
                index: cursor.index,
                len,
            })
    }

    /// Insert `value` at a cursor's position, validating the cursor first.
    ///
    /// Returns a fresh cursor to the inserted element; the argument cursor
    /// (and every other outstanding cursor) is stale afterwards.
    pub fn insert_at(&mut self, cursor: Cursor, value: T) -> Result<Cursor, ArrayError> {
        self.check_generation(cursor)?;
        if cursor.index > self.len {
            return Err(ArrayError::OutOfBounds {
                index: cursor.index,
                len: self.len,
            });
        }
        Ok(self.insert(cursor.index, value))
    }

    /// Remove the element at a cursor's position, validating the cursor
    /// first.
    ///
    /// Returns the removed value together with a fresh cursor to the element
    /// that now occupies the slot (one past the end if the last element was
    /// removed).
    pub fn erase(&mut self, cursor: Cursor) -> Result<(T, Cursor), ArrayError> {
        self.check_generation(cursor)?;
        if cursor.index >= self.len {
            return Err(ArrayError::OutOfBounds {
                index: cursor.index,
                len: self.len,
            });
        }
        let value = self.remove(cursor.index);
        Ok((value, self.cursor(cursor.index)))
    }

    fn check_generation(&self, cursor: Cursor) -> Result<(), ArrayError> {
        if cursor.generation != self.generation {
            return Err(ArrayError::StaleCursor {
                cursor_generation: cursor.generation,
                array_generation: self.generation,
            });
        }
        Ok(())
    }
}
