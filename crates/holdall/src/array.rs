//! The dynamic array container.
//!
//! [`DynArray`] keeps its elements in one contiguous, exclusively-owned
//! buffer. Live elements occupy slots `[0, len)` in insertion order; slots
//! `[len, capacity)` are uninitialized. Capacity grows by doubling and never
//! shrinks except through [`DynArray::shrink_to_fit`] or
//! [`DynArray::release`].
//!
//! Bounded `unsafe` policy: every block carries a `// SAFETY:` comment, and
//! all allocator interaction lives in [`crate::raw`]. The unsafe here is
//! limited to element moves (`ptr::copy`/`read`/`write`) and drop
//! bookkeeping, with `len` always updated so that a panic mid-operation can
//! leak elements but never double-drop them.

#![allow(unsafe_code)]

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::cursor::Cursor;
use crate::error::ArrayError;
use crate::raw::RawBuf;

/// An owning, contiguous, growable sequence container.
///
/// Amortized-O(1) append, O(1) random access, single-shift bulk
/// insertion/removal, and explicit capacity control.
///
/// # Access policy
///
/// Three access paths with distinct contracts, never collapsed into one:
///
/// - **Checked, recoverable**: [`get`](slice::get) returns `Option`;
///   cursor resolution ([`DynArray::get_at`]) returns `Result` and also
///   detects stale cursors.
/// - **Checked, panicking**: `array[i]` through `Deref<Target = [T]>`.
/// - **Unchecked**: [`get_unchecked`](slice::get_unchecked) (`unsafe`) for
///   hot paths that have already established `i < len`.
///
/// # Invalidation
///
/// Reallocation invalidates every raw pointer previously obtained from
/// [`DynArray::as_ptr`]. Cursors additionally go stale on any operation that
/// removes or shifts elements; see [`crate::cursor`] for the generation
/// rules. Borrowed iterators are protected by the borrow checker instead.
///
/// # Example
///
/// ```rust
/// use holdall::DynArray;
///
/// let mut arr = DynArray::from_slice(&[10, 20, 30]);
/// arr.insert(1, 100);
/// assert_eq!(arr, [10, 100, 20, 30]);
/// ```
pub struct DynArray<T> {
    pub(crate) buf: RawBuf<T>,
    pub(crate) len: usize,
    pub(crate) generation: u64,
}

impl<T> DynArray<T> {
    /// Largest number of elements a single array can hold: `isize::MAX`
    /// bytes of element storage, or `usize::MAX` for zero-sized types.
    ///
    /// Requesting more fails with [`ArrayError::CapacityOverflow`] on the
    /// fallible path and panics on the infallible one.
    pub const MAX_CAPACITY: usize = if std::mem::size_of::<T>() == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / std::mem::size_of::<T>()
    };

    /// Create an empty array without allocating.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            generation: 0,
        }
    }

    /// Create an empty array with at least `capacity` slots pre-allocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
            generation: 0,
        }
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots. Always at least [`DynArray::len`].
    ///
    /// Reported as `usize::MAX` for zero-sized element types, which never
    /// allocate.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Current invalidation generation. Advances on every operation that
    /// removes, shifts, or relocates elements; pure in-capacity appends do
    /// not advance it.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized (container invariant) and
        // buf.ptr() is aligned and non-null even when empty.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// All live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for as_slice; &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Raw pointer to the first slot of the backing buffer.
    ///
    /// Valid until the next reallocating operation.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Raw mutable pointer to the first slot of the backing buffer.
    ///
    /// Valid until the next reallocating operation.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Append one element. Amortized O(1); reallocates (doubling capacity)
    /// when full.
    pub fn push(&mut self, value: T) {
        self.ensure_capacity(self.len + 1);
        // SAFETY: slot `len` is within capacity and uninitialized.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Append an element produced by `constructor`, running it only after
    /// capacity has been ensured.
    ///
    /// The in-place construction analogue: when a reallocation is needed it
    /// happens before the element exists, so the constructor's output is
    /// written straight into its final slot.
    pub fn push_with(&mut self, constructor: impl FnOnce() -> T) {
        self.ensure_capacity(self.len + 1);
        // SAFETY: slot `len` is within capacity and uninitialized. If the
        // constructor panics nothing has been written and len is unchanged.
        unsafe { ptr::write(self.buf.ptr().add(self.len), constructor()) };
        self.len += 1;
    }

    /// Remove and return the last element, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        self.invalidate();
        // SAFETY: slot `len` held the last live element; decrementing len
        // first means it is no longer tracked, so reading it out is a move.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Insert `value` before the element at `index`, shifting the tail right
    /// by one. `index == len` appends. Returns a cursor to the inserted
    /// element.
    ///
    /// O(len - index), plus a reallocation if the array is full.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Cursor {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds for length {}",
            self.len
        );
        self.ensure_capacity(self.len + 1);
        // SAFETY: index <= len < capacity; the copy shifts the tail into
        // slots that are within capacity, and the vacated slot is then
        // initialized by the write.
        unsafe {
            let slot = self.buf.ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, value);
        }
        self.len += 1;
        self.invalidate();
        self.cursor(index)
    }

    /// Insert `count` clones of `value` before the element at `index` with a
    /// single tail shift. Returns a cursor to the first inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_filled(&mut self, index: usize, count: usize, value: T) -> Cursor
    where
        T: Clone,
    {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds for length {}",
            self.len
        );
        if count == 0 {
            return self.cursor(index);
        }
        self.ensure_capacity(self.len + count);
        let old_len = self.len;
        // SAFETY: capacity covers old_len + count. The tail is shifted once;
        // while the gap is being filled, len tracks exactly the initialized
        // prefix so a panicking Clone leaks the shifted tail instead of
        // double-dropping anything.
        unsafe {
            let gap = self.buf.ptr().add(index);
            ptr::copy(gap, gap.add(count), old_len - index);
            self.len = index;
            for i in 0..count - 1 {
                ptr::write(gap.add(i), value.clone());
                self.len += 1;
            }
            ptr::write(gap.add(count - 1), value);
            self.len = old_len + count;
        }
        self.invalidate();
        self.cursor(index)
    }

    /// Insert clones of `values` before the element at `index` with a single
    /// tail shift. Returns a cursor to the first inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_from_slice(&mut self, index: usize, values: &[T]) -> Cursor
    where
        T: Clone,
    {
        assert!(
            index <= self.len,
            "insert index {index} out of bounds for length {}",
            self.len
        );
        let count = values.len();
        if count == 0 {
            return self.cursor(index);
        }
        self.ensure_capacity(self.len + count);
        let old_len = self.len;
        // SAFETY: as for insert_filled — len tracks the initialized prefix
        // while the gap is filled, so a panicking Clone cannot double-drop.
        unsafe {
            let gap = self.buf.ptr().add(index);
            ptr::copy(gap, gap.add(count), old_len - index);
            self.len = index;
            for (i, v) in values.iter().enumerate() {
                ptr::write(gap.add(i), v.clone());
                self.len += 1;
            }
            self.len = old_len + count;
        }
        self.invalidate();
        self.cursor(index)
    }

    /// Remove and return the element at `index`, shifting the tail left to
    /// close the gap. O(len - index).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "remove index {index} out of bounds for length {}",
            self.len
        );
        // SAFETY: index < len, so the slot is initialized; after reading it
        // out, the tail copy re-fills the vacated slot and len is reduced so
        // the duplicate last slot is no longer tracked.
        let value = unsafe {
            let slot = self.buf.ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            value
        };
        self.len -= 1;
        self.invalidate();
        value
    }

    /// Append clones of every element of `values` in order.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.ensure_capacity(self.len + values.len());
        for v in values {
            // SAFETY: capacity was ensured above; len tracks each write.
            unsafe { ptr::write(self.buf.ptr().add(self.len), v.clone()) };
            self.len += 1;
        }
    }

    /// Drop all elements. Capacity is unchanged; the allocation is kept for
    /// reuse. Use [`DynArray::release`] to also free the buffer.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        // SAFETY: slots [0, len) are initialized; len is zeroed before the
        // drops run so a panicking Drop leaks the remainder rather than
        // allowing a second drop pass.
        unsafe {
            let live = ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len);
            self.len = 0;
            self.invalidate();
            ptr::drop_in_place(live);
        }
    }

    /// Drop all elements and release the backing buffer, returning the array
    /// to the unallocated state (`capacity() == 0`).
    pub fn release(&mut self) {
        self.clear();
        self.buf.shrink_to(0);
        self.invalidate();
    }

    /// Drop every element past `new_len`. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        // SAFETY: slots [new_len, len) are initialized; len is cut before
        // the drops run (same leak-not-double-drop discipline as clear).
        unsafe {
            let tail =
                ptr::slice_from_raw_parts_mut(self.buf.ptr().add(new_len), self.len - new_len);
            self.len = new_len;
            self.invalidate();
            ptr::drop_in_place(tail);
        }
    }

    /// Resize to exactly `new_len` elements: truncates when shrinking,
    /// appends clones of `value` when growing.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
        } else {
            self.extend_filled(new_len - self.len, value);
        }
    }

    /// Resize to exactly `new_len` elements, producing any new elements with
    /// `fill`. `resize_with(n, Default::default)` gives value-initialized
    /// growth.
    pub fn resize_with(&mut self, new_len: usize, mut fill: impl FnMut() -> T) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.ensure_capacity(new_len);
        while self.len < new_len {
            // SAFETY: capacity was ensured; len tracks each write, so a
            // panicking fill leaves a consistent prefix.
            unsafe { ptr::write(self.buf.ptr().add(self.len), fill()) };
            self.len += 1;
        }
    }

    /// Ensure at least `min_capacity` slots are allocated, reallocating once
    /// if needed.
    ///
    /// Absolute semantics: `min_capacity` is the total slot count, not a
    /// headroom increment. No-op when the capacity is already sufficient;
    /// never decreases capacity. After `reserve(k)`, appends up to a length
    /// of `k` are guaranteed not to reallocate.
    pub fn reserve(&mut self, min_capacity: usize) {
        if min_capacity <= self.buf.cap() {
            return;
        }
        self.buf.grow_exact(min_capacity);
        self.invalidate();
    }

    /// Fallible form of [`DynArray::reserve`]: reports
    /// [`ArrayError::AllocationFailed`] or [`ArrayError::CapacityOverflow`]
    /// instead of aborting the process.
    pub fn try_reserve(&mut self, min_capacity: usize) -> Result<(), ArrayError> {
        if min_capacity <= self.buf.cap() {
            return Ok(());
        }
        self.buf.try_grow_exact(min_capacity)?;
        self.invalidate();
        Ok(())
    }

    /// Reduce capacity to match the current length, releasing the buffer
    /// entirely when empty. Never changes length or element values.
    pub fn shrink_to_fit(&mut self) {
        if self.buf.cap() <= self.len {
            return;
        }
        self.buf.shrink_to(self.len);
        self.invalidate();
    }

    /// Replace the entire contents with `count` clones of `value`, reusing
    /// the existing allocation when it is large enough.
    pub fn assign_filled(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        if count > 0 {
            self.extend_filled(count, value);
        }
    }

    /// Replace the entire contents with clones of `values`, reusing the
    /// existing allocation when it is large enough.
    pub fn assign_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.clear();
        self.extend_from_slice(values);
    }

    /// Exchange buffers, lengths, capacities, and generations with `other`
    /// in O(1). No element is copied or moved; cursors stay valid against
    /// the array that now owns the buffer they were captured from.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Append `additional` clones of `value`, moving `value` itself into the
    /// final slot.
    fn extend_filled(&mut self, additional: usize, value: T)
    where
        T: Clone,
    {
        debug_assert!(additional > 0);
        self.ensure_capacity(self.len + additional);
        // SAFETY: capacity was ensured; len tracks each write, so a
        // panicking Clone leaves a consistent, fully-tracked prefix.
        unsafe {
            for _ in 0..additional - 1 {
                ptr::write(self.buf.ptr().add(self.len), value.clone());
                self.len += 1;
            }
            ptr::write(self.buf.ptr().add(self.len), value);
            self.len += 1;
        }
    }

    /// Grow amortized (doubling) so that `minimum` slots are available,
    /// advancing the generation if a reallocation actually happened.
    pub(crate) fn ensure_capacity(&mut self, minimum: usize) {
        if minimum <= self.buf.cap() {
            return;
        }
        self.buf.grow_amortized(minimum);
        self.invalidate();
    }

    /// Advance the invalidation generation.
    #[inline]
    pub(crate) fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T: Clone> DynArray<T> {
    /// Create an array of `count` clones of `value`.
    pub fn filled(count: usize, value: T) -> Self {
        let mut arr = Self::with_capacity(count);
        if count > 0 {
            arr.extend_filled(count, value);
        }
        arr
    }

    /// Create an array by cloning an external sequence in order.
    pub fn from_slice(values: &[T]) -> Self {
        let mut arr = Self::with_capacity(values.len());
        arr.extend_from_slice(values);
        arr
    }
}

impl<T: Default> DynArray<T> {
    /// Create an array of `count` value-initialized (default) elements.
    pub fn defaulted(count: usize) -> Self {
        let mut arr = Self::with_capacity(count);
        arr.resize_with(count, T::default);
        arr
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        // SAFETY: slots [0, len) are initialized; RawBuf's Drop then
        // releases the allocation without touching slot contents.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        Self::from_slice(self)
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
