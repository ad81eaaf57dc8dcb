//! Low-level buffer allocation primitives.
//!
//! [`RawBuf`] owns the heap allocation behind a [`crate::DynArray`]: a
//! `NonNull<T>` pointer and a slot count. It knows nothing about which slots
//! are live — element initialization and drop bookkeeping belong to the
//! container. All `Layout` computation and allocator calls are confined to
//! this module, each with a mandatory `// SAFETY:` comment.
//!
//! Zero-sized element types never allocate: the buffer stays dangling and
//! reports a capacity of `usize::MAX`.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::ArrayError;

/// Smallest non-zero capacity the amortized growth path allocates.
pub(crate) const MIN_CAPACITY: usize = 4;

/// An owned, possibly-empty heap buffer of `cap` slots of `T`.
///
/// Dropping a `RawBuf` releases the allocation without touching slot
/// contents; the owner must drop live elements first.
pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawBuf owns its allocation exclusively; the NonNull pointer is
// never shared, so sending or sharing the buffer is as safe as for T itself.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// Create an empty buffer without allocating.
    pub(crate) const fn new() -> Self {
        let cap = if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            0
        };
        Self {
            ptr: NonNull::dangling(),
            cap,
            _marker: PhantomData,
        }
    }

    /// Create a buffer with at least `cap` slots.
    ///
    /// Aborts via [`alloc::handle_alloc_error`] if the allocator fails.
    pub(crate) fn with_capacity(cap: usize) -> Self {
        let mut buf = Self::new();
        buf.grow_exact(cap);
        buf
    }

    /// First slot of the buffer. Dangling (but aligned and non-null) while
    /// `cap == 0` or `T` is zero-sized.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Number of allocated slots.
    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    /// Reallocate so that at least `minimum` slots are available, growing by
    /// doubling (with a floor of [`MIN_CAPACITY`]) to keep appends amortized
    /// O(1). Aborts on allocation failure.
    pub(crate) fn grow_amortized(&mut self, minimum: usize) {
        if mem::size_of::<T>() == 0 {
            return;
        }
        let doubled = self.cap.saturating_mul(2);
        self.grow_exact(doubled.max(minimum).max(MIN_CAPACITY));
    }

    /// Reallocate to exactly `new_cap` slots. No-op if the buffer already
    /// holds at least that many. Aborts on allocation failure.
    pub(crate) fn grow_exact(&mut self, new_cap: usize) {
        match self.try_grow_exact(new_cap) {
            Ok(()) => {}
            Err(ArrayError::AllocationFailed { bytes }) => {
                // The layout was valid (it passed try_grow_exact's checks),
                // so reconstructing it here cannot fail.
                let layout = Layout::from_size_align(bytes, mem::align_of::<T>())
                    .expect("layout was validated before the allocator call");
                alloc::handle_alloc_error(layout)
            }
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible form of [`RawBuf::grow_exact`].
    pub(crate) fn try_grow_exact(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        if mem::size_of::<T>() == 0 || new_cap <= self.cap {
            return Ok(());
        }
        let new_layout = Layout::array::<T>(new_cap)
            .map_err(|_| ArrayError::CapacityOverflow { requested: new_cap })?;
        if new_layout.size() > isize::MAX as usize {
            return Err(ArrayError::CapacityOverflow { requested: new_cap });
        }

        let raw = if self.cap == 0 {
            // SAFETY: new_cap > 0 and T is not zero-sized, so the layout has
            // a non-zero size.
            unsafe { alloc::alloc(new_layout) }
        } else {
            let old_layout = Layout::array::<T>(self.cap)
                .expect("live allocation always has a valid layout");
            // SAFETY: self.ptr was returned by this allocator with
            // old_layout; new_layout.size() is non-zero and was checked
            // against isize::MAX above.
            unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };

        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => {
                self.ptr = ptr;
                self.cap = new_cap;
                Ok(())
            }
            None => Err(ArrayError::AllocationFailed {
                bytes: new_layout.size(),
            }),
        }
    }

    /// Reallocate down to exactly `new_cap` slots, releasing the allocation
    /// entirely when `new_cap == 0`. No-op if `new_cap >= cap`.
    ///
    /// The caller must have dropped or relocated every element past
    /// `new_cap` already; the buffer does not track liveness.
    pub(crate) fn shrink_to(&mut self, new_cap: usize) {
        if mem::size_of::<T>() == 0 || new_cap >= self.cap {
            return;
        }
        let old_layout =
            Layout::array::<T>(self.cap).expect("live allocation always has a valid layout");

        if new_cap == 0 {
            // SAFETY: cap > 0, so self.ptr is a live allocation made with
            // old_layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), old_layout) };
            self.ptr = NonNull::dangling();
            self.cap = 0;
            return;
        }

        let new_layout =
            Layout::array::<T>(new_cap).expect("shrinking below a valid layout stays valid");
        // SAFETY: self.ptr is a live allocation made with old_layout and
        // new_layout.size() is non-zero (new_cap > 0, T not zero-sized).
        let raw =
            unsafe { alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => {
                self.ptr = ptr;
                self.cap = new_cap;
            }
            None => alloc::handle_alloc_error(new_layout),
        }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            let layout =
                Layout::array::<T>(self.cap).expect("live allocation always has a valid layout");
            // SAFETY: cap > 0 and T is not zero-sized, so self.ptr is a live
            // allocation made with this layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_allocate() {
        let buf = RawBuf::<u32>::new();
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn with_capacity_allocates_exactly() {
        let buf = RawBuf::<u32>::with_capacity(10);
        assert_eq!(buf.cap(), 10);
    }

    #[test]
    fn grow_amortized_doubles() {
        let mut buf = RawBuf::<u32>::new();
        buf.grow_amortized(1);
        assert_eq!(buf.cap(), MIN_CAPACITY);
        buf.grow_amortized(buf.cap() + 1);
        assert_eq!(buf.cap(), MIN_CAPACITY * 2);
        buf.grow_amortized(buf.cap() + 1);
        assert_eq!(buf.cap(), MIN_CAPACITY * 4);
    }

    #[test]
    fn grow_amortized_jumps_to_large_minimum() {
        let mut buf = RawBuf::<u32>::new();
        buf.grow_amortized(1000);
        assert_eq!(buf.cap(), 1000);
    }

    #[test]
    fn grow_exact_is_noop_when_sufficient() {
        let mut buf = RawBuf::<u32>::with_capacity(8);
        let ptr = buf.ptr();
        buf.grow_exact(4);
        assert_eq!(buf.cap(), 8);
        assert_eq!(buf.ptr(), ptr);
    }

    #[test]
    fn try_grow_exact_rejects_absurd_capacity() {
        let mut buf = RawBuf::<u64>::new();
        let result = buf.try_grow_exact(usize::MAX / 2);
        assert!(matches!(
            result,
            Err(ArrayError::CapacityOverflow { .. })
        ));
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn shrink_to_zero_releases() {
        let mut buf = RawBuf::<u32>::with_capacity(16);
        buf.shrink_to(0);
        assert_eq!(buf.cap(), 0);
    }

    #[test]
    fn shrink_to_smaller_capacity() {
        let mut buf = RawBuf::<u32>::with_capacity(16);
        buf.shrink_to(4);
        assert_eq!(buf.cap(), 4);
        // Shrinking never grows.
        buf.shrink_to(100);
        assert_eq!(buf.cap(), 4);
    }

    #[test]
    fn zero_sized_elements_never_allocate() {
        let mut buf = RawBuf::<()>::new();
        assert_eq!(buf.cap(), usize::MAX);
        buf.grow_amortized(1_000_000);
        assert_eq!(buf.cap(), usize::MAX);
        buf.shrink_to(0);
        assert_eq!(buf.cap(), usize::MAX);
    }
}
