//! Removing range iterator.
//!
//! [`Drain`] lazily yields owned elements out of a range of a
//! [`DynArray`]. When the iterator is dropped, any unconsumed elements in
//! the range are dropped too and the tail is shifted left to close the gap.
//! The borrow on the array lasts for the iterator's lifetime, so no other
//! access can observe the intermediate state.

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};
use std::ptr::{self, NonNull};

use crate::array::DynArray;

/// A draining iterator over a removed range of a [`DynArray`].
///
/// Created by [`DynArray::drain`]. Yields elements front to back (or back to
/// front via [`DoubleEndedIterator`]); dropping it completes the removal.
pub struct Drain<'a, T> {
    /// The drained array; accessed through a raw pointer because the
    /// iterator both reads elements out and fixes up the length on drop.
    array: NonNull<DynArray<T>>,
    /// Next slot to yield from the front of the range.
    front: usize,
    /// One past the last slot to yield.
    back: usize,
    /// First index past the drained range in the original layout.
    tail_start: usize,
    /// Number of elements after the drained range.
    tail_len: usize,
    _marker: PhantomData<&'a mut DynArray<T>>,
}

impl<T> DynArray<T> {
    /// Remove the given range, returning an iterator over the removed
    /// elements. The gap is closed when the iterator is dropped; elements
    /// not consumed by then are dropped with it.
    ///
    /// Every outstanding cursor is stale afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or inverted.
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T> {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&i) => i,
            Bound::Excluded(&i) => i + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&i) => i + 1,
            Bound::Excluded(&i) => i,
            Bound::Unbounded => len,
        };
        assert!(
            start <= end && end <= len,
            "drain range {start}..{end} out of bounds for length {len}"
        );

        // len is cut to `start` for the iterator's lifetime so the drained
        // slots and the tail are untracked; Drop relocates the tail and
        // restores the length. A leaked Drain therefore leaks elements but
        // never double-drops.
        self.len = start;
        self.invalidate();
        Drain {
            array: NonNull::from(self),
            front: start,
            back: end,
            tail_start: end,
            tail_len: len - end,
            _marker: PhantomData,
        }
    }
}

impl<T> Drain<'_, T> {
    /// Pointer to slot `index` of the drained array's buffer.
    fn slot(&self, index: usize) -> *mut T {
        // SAFETY: the array outlives the drain, which holds its only borrow.
        let array = unsafe { self.array.as_ref() };
        // SAFETY: callers only pass indices inside the original length, so
        // the offset stays within the allocation.
        unsafe { array.buf.ptr().add(index) }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.slot(self.front);
        self.front += 1;
        // SAFETY: the slot is live and untracked (len was cut at creation)
        // and will not be read again; reading it out transfers ownership
        // exactly once.
        Some(unsafe { ptr::read(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Drain<'_, T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: as for next().
        Some(unsafe { ptr::read(self.slot(self.back)) })
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        // SAFETY: self.array outlives the drain (it borrows the array).
        let array = unsafe { self.array.as_mut() };
        let gap_start = array.len;

        // SAFETY: slots [front, back) hold the unconsumed elements, live
        // and untracked; dropping them here is their only drop. The tail
        // copy then closes the gap with a possibly-overlapping move, after
        // which every slot in [0, gap_start + tail_len) is live again.
        unsafe {
            if self.front < self.back {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    array.buf.ptr().add(self.front),
                    self.back - self.front,
                ));
            }
            if self.tail_len > 0 {
                let src = array.buf.ptr().add(self.tail_start);
                let dst = array.buf.ptr().add(gap_start);
                ptr::copy(src, dst, self.tail_len);
            }
            array.len = gap_start + self.tail_len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdall_test_utils::DropTally;

    #[test]
    fn drain_yields_range_and_closes_gap() {
        let mut arr = DynArray::from_slice(&[1, 2, 3, 4, 5, 6]);
        let drained: Vec<i32> = arr.drain(1..4).collect();
        assert_eq!(drained, [2, 3, 4]);
        assert_eq!(arr.as_slice(), &[1, 5, 6]);
    }

    #[test]
    fn drain_erases_first_three() {
        // erase(begin, begin+3) from the 1..=10 sequence with the 6th
        // element already removed.
        let mut arr = DynArray::new();
        for i in 1..=10 {
            arr.push(i);
        }
        arr.remove(5);
        arr.drain(0..3);
        assert_eq!(arr.as_slice(), &[4, 5, 7, 8, 9, 10]);
    }

    #[test]
    fn unconsumed_elements_are_dropped() {
        let tally = DropTally::new();
        let mut arr = DynArray::new();
        for _ in 0..6 {
            arr.push(tally.item());
        }
        {
            let mut d = arr.drain(1..5);
            d.next();
            // Four slots were drained; one consumed, three dropped with d.
        }
        assert_eq!(tally.dropped(), 4);
        assert_eq!(arr.len(), 2);
        drop(arr);
        tally.assert_balanced();
    }

    #[test]
    fn drain_full_range_empties() {
        let mut arr = DynArray::from_slice(&[1, 2, 3]);
        let cap = arr.capacity();
        arr.drain(..);
        assert!(arr.is_empty());
        assert_eq!(arr.capacity(), cap);
    }

    #[test]
    fn drain_back_to_front() {
        let mut arr = DynArray::from_slice(&[1, 2, 3, 4]);
        let drained: Vec<i32> = arr.drain(1..).rev().collect();
        assert_eq!(drained, [4, 3, 2]);
        assert_eq!(arr.as_slice(), &[1]);
    }

    #[test]
    fn drain_meets_in_the_middle() {
        let mut arr = DynArray::from_slice(&[1, 2, 3, 4, 5]);
        let mut d = arr.drain(..);
        assert_eq!(d.next(), Some(1));
        assert_eq!(d.next_back(), Some(5));
        assert_eq!(d.len(), 3);
        assert_eq!(d.next(), Some(2));
        assert_eq!(d.next_back(), Some(4));
        assert_eq!(d.next(), Some(3));
        assert_eq!(d.next(), None);
    }

    #[test]
    fn drain_empty_range_is_noop_on_contents() {
        let mut arr = DynArray::from_slice(&[1, 2, 3]);
        assert_eq!(arr.drain(1..1).count(), 0);
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn drain_invalidates_cursors() {
        let mut arr = DynArray::from_slice(&[1, 2, 3]);
        let c = arr.cursor(0);
        arr.drain(1..2);
        assert!(arr.get_at(c).is_err());
    }

    #[test]
    fn drain_of_drop_glue_elements_balances() {
        let tally = DropTally::new();
        let mut arr = DynArray::new();
        for _ in 0..10 {
            arr.push(tally.item());
        }
        arr.drain(2..8);
        assert_eq!(tally.dropped(), 6);
        assert_eq!(arr.len(), 4);
        drop(arr);
        tally.assert_balanced();
    }

    #[test]
    #[should_panic(expected = "drain range 2..5 out of bounds")]
    fn drain_out_of_bounds_panics() {
        let mut arr = DynArray::from_slice(&[1, 2, 3]);
        arr.drain(2..5);
    }
}
