//! Iteration and collection traits.
//!
//! Borrowed iteration (forward and reverse) comes from `Deref<Target = [T]>`
//! — [`slice::iter`], [`slice::iter_mut`], and `rev()` on either. This
//! module adds by-value iteration ([`IntoIter`]) plus the collection traits
//! ([`FromIterator`], [`Extend`], conversions from slices and arrays).

#![allow(unsafe_code)]

use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use crate::array::DynArray;
use crate::raw::RawBuf;

/// A by-value iterator over a [`DynArray`], created by
/// [`IntoIterator::into_iter`]. Unconsumed elements are dropped with the
/// iterator; the allocation is released when it goes.
pub struct IntoIter<T> {
    /// The array's buffer, taken over wholesale.
    buf: RawBuf<T>,
    /// Next slot to yield from the front.
    start: usize,
    /// One past the last slot to yield.
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slot `start` is live and will not be read again.
        let value = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` is live and will not be read again.
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: slots [start, end) hold the unconsumed elements; RawBuf's
        // Drop then releases the allocation.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.ptr().add(self.start),
                self.end - self.start,
            ));
        }
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        // Dismantle without running DynArray's Drop; the buffer and element
        // ownership transfer to the iterator.
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the buffer is moved out
        // exactly once.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter {
            buf,
            start: 0,
            end: this.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut arr = DynArray::with_capacity(iter.size_hint().0);
        for value in iter {
            arr.push(value);
        }
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(self.len + iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdall_test_utils::DropTally;

    #[test]
    fn borrowed_iteration_forward_and_reverse() {
        let arr = DynArray::from_slice(&[1, 2, 3, 4, 5]);
        let forward: Vec<i32> = arr.iter().copied().collect();
        assert_eq!(forward, [1, 2, 3, 4, 5]);
        let reverse: Vec<i32> = arr.iter().rev().copied().collect();
        assert_eq!(reverse, [5, 4, 3, 2, 1]);
        // Restartable: iterating again sees the same sequence.
        assert_eq!(arr.iter().count(), 5);
    }

    #[test]
    fn mutable_iteration_writes_through() {
        let mut arr = DynArray::from_slice(&[1, 2, 3]);
        for v in &mut arr {
            *v *= 10;
        }
        assert_eq!(arr.as_slice(), &[10, 20, 30]);
    }

    #[test]
    fn into_iter_yields_owned_in_order() {
        let arr = DynArray::from_slice(&[1, 2, 3]);
        let collected: Vec<i32> = arr.into_iter().collect();
        assert_eq!(collected, [1, 2, 3]);
    }

    #[test]
    fn into_iter_double_ended() {
        let arr = DynArray::from_slice(&[1, 2, 3, 4]);
        let mut it = arr.into_iter();
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        let tally = DropTally::new();
        let mut arr = DynArray::new();
        for _ in 0..5 {
            arr.push(tally.item());
        }
        let mut it = arr.into_iter();
        drop(it.next());
        drop(it.next());
        assert_eq!(tally.dropped(), 2);
        drop(it);
        tally.assert_balanced();
    }

    #[test]
    fn collect_round_trip() {
        let arr: DynArray<u32> = (0..10).collect();
        assert_eq!(arr.len(), 10);
        assert_eq!(arr[9], 9);
    }

    #[test]
    fn extend_appends() {
        let mut arr = DynArray::from_slice(&[1, 2]);
        arr.extend([3, 4, 5]);
        assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_array_and_slice() {
        let a = DynArray::from([1, 2, 3]);
        let b = DynArray::from(&[1, 2, 3][..]);
        assert_eq!(a, b);
    }
}
