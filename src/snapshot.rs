//! Immutable point-in-time views of a [`SnapVec`](crate::SnapVec).
//!
//! A snapshot captures the container's buffer handle at one instant and
//! keeps it alive independently of the container. Later mutations install
//! replacement buffers and never touch a buffer a snapshot holds, so the
//! view stays frozen for as long as the snapshot lives. Acquisition is O(1)
//! (one lock round trip and one reference-count bump) regardless of length.

use std::fmt;
use std::ops::{Deref, Index};
use std::slice;
use std::sync::Arc;

use crate::buffer::{Buffer, slot_slice};

/// A frozen, shareable view of the container at the moment it was taken.
///
/// Dereferences to `[T]`, so the full slice API is available on top of the
/// inherent accessors. Cloning a snapshot is O(1) and yields a second handle
/// to the same buffer.
pub struct Snapshot<T> {
    buffer: Option<Buffer<T>>,
}

impl<T> Snapshot<T> {
    pub(crate) fn new(buffer: Option<Buffer<T>>) -> Snapshot<T> {
        Snapshot { buffer }
    }

    /// Number of elements the snapshot captured.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the snapshot captured no elements.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// The element at `index`, or `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// The first captured element, or `None` when empty.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The last captured element, or `None` when empty.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The captured elements as a contiguous slice.
    pub fn as_slice(&self) -> &[T] {
        slot_slice(&self.buffer)
    }

    /// Borrowing iterator over the captured elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// True if `self` and `other` hold the very same buffer.
    ///
    /// Two snapshots of an empty container compare equal here even though
    /// no buffer exists in that state. Useful for checking whether a
    /// mutation between two snapshots actually replaced the buffer.
    pub fn ptr_eq(&self, other: &Snapshot<T>) -> bool {
        match (&self.buffer, &other.buffer) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Snapshot<T> {
        Snapshot { buffer: self.buffer.clone() }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Snapshot<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, I: slice::SliceIndex<[T]>> Index<I> for Snapshot<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &I::Output {
        &self.as_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Snapshot<T>) -> bool {
        self.ptr_eq(other) || self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for Snapshot<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for Snapshot<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}
