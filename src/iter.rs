//! Snapshot iterators.
//!
//! Iteration never borrows the container. [`Iter`] captures its own handle
//! to the buffer current at creation time and walks that, so the container
//! may be mutated (from the same thread or any other) mid-traversal without
//! invalidating the iterator or changing what it yields. Elements come out
//! as clones; traversal that should borrow instead goes through
//! [`Snapshot::iter`](crate::Snapshot::iter).

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::buffer::Buffer;

/// Iterator over the elements captured from a [`SnapVec`](crate::SnapVec).
///
/// Two iterators compare equal when both are exhausted, or when both sit at
/// the same position of the same buffer. A default-constructed iterator is
/// the universal end marker: it equals every exhausted iterator, which makes
/// "search missed" checks read as `it == Iter::end()`.
pub struct Iter<T> {
    buffer: Option<Buffer<T>>,
    pos: usize,
    end: usize,
}

impl<T> Iter<T> {
    pub(crate) fn new(buffer: Option<Buffer<T>>) -> Iter<T> {
        let end = buffer.as_deref().map_or(0, Vec::len);
        Iter { buffer, pos: 0, end }
    }

    /// The end marker: an iterator with nothing left to yield.
    pub fn end() -> Iter<T> {
        Iter { buffer: None, pos: 0, end: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos == self.end
    }

    fn remaining_slice(&self) -> &[T] {
        self.buffer.as_deref().map_or(&[], |buffer| &buffer[self.pos..self.end])
    }
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.at_end() {
            return None;
        }
        let item = self.buffer.as_ref()?[self.pos].clone();
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for Iter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.at_end() {
            return None;
        }
        self.end -= 1;
        self.buffer.as_ref().map(|buffer| buffer[self.end].clone())
    }
}

impl<T: Clone> ExactSizeIterator for Iter<T> {}

impl<T: Clone> FusedIterator for Iter<T> {}

/// Clones the iterator's current position; both copies advance independently
/// over the same captured buffer.
impl<T> Clone for Iter<T> {
    fn clone(&self) -> Iter<T> {
        Iter { buffer: self.buffer.clone(), pos: self.pos, end: self.end }
    }
}

impl<T> Default for Iter<T> {
    fn default() -> Iter<T> {
        Iter::end()
    }
}

impl<T> PartialEq for Iter<T> {
    fn eq(&self, other: &Iter<T>) -> bool {
        match (self.at_end(), other.at_end()) {
            (true, true) => true,
            (false, false) => match (&self.buffer, &other.buffer) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b) && self.pos == other.pos,
                _ => false,
            },
            _ => false,
        }
    }
}

impl<T> Eq for Iter<T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.remaining_slice()).finish()
    }
}
