//! A thread-safe vector that copies on write and hands out frozen reads.
//!
//! Key design decisions:
//!
//! 1. One mutex guards one nullable buffer slot, `Mutex<Option<Arc<Vec<T>>>>`.
//!    `None` is the canonical empty state; removals that empty the buffer
//!    restore it, so an emptied container is indistinguishable from a fresh
//!    one.
//! 2. Writers test uniqueness with `Arc::get_mut` under the lock. Sole
//!    holder means the edit happens in place; shared means a replacement
//!    buffer is built off to the side and swapped in only once fully
//!    formed, so a reader can never observe a half-built buffer.
//! 3. Readers take the lock just long enough to clone the buffer handle,
//!    then scan lock-free on an immutable buffer.
//! 4. Lock poisoning is recovered from, not propagated. A panicking element
//!    clone or caller predicate can poison the mutex, but every critical
//!    section leaves the slot a valid handle, so the state behind a
//!    poisoned lock is still coherent.

use std::fmt;
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::buffer::{Buffer, RESERVE_SLACK, is_shared, slot_slice};
use crate::iter::Iter;
use crate::snapshot::Snapshot;

/// A thread-safe vector that copies on write.
///
/// All methods take `&self`; a single internal mutex serializes writers and
/// makes handle acquisition atomic. Readers work on frozen buffers obtained
/// in O(1), so a long scan never blocks a writer and a writer never
/// invalidates a reader.
///
/// While the container is the sole holder of its buffer, mutations happen
/// in place with no copying. Once a [`Snapshot`] or [`Iter`] (or a clone of
/// the container) shares the buffer, the next mutation pays for one full
/// copy and the shared buffer stays exactly as its readers saw it.
///
/// ```
/// use snapvec::SnapVec;
///
/// let primes = SnapVec::new();
/// primes.push_back(2);
/// primes.push_back(3);
///
/// let before = primes.snapshot();
/// primes.push_back(5);
///
/// assert_eq!(before.as_slice(), &[2, 3]);
/// assert_eq!(primes.snapshot().as_slice(), &[2, 3, 5]);
/// ```
pub struct SnapVec<T> {
    slot: Mutex<Option<Buffer<T>>>,
}

impl<T> SnapVec<T> {
    /// An empty container. `const`, so one can live in a `static`.
    pub const fn new() -> SnapVec<T> {
        SnapVec { slot: Mutex::new(None) }
    }

    /// Inserts an element at the front.
    ///
    /// Shifts in place when the buffer is exclusively held; otherwise
    /// installs a copy with the element prepended.
    pub fn push_front(&self, value: T)
    where
        T: Clone,
    {
        let mut slot = self.lock_slot();
        let replacement = match slot.as_mut() {
            None => {
                let mut fresh = Vec::with_capacity(RESERVE_SLACK);
                fresh.push(value);
                fresh
            }
            Some(buffer) => match Arc::get_mut(buffer) {
                Some(vec) => {
                    vec.insert(0, value);
                    return;
                }
                None => {
                    let mut fresh = Vec::with_capacity(buffer.len() + 1 + RESERVE_SLACK);
                    fresh.push(value);
                    fresh.extend_from_slice(buffer);
                    fresh
                }
            },
        };
        *slot = Some(Arc::new(replacement));
    }

    /// Appends an element.
    ///
    /// Runs in place when the buffer is exclusively held; otherwise
    /// installs a copy with the element appended.
    pub fn push_back(&self, value: T)
    where
        T: Clone,
    {
        self.push_back_with(move || value);
    }

    /// Appends the value produced by `make`.
    ///
    /// `make` runs under the lock, after the insertion point exists, so the
    /// element is built directly for its final buffer rather than moved
    /// through a temporary the caller constructed up front.
    pub fn push_back_with(&self, make: impl FnOnce() -> T)
    where
        T: Clone,
    {
        let mut slot = self.lock_slot();
        let replacement = match slot.as_mut() {
            None => {
                let mut fresh = Vec::with_capacity(RESERVE_SLACK);
                fresh.push(make());
                fresh
            }
            Some(buffer) => match Arc::get_mut(buffer) {
                Some(vec) => {
                    vec.push(make());
                    return;
                }
                None => {
                    let mut fresh = Vec::with_capacity(buffer.len() + 1 + RESERVE_SLACK);
                    fresh.extend_from_slice(buffer);
                    fresh.push(make());
                    fresh
                }
            },
        };
        *slot = Some(Arc::new(replacement));
    }

    /// Removes every element matching `pred` and returns how many went.
    ///
    /// The predicate sees elements front to back, once each. A call that
    /// matches nothing leaves the current buffer untouched, even when it is
    /// shared; removing the final element resets the container to the
    /// canonical empty state.
    pub fn remove_all(&self, mut pred: impl FnMut(&T) -> bool) -> usize
    where
        T: Clone,
    {
        let mut slot = self.lock_slot();
        let Some(buffer) = slot.as_mut() else {
            return 0;
        };
        if buffer.is_empty() {
            return 0;
        }

        if let Some(vec) = Arc::get_mut(buffer) {
            let before = vec.len();
            vec.retain(|item| !pred(item));
            let removed = before - vec.len();
            if removed == before {
                *slot = None;
            }
            return removed;
        }

        // Shared: find the first casualty before allocating anything, so a
        // removal that matches nothing never replaces the buffer.
        let Some(first) = buffer.iter().position(&mut pred) else {
            return 0;
        };
        let mut survivors = Vec::with_capacity(buffer.len() - 1);
        survivors.extend_from_slice(&buffer[..first]);
        let mut removed = 1;
        for item in &buffer[first + 1..] {
            if pred(item) {
                removed += 1;
            } else {
                survivors.push(item.clone());
            }
        }
        *slot = if survivors.is_empty() { None } else { Some(Arc::new(survivors)) };
        removed
    }

    /// Removes the first element matching `pred`. Returns whether one did.
    pub fn remove_first(&self, mut pred: impl FnMut(&T) -> bool) -> bool
    where
        T: Clone,
    {
        let mut slot = self.lock_slot();
        let Some(pos) = slot_slice(&slot).iter().position(|item| pred(item)) else {
            return false;
        };
        remove_at(&mut slot, pos);
        true
    }

    /// Removes the last element matching `pred`. Returns whether one did.
    ///
    /// The predicate sees elements back to front.
    pub fn remove_last(&self, mut pred: impl FnMut(&T) -> bool) -> bool
    where
        T: Clone,
    {
        let mut slot = self.lock_slot();
        let Some(pos) = slot_slice(&slot).iter().rposition(|item| pred(item)) else {
            return false;
        };
        remove_at(&mut slot, pos);
        true
    }

    /// Drops all elements, restoring the canonical empty state.
    ///
    /// O(1) when the buffer is shared: readers keep it alive and keep
    /// seeing their frozen contents.
    pub fn clear(&self) {
        *self.lock_slot() = None;
    }

    /// Replaces this container's contents with `source`'s, sharing its
    /// buffer.
    ///
    /// The two locks are taken one after the other, never nested, so any
    /// pair of containers may assign to each other concurrently without
    /// ordering concerns. Assigning a container to itself is a no-op.
    pub fn assign(&self, source: &SnapVec<T>) {
        if ptr::eq(self, source) {
            return;
        }
        let shared = source.buffer();
        *self.lock_slot() = shared;
    }

    /// True if any element matches `pred`. Scans outside the lock.
    pub fn any(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.buffer().is_some_and(|buffer| buffer.iter().any(pred))
    }

    /// The first element matching `pred`, cloned out, or `None`.
    ///
    /// The scan runs on a frozen buffer outside the lock.
    pub fn find_first(&self, mut pred: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        self.buffer()?.iter().find(|&item| pred(item)).cloned()
    }

    /// The last element matching `pred`, cloned out, or `None`.
    pub fn find_last(&self, mut pred: impl FnMut(&T) -> bool) -> Option<T>
    where
        T: Clone,
    {
        self.buffer()?.iter().rfind(|&item| pred(item)).cloned()
    }

    /// Number of elements at this instant.
    pub fn len(&self) -> usize {
        slot_slice(&self.lock_slot()).len()
    }

    /// True if the container holds no elements at this instant.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the elements present right now.
    ///
    /// The iterator holds the buffer captured here and is immune to every
    /// later mutation; elements are yielded as clones.
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.buffer())
    }

    /// A frozen view of the elements present right now.
    ///
    /// O(1) regardless of length: one lock round trip and one
    /// reference-count bump.
    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot::new(self.buffer())
    }

    /// Locks the container and returns a guard for direct buffer access.
    ///
    /// Every other operation on this container blocks until the guard
    /// drops. The mutex is not reentrant: calling any other method on the
    /// same container from the same thread while the guard lives deadlocks.
    pub fn lock(&self) -> DirectAccess<'_, T> {
        DirectAccess { slot: self.lock_slot() }
    }

    /// Extracts the elements, reusing the buffer when nothing else holds it.
    pub fn into_vec(self) -> Vec<T>
    where
        T: Clone,
    {
        let slot = self.slot.into_inner().unwrap_or_else(PoisonError::into_inner);
        slot.map_or_else(Vec::new, Arc::unwrap_or_clone)
    }

    /// Clones the current buffer handle under the lock.
    fn buffer(&self) -> Option<Buffer<T>> {
        self.lock_slot().clone()
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Buffer<T>>> {
        // A panicking element clone or caller predicate poisons the mutex.
        // Every critical section leaves the slot a valid handle (replacement
        // buffers swap in only once fully built; in-place edits are
        // panic-safe Vec calls), so the poison flag carries no information.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shared removal primitive: drop the element at `pos`, restoring the
/// canonical empty state when it was the last one.
fn remove_at<T: Clone>(slot: &mut Option<Buffer<T>>, pos: usize) {
    let Some(buffer) = slot.as_mut() else {
        return;
    };
    if buffer.len() == 1 {
        *slot = None;
        return;
    }
    if let Some(vec) = Arc::get_mut(buffer) {
        vec.remove(pos);
        return;
    }
    let mut survivors = Vec::with_capacity(buffer.len() - 1);
    survivors.extend_from_slice(&buffer[..pos]);
    survivors.extend_from_slice(&buffer[pos + 1..]);
    *slot = Some(Arc::new(survivors));
}

/// Scoped direct access to the container's buffer.
///
/// Obtained from [`SnapVec::lock`]; holds the container's mutex for its
/// whole lifetime. This is the escape hatch for edits the method surface
/// does not cover (indexed writes, bulk rewrites); [`Self::data`] keeps
/// such edits inside the copy-on-write rules.
pub struct DirectAccess<'a, T> {
    slot: MutexGuard<'a, Option<Buffer<T>>>,
}

impl<T> DirectAccess<'_, T> {
    /// Mutable access to the elements.
    ///
    /// If a snapshot or iterator holds the current buffer, the first call
    /// detaches a private copy so their frozen views stay intact. An empty
    /// container materializes an empty buffer here.
    pub fn data(&mut self) -> &mut Vec<T>
    where
        T: Clone,
    {
        let buffer = self.slot.get_or_insert_with(|| Arc::new(Vec::new()));
        Arc::make_mut(buffer)
    }

    /// The elements as they currently stand, without detaching anything.
    pub fn as_slice(&self) -> &[T] {
        slot_slice(&self.slot)
    }

    /// True if anything else holds the current buffer, meaning the next
    /// [`Self::data`] call will copy.
    pub fn is_shared(&self) -> bool {
        self.slot.as_ref().is_some_and(is_shared)
    }

    /// Drops all elements, restoring the canonical empty state.
    pub fn clear(&mut self) {
        *self.slot = None;
    }
}

impl<T> Default for SnapVec<T> {
    fn default() -> SnapVec<T> {
        SnapVec::new()
    }
}

/// O(1): the clone shares the current buffer. Whichever side mutates first
/// pays for the copy and diverges.
impl<T> Clone for SnapVec<T> {
    fn clone(&self) -> SnapVec<T> {
        SnapVec { slot: Mutex::new(self.buffer()) }
    }
}

impl<T> From<Vec<T>> for SnapVec<T> {
    fn from(values: Vec<T>) -> SnapVec<T> {
        let slot = if values.is_empty() { None } else { Some(Arc::new(values)) };
        SnapVec { slot: Mutex::new(slot) }
    }
}

impl<T> FromIterator<T> for SnapVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> SnapVec<T> {
        SnapVec::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T: Clone> Extend<T> for SnapVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        match slot {
            Some(buffer) => Arc::make_mut(buffer).extend(iter),
            None => {
                let values: Vec<T> = iter.into_iter().collect();
                if !values.is_empty() {
                    *slot = Some(Arc::new(values));
                }
            }
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a SnapVec<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for SnapVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> std::vec::IntoIter<T> {
        self.into_vec().into_iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SnapVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buffer = self.buffer();
        f.debug_list().entries(slot_slice(&buffer)).finish()
    }
}
