//! Shared buffer plumbing for the copy-on-write protocol.
//!
//! The container stores its elements in a single reference-counted buffer,
//! `Arc<Vec<T>>`. Snapshots and iterators each hold their own handle to the
//! buffer they captured. The whole protocol rests on one
//! rule: a buffer is mutated in place only while the container's slot is the
//! sole handle to it. The moment a second handle exists, that buffer is
//! immutable for the rest of its life and every further logical mutation
//! installs a freshly allocated copy instead.
//!
//! The uniqueness test is `Arc::get_mut` (equivalently `strong_count == 1`;
//! this crate never creates `Weak` handles). Read under the container's
//! lock, the test is stable: new handles are only ever cloned from existing
//! ones, so when the count is 1 the locked slot holds the only handle and no
//! other thread can raise the count concurrently. `Arc` synchronizes count
//! decrements with `Release`/`Acquire` ordering, which is exactly what makes
//! `get_mut` sound to hand out `&mut` access.

use std::sync::Arc;

/// The reference-counted element buffer.
///
/// Allocated fresh by every copy-on-write event; never mutated in place once
/// a snapshot or iterator also holds it.
pub(crate) type Buffer<T> = Arc<Vec<T>>;

/// Extra capacity reserved beyond the immediate need when a copy-on-write
/// replacement is allocated for an insertion, so that a short burst of
/// writes against a shared buffer does not reallocate on every operation.
pub(crate) const RESERVE_SLACK: usize = 4;

/// View a buffer slot as a slice. An absent buffer is the empty sequence,
/// so callers never deal with the `None` case themselves.
pub(crate) fn slot_slice<T>(slot: &Option<Buffer<T>>) -> &[T] {
    slot.as_deref().map_or(&[], Vec::as_slice)
}

/// True if a handle other than `buffer` is alive somewhere.
///
/// Only meaningful while the caller holds the container's lock; see the
/// module docs for why the count read is reliable there.
pub(crate) fn is_shared<T>(buffer: &Buffer<T>) -> bool {
    Arc::strong_count(buffer) > 1
}
