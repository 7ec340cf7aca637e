//! snapvec - A thread-safe, copy-on-write vector with frozen snapshot reads.
//!
//! Built for collections that are read far more often than they are
//! written, like subscriber lists and routing tables. Writers
//! mutate the buffer in place while they own it exclusively and pay for one
//! full copy the moment a reader holds it; readers grab a frozen view in
//! O(1) and scan without holding any lock.
//!
//! # Quick Start
//!
//! ```
//! use snapvec::SnapVec;
//!
//! let numbers = SnapVec::new();
//! numbers.push_back(1);
//! numbers.push_back(2);
//!
//! // Iteration walks the buffer captured when it started; concurrent
//! // writes (even from the loop body itself) land in a replacement.
//! for n in &numbers {
//!     numbers.push_front(n * 10);
//! }
//!
//! assert_eq!(numbers.snapshot().as_slice(), &[20, 10, 1, 2]);
//! ```

mod buffer;
mod iter;
mod snap_vec;
mod snapshot;

#[cfg(feature = "serde")]
mod serde;

pub use iter::Iter;
pub use snap_vec::{DirectAccess, SnapVec};
pub use snapshot::Snapshot;
