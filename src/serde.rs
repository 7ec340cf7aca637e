//! Serde support, enabled by the `serde` feature.
//!
//! Containers and snapshots serialize as plain sequences. Serialization
//! works on a frozen buffer handle, so a container may be serialized while
//! other threads keep writing to it.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::{SnapVec, Snapshot};

impl<T: Serialize> Serialize for SnapVec<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}

impl<T: Serialize> Serialize for Snapshot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SnapVec<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<SnapVec<T>, D::Error> {
        Vec::<T>::deserialize(deserializer).map(SnapVec::from)
    }
}
