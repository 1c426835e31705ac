//! capqueue: a fixed-capacity key/value priority queue.
//!
//! [`CapQueue`] keeps at most `capacity` entries, answers "highest value" in
//! O(1), inserts and deletes by key in O(log n), and on overflow evicts the
//! oldest inserted entry rather than the lowest-valued one.
//!
//! The building blocks live in [`ds`]: a slot arena owning the entries, an
//! indexed max-heap and an intrusive recency list that both address entries
//! by [`SlotId`], and a key index mapping keys to slots.

pub mod cap_queue;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use crate::cap_queue::CapQueue;
pub use crate::ds::{
    HeapEntry, IndexedMaxHeap, KeyIndex, ListLinks, RecencyList, SlotArena, SlotId,
};
pub use crate::error::{CapQueueError, ConfigError, InvariantError};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CapQueueMetricsSnapshot;
