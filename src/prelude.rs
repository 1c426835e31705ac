pub use crate::ds::{IndexedMaxHeap, KeyIndex, RecencyList, SlotArena, SlotId};

pub use crate::cap_queue::CapQueue;
pub use crate::error::{CapQueueError, ConfigError, InvariantError};

#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider};
