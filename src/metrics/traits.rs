//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so that
//! queue logic only ever writes counters.
//!
//! ```text
//!   ┌──────────────────────────────┐   ┌──────────────────────────────────┐
//!   │ CapQueueMetricsRecorder      │   │ CapQueueMetricsReadRecorder      │
//!   │ (&mut self: insert/delete/   │   │ (&self: value/max/oldest)        │
//!   │  evict/clear)                │   │                                  │
//!   └──────────────┬───────────────┘   └────────────────┬─────────────────┘
//!                  └───────────────┬────────────────────┘
//!                                  ▼
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by mutating queue operations.
pub trait CapQueueMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_insert_rejected(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_delete_call(&mut self);
    fn record_delete_found(&mut self);
    fn record_clear(&mut self);
}

/// Counters written by `&self` queries (uses interior mutability).
pub trait CapQueueMetricsReadRecorder {
    fn record_value_call(&self);
    fn record_value_hit(&self);
    fn record_max_call(&self);
    fn record_max_empty(&self);
    fn record_oldest_call(&self);
    fn record_oldest_empty(&self);
}

/// Produce a point-in-time snapshot of counters and gauges.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
