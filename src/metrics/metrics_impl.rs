use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::CapQueueMetricsSnapshot;
use crate::metrics::traits::{CapQueueMetricsReadRecorder, CapQueueMetricsRecorder};

#[derive(Debug, Default)]
pub struct CapQueueMetrics {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub evicted_entries: u64,
    pub delete_calls: u64,
    pub delete_found: u64,
    pub clears: u64,
    pub value_calls: MetricsCell,
    pub value_hits: MetricsCell,
    pub max_calls: MetricsCell,
    pub max_empty: MetricsCell,
    pub oldest_calls: MetricsCell,
    pub oldest_empty: MetricsCell,
}

impl CapQueueMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every counter and attaches the `len`/`capacity` gauges.
    pub fn snapshot(&self, len: usize, capacity: usize) -> CapQueueMetricsSnapshot {
        CapQueueMetricsSnapshot {
            insert_calls: self.insert_calls,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            insert_rejected: self.insert_rejected,
            evicted_entries: self.evicted_entries,
            delete_calls: self.delete_calls,
            delete_found: self.delete_found,
            value_calls: self.value_calls.get(),
            value_hits: self.value_hits.get(),
            max_calls: self.max_calls.get(),
            max_empty: self.max_empty.get(),
            oldest_calls: self.oldest_calls.get(),
            oldest_empty: self.oldest_empty.get(),
            clears: self.clears,
            len,
            capacity,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CapQueueMetricsRecorder for CapQueueMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_delete_call(&mut self) {
        self.delete_calls += 1;
    }

    fn record_delete_found(&mut self) {
        self.delete_found += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl CapQueueMetricsReadRecorder for CapQueueMetrics {
    fn record_value_call(&self) {
        self.value_calls.incr();
    }

    fn record_value_hit(&self) {
        self.value_hits.incr();
    }

    fn record_max_call(&self) {
        self.max_calls.incr();
    }

    fn record_max_empty(&self) {
        self.max_empty.incr();
    }

    fn record_oldest_call(&self) {
        self.oldest_calls.incr();
    }

    fn record_oldest_empty(&self) {
        self.oldest_empty.incr();
    }
}
