#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CapQueueMetricsSnapshot {
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64, // inserts dropped by a zero-capacity queue
    pub evicted_entries: u64,

    pub delete_calls: u64,
    pub delete_found: u64,

    pub value_calls: u64,
    pub value_hits: u64,

    pub max_calls: u64,
    pub max_empty: u64,
    pub oldest_calls: u64,
    pub oldest_empty: u64,

    pub clears: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}
