use std::cell::Cell;

/// A metrics-only counter cell.
///
/// Lets `&self` query methods (`value`, `max`, `oldest`) bump counters. The
/// queue is single-threaded, so the cell is neither `Sync` nor shared.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}
