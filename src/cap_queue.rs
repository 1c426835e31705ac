//! Fixed-capacity key/value priority queue with oldest-first eviction.
//!
//! `CapQueue` answers "which present key has the highest value" in O(1) and
//! supports O(log n) insertion and removal by key. When a new key arrives at
//! a full queue, the *oldest inserted* entry is evicted, not the one with the
//! lowest value.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          CapQueue<K, V> Layout                              │
//! │                                                                             │
//! │   index: KeyIndex<K>          arena: SlotArena<Entry<K, V>>                 │
//! │   ┌───────┬────────┐          ┌────────┬─────┬───────┬──────────┬─────────┐ │
//! │   │  key  │ SlotId │          │ SlotId │ key │ value │ heap_pos │prev/next│ │
//! │   ├───────┼────────┤          ├────────┼─────┼───────┼──────────┼─────────┤ │
//! │   │  "a"  │  s0    │ ───────► │ s0     │ "a" │   3   │    2     │ -  / s1 │ │
//! │   │  "b"  │  s1    │          │ s1     │ "b" │   9   │    0     │ s0 / s2 │ │
//! │   │  "c"  │  s2    │          │ s2     │ "c" │   5   │    1     │ s1 / -  │ │
//! │   └───────┴────────┘          └────────┴─────┴───────┴──────────┴─────────┘ │
//! │                                                                             │
//! │   heap: IndexedMaxHeap              order: RecencyList                      │
//! │     [s1, s2, s0]  (max = "b")        head ─► s0 ◄──► s1 ◄──► s2 ◄── tail    │
//! │                                     oldest                   newest         │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Insert Flow
//! ───────────
//!
//! ```text
//!   insert(key, value):
//!     key present       → overwrite value, heap.fix(pos), move to newest
//!     len < capacity    → new slot, heap.push, append newest, index
//!     len == capacity   → take oldest slot, unindex old key, overwrite
//!                         key/value in place, heap.fix(pos), index new key,
//!                         append newest
//! ```
//!
//! Reusing the evicted slot keeps the heap restructuring to a single `fix`
//! instead of a `remove_at` followed by a `push`.
//!
//! ## Operations
//!
//! | Operation   | Time      | Notes                                        |
//! |-------------|-----------|----------------------------------------------|
//! | `insert`    | O(log n)  | May evict the oldest entry                   |
//! | `delete`    | O(log n)  | `false` if the key is absent                 |
//! | `value`     | O(1)      | Zero value if the key is absent              |
//! | `max`       | O(1)      | `EmptyQueue` on an empty queue               |
//! | `oldest`    | O(1)      | Next eviction victim, `EmptyQueue` if empty  |
//! | `len`       | O(1)      |                                              |
//! | `capacity`  | O(1)      | Fixed at construction                        |
//!
//! ## Example Usage
//!
//! ```
//! use capqueue::CapQueue;
//!
//! let mut queue: CapQueue<String, i64> = CapQueue::new(2);
//! queue.insert("low".to_string(), 1);
//! queue.insert("high".to_string(), 10);
//!
//! // Full: "low" is the oldest, so it goes even though "high" ranks above it.
//! let evicted = queue.insert("mid".to_string(), 5);
//! assert_eq!(evicted, Some(("low".to_string(), 1)));
//!
//! assert_eq!(queue.max().unwrap(), (&"high".to_string(), 10));
//! assert_eq!(queue.oldest().unwrap(), (&"high".to_string(), 10));
//! assert_eq!(queue.value("low"), 0);
//! ```
//!
//! ## Thread Safety
//!
//! `CapQueue` is not thread-safe. Wrap it in external synchronization if it
//! must be shared.
//!
//! ## Implementation Notes
//!
//! - Ties between equal values are resolved by heap swap order and are not
//!   stable.
//! - `check_invariants()` walks all three views and reports the first
//!   inconsistency as an [`InvariantError`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::ds::indexed_heap::{HeapEntry, IndexedMaxHeap};
use crate::ds::key_index::KeyIndex;
use crate::ds::recency_list::{ListLinks, RecencyList};
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CapQueueError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CapQueueMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CapQueueMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CapQueueMetricsReadRecorder, CapQueueMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};

/// One stored key/value pair, shared by the heap, the recency list and the
/// key index through its [`SlotId`].
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    heap_pos: usize,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl<K, V> Entry<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            heap_pos: 0,
            prev: None,
            next: None,
        }
    }
}

impl<K, V: Ord> HeapEntry for Entry<K, V> {
    type Priority = V;

    #[inline]
    fn priority(&self) -> &V {
        &self.value
    }

    #[inline]
    fn heap_position(&self) -> usize {
        self.heap_pos
    }

    #[inline]
    fn set_heap_position(&mut self, pos: usize) {
        self.heap_pos = pos;
    }
}

impl<K, V> ListLinks for Entry<K, V> {
    #[inline]
    fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    #[inline]
    fn next(&self) -> Option<SlotId> {
        self.next
    }

    #[inline]
    fn set_prev(&mut self, prev: Option<SlotId>) {
        self.prev = prev;
    }

    #[inline]
    fn set_next(&mut self, next: Option<SlotId>) {
        self.next = next;
    }
}

/// Bounded priority queue keyed by `K`, ordered by `V`, evicting the oldest
/// entry on overflow.
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Totally ordered scalar; `V::default()` is the "zero value" returned
///   for absent keys
///
/// # Example
///
/// ```
/// use capqueue::CapQueue;
///
/// let mut queue = CapQueue::new(10);
/// for i in 1..=11 {
///     queue.insert(i.to_string(), i);
/// }
///
/// assert_eq!(queue.len(), 10);
/// assert_eq!(queue.max().unwrap(), (&"11".to_string(), 11));
/// assert_eq!(queue.value("1"), 0);
/// assert_eq!(queue.oldest().unwrap(), (&"2".to_string(), 2));
/// ```
pub struct CapQueue<K, V> {
    arena: SlotArena<Entry<K, V>>,
    heap: IndexedMaxHeap,
    order: RecencyList,
    index: KeyIndex<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CapQueueMetrics,
}

impl<K, V> CapQueue<K, V>
where
    K: Clone + Eq + Hash,
    V: Ord + Copy + Default,
{
    /// Creates an empty queue holding at most `capacity` entries.
    ///
    /// All storage is allocated up front. A zero-capacity queue is allowed
    /// and silently drops every insert; use [`try_new`](Self::try_new) to
    /// reject it instead.
    ///
    /// # Example
    ///
    /// ```
    /// use capqueue::CapQueue;
    ///
    /// let queue: CapQueue<String, i64> = CapQueue::new(10);
    /// assert_eq!(queue.len(), 0);
    /// assert_eq!(queue.capacity(), 10);
    /// ```
    pub fn new(capacity: usize) -> Self {
        log::debug!("capqueue: new queue with capacity {capacity}");
        Self {
            arena: SlotArena::with_capacity(capacity),
            heap: IndexedMaxHeap::with_capacity(capacity),
            order: RecencyList::new(),
            index: KeyIndex::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CapQueueMetrics::default(),
        }
    }

    /// Creates a queue, rejecting a zero capacity.
    ///
    /// # Example
    ///
    /// ```
    /// use capqueue::CapQueue;
    ///
    /// assert!(CapQueue::<String, i64>::try_new(4).is_ok());
    /// assert!(CapQueue::<String, i64>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self::new(capacity))
    }

    /// Inserts or updates `key` with `value`.
    ///
    /// - If `key` is present, its value is replaced and it becomes the newest
    ///   entry.
    /// - If `key` is new and there is room, a new entry is added.
    /// - If `key` is new and the queue is full, the oldest entry is evicted
    ///   and returned, and its storage is reused for the new pair.
    ///
    /// # Example
    ///
    /// ```
    /// use capqueue::CapQueue;
    ///
    /// let mut queue = CapQueue::new(2);
    /// assert_eq!(queue.insert("a", 1), None);
    /// assert_eq!(queue.insert("b", 2), None);
    ///
    /// // Re-inserting "a" refreshes it, so "b" is now the oldest.
    /// assert_eq!(queue.insert("a", 7), None);
    /// assert_eq!(queue.insert("c", 3), Some(("b", 2)));
    /// assert_eq!(queue.value(&"a"), 7);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.index.get(&key) {
            let entry = &mut self.arena[id];
            entry.value = value;
            let pos = entry.heap_pos;
            self.heap.fix(&mut self.arena, pos);
            self.order.move_to_newest(&mut self.arena, id);

            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return None;
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.len() >= self.capacity {
            return self.reuse_oldest_slot(key, value);
        }

        let id = self.arena.insert(Entry::new(key.clone(), value));
        if let Err(err) = self.heap.push(&mut self.arena, id) {
            // Unreachable while len() < capacity; keep the views aligned anyway.
            self.arena.remove(id);
            log::error!("capqueue: dropping insert: {err}");
            return None;
        }
        self.order.append_newest(&mut self.arena, id);
        self.index.insert(key, id);
        None
    }

    /// Evicts the oldest entry by overwriting its slot with `key`/`value`.
    fn reuse_oldest_slot(&mut self, key: K, value: V) -> Option<(K, V)> {
        let id = self.order.oldest().ok()?;
        self.order.remove(&mut self.arena, id);

        let entry = &mut self.arena[id];
        let old_key = std::mem::replace(&mut entry.key, key.clone());
        let old_value = std::mem::replace(&mut entry.value, value);
        let pos = entry.heap_pos;

        self.index.remove(&old_key);
        self.heap.fix(&mut self.arena, pos);
        self.index.insert(key, id);
        self.order.append_newest(&mut self.arena, id);

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        log::trace!("capqueue: evicted oldest entry from slot {}", id.index());

        Some((old_key, old_value))
    }

    /// Removes `key`; returns `false` if it was not present.
    ///
    /// # Example
    ///
    /// ```
    /// use capqueue::CapQueue;
    ///
    /// let mut queue = CapQueue::new(4);
    /// queue.insert("a".to_string(), 1);
    ///
    /// assert!(queue.delete("a"));
    /// assert!(!queue.delete("a"));
    /// assert!(queue.is_empty());
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_delete_call();

        let Some(id) = self.index.remove(key) else {
            return false;
        };
        self.order.remove(&mut self.arena, id);
        let pos = self.arena[id].heap_pos;
        self.heap.remove_at(&mut self.arena, pos);
        self.arena.remove(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_delete_found();
        log::trace!("capqueue: deleted slot {}", id.index());
        true
    }

    /// Returns the value stored for `key`, or `V::default()` if absent.
    pub fn value<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_value_call();

        match self.index.get(key) {
            Some(id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_value_hit();
                self.arena[id].value
            },
            None => V::default(),
        }
    }

    /// Returns the entry with the highest value.
    ///
    /// Fails with [`CapQueueError::EmptyQueue`] when the queue is empty.
    pub fn max(&self) -> Result<(&K, V), CapQueueError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_max_call();

        let id = self.heap.peek_max().map_err(|_| {
            #[cfg(feature = "metrics")]
            self.metrics.record_max_empty();
            CapQueueError::EmptyQueue
        })?;
        let entry = &self.arena[id];
        Ok((&entry.key, entry.value))
    }

    /// Returns the oldest entry, i.e. the one the next overflowing insert
    /// would evict. This is not the entry with the lowest value.
    ///
    /// Fails with [`CapQueueError::EmptyQueue`] when the queue is empty.
    pub fn oldest(&self) -> Result<(&K, V), CapQueueError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_oldest_call();

        let id = self.order.oldest().map_err(|_| {
            #[cfg(feature = "metrics")]
            self.metrics.record_oldest_empty();
            CapQueueError::EmptyQueue
        })?;
        let entry = &self.arena[id];
        Ok((&entry.key, entry.value))
    }

    /// Returns `true` if `key` is present.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Returns the number of entries. Never exceeds [`capacity`](Self::capacity).
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the capacity fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry; the capacity is kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.heap.clear();
        self.order.clear();
        self.index.clear();

        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
        log::debug!("capqueue: cleared");
    }

    /// Iterates `(key, value)` pairs from oldest to newest, i.e. in eviction
    /// order.
    ///
    /// # Example
    ///
    /// ```
    /// use capqueue::CapQueue;
    ///
    /// let mut queue = CapQueue::new(3);
    /// queue.insert("a", 3);
    /// queue.insert("b", 1);
    /// queue.insert("a", 2);
    ///
    /// let order: Vec<_> = queue.iter().collect();
    /// assert_eq!(order, vec![(&"b", 1), (&"a", 2)]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (&K, V)> + '_ {
        self.order.iter(&self.arena).map(move |id| {
            let entry = &self.arena[id];
            (&entry.key, entry.value)
        })
    }

    /// Verifies that the arena, heap, recency list and key index agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.arena.len();
        if len > self.capacity {
            return Err(InvariantError::new(format!(
                "{len} entries exceed capacity {}",
                self.capacity
            )));
        }
        if self.heap.len() != len || self.order.len() != len || self.index.len() != len {
            return Err(InvariantError::new(format!(
                "length mismatch: arena {len}, heap {}, list {}, index {}",
                self.heap.len(),
                self.order.len(),
                self.index.len()
            )));
        }

        self.heap.validate(&self.arena)?;
        self.order.validate(&self.arena)?;

        for (key, id) in self.index.iter() {
            let entry = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("index points at stale {id:?}")))?;
            if entry.key != *key {
                return Err(InvariantError::new(format!(
                    "index and slot {} disagree on the key",
                    id.index()
                )));
            }
        }
        for (id, entry) in self.arena.iter() {
            if self.heap.get(entry.heap_pos) != Some(id) {
                return Err(InvariantError::new(format!(
                    "slot {} missing from heap position {}",
                    id.index(),
                    entry.heap_pos
                )));
            }
        }
        Ok(())
    }

    /// Returns a snapshot of the queue's counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> CapQueueMetricsSnapshot {
        self.metrics.snapshot(self.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CapQueueMetricsSnapshot> for CapQueue<K, V>
where
    K: Clone + Eq + Hash,
    V: Ord + Copy + Default,
{
    fn snapshot(&self) -> CapQueueMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for CapQueue<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}

impl<K, V> Extend<(K, V)> for CapQueue<K, V>
where
    K: Clone + Eq + Hash,
    V: Ord + Copy + Default,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> fmt::Debug for CapQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.heap.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CAPACITY: usize = 10;

    fn filled(capacity: usize) -> CapQueue<String, i64> {
        let mut queue = CapQueue::new(capacity);
        for i in 1..=capacity as i64 {
            queue.insert(i.to_string(), i);
        }
        queue
    }

    // ==============================================
    // Construction
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn new_queue_is_empty() {
            let queue: CapQueue<String, i64> = CapQueue::new(TEST_CAPACITY);
            assert_eq!(queue.len(), 0);
            assert!(queue.is_empty());
            assert_eq!(queue.capacity(), TEST_CAPACITY);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn try_new_rejects_zero_capacity() {
            let err = CapQueue::<String, i64>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
            assert_eq!(CapQueue::<String, i64>::try_new(3).unwrap().capacity(), 3);
        }

        #[test]
        fn debug_summarises_shape() {
            let queue = filled(3);
            let dbg = format!("{:?}", queue);
            assert!(dbg.contains("capacity: 3"));
            assert!(dbg.contains("len: 3"));
        }
    }

    // ==============================================
    // Max
    // ==============================================

    mod max {
        use super::*;

        #[test]
        fn empty_queue_fails() {
            let queue: CapQueue<String, i64> = CapQueue::new(TEST_CAPACITY);
            assert_eq!(queue.max(), Err(CapQueueError::EmptyQueue));
        }

        #[test]
        fn single_entry_is_max() {
            let mut queue = CapQueue::new(TEST_CAPACITY);
            queue.insert("1".to_string(), 1);
            assert_eq!(queue.max(), Ok((&"1".to_string(), 1)));
        }

        #[test]
        fn tracks_value_updates() {
            let mut queue = filled(5);
            queue.insert("1".to_string(), 100);
            assert_eq!(queue.max(), Ok((&"1".to_string(), 100)));

            queue.insert("1".to_string(), -100);
            assert_eq!(queue.max(), Ok((&"5".to_string(), 5)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn delete_max_repeatedly_descends() {
            let mut queue = filled(TEST_CAPACITY);
            assert!(!queue.delete("not contained"));

            for expected in (1..=TEST_CAPACITY as i64).rev() {
                let (key, value) = queue.max().map(|(k, v)| (k.clone(), v)).unwrap();
                assert_eq!(value, expected);
                assert!(queue.delete(&key));
                assert_eq!(queue.len(), (expected - 1) as usize);
                queue.check_invariants().unwrap();
            }
            assert_eq!(queue.max(), Err(CapQueueError::EmptyQueue));
        }
    }

    // ==============================================
    // Insert and Eviction
    // ==============================================

    mod insert {
        use super::*;

        #[test]
        fn overflow_evicts_oldest_not_lowest() {
            let mut queue = filled(TEST_CAPACITY);
            let evicted = queue.insert("11".to_string(), 11);

            assert_eq!(evicted, Some(("1".to_string(), 1)));
            assert_eq!(queue.len(), TEST_CAPACITY);
            assert_eq!(queue.max(), Ok((&"11".to_string(), 11)));
            assert_eq!(queue.value("1"), 0);
            assert_eq!(queue.oldest(), Ok((&"2".to_string(), 2)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn overflow_evicts_high_value_when_oldest() {
            let mut queue = CapQueue::new(3);
            queue.insert("big", 1000);
            queue.insert("b", 1);
            queue.insert("c", 2);

            assert_eq!(queue.insert("d", 3), Some(("big", 1000)));
            assert_eq!(queue.max(), Ok((&"d", 3)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn reinsert_updates_value_and_recency() {
            let mut queue = filled(3);
            assert_eq!(queue.insert("1".to_string(), 42), None);
            assert_eq!(queue.value("1"), 42);
            assert_eq!(queue.len(), 3);
            assert_eq!(queue.oldest(), Ok((&"2".to_string(), 2)));

            assert_eq!(queue.insert("4".to_string(), 4), Some(("2".to_string(), 2)));
            assert_eq!(queue.insert("5".to_string(), 5), Some(("3".to_string(), 3)));
            assert_eq!(queue.oldest(), Ok((&"1".to_string(), 42)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn evicted_slot_is_reused() {
            let mut queue = filled(4);
            queue.insert("5".to_string(), 5);
            queue.insert("6".to_string(), 6);
            assert_eq!(queue.arena.slot_count(), 4);
            queue.check_invariants().unwrap();
        }

        #[test]
        fn zero_capacity_drops_inserts() {
            let mut queue = CapQueue::new(0);
            assert_eq!(queue.insert("a", 1), None);
            assert_eq!(queue.len(), 0);
            assert!(!queue.contains(&"a"));
            assert_eq!(queue.max(), Err(CapQueueError::EmptyQueue));
            assert_eq!(queue.oldest(), Err(CapQueueError::EmptyQueue));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn single_capacity_always_holds_latest() {
            let mut queue = CapQueue::new(1);
            queue.insert("a", 5);
            assert_eq!(queue.insert("b", 1), Some(("a", 5)));
            assert_eq!(queue.max(), Ok((&"b", 1)));
            assert_eq!(queue.oldest(), Ok((&"b", 1)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn insert_after_delete_fills_freed_slot() {
            let mut queue = filled(3);
            assert!(queue.delete("2"));
            assert_eq!(queue.insert("4".to_string(), 4), None);
            assert_eq!(queue.len(), 3);
            assert_eq!(queue.arena.slot_count(), 3);
            assert_eq!(queue.oldest(), Ok((&"1".to_string(), 1)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn extend_feeds_insert() {
            let mut queue = CapQueue::new(2);
            queue.extend([("a", 1), ("b", 2), ("c", 3)]);
            assert_eq!(queue.len(), 2);
            assert!(!queue.contains(&"a"));
            assert_eq!(queue.max(), Ok((&"c", 3)));
        }
    }

    // ==============================================
    // Delete / Value / Oldest
    // ==============================================

    mod lookup {
        use super::*;

        #[test]
        fn value_of_present_and_absent_keys() {
            let queue = filled(TEST_CAPACITY);
            assert_eq!(queue.value("not contained"), 0);
            for i in 1..=TEST_CAPACITY as i64 {
                assert_eq!(queue.value(i.to_string().as_str()), i);
            }
        }

        #[test]
        fn delete_absent_key_changes_nothing() {
            let mut queue = filled(4);
            let before_max = queue.max().map(|(k, v)| (k.clone(), v));
            let before_oldest = queue.oldest().map(|(k, v)| (k.clone(), v));

            assert!(!queue.delete("missing"));
            assert_eq!(queue.len(), 4);
            assert_eq!(queue.max().map(|(k, v)| (k.clone(), v)), before_max);
            assert_eq!(queue.oldest().map(|(k, v)| (k.clone(), v)), before_oldest);
        }

        #[test]
        fn delete_oldest_advances_oldest() {
            let mut queue = filled(3);
            assert!(queue.delete("1"));
            assert_eq!(queue.oldest(), Ok((&"2".to_string(), 2)));
            assert!(queue.delete("3"));
            assert_eq!(queue.oldest(), Ok((&"2".to_string(), 2)));
            assert_eq!(queue.max(), Ok((&"2".to_string(), 2)));
            queue.check_invariants().unwrap();
        }

        #[test]
        fn oldest_ignores_value() {
            let mut queue = CapQueue::new(3);
            queue.insert("first", 100);
            queue.insert("second", -5);
            assert_eq!(queue.oldest(), Ok((&"first", 100)));
        }

        #[test]
        fn iter_follows_eviction_order() {
            let mut queue = filled(3);
            queue.insert("2".to_string(), 20);
            let keys: Vec<_> = queue.iter().map(|(k, v)| (k.as_str(), v)).collect();
            assert_eq!(keys, vec![("1", 1), ("3", 3), ("2", 20)]);
        }

        #[test]
        fn clear_resets_but_keeps_capacity() {
            let mut queue = filled(5);
            queue.clear();
            assert!(queue.is_empty());
            assert_eq!(queue.capacity(), 5);
            assert_eq!(queue.value("1"), 0);
            queue.check_invariants().unwrap();

            queue.insert("x".to_string(), 1);
            assert_eq!(queue.oldest(), Ok((&"x".to_string(), 1)));
            queue.check_invariants().unwrap();
        }
    }

    // ==============================================
    // Invariant Checking
    // ==============================================

    mod invariants {
        use super::*;

        #[test]
        fn detects_corrupted_heap_position() {
            let mut queue = filled(4);
            let id = queue.index.get("2").unwrap();
            queue.arena[id].heap_pos = 3 - queue.arena[id].heap_pos;
            assert!(queue.check_invariants().is_err());
        }

        #[test]
        fn detects_index_mismatch() {
            let mut queue = filled(2);
            queue.index.remove("1");
            let err = queue.check_invariants().unwrap_err();
            assert!(err.message().contains("length mismatch"));
        }
    }

    // ==============================================
    // Metrics
    // ==============================================

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn counters_track_operations() {
            let mut queue = filled(2);
            queue.insert("1".to_string(), 5);
            queue.insert("3".to_string(), 3);
            queue.delete("missing");
            queue.delete("3");
            let _ = queue.value("1");
            let _ = queue.max();
            let _ = queue.oldest();

            let snap = queue.metrics_snapshot();
            assert_eq!(snap.insert_calls, 4);
            assert_eq!(snap.insert_new, 3);
            assert_eq!(snap.insert_updates, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.delete_calls, 2);
            assert_eq!(snap.delete_found, 1);
            assert_eq!(snap.value_calls, 1);
            assert_eq!(snap.value_hits, 1);
            assert_eq!(snap.max_calls, 1);
            assert_eq!(snap.oldest_calls, 1);
            assert_eq!(snap.len, 1);
            assert_eq!(snap.capacity, 2);

            queue.reset_metrics();
            assert_eq!(queue.snapshot().insert_calls, 0);
        }

        #[test]
        fn empty_queries_are_counted() {
            let queue: CapQueue<String, i64> = CapQueue::new(1);
            let _ = queue.max();
            let _ = queue.oldest();
            let snap = queue.metrics_snapshot();
            assert_eq!(snap.max_empty, 1);
            assert_eq!(snap.oldest_empty, 1);
        }
    }
}
