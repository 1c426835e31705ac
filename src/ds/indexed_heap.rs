//! Binary max-heap over arena handles with position tracking.
//!
//! The heap stores [`SlotId`]s only. Priorities live in the arena entries, and
//! every entry records its own index in the heap's backing vector, so callers
//! holding a slot can `fix` or `remove_at` it without searching.
//!
//! ## Architecture
//!
//! ```text
//!   order: Vec<SlotId>                 arena: SlotArena<T: HeapEntry>
//!   ┌─────┬─────┬─────┬─────┐          ┌────────┬──────────┬──────────┐
//!   │ s2  │ s0  │ s3  │ s1  │          │ SlotId │ priority │ heap_pos │
//!   └─────┴─────┴─────┴─────┘          ├────────┼──────────┼──────────┤
//!      0     1     2     3             │ s0     │    7     │    1     │
//!                                      │ s1     │    2     │    3     │
//!            (s2: 9)                   │ s2     │    9     │    0     │
//!           /       \                  │ s3     │    4     │    2     │
//!       (s0: 7)   (s3: 4)              └────────┴──────────┴──────────┘
//!       /
//!   (s1: 2)
//! ```
//!
//! ## Operations
//!
//! | Operation   | Description                                  | Complexity |
//! |-------------|----------------------------------------------|------------|
//! | `push`      | Append and sift up                           | O(log n)   |
//! | `fix`       | Restore order after a priority change        | O(log n)   |
//! | `remove_at` | Swap with last, pop, fix the hole            | O(log n)   |
//! | `peek_max`  | Root handle                                  | O(1)       |
//!
//! Ties between equal priorities are resolved by swap mechanics and are not
//! stable.
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CapQueueError, InvariantError};

/// An arena entry that can sit in an [`IndexedMaxHeap`].
pub trait HeapEntry {
    type Priority: Ord;

    fn priority(&self) -> &Self::Priority;

    /// Index of this entry in the heap's backing vector.
    fn heap_position(&self) -> usize;

    fn set_heap_position(&mut self, pos: usize);
}

/// Fixed-capacity max-heap of [`SlotId`]s ordered by the entries' priorities.
#[derive(Debug)]
pub struct IndexedMaxHeap {
    order: Vec<SlotId>,
    capacity: usize,
}

impl IndexedMaxHeap {
    /// Creates an empty heap whose backing vector holds at most `capacity` handles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the handle at `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<SlotId> {
        self.order.get(pos).copied()
    }

    /// Returns the handle with the highest priority.
    pub fn peek_max(&self) -> Result<SlotId, CapQueueError> {
        self.order.first().copied().ok_or(CapQueueError::EmptyIndex)
    }

    /// Inserts `id`, failing if the heap already holds `capacity` handles.
    pub fn push<T: HeapEntry>(
        &mut self,
        arena: &mut SlotArena<T>,
        id: SlotId,
    ) -> Result<(), CapQueueError> {
        if self.order.len() >= self.capacity {
            return Err(CapQueueError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let pos = self.order.len();
        self.order.push(id);
        arena[id].set_heap_position(pos);
        self.sift_up(arena, pos);
        Ok(())
    }

    /// Re-establishes heap order after the priority at `pos` changed.
    pub fn fix<T: HeapEntry>(&mut self, arena: &mut SlotArena<T>, pos: usize) {
        if pos >= self.order.len() {
            return;
        }
        if !self.sift_down(arena, pos) {
            self.sift_up(arena, pos);
        }
    }

    /// Removes and returns the handle at `pos`.
    pub fn remove_at<T: HeapEntry>(
        &mut self,
        arena: &mut SlotArena<T>,
        pos: usize,
    ) -> Option<SlotId> {
        let last = self.order.len().checked_sub(1)?;
        if pos > last {
            return None;
        }
        if pos != last {
            self.swap(arena, pos, last);
        }
        let id = self.order.pop()?;
        if pos != last {
            self.fix(arena, pos);
        }
        Some(id)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Handles in backing-vector order.
    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.order.iter().copied()
    }

    /// Checks the max-heap property and every recorded position.
    pub fn validate<T: HeapEntry>(&self, arena: &SlotArena<T>) -> Result<(), InvariantError> {
        for (pos, &id) in self.order.iter().enumerate() {
            let entry = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("heap slot {pos}: stale {id:?}")))?;
            if entry.heap_position() != pos {
                return Err(InvariantError::new(format!(
                    "heap slot {pos}: entry records position {}",
                    entry.heap_position()
                )));
            }
            if pos > 0 {
                let parent = &arena[self.order[(pos - 1) / 2]];
                if parent.priority() < entry.priority() {
                    return Err(InvariantError::new(format!(
                        "heap slot {pos}: outranks its parent"
                    )));
                }
            }
        }
        Ok(())
    }

    fn outranks<T: HeapEntry>(&self, arena: &SlotArena<T>, i: usize, j: usize) -> bool {
        arena[self.order[i]].priority() > arena[self.order[j]].priority()
    }

    fn swap<T: HeapEntry>(&mut self, arena: &mut SlotArena<T>, i: usize, j: usize) {
        self.order.swap(i, j);
        arena[self.order[i]].set_heap_position(i);
        arena[self.order[j]].set_heap_position(j);
    }

    fn sift_up<T: HeapEntry>(&mut self, arena: &mut SlotArena<T>, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.outranks(arena, pos, parent) {
                break;
            }
            self.swap(arena, pos, parent);
            pos = parent;
        }
    }

    /// Returns `true` if the entry at `start` moved.
    fn sift_down<T: HeapEntry>(&mut self, arena: &mut SlotArena<T>, start: usize) -> bool {
        let len = self.order.len();
        let mut pos = start;
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.outranks(arena, right, left) {
                right
            } else {
                left
            };
            if !self.outranks(arena, child, pos) {
                break;
            }
            self.swap(arena, pos, child);
            pos = child;
        }
        pos > start
    }
}
