//! Intrusive doubly linked recency list over a shared `SlotArena`.
//!
//! Unlike a list that owns its nodes, the `prev`/`next` links live inside the
//! arena entries themselves (see [`ListLinks`]), so the same entry can also be
//! referenced by a heap and a key index. The list only tracks head, tail and
//! length.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<T: ListLinks>)
//!   ┌────────┬──────────────────────────────────┐
//!   │ SlotId │ links                            │
//!   ├────────┼──────────────────────────────────┤
//!   │ id_1   │ { prev: None,     next: id_2 }   │
//!   │ id_2   │ { prev: id_1,     next: id_3 }   │
//!   │ id_3   │ { prev: id_2,     next: None }   │
//!   └────────┴──────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!          oldest                    newest
//! ```
//!
//! ## Performance
//! - `append_newest` / `remove` / `move_to_newest`: O(1)
//! - `oldest` / `newest`: O(1)
//! - `iter`: O(n)
use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{CapQueueError, InvariantError};

/// Link fields stored inside an arena entry.
pub trait ListLinks {
    fn prev(&self) -> Option<SlotId>;
    fn next(&self) -> Option<SlotId>;
    fn set_prev(&mut self, prev: Option<SlotId>);
    fn set_next(&mut self, next: Option<SlotId>);
}

/// Insertion-ordered list of arena handles, oldest at the head.
#[derive(Debug, Default)]
pub struct RecencyList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl RecencyList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is linked.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the oldest handle (next eviction victim).
    pub fn oldest(&self) -> Result<SlotId, CapQueueError> {
        self.head.ok_or(CapQueueError::EmptyList)
    }

    /// Returns the most recently appended handle, if any.
    pub fn newest(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links `id` at the tail. `id` must not already be linked.
    pub fn append_newest<T: ListLinks>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        let old_tail = self.tail;
        {
            let entry = &mut arena[id];
            entry.set_prev(old_tail);
            entry.set_next(None);
        }
        match old_tail {
            Some(tail) => arena[tail].set_next(Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Unlinks `id`; returns `false` if `id` is not a live arena slot.
    pub fn remove<T: ListLinks>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let (prev, next) = match arena.get(id) {
            Some(entry) => (entry.prev(), entry.next()),
            None => return false,
        };

        match prev {
            Some(prev_id) => arena[prev_id].set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next_id) => arena[next_id].set_prev(prev),
            None => self.tail = prev,
        }

        let entry = &mut arena[id];
        entry.set_prev(None);
        entry.set_next(None);
        self.len -= 1;
        true
    }

    /// Moves a linked `id` to the tail.
    pub fn move_to_newest<T: ListLinks>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return arena.contains(id);
        }
        if !self.remove(arena, id) {
            return false;
        }
        self.append_newest(arena, id);
        true
    }

    /// Forgets every link. The arena entries are left as they are.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates handles from oldest to newest.
    pub fn iter<'a, T: ListLinks>(&self, arena: &'a SlotArena<T>) -> RecencyIter<'a, T> {
        RecencyIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the list and checks link symmetry, tail and length.
    pub fn validate<T: ListLinks>(&self, arena: &SlotArena<T>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(format!(
                    "recency list: head {:?}, tail {:?}, len {}",
                    self.head, self.tail, self.len
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(format!(
                    "recency list: more than {} nodes reachable",
                    self.len
                )));
            }
            let entry = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("recency list: stale {id:?}")))?;
            if entry.prev() != prev {
                return Err(InvariantError::new(format!(
                    "recency list: {id:?} prev link inconsistent"
                )));
            }
            if entry.next().is_none() && self.tail != Some(id) {
                return Err(InvariantError::new(format!(
                    "recency list: {id:?} ends the chain but tail is {:?}",
                    self.tail
                )));
            }
            prev = Some(id);
            current = entry.next();
        }

        if count != self.len {
            return Err(InvariantError::new(format!(
                "recency list: counted {count} but len = {}",
                self.len
            )));
        }
        Ok(())
    }
}

/// Iterator over handles from oldest to newest.
pub struct RecencyIter<'a, T> {
    arena: &'a SlotArena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T: ListLinks> Iterator for RecencyIter<'a, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.arena.get(id)?;
        self.current = entry.next();
        self.remaining = self.remaining.saturating_sub(1);
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
