pub mod indexed_heap;
pub mod key_index;
pub mod recency_list;
pub mod slot_arena;

pub use indexed_heap::{HeapEntry, IndexedMaxHeap};
pub use key_index::KeyIndex;
pub use recency_list::{ListLinks, RecencyIter, RecencyList};
pub use slot_arena::{SlotArena, SlotId};
