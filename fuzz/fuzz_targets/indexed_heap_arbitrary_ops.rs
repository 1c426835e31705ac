#![no_main]

use capqueue::ds::{HeapEntry, IndexedMaxHeap, SlotArena, SlotId};
use libfuzzer_sys::fuzz_target;

struct Item {
    priority: i32,
    pos: usize,
}

impl HeapEntry for Item {
    type Priority = i32;

    fn priority(&self) -> &i32 {
        &self.priority
    }

    fn heap_position(&self) -> usize {
        self.pos
    }

    fn set_heap_position(&mut self, pos: usize) {
        self.pos = pos;
    }
}

// Fuzz push/fix/remove_at sequences on IndexedMaxHeap.
//
// Tests that the root always carries the largest priority and that position
// back-references stay in sync.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Item> = SlotArena::new();
    let mut heap = IndexedMaxHeap::with_capacity(64);
    let mut live: Vec<SlotId> = Vec::new();

    for chunk in data.chunks_exact(3) {
        let priority = i32::from(chunk[2] as i8);

        match chunk[0] % 4 {
            0 => {
                let id = arena.insert(Item { priority, pos: 0 });
                match heap.push(&mut arena, id) {
                    Ok(()) => live.push(id),
                    Err(_) => {
                        assert_eq!(heap.len(), heap.capacity());
                        arena.remove(id);
                    }
                }
            }
            1 => {
                if live.is_empty() {
                    continue;
                }
                let id = live[usize::from(chunk[1]) % live.len()];
                arena[id].priority = priority;
                let pos = arena[id].heap_position();
                heap.fix(&mut arena, pos);
            }
            2 => {
                if live.is_empty() {
                    assert!(heap.peek_max().is_err());
                    continue;
                }
                let idx = usize::from(chunk[1]) % live.len();
                let id = live.swap_remove(idx);
                let pos = arena[id].heap_position();
                assert_eq!(heap.remove_at(&mut arena, pos), Some(id));
                arena.remove(id);
            }
            3 => {
                if let Ok(root) = heap.peek_max() {
                    let best = live.iter().map(|&id| arena[id].priority).max();
                    assert_eq!(Some(arena[root].priority), best);
                }
            }
            _ => unreachable!(),
        }

        assert_eq!(heap.len(), live.len());
        heap.validate(&arena).expect("heap order and positions hold");
    }
});
