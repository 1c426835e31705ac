#![no_main]

use capqueue::{CapQueue, CapQueueError};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary insert/delete/query sequences on CapQueue.
//
// The first byte picks the capacity; every following 3-byte group is one op.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(cap_byte % 16);
    let mut queue: CapQueue<u8, i16> = CapQueue::new(capacity);

    for chunk in ops.chunks_exact(3) {
        let key = chunk[1] % 32;
        let value = i16::from(chunk[2] as i8);

        match chunk[0] % 6 {
            0 | 1 => {
                let was_present = queue.contains(&key);
                let old_len = queue.len();
                let evicted = queue.insert(key, value);

                if capacity == 0 {
                    assert!(queue.is_empty());
                    continue;
                }
                assert_eq!(queue.value(&key), value);
                if was_present {
                    assert!(evicted.is_none());
                    assert_eq!(queue.len(), old_len);
                } else if old_len == capacity {
                    let (victim, _) = evicted.expect("full queue must evict");
                    assert!(!queue.contains(&victim));
                    assert_eq!(queue.len(), capacity);
                } else {
                    assert_eq!(queue.len(), old_len + 1);
                }
            }
            2 => {
                let was_present = queue.contains(&key);
                let old_len = queue.len();
                assert_eq!(queue.delete(&key), was_present);
                assert!(!queue.contains(&key));
                assert_eq!(queue.len(), old_len - usize::from(was_present));
            }
            3 => match queue.max() {
                Ok((_, best)) => {
                    assert!(queue.iter().all(|(_, v)| v <= best));
                }
                Err(err) => {
                    assert_eq!(err, CapQueueError::EmptyQueue);
                    assert!(queue.is_empty());
                }
            },
            4 => match queue.oldest() {
                Ok((k, v)) => {
                    assert_eq!(queue.iter().next(), Some((k, v)));
                }
                Err(err) => assert_eq!(err, CapQueueError::EmptyQueue),
            },
            5 => {
                if key == 0 {
                    queue.clear();
                    assert!(queue.is_empty());
                }
            }
            _ => unreachable!(),
        }

        assert!(queue.len() <= queue.capacity());
        queue.check_invariants().expect("invariants hold after every op");
    }
});
