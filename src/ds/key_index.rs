//! Key to arena handle lookup.
//!
//! Thin wrapper over `FxHashMap<K, SlotId>`. The index never owns entries; it
//! only records which slot currently holds a key.
use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::SlotId;

/// Maps each present key to the slot holding it.
#[derive(Debug)]
pub struct KeyIndex<K> {
    map: FxHashMap<K, SlotId>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash,
{
    /// Creates an index pre-sized for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Registers `key` under `id`, returning the handle it replaced.
    pub fn insert(&mut self, key: K, id: SlotId) -> Option<SlotId> {
        self.map.insert(key, id)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, SlotId)> {
        self.map.iter().map(|(key, &id)| (key, id))
    }
}
