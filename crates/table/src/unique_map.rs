//! Provides [`UniqueMap`], the per-key-position uniqueness index:
//! a hash mapping where each key value relates to at most one row.

use crate::pointer::RowPtr;
use core::hash::Hash;
// Faster than ahash for small keys, so we use this explicitly.
use foldhash::fast::RandomState;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// A unique map relating each key value to the [`RowPtr`] of the one row
/// currently holding it.
///
/// The map never overwrites: [`insert`](Self::insert) reports the occupant
/// on a collision and leaves deciding about eviction to the caller.
/// Iteration order is hash order, not insertion order; the tables expose
/// their order-following key sequences separately.
#[derive(Debug, Clone)]
pub struct UniqueMap<K> {
    map: HashMap<K, RowPtr, RandomState>,
}

impl<K> Default for UniqueMap<K> {
    fn default() -> Self {
        Self { map: <_>::default() }
    }
}

impl<K: Eq + Hash> UniqueMap<K> {
    /// Inserts the relation `key -> ptr` into this map.
    ///
    /// If `key` is already occupied, does not touch the map
    /// and returns the existing occupant instead.
    pub fn insert(&mut self, key: K, ptr: RowPtr) -> Result<(), RowPtr> {
        match self.map.entry(key) {
            Entry::Vacant(e) => {
                e.insert(ptr);
                Ok(())
            }
            Entry::Occupied(e) => Err(*e.get()),
        }
    }

    /// Deletes `key` from this map.
    ///
    /// Returns whether `key` was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Returns the row currently holding `key`, if any.
    pub fn get(&self, key: &K) -> Option<RowPtr> {
        self.map.get(key).copied()
    }

    /// Returns whether some row currently holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of keys in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns whether there are any entries in the map.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deletes all entries from the map, leaving it empty.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates the `key -> row` entries in unspecified (hash) order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, RowPtr)> + '_ {
        self.map.iter().map(|(key, ptr)| (key, *ptr))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pointer::{Generation, SlotIndex};

    fn ptr(slot: u32) -> RowPtr {
        RowPtr::new(SlotIndex(slot), Generation::FIRST)
    }

    #[test]
    fn insert_reports_the_occupant_on_collision() {
        let mut map = UniqueMap::default();
        assert_eq!(map.insert("a", ptr(0)), Ok(()));
        assert_eq!(map.insert("a", ptr(1)), Err(ptr(0)));
        // The occupant is untouched by the failed insert.
        assert_eq!(map.get(&"a"), Some(ptr(0)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn delete_reports_presence() {
        let mut map = UniqueMap::default();
        assert_eq!(map.insert("a", ptr(0)), Ok(()));
        assert!(map.delete(&"a"));
        assert!(!map.delete(&"a"));
        assert!(!map.contains(&"a"));
        assert!(map.is_empty());
    }

    #[test]
    fn clear_empties_the_map() {
        let mut map = UniqueMap::default();
        for (slot, key) in ["a", "b", "c"].into_iter().enumerate() {
            assert_eq!(map.insert(key, ptr(slot as u32)), Ok(()));
        }
        assert_eq!(map.len(), 3);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn iter_visits_every_entry() {
        let mut map = UniqueMap::default();
        assert_eq!(map.insert("a", ptr(0)), Ok(()));
        assert_eq!(map.insert("b", ptr(1)), Ok(()));
        let mut entries: Vec<_> = map.iter().collect();
        entries.sort();
        assert_eq!(entries, [(&"a", ptr(0)), (&"b", ptr(1))]);
    }
}
