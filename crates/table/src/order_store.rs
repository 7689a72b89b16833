//! Provides [`OrderedRowStore`], the base layer beneath every table:
//! a slot arena owning the rows, threaded with the canonical
//! insertion-order list.
//!
//! The store hands out [`RowPtr`] handles on insertion.
//! All per-handle operations, [`insert`](OrderedRowStore::insert),
//! [`remove`](OrderedRowStore::remove), [`get`](OrderedRowStore::get),
//! and [`contains`](OrderedRowStore::contains), run in O(1).
//! Iteration follows the order list, not slot order,
//! so rows come out in the order they were inserted.

use crate::pointer::{Generation, RowPtr, SlotIndex};
use core::iter::FusedIterator;
use core::mem;

/// A slot in the arena: either a live row with its order-list links,
/// or a vacant slot threaded onto the free list.
#[derive(Debug)]
enum Slot<R> {
    Occupied(OccupiedSlot<R>),
    Vacant(VacantSlot),
}

#[derive(Debug)]
struct OccupiedSlot<R> {
    /// The row this slot holds.
    row: R,
    /// The generation baked into every live handle to this slot.
    generation: Generation,
    /// The slot of the row inserted most recently before this one, if any.
    prev: Option<SlotIndex>,
    /// The slot of the row inserted soonest after this one, if any.
    next: Option<SlotIndex>,
}

#[derive(Debug)]
struct VacantSlot {
    /// The generation the slot will mint when next occupied.
    ///
    /// Always strictly newer than any handle to a previous occupant.
    generation: Generation,
    /// The next slot on the free list, if any.
    next_free: Option<SlotIndex>,
}

/// The canonical, insertion-ordered sequence of currently-present rows.
///
/// Rows live in a slot arena; insertion order is an intrusive
/// doubly-linked list of slot indices, so unlinking a row anywhere
/// in the sequence is O(1) without shifting its neighbors.
#[derive(Debug)]
pub struct OrderedRowStore<R> {
    /// The slot arena. Indexed by [`SlotIndex`].
    slots: Vec<Slot<R>>,
    /// The slot of the least recently inserted row, if any.
    head: Option<SlotIndex>,
    /// The slot of the most recently inserted row, if any.
    tail: Option<SlotIndex>,
    /// The head of the free list threaded through vacant slots.
    free_head: Option<SlotIndex>,
    /// The number of occupied slots.
    len: usize,
}

impl<R> Default for OrderedRowStore<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
        }
    }
}

impl<R> OrderedRowStore<R> {
    /// Returns an empty store.
    pub fn new() -> Self {
        <_>::default()
    }

    /// Inserts `row` at the tail of the insertion order
    /// and returns the handle designating it.
    pub fn insert(&mut self, row: R) -> RowPtr {
        let prev_tail = self.tail;
        let (slot, generation) = self.alloc(row, prev_tail);

        // Link at the tail of the order list.
        match prev_tail {
            Some(tail) => self.occupied_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;

        RowPtr::new(slot, generation)
    }

    /// Removes the row `ptr` designates, unlinking it from the insertion
    /// order, and returns it.
    ///
    /// Returns `None`, leaving the store untouched,
    /// if `ptr` is stale or out of range.
    pub fn remove(&mut self, ptr: RowPtr) -> Option<R> {
        let slot = self.resolve(ptr)?;
        Some(self.vacate(slot))
    }

    /// Returns the row `ptr` designates, if `ptr` is live in this store.
    pub fn get(&self, ptr: RowPtr) -> Option<&R> {
        self.resolve(ptr).map(|slot| &self.occupied(slot).row)
    }

    /// Returns whether `ptr` designates a row currently in this store.
    pub fn contains(&self, ptr: RowPtr) -> bool {
        self.resolve(ptr).is_some()
    }

    /// Removes every row, leaving the store empty.
    ///
    /// Every slot is individually vacated rather than dropped wholesale,
    /// so all outstanding handles go stale instead of resurrecting
    /// against a later occupant of the same slot.
    pub fn clear(&mut self) {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let occupied = self.occupied(slot);
            let (next, generation) = (occupied.next, occupied.generation.next());
            cursor = next;
            self.slots[slot.idx()] = Slot::Vacant(VacantSlot {
                generation,
                next_free: self.free_head,
            });
            self.free_head = Some(slot);
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// The number of rows currently in the store. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates the rows in insertion order,
    /// yielding each row together with its handle.
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            store: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Iterates just the rows, in insertion order.
    pub fn rows(&self) -> Rows<'_, R> {
        Rows { iter: self.iter() }
    }

    /// Allocates a slot for `row`, reusing the free list when possible,
    /// with its `prev` order link set to `prev` and no `next` link.
    /// Does not touch `head`, `tail`, or `len`.
    fn alloc(&mut self, row: R, prev: Option<SlotIndex>) -> (SlotIndex, Generation) {
        match self.free_head {
            Some(slot) => {
                let Slot::Vacant(vacant) = &self.slots[slot.idx()] else {
                    unreachable!("free list threads an occupied slot")
                };
                let generation = vacant.generation;
                self.free_head = vacant.next_free;
                self.slots[slot.idx()] = Slot::Occupied(OccupiedSlot {
                    row,
                    generation,
                    prev,
                    next: None,
                });
                (slot, generation)
            }
            None => {
                let slot = SlotIndex(self.slots.len() as u32);
                self.slots.push(Slot::Occupied(OccupiedSlot {
                    row,
                    generation: Generation::FIRST,
                    prev,
                    next: None,
                }));
                (slot, Generation::FIRST)
            }
        }
    }

    /// Unlinks `slot` from the order list, vacates it with a bumped
    /// generation, and returns the row it held.
    fn vacate(&mut self, slot: SlotIndex) -> R {
        let freed = Slot::Vacant(VacantSlot {
            generation: self.occupied(slot).generation.next(),
            next_free: self.free_head,
        });
        let Slot::Occupied(occupied) = mem::replace(&mut self.slots[slot.idx()], freed) else {
            unreachable!("vacating a vacant slot")
        };
        self.free_head = Some(slot);

        // Unlink from the order list.
        match occupied.prev {
            Some(prev) => self.occupied_mut(prev).next = occupied.next,
            None => self.head = occupied.next,
        }
        match occupied.next {
            Some(next) => self.occupied_mut(next).prev = occupied.prev,
            None => self.tail = occupied.prev,
        }
        self.len -= 1;

        occupied.row
    }

    /// Returns the slot `ptr` designates, if `ptr` is live in this store.
    fn resolve(&self, ptr: RowPtr) -> Option<SlotIndex> {
        let slot = ptr.slot();
        match self.slots.get(slot.idx()) {
            Some(Slot::Occupied(occupied)) if occupied.generation == ptr.generation() => Some(slot),
            _ => None,
        }
    }

    /// Assumes `slot` is occupied and returns its contents.
    fn occupied(&self, slot: SlotIndex) -> &OccupiedSlot<R> {
        match &self.slots[slot.idx()] {
            Slot::Occupied(occupied) => occupied,
            Slot::Vacant(_) => unreachable!("order list links a vacant slot"),
        }
    }

    /// Assumes `slot` is occupied and returns its contents mutably.
    fn occupied_mut(&mut self, slot: SlotIndex) -> &mut OccupiedSlot<R> {
        match &mut self.slots[slot.idx()] {
            Slot::Occupied(occupied) => occupied,
            Slot::Vacant(_) => unreachable!("order list links a vacant slot"),
        }
    }
}

/// An insertion-ordered iterator over the rows of an [`OrderedRowStore`],
/// yielding each row together with its handle.
pub struct Iter<'a, R> {
    store: &'a OrderedRowStore<R>,
    /// The slot the iterator will yield next, if any.
    next: Option<SlotIndex>,
    /// The number of rows not yet yielded.
    remaining: usize,
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = (RowPtr, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next?;
        let occupied = self.store.occupied(slot);
        self.next = occupied.next;
        self.remaining -= 1;
        Some((RowPtr::new(slot, occupied.generation), &occupied.row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}
impl<R> FusedIterator for Iter<'_, R> {}

/// An insertion-ordered iterator over just the rows of an [`OrderedRowStore`].
pub struct Rows<'a, R> {
    iter: Iter<'a, R>,
}

impl<'a, R> Iterator for Rows<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, row)| row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<R> ExactSizeIterator for Rows<'_, R> {}
impl<R> FusedIterator for Rows<'_, R> {}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::assert_equal;
    use proptest::collection::vec;
    use proptest::prelude::*;

    #[test]
    fn iterates_in_insertion_order() {
        let mut store = OrderedRowStore::new();
        for name in ["a", "b", "c"] {
            store.insert(name);
        }
        assert_eq!(store.len(), 3);
        assert_equal(store.rows().copied(), ["a", "b", "c"]);
    }

    #[test]
    fn remove_unlinks_and_returns_the_row() {
        let mut store = OrderedRowStore::new();
        let a = store.insert("a");
        let b = store.insert("b");
        let c = store.insert("c");

        assert_eq!(store.remove(b), Some("b"));
        assert_eq!(store.len(), 2);
        assert_equal(store.rows().copied(), ["a", "c"]);
        assert!(store.contains(a));
        assert!(!store.contains(b));
        assert!(store.contains(c));

        // A second removal through the same handle is a no-op.
        assert_eq!(store.remove(b), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removing_head_and_tail_relinks_the_ends() {
        let mut store = OrderedRowStore::new();
        let a = store.insert("a");
        store.insert("b");
        let c = store.insert("c");

        assert_eq!(store.remove(a), Some("a"));
        assert_equal(store.rows().copied(), ["b", "c"]);
        assert_eq!(store.remove(c), Some("c"));
        assert_equal(store.rows().copied(), ["b"]);
    }

    #[test]
    fn stale_handle_does_not_resurrect_against_a_reused_slot() {
        let mut store = OrderedRowStore::new();
        let a = store.insert("a");
        assert_eq!(store.remove(a), Some("a"));

        // The freed slot is reused, with a newer generation.
        let b = store.insert("b");
        assert_eq!(b.slot(), a.slot());
        assert_ne!(b.generation(), a.generation());

        assert_eq!(store.get(a), None);
        assert!(!store.contains(a));
        assert_eq!(store.remove(a), None);
        assert_eq!(store.get(b), Some(&"b"));
    }

    #[test]
    fn clear_empties_the_store_and_stales_every_handle() {
        let mut store = OrderedRowStore::new();
        let handles: Vec<_> = (0..10).map(|n| store.insert(n)).collect();

        store.clear();

        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
        for ptr in handles {
            assert!(!store.contains(ptr));
        }

        // The store is usable after clearing.
        let x = store.insert(42);
        assert_eq!(store.get(x), Some(&42));
        assert_equal(store.rows().copied(), [42]);
    }

    #[test]
    fn iter_yields_live_handles() {
        let mut store = OrderedRowStore::new();
        let a = store.insert("a");
        let b = store.insert("b");
        assert_equal(store.iter(), [(a, &"a"), (b, &"b")]);
    }

    #[test]
    fn iter_is_exact_size() {
        let mut store = OrderedRowStore::new();
        for n in 0..5 {
            store.insert(n);
        }
        let mut iter = store.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);
    }

    proptest! {
        /// Under any interleaving of inserts and removals,
        /// iteration matches a shadow list of the live rows
        /// in insertion order, and `len` matches its length.
        #[test]
        fn order_matches_shadow_list(ops in vec((any::<bool>(), 0usize..8), 1..64)) {
            let mut store = OrderedRowStore::new();
            let mut shadow: Vec<(RowPtr, usize)> = Vec::new();

            for (value, (remove, pick)) in ops.into_iter().enumerate() {
                if remove && !shadow.is_empty() {
                    let (ptr, expected) = shadow.remove(pick % shadow.len());
                    prop_assert_eq!(store.remove(ptr), Some(expected));
                } else {
                    let ptr = store.insert(value);
                    shadow.push((ptr, value));
                }

                prop_assert_eq!(store.len(), shadow.len());
                let rows: Vec<usize> = store.rows().copied().collect();
                let expected: Vec<usize> = shadow.iter().map(|&(_, v)| v).collect();
                prop_assert_eq!(rows, expected);
            }
        }
    }
}
