//! In-memory, insertion-order-preserving tables whose rows are
//! simultaneously addressable by 2 to 6 independent, individually-unique
//! keys.
//!
//! Each table arity ([`Table2`] .. [`Table6`]) layers one uniqueness
//! index per key position over a single [`OrderedRowStore`], giving
//! O(1)-expected lookup, presence check, and removal by any one key.
//! Insertion is upsert-on-collision: a new row whose key at any position
//! is already held by a different row evicts that row from the entire
//! table before taking its place at the tail of the iteration order.
//!
//! ```
//! use multikey_table::Table2;
//!
//! let mut table = Table2::new();
//! table.insert(1, "one");
//! table.insert(2, "two");
//! table.insert(1, "uno"); // evicts (1, "one") wholesale
//!
//! assert_eq!(*table.get_by_key1(&1)?.key2(), "uno");
//! assert!(!table.contains_key2(&"one"));
//!
//! let rows: Vec<_> = table.iter().map(|r| (*r.key1(), *r.key2())).collect();
//! assert_eq!(rows, [(2, "two"), (1, "uno")]);
//! # Ok::<(), multikey_table::KeyNotFound>(())
//! ```
//!
//! Tables are single-threaded by construction: mutation takes `&mut self`
//! and reads take `&self`, so the borrow checker rules out mutation while
//! an iteration is in progress. Key types only need `Eq + Hash + Clone`;
//! no ordering is required.

pub mod ext;
mod order_store;
mod pointer;
mod table;
mod unique_map;

pub use order_store::{Iter, OrderedRowStore, Rows};
pub use pointer::{Generation, RowPtr, SlotIndex};
pub use table::{
    KeyNotFound, Row2, Row3, Row4, Row5, Row6, Table2, Table3, Table4, Table5, Table6,
};
pub use unique_map::UniqueMap;
