//! Provides the table family [`Table2`] through [`Table6`] and their row
//! types [`Row2`] through [`Row6`].
//!
//! A table of arity N owns one [`OrderedRowStore`] holding the rows in
//! insertion order, plus N independent [`UniqueMap`]s, one per key
//! position. Insertion enforces per-position uniqueness with an
//! upsert-on-collision policy: a new row whose key at *any* position is
//! already held by a different row evicts that row from the entire table
//! (every key map and the insertion order) before taking its place at the
//! tail of the order.
//!
//! The arities form a closed set of concrete types rather than a layered
//! hierarchy; each is generated by the same macro and implements its
//! insert/delete cascade as a single function looping over its N maps.

use crate::order_store::{OrderedRowStore, Rows};
use crate::pointer::RowPtr;
use crate::unique_map::UniqueMap;
use core::hash::Hash;
use thiserror::Error;

/// The error of a direct `get_by_key*` lookup on a key no row currently
/// holds.
///
/// This is the only error condition in the crate; every other absence is
/// reported as an `Option` or `bool`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no row currently holds the requested key")]
pub struct KeyNotFound;

/// Generates one table arity: the row struct, the table struct, and the
/// whole per-key surface.
///
/// Each `(K, key, map, get, try_get, contains, remove_by, values)` tuple
/// names one key position: its type parameter, row field/accessor, map
/// field/accessor, and the four per-key operations.
macro_rules! impl_table {
    (
        $(#[$table_doc:meta])*
        $table:ident, $row:ident [$rowty:ty]:
        $( ($K:ident, $key:ident, $map:ident, $get:ident, $try_get:ident, $contains:ident, $remove_by:ident, $values:ident) )+
    ) => {
        #[doc = concat!("A row of a [`", stringify!($table), "`]: an immutable record of its keys.")]
        ///
        /// Rows are constructed by the table on insertion and handed back
        /// by value on removal; there is no way to mutate a key in place.
        /// A key change is modeled as a fresh insert, which evicts the row
        /// holding the old keys via the collision policy.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $row<$($K),+> {
            $($key: $K,)+
        }

        impl<$($K),+> $row<$($K),+> {
            $(
                #[doc = concat!("Returns the `", stringify!($key), "` value of this row.")]
                #[inline]
                pub fn $key(&self) -> &$K {
                    &self.$key
                }
            )+
        }

        $(#[$table_doc])*
        #[derive(Debug)]
        pub struct $table<$($K),+> {
            /// The canonical insertion-ordered sequence of rows.
            rows: OrderedRowStore<$row<$($K),+>>,
            $(
                /// One uniqueness index, scoped to rows currently present.
                $map: UniqueMap<$K>,
            )+
        }

        impl<$($K),+> Default for $table<$($K),+> {
            fn default() -> Self {
                Self {
                    rows: <_>::default(),
                    $($map: <_>::default(),)+
                }
            }
        }

        impl<$($K: Eq + Hash + Clone),+> $table<$($K),+> {
            /// Returns an empty table.
            pub fn new() -> Self {
                <_>::default()
            }

            /// Inserts a row built from the given keys and returns its handle.
            ///
            /// Any row holding one of these key values, at its respective
            /// position, is first evicted from the entire table, so the new
            /// row replaces colliding rows wholesale and lands at the tail
            /// of the iteration order.
            pub fn insert(&mut self, $($key: $K),+) -> RowPtr {
                $(
                    if let Some(evict) = self.$map.get(&$key) {
                        self.delete(evict);
                    }
                )+

                let ptr = self.rows.insert($row { $($key: $key.clone()),+ });

                $(
                    let vacant = self.$map.insert($key, ptr).is_ok();
                    debug_assert!(vacant, "eviction left `{}` occupied", stringify!($key));
                )+

                ptr
            }

            /// Removes the row `ptr` designates from every key index and
            /// from the insertion order, returning it.
            ///
            /// Returns `None`, leaving the table untouched, if `ptr` is
            /// stale or foreign to this table.
            pub fn delete(&mut self, ptr: RowPtr) -> Option<$row<$($K),+>> {
                let row = self.rows.remove(ptr)?;
                $(
                    let removed = self.$map.delete(&row.$key);
                    debug_assert!(removed, "present row was missing from `{}`", stringify!($map));
                )+
                Some(row)
            }

            /// Returns the row `ptr` designates, if it is currently in this table.
            pub fn get_row(&self, ptr: RowPtr) -> Option<&$row<$($K),+>> {
                self.rows.get(ptr)
            }

            /// Returns whether `ptr` designates a row currently in this table.
            pub fn contains_row(&self, ptr: RowPtr) -> bool {
                self.rows.contains(ptr)
            }

            /// Removes every row.
            ///
            /// Afterwards the table is empty: `len()` is zero, every key
            /// map is empty, and iteration yields nothing.
            pub fn clear(&mut self) {
                self.rows.clear();
                $(self.$map.clear();)+
            }

            /// The number of rows currently in the table. O(1).
            pub fn len(&self) -> usize {
                self.rows.len()
            }

            /// Returns whether the table holds no rows.
            pub fn is_empty(&self) -> bool {
                self.rows.is_empty()
            }

            /// Iterates the rows in insertion order.
            pub fn iter(&self) -> Rows<'_, $row<$($K),+>> {
                self.rows.rows()
            }

            $(
                #[doc = concat!(
                    "Returns the row holding `key` at position `", stringify!($key), "`.\n\n",
                    "Errors with [`KeyNotFound`] if no row currently holds it.",
                )]
                pub fn $get(&self, key: &$K) -> Result<&$rowty, KeyNotFound> {
                    self.$try_get(key).ok_or(KeyNotFound)
                }

                #[doc = concat!("Returns the row holding `key` at position `", stringify!($key), "`, if any.")]
                pub fn $try_get(&self, key: &$K) -> Option<&$rowty> {
                    self.$map.get(key).and_then(|ptr| self.rows.get(ptr))
                }

                #[doc = concat!("Returns whether some row holds `key` at position `", stringify!($key), "`.")]
                pub fn $contains(&self, key: &$K) -> bool {
                    self.$map.contains(key)
                }

                #[doc = concat!(
                    "Removes the row holding `key` at position `", stringify!($key), "` ",
                    "from the entire table, returning it.\n\n",
                    "A no-op returning `None` if no row holds `key`.",
                )]
                pub fn $remove_by(&mut self, key: &$K) -> Option<$rowty> {
                    let ptr = self.$map.get(key)?;
                    self.delete(ptr)
                }

                #[doc = concat!(
                    "The read-only `", stringify!($key), " -> row` uniqueness index.\n\n",
                    "Its iteration order is hash order; use [`Self::", stringify!($values), "`] ",
                    "for the insertion-ordered key sequence.",
                )]
                pub fn $map(&self) -> &UniqueMap<$K> {
                    &self.$map
                }

                #[doc = concat!(
                    "Iterates the `", stringify!($key), "` values in table order,\n",
                    "projected from the canonical insertion-ordered row sequence.",
                )]
                pub fn $values(&self) -> impl Iterator<Item = &$K> + '_ {
                    self.iter().map(|row| &row.$key)
                }
            )+
        }

        impl<'a, $($K),+> IntoIterator for &'a $table<$($K),+> {
            type Item = &'a $row<$($K),+>;
            type IntoIter = Rows<'a, $row<$($K),+>>;

            fn into_iter(self) -> Self::IntoIter {
                self.rows.rows()
            }
        }
    };
}

impl_table! {
    /// An insertion-ordered table whose rows are addressable by two
    /// independent, individually-unique keys.
    ///
    /// ```
    /// use multikey_table::Table2;
    ///
    /// let mut table = Table2::new();
    /// table.insert(1, "one");
    /// table.insert(2, "two");
    /// table.insert(1, "uno"); // evicts (1, "one") wholesale
    ///
    /// assert_eq!(*table.get_by_key1(&1)?.key2(), "uno");
    /// assert!(!table.contains_key2(&"one"));
    /// assert_eq!(table.key1_values().copied().collect::<Vec<_>>(), [2, 1]);
    /// # Ok::<(), multikey_table::KeyNotFound>(())
    /// ```
    Table2, Row2 [Row2<K1, K2>]:
    (K1, key1, key1_map, get_by_key1, try_get_by_key1, contains_key1, remove_by_key1, key1_values)
    (K2, key2, key2_map, get_by_key2, try_get_by_key2, contains_key2, remove_by_key2, key2_values)
}

impl_table! {
    /// An insertion-ordered table whose rows are addressable by three
    /// independent, individually-unique keys.
    Table3, Row3 [Row3<K1, K2, K3>]:
    (K1, key1, key1_map, get_by_key1, try_get_by_key1, contains_key1, remove_by_key1, key1_values)
    (K2, key2, key2_map, get_by_key2, try_get_by_key2, contains_key2, remove_by_key2, key2_values)
    (K3, key3, key3_map, get_by_key3, try_get_by_key3, contains_key3, remove_by_key3, key3_values)
}

impl_table! {
    /// An insertion-ordered table whose rows are addressable by four
    /// independent, individually-unique keys.
    Table4, Row4 [Row4<K1, K2, K3, K4>]:
    (K1, key1, key1_map, get_by_key1, try_get_by_key1, contains_key1, remove_by_key1, key1_values)
    (K2, key2, key2_map, get_by_key2, try_get_by_key2, contains_key2, remove_by_key2, key2_values)
    (K3, key3, key3_map, get_by_key3, try_get_by_key3, contains_key3, remove_by_key3, key3_values)
    (K4, key4, key4_map, get_by_key4, try_get_by_key4, contains_key4, remove_by_key4, key4_values)
}

impl_table! {
    /// An insertion-ordered table whose rows are addressable by five
    /// independent, individually-unique keys.
    Table5, Row5 [Row5<K1, K2, K3, K4, K5>]:
    (K1, key1, key1_map, get_by_key1, try_get_by_key1, contains_key1, remove_by_key1, key1_values)
    (K2, key2, key2_map, get_by_key2, try_get_by_key2, contains_key2, remove_by_key2, key2_values)
    (K3, key3, key3_map, get_by_key3, try_get_by_key3, contains_key3, remove_by_key3, key3_values)
    (K4, key4, key4_map, get_by_key4, try_get_by_key4, contains_key4, remove_by_key4, key4_values)
    (K5, key5, key5_map, get_by_key5, try_get_by_key5, contains_key5, remove_by_key5, key5_values)
}

impl_table! {
    /// An insertion-ordered table whose rows are addressable by six
    /// independent, individually-unique keys.
    Table6, Row6 [Row6<K1, K2, K3, K4, K5, K6>]:
    (K1, key1, key1_map, get_by_key1, try_get_by_key1, contains_key1, remove_by_key1, key1_values)
    (K2, key2, key2_map, get_by_key2, try_get_by_key2, contains_key2, remove_by_key2, key2_values)
    (K3, key3, key3_map, get_by_key3, try_get_by_key3, contains_key3, remove_by_key3, key3_values)
    (K4, key4, key4_map, get_by_key4, try_get_by_key4, contains_key4, remove_by_key4, key4_values)
    (K5, key5, key5_map, get_by_key5, try_get_by_key5, contains_key5, remove_by_key5, key5_values)
    (K6, key6, key6_map, get_by_key6, try_get_by_key6, contains_key6, remove_by_key6, key6_values)
}
