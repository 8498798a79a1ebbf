//! bucket-map: a single-threaded hash map built directly on a fixed-length
//! slot table, with no probing and no chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the smallest map engine that still has an obvious invariant.
//!   Every resident key sits in exactly the slot `hash(key) mod len`.
//! - Layers:
//!   - BucketTable<K, V, S>: the engine. Owns a boxed slice of
//!     `Option<Entry>` of length `2^c - 1`, the occupied count and the
//!     capacity-exponent `c`. Implements placement, lookup, removal and
//!     growth.
//!   - BucketMap<K, V, S>: public API (`set`, `get`, `get_or`, `delete`,
//!     `iter`, `len`) plus the conversions and formatting impls that let
//!     it behave like a std map.
//!
//! Collision policy
//! - When a new key lands on a slot held by a different key, the table
//!   grows (`c += 1`) and every entry is reinserted. This repeats until
//!   the key fits. Reinsertion goes through the same placement loop, so a
//!   nested growth during rehash is handled like any other.
//! - Growth is the only way the table changes size. There is no load
//!   factor, and deletion never shrinks.
//! - `c` starts at 10 (1023 slots). If it would reach `usize::BITS`,
//!   growth panics with "capacity overflow". This happens with a hasher
//!   that gives two distinct keys the same `u64`.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its `u64` hash. Growth indexes with the stored hash
//!   and never calls `K: Hash` again. Slot comparison checks the stored
//!   hash before calling `K: Eq`.
//! - The default `SlotBuildHasher` is deterministic. Integer keys hash to
//!   themselves, so dense integer keys fill the table without collisions.
//!   Every field after the first is avalanched, so the fields of a
//!   composite key do not cancel into a shared `u64` hash.
//!   Any other `BuildHasher` can be plugged in through `with_hasher`.
//!
//! Notes and non-goals
//! - Single-threaded. Mutation takes `&mut self`. Share across threads
//!   only behind external synchronization.
//! - Iteration borrows the map, so it cannot observe concurrent mutation.
//!   Each `iter()` call walks the live table in slot order.
//! - Keys that scatter over the hash space must avoid every pairwise
//!   collision to fit. For them the table grows roughly with the square
//!   of the key count. Dense integer keys under the default hasher grow it
//!   linearly.
//! - No persistence, no shrinking and no incremental rehash.

mod bucket_map;
mod bucket_table;
mod bucket_table_proptest;
pub mod error;
pub mod hasher;

// Public surface
pub use bucket_map::BucketMap;
pub use bucket_table::{IntoIter, Iter, INITIAL_CAPACITY_EXPONENT};
pub use error::{MapError, Result};
pub use hasher::{SlotBuildHasher, SlotHasher};
