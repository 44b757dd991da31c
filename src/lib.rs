//! dh-table: a single-threaded, open-addressing hash table from string
//! keys to string values, using double hashing over prime-sized bucket
//! arrays.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep every lookup, insert and delete on the same probe sequence
//!   so the three operations can never disagree about where a key lives.
//! - Layers:
//!   - `prime`: smallest prime at or above a base size.
//!   - `probe`: the polynomial string hash (bases 151 and 163) and the
//!     double-hashing `ProbeSeq` that visits every slot of a prime-sized
//!     array exactly once.
//!   - `HashTable`: the bucket array of `Empty | Tombstone | Occupied`
//!     slots plus the grow/shrink policy from `TableConfig`.
//!
//! Constraints
//! - Single-threaded: all mutation goes through `&mut self`; there is no
//!   internal locking.
//! - Capacity is always prime and at least the configured floor.
//! - `len()` counts occupied slots only; tombstones are not counted.
//! - Keys are unique: an insert of a present key overwrites its value.
//!
//! Sizing
//! - Load is `count * 100 / capacity` in whole percent.
//! - Before an insert, load above 70 doubles the base size. Before a
//!   delete, load below 10 halves it, unless that would go below the floor.
//! - A resize allocates a fresh array of `next_prime(base_size)` slots and
//!   moves every live entry into it; tombstones are dropped. If the
//!   allocation fails the table is left as it was and the error is returned.
//!
//! Tombstones
//! - Deleting leaves a tombstone so that keys further along the same probe
//!   chain stay reachable. Lookups probe past tombstones and stop only at
//!   an empty slot. Inserts probe past them as well, to find an existing
//!   copy of the key, and then reuse the first tombstone they saw.
//!
//! Notes and non-goals
//! - No iteration, persistence or generic value types.
//! - Dropping the table releases every entry and the bucket array.
//! - Resizes are logged at `debug` level through `tracing`.

pub mod config;
pub mod error;
mod hash_table;
mod hash_table_proptest;
pub mod prime;
pub mod probe;

// Public surface
pub use config::TableConfig;
pub use error::TableError;
pub use hash_table::HashTable;
