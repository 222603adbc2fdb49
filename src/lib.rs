//! prime-hash-table: a single-threaded string-to-string hash table built on
//! open addressing, double hashing and lazy tombstone deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small map whose probing, resizing and deletion rules can each
//!   be checked on their own.
//! - Layers:
//!   - `prime`: primality test and next-prime search used to size tables.
//!   - `probe`: the polynomial string hash and the double-hashing probe
//!     sequence over a prime capacity.
//!   - `HashTable`: the slot array, upsert/search/delete and the resize
//!     policy.
//!
//! Slots
//! - Each slot is `Empty`, `Occupied(entry)` or `Tombstone`. Deleting a key
//!   writes a tombstone so probe sequences that pass through the slot still
//!   reach keys placed behind it. Only an `Empty` slot ends a lookup.
//! - Inserts reuse the first tombstone on the key's walk, but only after the
//!   walk has reached an `Empty` slot without finding the key, so an upsert
//!   never stores a key twice.
//!
//! Sizing
//! - Capacity is the smallest prime >= the base size; the base size starts
//!   at 53 and never drops below it.
//! - An insert that finds the load above 70% doubles the base size first; a
//!   delete that finds it below 10% halves it first.
//! - Resizing rebuilds the table through the ordinary insert path, which
//!   rehashes every live entry under the new capacity and discards all
//!   tombstones. The new storage replaces the old only once it is complete.
//!
//! Probe bound
//! - The step is `hash_b + 1`. Over a prime capacity any step in
//!   `1..capacity` visits every slot, but a step equal to the capacity
//!   stays on the home slot. Every walk is therefore bounded to `capacity`
//!   attempts: a lookup that runs out reports the key absent, and an insert
//!   that runs out without a free slot grows the table and retries. The
//!   70%/10% thresholds are unaffected.
//!
//! Errors
//! - Allocation failure is reported as [`TableError`] by the `try_*` entry
//!   points, leaving the table as it was. `new`, `insert` and `delete` panic
//!   on it instead. Missing keys, duplicate keys and shrink requests below
//!   the floor are not errors.
//!
//! Notes and non-goals
//! - Single-threaded; wrap the table in a `Mutex` to share it.
//! - No iteration, persistence or generic key/value types.
//! - Resize and exhaustion events are reported through the `log` facade.

mod error;
mod hash_table;
mod hash_table_proptest;
mod prime;
pub mod probe;

// Public surface
pub use error::{Result, TableError};
pub use hash_table::{HashTable, MAX_LOAD_PERCENT, MIN_BASE_SIZE, MIN_LOAD_PERCENT};
pub use prime::{checked_next_prime, is_prime, next_prime, Primality};
