//! blackboard-table: a single-threaded multimap ("blackboard") where each
//! key holds an ordered group of values, drained FIFO or LIFO per a mode
//! fixed at construction.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the whole structure in one flat arena so lookups, inserts
//!   and removals are O(1) amortized with zero per-entry allocation beyond
//!   each key's value group.
//! - Layers:
//!   - primes: growth policy; table sizes come from a fixed ascending
//!     prime table, doubling through it on demand.
//!   - ValueGroup<V>: per-key ordered values; one concrete type whose
//!     take/peek branch on the stored Mode, so no dispatch per call.
//!   - Blackboard<K, V, S>: open-chaining hash table over an arena of
//!     slots addressed by index; freed slots are recycled through an
//!     intrusive free list that reuses the chain-link field.
//!
//! Constraints
//! - Single-threaded: no locking, no atomics; callers serialize externally.
//! - Slots are addressed by `i32` index with `-1` as the only sentinel;
//!   hashes are masked to 31 bits so the sentinel can never collide with a
//!   real hash.
//! - A slot is occupied iff its hash is non-negative; occupied slots never
//!   hold an empty group (the emptying detach frees the slot in the same
//!   call).
//! - A slot is reachable from exactly one bucket chain or from the free
//!   list, never both.
//!
//! Iteration
//! - `iter()` borrows the table, so the borrow checker rules out mutation
//!   mid-walk.
//! - `cursor()` holds no borrow; each advance re-presents the table and is
//!   checked against a version counter bumped by every structural
//!   mutation. A stale cursor fails permanently with
//!   `CursorError::Invalidated`.
//!
//! Notes and non-goals
//! - No persistence, no concurrency control, no `Send`/`Sync` promises
//!   beyond what the field types derive.
//! - Keys are compared via `Eq` after a stored-hash pre-check; a custom
//!   `BuildHasher` may be supplied at construction and must hash equal
//!   keys equally.
//! - Absent keys are a normal outcome: `peek`/`detach` return `Option`,
//!   they do not error.

mod blackboard;
mod group;
mod primes;

// Public surface
pub use blackboard::{Blackboard, Cursor, CursorError, Iter};
pub use group::{Mode, TakeError, ValueGroup};
