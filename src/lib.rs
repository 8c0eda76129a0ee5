//! collide-map: collision-policy insertion, bulk merge, positional slicing,
//! and key-search operations for insertion-ordered maps.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: provide the policy logic for resolving key collisions in a
//!   key-unique, insertion-ordered map without defining a map of its own.
//!   All operations are extension traits implemented for
//!   `indexmap::IndexMap<K, V, S>`; another ordered, key-unique container can
//!   implement the same traits.
//! - Layers (leaves first):
//!   - ticks: `TickSource` capability used to derive rename suffixes.
//!     `SystemTicks` is the production source; `SequenceTicks` is scripted
//!     for deterministic tests.
//!   - upsert: `Upsert` gives the single-entry insert-or-overwrite
//!     primitives the layers above compose.
//!   - rename: `RenameKey` is the bounded rename-retry engine. It performs
//!     `retry_attempts + 1` containment checks, growing the candidate key by
//!     one suffix per collision; suffixes after the first come from the tick
//!     source.
//!   - policy: `CollisionPolicy` plus `PolicyAdd`, the single-insert
//!     dispatcher over `TryAdd`/`Update`/`Rename`.
//!   - range: `RangeSlice` extracts contiguous positional slices
//!     (`slice_range`, `skip_first`).
//!   - merge: `MergeRange`/`PolicyMergeRange` merge whole source maps into a
//!     target under a policy; `join_many` folds several sources in order.
//!   - search: `KeySearch` filters entries by case-insensitive substring
//!     containment between keys and a pattern.
//!   - snapshot: `Snapshot` produces defensive copies, including the
//!     `ReadOnlyMap` wrapper that exposes no mutating accessor.
//!
//! Constraints
//! - Single-threaded, synchronous: every operation runs to completion on the
//!   caller's thread and holds the map only for the duration of the call.
//!   No references are retained afterward; sharing across threads is the
//!   caller's problem to serialize.
//! - Key uniqueness is preserved by every operation.
//! - A single insert either commits fully or leaves the map untouched.
//!
//! Atomicity of bulk operations
//! - `try_add_range` under `TryAdd` pre-scans the source and aborts before
//!   any mutation when a collision exists. Under `Update` every entry
//!   applies. Under `Rename` entries commit one by one and a failing rename
//!   leaves earlier commits in place while the call reports failure. The
//!   asymmetry is intentional and part of the contract.
//! - `join_many` fails fast on a disallowed missing source; sources merged
//!   before the failure stay merged.
//!
//! Error model
//! - Precondition violations (retry budget below the minimum, out-of-range
//!   index or count, a disallowed missing source) are programmer errors and
//!   surface as dedicated error types before any mutation.
//! - Policy outcomes (key already present under `TryAdd`, rename retries
//!   exhausted) are normal control flow and surface as `bool`/`Option`
//!   returns, never as errors.
//!
//! Notes and non-goals
//! - No persistent map implementation; the substrate is caller-supplied.
//! - No locking, background work, cancellation, or timeouts; all loops are
//!   bounded by container size and the retry budget.
//! - Rename and pattern search are specific to string keys; the remaining
//!   operations are generic over `K: Hash + Eq + Clone`.

mod merge;
mod ops_proptest;
mod policy;
mod range;
mod rename;
mod search;
mod snapshot;
mod ticks;
mod upsert;

// Public surface
pub use merge::{JoinError, MergeRange, PolicyMergeRange};
pub use policy::{CollisionPolicy, PolicyAdd};
pub use range::{RangeError, RangeSlice};
pub use rename::{
    RenameKey, RetryBudgetError, DEFAULT_RENAMED_KEY_SUFFIX, DEFAULT_RENAME_RETRY_ATTEMPTS,
    MIN_RENAME_RETRY_ATTEMPTS,
};
pub use search::KeySearch;
pub use snapshot::{ReadOnlyMap, Snapshot};
pub use ticks::{SequenceTicks, SystemTicks, TickSource};
pub use upsert::Upsert;
