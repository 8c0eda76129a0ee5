//! Collision policy and the single-insert dispatcher.

use crate::rename::RenameKey;
use crate::upsert::Upsert;
use core::hash::BuildHasher;
use indexmap::IndexMap;

/// Behavior when the key being inserted already exists in the map.
///
/// The match over this enum is exhaustive wherever it is dispatched; there is
/// no "unrecognized policy" runtime case.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CollisionPolicy {
    /// Insert only if the key is absent; report failure otherwise.
    #[default]
    TryAdd,
    /// Insert if absent, overwrite the existing value otherwise.
    Update,
    /// Insert under a generated alternate key when the original collides.
    Rename,
}

/// Single-insert dispatch over [`CollisionPolicy`] for string-keyed maps.
pub trait PolicyAdd<V> {
    /// Inserts `(key, value)` according to `policy` and returns the key the
    /// entry was stored under, or `None` when the policy could not place it:
    /// a present key under `TryAdd`, or rename retries exhausted under
    /// `Rename`. The map mutates only when an insert actually lands.
    fn add_with_policy(&mut self, key: String, value: V, policy: CollisionPolicy)
        -> Option<String>;
}

impl<V, S> PolicyAdd<V> for IndexMap<String, V, S>
where
    S: BuildHasher,
{
    fn add_with_policy(
        &mut self,
        key: String,
        value: V,
        policy: CollisionPolicy,
    ) -> Option<String> {
        match policy {
            CollisionPolicy::TryAdd => {
                if self.contains_key(&key) {
                    return None;
                }
                self.insert(key.clone(), value);
                Some(key)
            }
            CollisionPolicy::Update => {
                self.add_or_update(key.clone(), value);
                Some(key)
            }
            CollisionPolicy::Rename => self.add_or_rename_key(key, value),
        }
    }
}
