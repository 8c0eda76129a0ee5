//! Single-entry insert-or-overwrite primitives.

use core::hash::{BuildHasher, Hash};
use indexmap::IndexMap;

/// Insert-or-overwrite operations the policy and merge layers compose.
pub trait Upsert<K, V> {
    /// Inserts `(key, value)`, overwriting the value in place when `key` is
    /// already present. An overwritten entry keeps its insertion position.
    fn add_or_update(&mut self, key: K, value: V);

    /// Inserts `(key, value)` if `key` is absent. When present, overwrites
    /// only if `update_if_key_exists` is set; otherwise leaves the map
    /// unchanged and returns `false`.
    fn try_add_or_update(&mut self, key: K, value: V, update_if_key_exists: bool) -> bool;
}

impl<K, V, S> Upsert<K, V> for IndexMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn add_or_update(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn try_add_or_update(&mut self, key: K, value: V, update_if_key_exists: bool) -> bool {
        if update_if_key_exists {
            self.insert(key, value);
            return true;
        }
        if self.contains_key(&key) {
            return false;
        }
        self.insert(key, value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> IndexMap<String, i32> {
        IndexMap::from([("a".to_string(), 1), ("b".to_string(), 2)])
    }

    /// Invariant: upserting a fresh key grows the map by one and appends the
    /// entry at the end of the insertion order.
    #[test]
    fn add_or_update_fresh_key_appends() {
        let mut m = seeded();
        m.add_or_update("c".to_string(), 3);
        assert_eq!(m.len(), 3);
        assert_eq!(m.get_index(2), Some((&"c".to_string(), &3)));
    }

    /// Invariant: upserting an existing key overwrites the value, keeps the
    /// size, and keeps the entry's position.
    #[test]
    fn add_or_update_existing_key_overwrites_in_place() {
        let mut m = seeded();
        m.add_or_update("a".to_string(), 10);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get_index(0), Some((&"a".to_string(), &10)));
    }

    /// Invariant: with the update flag unset, a present key blocks the insert
    /// and the map is byte-for-byte unchanged.
    #[test]
    fn try_add_blocked_without_update_flag() {
        let mut m = seeded();
        let before: Vec<_> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert!(!m.try_add_or_update("a".to_string(), 99, false));
        let after: Vec<_> = m.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(before, after);
    }

    /// Invariant: the update flag turns a blocked insert into an overwrite.
    #[test]
    fn try_add_with_update_flag_overwrites() {
        let mut m = seeded();
        assert!(m.try_add_or_update("a".to_string(), 99, true));
        assert_eq!(m["a"], 99);
        assert_eq!(m.len(), 2);
    }

    /// Invariant: a fresh key inserts regardless of the flag.
    #[test]
    fn try_add_fresh_key_inserts_either_way() {
        for flag in [false, true] {
            let mut m = seeded();
            assert!(m.try_add_or_update("c".to_string(), 3, flag));
            assert_eq!(m.len(), 3);
            assert_eq!(m["c"], 3);
        }
    }
}
