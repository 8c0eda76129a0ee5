//! Defensive copies: shallow clones and a read-only wrapper.

use core::hash::{BuildHasher, Hash};
use indexmap::map::Iter;
use indexmap::{Equivalent, IndexMap};

/// Copy operations for handing a map's contents to other parties without
/// exposing the original to mutation.
pub trait Snapshot<K, V, S>: Sized {
    /// Shallow (element-cloning) copy of the map.
    fn shadow_clone(&self) -> Self;

    /// Replaces the contents of `self` with a shallow copy of `source`.
    /// A missing source leaves `self` cleared.
    fn self_shadow_clone_of(&mut self, source: Option<&Self>);

    /// Shallow copy wrapped so that no mutating accessor is reachable.
    fn read_only_shadow_clone(&self) -> ReadOnlyMap<K, V, S>;
}

impl<K, V, S> Snapshot<K, V, S> for IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn shadow_clone(&self) -> Self {
        self.clone()
    }

    fn self_shadow_clone_of(&mut self, source: Option<&Self>) {
        self.clear();
        if let Some(source) = source {
            for (k, v) in source {
                self.insert(k.clone(), v.clone());
            }
        }
    }

    fn read_only_shadow_clone(&self) -> ReadOnlyMap<K, V, S> {
        ReadOnlyMap {
            inner: self.clone(),
        }
    }
}

/// An owned, read-only copy of a map. The wrapped map is detached from its
/// source and only non-mutating accessors are exposed.
#[derive(Clone, Debug)]
pub struct ReadOnlyMap<K, V, S> {
    inner: IndexMap<K, V, S>,
}

impl<K, V, S> ReadOnlyMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.inner.get(key)
    }

    /// Entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.inner.get_index(index)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Shared view of the wrapped map, for read-only interop with code that
    /// takes `&IndexMap`.
    pub fn as_map(&self) -> &IndexMap<K, V, S> {
        &self.inner
    }
}

impl<'a, K, V, S> IntoIterator for &'a ReadOnlyMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> IndexMap<String, i32> {
        IndexMap::from([("a".to_string(), 1), ("b".to_string(), 2)])
    }

    /// Invariant: a shadow clone is equal in content and order but detached:
    /// mutating the clone leaves the original alone.
    #[test]
    fn shadow_clone_is_detached() {
        let m = seeded();
        let mut c = m.shadow_clone();
        assert_eq!(
            c.iter().collect::<Vec<_>>(),
            m.iter().collect::<Vec<_>>()
        );

        c.insert("c".to_string(), 3);
        assert_eq!(m.len(), 2);
        assert_eq!(c.len(), 3);
    }

    /// Invariant: cloning a source into self replaces all prior contents.
    #[test]
    fn self_shadow_clone_replaces_contents() {
        let mut m = IndexMap::from([("old".to_string(), 0)]);
        let source = seeded();
        m.self_shadow_clone_of(Some(&source));
        assert!(!m.contains_key("old"));
        assert_eq!(
            m.iter().collect::<Vec<_>>(),
            source.iter().collect::<Vec<_>>()
        );
    }

    /// Invariant: a missing source leaves self cleared.
    #[test]
    fn self_shadow_clone_of_none_clears() {
        let mut m = seeded();
        m.self_shadow_clone_of(None);
        assert!(m.is_empty());
    }

    /// Invariant: the read-only view exposes lookups and iteration and is
    /// detached from later mutation of the source.
    #[test]
    fn read_only_view_is_detached() {
        let mut m = seeded();
        let view = m.read_only_shadow_clone();
        m.insert("c".to_string(), 3);
        m.insert("a".to_string(), 100);

        assert_eq!(view.len(), 2);
        assert_eq!(view.get("a"), Some(&1));
        assert!(!view.contains_key("c"));
        assert_eq!(view.get_index(1), Some((&"b".to_string(), &2)));

        let keys: Vec<&str> = view.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        let via_for: Vec<&str> = (&view).into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(via_for, keys);
    }
}
