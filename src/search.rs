//! Case-insensitive substring search over string keys.

use core::hash::BuildHasher;
use indexmap::IndexMap;

/// Filtered sub-map extraction by substring containment between keys and a
/// pattern. Matching is always case-insensitive.
pub trait KeySearch: Sized {
    /// Returns the entries whose key contains `pattern`, excluding any key
    /// listed in `ignore_keys`. `None` when nothing matched; a returned map
    /// is never empty and preserves source order.
    fn find_by_key_contains_pattern(&self, pattern: &str, ignore_keys: &[&str]) -> Option<Self>;

    /// Mirror of
    /// [`find_by_key_contains_pattern`](KeySearch::find_by_key_contains_pattern):
    /// the pattern is the haystack and each key is the needle.
    fn find_by_pattern_contains_key(&self, pattern: &str, ignore_keys: &[&str]) -> Option<Self>;
}

impl<V, S> KeySearch for IndexMap<String, V, S>
where
    V: Clone,
    S: BuildHasher + Clone,
{
    fn find_by_key_contains_pattern(&self, pattern: &str, ignore_keys: &[&str]) -> Option<Self> {
        filtered(self, ignore_keys, |key| ignore_case_contains(key, pattern))
    }

    fn find_by_pattern_contains_key(&self, pattern: &str, ignore_keys: &[&str]) -> Option<Self> {
        filtered(self, ignore_keys, |key| ignore_case_contains(pattern, key))
    }
}

fn filtered<V, S, F>(
    map: &IndexMap<String, V, S>,
    ignore_keys: &[&str],
    matches: F,
) -> Option<IndexMap<String, V, S>>
where
    V: Clone,
    S: BuildHasher + Clone,
    F: Fn(&str) -> bool,
{
    let mut found = IndexMap::with_hasher(map.hasher().clone());
    for (k, v) in map {
        if !ignore_keys.contains(&k.as_str()) && matches(k) {
            found.insert(k.clone(), v.clone());
        }
    }
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

// Lowercase-fold containment. Equivalent to ordinal case-insensitive search
// for ASCII key material.
fn ignore_case_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> IndexMap<String, i32> {
        IndexMap::from([
            ("alpha.host".to_string(), 1),
            ("Beta.Host".to_string(), 2),
            ("gamma.port".to_string(), 3),
        ])
    }

    /// Invariant: no match yields `None`, never an empty map.
    #[test]
    fn no_match_is_none() {
        let m = seeded();
        assert!(m.find_by_key_contains_pattern("xyz", &[]).is_none());
    }

    /// Invariant: containment ignores case and preserves source order.
    #[test]
    fn case_insensitive_in_order() {
        let m = seeded();
        let found = m.find_by_key_contains_pattern("HOST", &[]).unwrap();
        let keys: Vec<&str> = found.keys().map(String::as_str).collect();
        assert_eq!(keys, ["alpha.host", "Beta.Host"]);
    }

    /// Invariant: ignored keys are excluded even when they match, and an
    /// all-ignored result is `None`.
    #[test]
    fn ignore_keys_excluded() {
        let m = seeded();
        let found = m
            .find_by_key_contains_pattern("host", &["alpha.host"])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("Beta.Host"));

        assert!(m
            .find_by_key_contains_pattern("host", &["alpha.host", "Beta.Host"])
            .is_none());
    }

    /// Invariant: the mirror variant matches keys contained in the pattern.
    #[test]
    fn mirror_matches_keys_inside_pattern() {
        let m = seeded();
        let found = m
            .find_by_pattern_contains_key("connect via ALPHA.HOST today", &[])
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("alpha.host"));
    }

    /// Invariant: an empty pattern is contained in every key, so it selects
    /// everything not ignored.
    #[test]
    fn empty_pattern_selects_all() {
        let m = seeded();
        let found = m.find_by_key_contains_pattern("", &[]).unwrap();
        assert_eq!(found.len(), m.len());
    }

    /// Invariant: the containment helper folds case on both sides.
    #[test]
    fn helper_folds_both_sides() {
        assert!(ignore_case_contains("Grand Total", "TOTAL"));
        assert!(ignore_case_contains("GRAND TOTAL", "total"));
        assert!(!ignore_case_contains("grand", "total"));
    }
}
