//! Multi-entry merging: whole-source ranges and multi-source joins.

use crate::policy::{CollisionPolicy, PolicyAdd};
use crate::upsert::Upsert;
use core::hash::{BuildHasher, Hash};
use indexmap::IndexMap;
use thiserror::Error;

/// Validation failure for [`MergeRange::join_many`].
#[derive(Debug, Error, Eq, PartialEq)]
pub enum JoinError {
    /// The source at `position` was absent while missing sources were not
    /// allowed. Sources before `position` have already been merged.
    #[error("source at position {position} is missing and missing sources are not allowed")]
    MissingSource { position: usize },
}

/// Merging one or more source maps into `self`.
pub trait MergeRange: Sized {
    /// Merges every entry of `range` into `self`.
    ///
    /// `None` is a no-op returning `false`; an empty source is a no-op
    /// returning `true`. When `update_if_key_exists` is unset the source is
    /// pre-scanned and any collision aborts before mutation, so the merge is
    /// atomic-or-nothing; when set, colliding entries overwrite in place.
    fn try_add_range_or_update(&mut self, range: Option<&Self>, update_if_key_exists: bool)
        -> bool;

    /// Merges `sources` into `self` in order, each via
    /// [`try_add_range_or_update`](MergeRange::try_add_range_or_update).
    ///
    /// A missing (`None`) source is skipped when `allow_missing_sources` is
    /// set; otherwise the call fails fast and sources merged before the
    /// failure stay merged.
    ///
    /// Per-source merge outcomes are not reported: when
    /// `update_if_key_exists` is unset, a source colliding with the target
    /// is dropped wholesale while the join itself still succeeds and later
    /// sources still merge.
    fn join_many(
        &mut self,
        update_if_key_exists: bool,
        allow_missing_sources: bool,
        sources: &[Option<&Self>],
    ) -> Result<(), JoinError>;
}

impl<K, V, S> MergeRange for IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn try_add_range_or_update(
        &mut self,
        range: Option<&Self>,
        update_if_key_exists: bool,
    ) -> bool {
        let Some(range) = range else {
            return false;
        };

        if !range.is_empty() {
            if !update_if_key_exists && range.keys().any(|k| self.contains_key(k)) {
                return false;
            }
            for (k, v) in range {
                self.try_add_or_update(k.clone(), v.clone(), update_if_key_exists);
            }
        }

        true
    }

    fn join_many(
        &mut self,
        update_if_key_exists: bool,
        allow_missing_sources: bool,
        sources: &[Option<&Self>],
    ) -> Result<(), JoinError> {
        for (position, source) in sources.iter().enumerate() {
            match source {
                Some(source) => {
                    self.try_add_range_or_update(Some(source), update_if_key_exists);
                }
                None if allow_missing_sources => {}
                None => return Err(JoinError::MissingSource { position }),
            }
        }
        Ok(())
    }
}

/// Policy-driven bulk add for string-keyed maps.
pub trait PolicyMergeRange: Sized {
    /// Merges `range` into `self` under `policy`.
    ///
    /// `TryAdd` is atomic-or-nothing and `Update` applies every entry, both
    /// through [`MergeRange::try_add_range_or_update`]. `Rename` commits
    /// entry by entry in source order and is **not atomic**: when a rename
    /// exhausts its retries the call returns `false` but entries committed
    /// before the failure remain in `self`.
    fn try_add_range(&mut self, range: Option<&Self>, policy: CollisionPolicy) -> bool;
}

impl<V, S> PolicyMergeRange for IndexMap<String, V, S>
where
    V: Clone,
    S: BuildHasher,
{
    fn try_add_range(&mut self, range: Option<&Self>, policy: CollisionPolicy) -> bool {
        let Some(range) = range else {
            return false;
        };

        if range.is_empty() {
            return true;
        }
        match policy {
            CollisionPolicy::TryAdd => self.try_add_range_or_update(Some(range), false),
            CollisionPolicy::Update => self.try_add_range_or_update(Some(range), true),
            CollisionPolicy::Rename => {
                for (k, v) in range {
                    if self
                        .add_with_policy(k.clone(), v.clone(), CollisionPolicy::Rename)
                        .is_none()
                    {
                        return false;
                    }
                }
                true
            }
        }
    }
}
