//! Rename-retry engine: bounded alternate-key generation for string-keyed
//! maps.
//!
//! A colliding key is extended by a suffix to form the next candidate. The
//! first suffix is caller-controlled (defaulting to
//! [`DEFAULT_RENAMED_KEY_SUFFIX`]); every later suffix is `_{tick}` drawn
//! from a [`TickSource`]. The loop performs exactly `retry_attempts + 1`
//! containment checks and inserts at most once, so a failed run leaves the
//! map untouched.

use crate::ticks::{SystemTicks, TickSource};
use core::hash::BuildHasher;
use indexmap::IndexMap;
use thiserror::Error;

/// Suffix appended on the first rename attempt when none is supplied.
pub const DEFAULT_RENAMED_KEY_SUFFIX: &str = "_RenamedKey";

/// Smallest accepted retry budget.
pub const MIN_RENAME_RETRY_ATTEMPTS: usize = 1;

/// Retry budget used by [`RenameKey::add_or_rename_key`].
pub const DEFAULT_RENAME_RETRY_ATTEMPTS: usize = 5;

/// Rejected retry budget. The engine needs at least one retry beyond the
/// first attempt; the check runs before any mutation.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("rename retry budget {retry_attempts} is below the minimum of {MIN_RENAME_RETRY_ATTEMPTS}")]
pub struct RetryBudgetError {
    pub retry_attempts: usize,
}

/// Insert-or-rename operations for string-keyed maps.
pub trait RenameKey<V> {
    /// Inserts `(key, value)`, renaming the key on collision, with the
    /// default suffix, the default retry budget, and [`SystemTicks`].
    ///
    /// Returns the key the entry was stored under, or `None` when every
    /// candidate within the budget collided (the map is then unchanged).
    fn add_or_rename_key(&mut self, key: String, value: V) -> Option<String>;

    /// As [`add_or_rename_key`](RenameKey::add_or_rename_key), with an
    /// explicit first suffix (`None` or empty falls back to
    /// [`DEFAULT_RENAMED_KEY_SUFFIX`]), retry budget, and tick source.
    ///
    /// On success the applied key is the original key extended by the chain
    /// of suffixes tried so far. Only the first suffix is deterministic;
    /// later candidates depend on the tick source, so callers should assert
    /// structure (prefix, uniqueness) rather than exact text unless the tick
    /// source is scripted.
    fn add_or_rename_key_with<T: TickSource>(
        &mut self,
        key: String,
        value: V,
        suffix: Option<&str>,
        retry_attempts: usize,
        ticks: &T,
    ) -> Result<Option<String>, RetryBudgetError>;
}

impl<V, S> RenameKey<V> for IndexMap<String, V, S>
where
    S: BuildHasher,
{
    fn add_or_rename_key(&mut self, key: String, value: V) -> Option<String> {
        rename_loop(
            self,
            key,
            value,
            DEFAULT_RENAMED_KEY_SUFFIX,
            DEFAULT_RENAME_RETRY_ATTEMPTS,
            &SystemTicks,
        )
    }

    fn add_or_rename_key_with<T: TickSource>(
        &mut self,
        key: String,
        value: V,
        suffix: Option<&str>,
        retry_attempts: usize,
        ticks: &T,
    ) -> Result<Option<String>, RetryBudgetError> {
        if retry_attempts < MIN_RENAME_RETRY_ATTEMPTS {
            return Err(RetryBudgetError { retry_attempts });
        }
        let suffix = match suffix {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_RENAMED_KEY_SUFFIX,
        };
        Ok(rename_loop(self, key, value, suffix, retry_attempts, ticks))
    }
}

// First attempt plus `retry_attempts` renamed candidates. The single insert
// only happens on a free slot, which is what makes failure mutation-free.
fn rename_loop<V, S, T>(
    map: &mut IndexMap<String, V, S>,
    mut key: String,
    value: V,
    suffix: &str,
    retry_attempts: usize,
    ticks: &T,
) -> Option<String>
where
    S: BuildHasher,
    T: TickSource,
{
    let mut suffix = suffix.to_string();
    let mut attempts_left = retry_attempts + 1;
    while attempts_left > 0 {
        if !map.contains_key(&key) {
            map.insert(key.clone(), value);
            return Some(key);
        }
        key.push_str(&suffix);
        suffix = format!("_{}", ticks.ticks());
        attempts_left -= 1;
    }
    None
}
