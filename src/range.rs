//! Positional slicing of insertion-ordered maps.

use core::hash::{BuildHasher, Hash};
use indexmap::IndexMap;
use thiserror::Error;

/// Validation failures for positional slicing. Each precondition is reported
/// distinctly and checked before any entry is copied.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RangeError {
    /// `index` does not address an entry (`index + 1 > len`). Raised for any
    /// index on an empty map.
    #[error("start index {index} is out of bounds for a map of {len} entries")]
    StartOutOfBounds { index: usize, len: usize },
    /// Fewer than `count` entries remain at `index`.
    #[error("count {count} exceeds the {available} entries available at index {index}")]
    CountOutOfBounds {
        index: usize,
        count: usize,
        available: usize,
    },
    /// `count_to_skip` exceeds the size of the map.
    #[error("cannot skip {count_to_skip} entries of a map of {len}")]
    SkipOutOfBounds { count_to_skip: usize, len: usize },
}

/// Contiguous positional extraction.
pub trait RangeSlice: Sized {
    /// Returns a new map holding the `count` entries starting at insertion
    /// position `index`, in source order. `count == 0` with a valid `index`
    /// yields an empty map.
    fn slice_range(&self, index: usize, count: usize) -> Result<Self, RangeError>;

    /// Returns a new map holding everything after the first `count_to_skip`
    /// entries. Skipping the whole map yields an empty one.
    fn skip_first(&self, count_to_skip: usize) -> Result<Self, RangeError>;
}

impl<K, V, S> RangeSlice for IndexMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn slice_range(&self, index: usize, count: usize) -> Result<Self, RangeError> {
        let len = self.len();
        if index >= len {
            return Err(RangeError::StartOutOfBounds { index, len });
        }
        if len - index < count {
            return Err(RangeError::CountOutOfBounds {
                index,
                count,
                available: len - index,
            });
        }

        let mut ranged = IndexMap::with_capacity_and_hasher(count, self.hasher().clone());
        for (k, v) in self.iter().skip(index).take(count) {
            ranged.insert(k.clone(), v.clone());
        }
        Ok(ranged)
    }

    fn skip_first(&self, count_to_skip: usize) -> Result<Self, RangeError> {
        let len = self.len();
        if count_to_skip > len {
            return Err(RangeError::SkipOutOfBounds { count_to_skip, len });
        }
        // Skipping everything cannot be expressed through slice_range: an index
        // equal to len is a start violation there.
        if count_to_skip == len {
            return Ok(IndexMap::with_hasher(self.hasher().clone()));
        }
        self.slice_range(count_to_skip, len - count_to_skip)
    }
}
