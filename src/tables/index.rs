use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Dense zero-based sample identifier
pub type SampleIndex = usize;

/// Dense zero-based precursor identifier
pub type PrecursorIndex = usize;

/// A peptide at a given charge state
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrecursorKey {
    /// Peptide sequence including modifications
    pub sequence: String,
    /// Precursor charge state
    pub charge: i32,
}

impl PrecursorKey {
    /// Create a precursor key
    pub fn new(sequence: impl Into<String>, charge: i32) -> Self {
        Self {
            sequence: sequence.into(),
            charge,
        }
    }
}

impl fmt::Display for PrecursorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}+", self.sequence, self.charge)
    }
}

/// Bijection between keys and dense indices, assigned in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyIndex<K: Hash + Eq> {
    keys: IndexSet<K>,
}

/// File name ↔ [`SampleIndex`]
pub type SampleIndexMap = KeyIndex<String>;

/// (sequence, charge) ↔ [`PrecursorIndex`]
pub type PrecursorIndexMap = KeyIndex<PrecursorKey>;

impl<K: Hash + Eq> KeyIndex<K> {
    /// Enumerate distinct keys in order of first appearance
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if no key was seen
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index assigned to `key`
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.keys.get_index_of(key)
    }

    /// Key with the given index
    pub fn key(&self, index: usize) -> Option<&K> {
        self.keys.get_index(index)
    }

    /// `(index, key)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &K)> {
        self.keys.iter().enumerate()
    }
}

impl<K: Hash + Eq> Default for KeyIndex<K> {
    fn default() -> Self {
        Self {
            keys: IndexSet::new(),
        }
    }
}
