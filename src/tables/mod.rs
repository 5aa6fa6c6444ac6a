//! # Relational Splitter
//!
//! Decomposes the denormalized export into three tables keyed by synthetic
//! dense indices:
//!
//! | Table | Row identity | Attributes |
//! |-------|--------------|------------|
//! | [`SampleTable`] | `Sample Index` | `Swab ID` |
//! | [`PrecursorTable`] | `Sample Index`, `Precursor Index` | RT, total area, background, widths, library score |
//! | [`TransitionTable`] | `Sample Index`, `Precursor Index`, fragment ion | per-fragment measurements |
//!
//! Sample indices enumerate distinct file names and precursor indices enumerate
//! distinct (sequence, charge) pairs, both in order of first appearance so that
//! identical input always yields identical indices.

use std::fmt;

use crate::frame::FrameError;

mod index;
mod patient;
mod split;

#[cfg(test)]
mod tests;

pub use index::{
    KeyIndex, PrecursorIndex, PrecursorIndexMap, PrecursorKey, SampleIndex, SampleIndexMap,
};
pub use patient::PatientSampleMapping;
pub use split::{
    split, transition_id, PrecursorTable, SampleTable, SplitTables, TransitionTable,
};

/// The normalized tables, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Sample-level table
    Sample,
    /// Precursor-level table
    Precursor,
    /// Transition-level table
    Transition,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Sample => write!(f, "sample"),
            TableKind::Precursor => write!(f, "precursor"),
            TableKind::Transition => write!(f, "transition"),
        }
    }
}

/// Errors raised while splitting records into tables
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    /// Row count of a table differs from its invariant
    #[error("Unexpected number of rows in {table} table: expected {expected}, found {actual}")]
    Cardinality {
        /// Offending table
        table: TableKind,
        /// Row count required by the invariant
        expected: usize,
        /// Row count after de-duplication
        actual: usize,
    },

    /// A record did not match its own index entry
    #[error("Record at line {line} has no {index} entry")]
    UnmatchedKey {
        /// Index column name
        index: &'static str,
        /// 1-based line in the export
        line: u64,
    },

    /// Column bookkeeping error
    #[error(transparent)]
    Frame(#[from] FrameError),
}
