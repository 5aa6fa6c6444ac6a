use std::fmt;

use serde::Serialize;

/// Counters of a completed feature import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Data rows in the export
    pub records_read: usize,
    /// Rows dropped for lacking a file name
    pub records_dropped: usize,
    /// Absent values filled with `0.0`
    pub cells_filled: usize,
    /// Distinct samples
    pub samples: usize,
    /// Distinct precursors
    pub precursors: usize,
    /// Transition rows
    pub transitions: usize,
    /// Transition identifiers left out of the pivot
    pub excluded_transitions: Vec<String>,
    /// How many of the exclusions were derived from incomplete data
    pub derived_exclusions: usize,
    /// Ratio values zeroed in the final cleanup
    pub resolved_non_finite: usize,
    /// Feature matrix columns
    pub features: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Import: {} records ({} dropped, {} filled), {} samples, {} precursors, {} transitions, {} excluded, {} features",
            self.records_read,
            self.records_dropped,
            self.cells_filled,
            self.samples,
            self.precursors,
            self.transitions,
            self.excluded_transitions.len(),
            self.features
        )
    }
}
