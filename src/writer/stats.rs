use std::fmt;

/// Statistics from a completed feature matrix write
#[derive(Debug, Clone)]
pub struct FeatureMatrixWriterStats {
    /// Number of sample rows written
    pub samples_written: usize,
    /// Number of feature columns per row
    pub features: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total size of the row groups in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for FeatureMatrixWriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} samples × {} features in {} row groups",
            self.samples_written, self.features, self.row_groups_written
        )
    }
}
