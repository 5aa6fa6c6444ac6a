/// Errors that can occur while reading and normalizing a Skyline export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error reading the export file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV framing error (wrong field count, invalid UTF-8, ...)
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Missing required column in the export header
    #[error("Missing required export column: {0}")]
    MissingColumn(String),

    /// Absent value in a column that must be complete
    #[error("Unexpected missing value in column '{column}' (line {line})")]
    MissingValue {
        /// Column name
        column: String,
        /// 1-based line in the export
        line: u64,
    },

    /// Value that cannot be parsed into the column's type
    #[error("Invalid value '{value}' in column '{column}' (line {line})")]
    InvalidValue {
        /// Column name
        column: String,
        /// Offending cell content
        value: String,
        /// 1-based line in the export
        line: u64,
    },

    /// Categorical value outside its fixed mapping
    #[error("Unknown {column} value '{value}' (line {line}), expected one of: {expected}")]
    UnknownCategory {
        /// Column name
        column: String,
        /// Offending label
        value: String,
        /// Accepted labels, comma separated
        expected: String,
        /// 1-based line in the export
        line: u64,
    },

    /// No record left after dropping rows without a file name
    #[error("Export contains no records with a file name")]
    NoRecords,
}

impl ExportError {
    pub(crate) fn invalid(column: &str, value: &str, line: u64) -> Self {
        Self::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
            line,
        }
    }
}
