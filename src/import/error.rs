use crate::export::ExportError;
use crate::frame::FrameError;
use crate::matrix::MatrixError;
use crate::pivot::PivotError;
use crate::tables::SplitError;

/// Errors that abort a feature import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Reading or normalizing the export failed
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    /// Relational split failed
    #[error("Split error: {0}")]
    SplitError(#[from] SplitError),

    /// Feature derivation failed
    #[error("Feature derivation error: {0}")]
    FeatureError(#[from] FrameError),

    /// Reshaping failed
    #[error("Reshape error: {0}")]
    PivotError(#[from] PivotError),

    /// Final assembly failed
    #[error("Feature matrix error: {0}")]
    MatrixError(#[from] MatrixError),
}

/// Coarse classification of [`ImportError`]s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing values after filling, holes or duplicates in a pivot, non-finite features
    DataIntegrity,
    /// Table row counts violate their invariants
    StructuralCardinality,
    /// Categorical value outside its fixed mapping
    KeyMapping,
    /// Unreadable input: I/O, CSV framing, missing header, unparseable value
    Input,
    /// Inconsistent intermediate state
    Internal,
}

impl ImportError {
    /// Which class of failure this is
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::ExportError(e) => match e {
                ExportError::MissingValue { .. } => ErrorKind::DataIntegrity,
                ExportError::UnknownCategory { .. } => ErrorKind::KeyMapping,
                ExportError::IoError(_)
                | ExportError::CsvError(_)
                | ExportError::MissingColumn(_)
                | ExportError::InvalidValue { .. }
                | ExportError::NoRecords => ErrorKind::Input,
            },
            ImportError::SplitError(SplitError::Cardinality { .. }) => {
                ErrorKind::StructuralCardinality
            }
            ImportError::SplitError(_) | ImportError::FeatureError(_) => ErrorKind::Internal,
            ImportError::PivotError(e) => pivot_kind(e),
            ImportError::MatrixError(e) => match e {
                MatrixError::NonFinite { .. } => ErrorKind::DataIntegrity,
                MatrixError::Alignment(e) => pivot_kind(e),
                MatrixError::Frame(_) => ErrorKind::Internal,
            },
        }
    }
}

fn pivot_kind(error: &PivotError) -> ErrorKind {
    match error {
        PivotError::MissingValue { .. } | PivotError::DuplicateEntry { .. } => {
            ErrorKind::DataIntegrity
        }
        PivotError::SampleOutOfRange { .. }
        | PivotError::LengthMismatch { .. }
        | PivotError::Frame(_) => ErrorKind::Internal,
    }
}
