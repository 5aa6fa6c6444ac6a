//! # mzfeatures - Feature Matrices from Skyline Exports
//!
//! `mzfeatures` turns a targeted proteomics transition report exported by
//! Skyline into a flat numeric feature matrix with one row per sample, ready for
//! classification models. PCR outcome tables can be linked to the same rows.
//!
//! ## Pipeline
//!
//! ```text
//! Skyline export (;-separated, ,-decimal)
//!   └─ export:   normalize rows, fill gaps, map categories
//!       └─ tables:   split into sample / precursor / transition tables
//!           └─ features: log10(x + 1) intensities, background ratios
//!               └─ pivot:    one column block per precursor and per transition
//!                   └─ matrix:   sample attributes | precursors | transitions
//! ```
//!
//! Sample and precursor indices are assigned in order of first appearance, so
//! the same export always yields the same matrix.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mzfeatures::prelude::*;
//!
//! let config = ImportConfig::default();
//! let import = FeatureImport::from_path("skyline_export.csv", &config)?;
//!
//! let matrix = import.features();
//! println!("{} samples × {} features", matrix.n_samples(), matrix.n_features());
//!
//! let outcome = OutcomeImport::from_path("pcr_results.csv", import.patient_sample_mapping())?;
//! for record in outcome.linked() {
//!     println!("{:?} {:?}", record.sample_index, record.outcome);
//! }
//!
//! write_parquet_file("features.parquet", matrix, FeatureMatrixWriterConfig::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Failure Model
//!
//! Every stage either produces its complete output or fails the whole import.
//! [`ImportError::kind`](import::ImportError::kind) classifies failures into
//! data integrity, structural cardinality, key mapping and input errors.

// Documentation lints
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod columns;
pub mod config;
pub mod export;
pub mod features;
pub mod frame;
pub mod import;
pub mod matrix;
pub mod outcome;
pub mod pivot;
pub mod tables;
pub mod writer;

#[cfg(test)]
mod testing;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::ImportConfig;
    pub use crate::export::{ExportError, SkylineExport, SkylineRecord};
    pub use crate::import::{ErrorKind, FeatureImport, ImportError, ImportSummary};
    pub use crate::matrix::FeatureMatrix;
    pub use crate::outcome::{OutcomeError, OutcomeImport, OutcomeRecord};
    pub use crate::tables::{
        PatientSampleMapping, PrecursorIndex, PrecursorIndexMap, PrecursorKey, SampleIndex,
        SampleIndexMap,
    };
    pub use crate::writer::{
        write_csv, write_csv_file, write_parquet_file, FeatureMatrixWriter,
        FeatureMatrixWriterConfig, OutputFormat, WriterError,
    };
}
