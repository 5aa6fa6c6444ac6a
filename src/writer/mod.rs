//! # Feature Matrix Writers
//!
//! Persists a [`FeatureMatrix`](crate::matrix::FeatureMatrix) for downstream
//! modelling.
//!
//! - **CSV**: `;`-separated text with a leading `Sample Index` column.
//! - **Parquet**: one `UInt64` `Sample Index` column followed by one `Float64`
//!   column per feature, ZSTD compressed, with the crate version and feature
//!   count in the footer's key-value metadata.

mod config;
mod delimited;
mod error;
mod parquet_writer;
mod stats;


pub use config::{CompressionType, FeatureMatrixWriterConfig, OutputFormat};
pub use delimited::{write_csv, write_csv_file, CSV_DELIMITER};
pub use error::WriterError;
pub use parquet_writer::{
    feature_matrix_schema, write_parquet_file, FeatureMatrixWriter, FEATURES_KEY,
    INDEX_COLUMN_KEY, VERSION_KEY,
};
pub use stats::FeatureMatrixWriterStats;
