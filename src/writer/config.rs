use std::collections::BTreeMap;
use std::path::Path;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;
use serde::{Deserialize, Serialize};

use crate::columns::SAMPLE_INDEX;

/// Compression options for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression at the given level
    Zstd(i32),
    /// Snappy compression
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Output file format of the feature matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `;`-separated text
    Csv,
    /// Apache Parquet
    #[default]
    Parquet,
}

impl OutputFormat {
    /// File extension used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Format implied by a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(OutputFormat::Csv),
            "parquet" | "pq" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }
}

/// Configuration for the Parquet feature matrix writer
#[derive(Debug, Clone)]
pub struct FeatureMatrixWriterConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Maximum rows (samples) per row group
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write column chunk statistics
    pub write_statistics: bool,

    /// BYTE_STREAM_SPLIT encoding for the feature columns
    pub use_byte_stream_split: bool,
}

impl Default for FeatureMatrixWriterConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 10_000,
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: false,
        }
    }
}

impl FeatureMatrixWriterConfig {
    /// Create writer properties for a matrix with the given feature columns
    pub(super) fn to_writer_properties(
        &self,
        feature_names: &[&str],
        metadata: &BTreeMap<String, String>,
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size)
            .set_dictionary_enabled(false);

        builder = builder.set_column_encoding(
            ColumnPath::new(vec![SAMPLE_INDEX.to_string()]),
            Encoding::DELTA_BINARY_PACKED,
        );

        if self.use_byte_stream_split {
            for name in feature_names {
                builder = builder.set_column_encoding(
                    ColumnPath::new(vec![name.to_string()]),
                    Encoding::BYTE_STREAM_SPLIT,
                );
            }
        }

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}
