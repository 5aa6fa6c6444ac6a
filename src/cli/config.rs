//! TOML configuration file support.
//!
//! Settings that would otherwise be repeated on every invocation can live in a
//! config file; command-line flags take precedence:
//!
//! ```toml
//! # mzfeatures.toml
//! [import]
//! derive_incomplete_transitions = true
//! excluded_transitions = ["7_y10", "11_y3"]
//!
//! [output]
//! format = "parquet"
//! compression_level = 9
//! mapping = "patient_samples.json"
//! ```

use anyhow::{Context, Result};
use mzfeatures::config::ImportConfig;
use mzfeatures::writer::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for mzfeatures.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Import settings.
    #[serde(default)]
    pub import: ImportConfig,

    /// Output settings of the extract command.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the extract command's output.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Feature matrix file format.
    pub format: Option<OutputFormat>,

    /// ZSTD compression level (1-22) for Parquet output.
    pub compression_level: Option<i32>,

    /// Samples per Parquet row group.
    pub row_group_size: Option<usize>,

    /// Where to write the patient → sample mapping as JSON.
    pub mapping: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [import]
            derive_incomplete_transitions = false
            excluded_transitions = ["7_y10", "11_y3"]

            [output]
            format = "csv"
            compression_level = 15
            row_group_size = 500
            mapping = "mapping.json"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(!config.import.derive_incomplete_transitions);
        assert_eq!(config.import.excluded_transitions, vec!["7_y10", "11_y3"]);
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.output.compression_level, Some(15));
        assert_eq!(config.output.row_group_size, Some(500));
        assert_eq!(config.output.mapping, Some(PathBuf::from("mapping.json")));
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [import]
            excluded_transitions = ["0_y1"]
        "#;

        let config = Config::from_str(toml).unwrap();
        assert!(config.import.derive_incomplete_transitions);
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.import, ImportConfig::default());
        assert_eq!(config.output.compression_level, None);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let toml = r#"
            [output]
            format = "xlsx"
        "#;
        assert!(Config::from_str(toml).is_err());
    }
}
