use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use mzfeatures::import::FeatureImport;
use mzfeatures::writer::{
    write_csv_file, write_parquet_file, CompressionType, FeatureMatrixWriterConfig, OutputFormat,
    CSV_DELIMITER,
};

use super::config::Config;

/// Build the feature matrix of a Skyline export and write it to disk
#[allow(clippy::too_many_arguments)]
pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
    exclude: Vec<String>,
    no_derive_exclusions: bool,
    mapping: Option<PathBuf>,
    compression_level: Option<i32>,
    row_group_size: Option<usize>,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let mut import_config = config.import;
    import_config.excluded_transitions.extend(exclude);
    if no_derive_exclusions {
        import_config = import_config.without_derived_exclusions();
    }

    let format = format
        .or(config.output.format)
        .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or_default();
    let output = output.unwrap_or_else(|| default_output(&input, format));
    let mapping = mapping.or(config.output.mapping);

    info!("mzfeatures - Skyline export to feature matrix");
    info!("=============================================");
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());
    info!("Format: {}", format.extension());
    if !import_config.excluded_transitions.is_empty() {
        info!(
            "Configured exclusions: {}",
            import_config.excluded_transitions.join(", ")
        );
    }

    let import = FeatureImport::from_path(&input, &import_config)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    let matrix = import.features();

    match format {
        OutputFormat::Csv => {
            write_csv_file(&output, matrix, CSV_DELIMITER)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        OutputFormat::Parquet => {
            let mut writer_config = FeatureMatrixWriterConfig::default();
            if let Some(level) = compression_level.or(config.output.compression_level) {
                writer_config.compression = CompressionType::Zstd(level);
            }
            if let Some(size) = row_group_size.or(config.output.row_group_size) {
                writer_config.row_group_size = size;
            }
            let stats = write_parquet_file(&output, matrix, writer_config)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("{}", stats);
        }
    }

    if let Some(path) = mapping {
        let json = import
            .patient_sample_mapping()
            .to_json()
            .context("Failed to serialize patient mapping")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write mapping file: {}", path.display()))?;
        info!("Patient mapping: {}", path.display());
    }

    let summary = import.summary();
    info!("Extraction complete!");
    info!("  {}", summary);
    if summary.derived_exclusions > 0 {
        info!(
            "  {} transitions excluded as incomplete",
            summary.derived_exclusions
        );
    }

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );

    println!(
        "{} samples × {} features → {}",
        matrix.n_samples(),
        matrix.n_features(),
        output.display()
    );

    Ok(())
}

/// `<stem>.features.<ext>` next to the input
fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}.features.{}", stem, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("/data/run1.csv"), OutputFormat::Csv),
            PathBuf::from("/data/run1.features.csv")
        );
        assert_eq!(
            default_output(Path::new("run1.tsv"), OutputFormat::Parquet),
            PathBuf::from("run1.features.parquet")
        );
    }
}
