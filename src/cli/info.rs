use anyhow::{Context, Result};
use std::path::PathBuf;

use mzfeatures::import::FeatureImport;

use super::config::Config;

/// Display the import summary of a Skyline export
pub fn run(input: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("File does not exist: {}", input.display());
    }

    let config = match config {
        Some(path) => Config::from_file(&path)?,
        None => Config::default(),
    };

    let import = FeatureImport::from_path(&input, &config.import)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    let summary = import.summary();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("Failed to serialize summary")?
        );
        return Ok(());
    }

    println!("Skyline Export Information");
    println!("==========================");
    println!("File: {}", input.display());
    println!();

    println!("Records:");
    println!("  Read: {}", summary.records_read);
    println!("  Dropped (no file name): {}", summary.records_dropped);
    println!("  Filled cells: {}", summary.cells_filled);
    println!();

    println!("Tables:");
    println!("  Samples: {}", summary.samples);
    println!("  Precursors: {}", summary.precursors);
    println!("  Transitions: {}", summary.transitions);
    println!();

    println!("Samples:");
    for (index, name) in import.sample_index().iter() {
        println!("  {:3}. {}", index, name);
    }
    println!();

    println!("Precursors:");
    for (index, key) in import.precursor_index().iter() {
        println!("  {:3}. {}", index, key);
    }
    println!();

    if !summary.excluded_transitions.is_empty() {
        println!(
            "Excluded transitions ({} derived):",
            summary.derived_exclusions
        );
        for id in &summary.excluded_transitions {
            println!("  {}", id);
        }
        println!();
    }

    println!("Feature matrix:");
    println!("  Rows: {}", import.features().n_samples());
    println!("  Features: {}", summary.features);
    println!("  Zeroed ratio values: {}", summary.resolved_non_finite);

    Ok(())
}
