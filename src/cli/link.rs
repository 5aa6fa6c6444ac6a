use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use mzfeatures::outcome::OutcomeImport;
use mzfeatures::tables::PatientSampleMapping;

/// Link an outcome table to sample indices and write the linked rows
pub fn run(input: PathBuf, mapping: PathBuf, output: Option<PathBuf>) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let json = std::fs::read_to_string(&mapping)
        .with_context(|| format!("Failed to read mapping file: {}", mapping.display()))?;
    let mapping = PatientSampleMapping::from_json(&json).context("Failed to parse patient mapping")?;
    info!("Loaded mapping for {} patients", mapping.len());

    let outcome = OutcomeImport::from_path(&input, &mapping)
        .with_context(|| format!("Failed to read outcome table {}", input.display()))?;

    let unlinked = outcome.unlinked_patients();
    if !unlinked.is_empty() {
        warn!(
            "{} of {} patients have no measured sample",
            unlinked.len(),
            outcome.len()
        );
    }

    let written = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            outcome.write_linked_csv(BufWriter::new(file))?
        }
        None => outcome.write_linked_csv(io::stdout().lock())?,
    };

    if let Some(path) = &output {
        println!("{} linked rows → {}", written, path.display());
    }
    Ok(())
}
