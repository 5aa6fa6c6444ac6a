//! # mzfeatures
//!
//! Command-line front end for building feature matrices from Skyline exports.
//!
//! ## Usage
//!
//! ```bash
//! # Feature matrix as Parquet, plus the patient mapping
//! mzfeatures extract export.csv -o features.parquet --mapping patients.json
//!
//! # Link PCR outcomes to the matrix rows
//! mzfeatures link pcr_results.csv --mapping patients.json -o outcome.csv
//!
//! # Inspect an export
//! mzfeatures info export.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
