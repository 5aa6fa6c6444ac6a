use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mzfeatures::writer::OutputFormat;
use std::path::PathBuf;

mod config;
mod extract;
mod info;
mod link;

/// mzfeatures - Feature matrices from Skyline transition reports
#[derive(Parser)]
#[command(name = "mzfeatures")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Feature matrix file format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    /// `;`-separated text
    Csv,
    /// Apache Parquet
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature matrix of a Skyline export
    Extract {
        /// Skyline export (;-separated, ,-decimal)
        #[arg(value_name = "EXPORT")]
        input: PathBuf,

        /// Output file (defaults to <EXPORT stem>.features.<format>)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Transition identifier to leave out, e.g. 7_y10 (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "ID")]
        exclude: Vec<String>,

        /// Fail on transitions missing in some samples instead of excluding them
        #[arg(long)]
        no_derive_exclusions: bool,

        /// Write the patient → sample mapping to this JSON file
        #[arg(short, long, value_name = "FILE")]
        mapping: Option<PathBuf>,

        // === Advanced tuning flags (hidden from --help) ===
        /// Compression level for ZSTD (1-22)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<i32>,

        /// Samples per Parquet row group
        #[arg(short = 'r', long, hide = true)]
        row_group_size: Option<usize>,
    },

    /// Link a PCR outcome table to the samples of an extraction
    Link {
        /// Outcome table (;-separated: patient, ct1, ct2, ct3, outcome)
        #[arg(value_name = "OUTCOME")]
        input: PathBuf,

        /// Patient → sample mapping written by `extract --mapping`
        #[arg(short, long, value_name = "FILE")]
        mapping: PathBuf,

        /// Output file for the linked rows (stdout when omitted)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Display the import summary of a Skyline export
    Info {
        /// Skyline export file path
        #[arg(value_name = "EXPORT")]
        input: PathBuf,

        /// Load import settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            input,
            output,
            format,
            config,
            exclude,
            no_derive_exclusions,
            mapping,
            compression_level,
            row_group_size,
        } => extract::run(
            input,
            output,
            format.map(OutputFormat::from),
            config,
            exclude,
            no_derive_exclusions,
            mapping,
            compression_level,
            row_group_size,
        ),
        Commands::Link {
            input,
            mapping,
            output,
        } => link::run(input, mapping, output),
        Commands::Info {
            input,
            config,
            json,
        } => info::run(input, config, json),
    }
}
