//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use atlas::ExportFormat;

/// Atlas: cell-level data quality checks for CSV/TSV files
#[derive(Parser)]
#[command(name = "atlas")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a data file and report its findings
    Check {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of flagged cells to list
        #[arg(long, default_value = "20")]
        cells: usize,

        /// Outlier threshold in standard deviations
        #[arg(long)]
        sigma: Option<f64>,

        /// Delta degrees of freedom for the standard deviation
        #[arg(long)]
        ddof: Option<usize>,

        /// JSON file with outlier settings
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Write the dataset back out as CSV or TSV
    Export {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: updated_data.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// Change one cell, revalidate and optionally save
    Edit {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Row index (0-based, header excluded)
        #[arg(long)]
        row: usize,

        /// Column name or 0-based index
        #[arg(long)]
        column: String,

        /// New value (empty or NA for missing)
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Save the edited dataset here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Outlier threshold in standard deviations
        #[arg(long)]
        sigma: Option<f64>,

        /// Delta degrees of freedom for the standard deviation
        #[arg(long)]
        ddof: Option<usize>,

        /// JSON file with outlier settings
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Csv => ExportFormat::Csv,
            OutputFormat::Tsv => ExportFormat::Tsv,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            _ => Err(format!("Unknown format: {}. Use csv or tsv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
        }
    }
}
