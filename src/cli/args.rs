//! CLI argument definitions.

use crate::config::OutputFormat;
use crate::timeline::FilterPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Extract clip metadata from NLE timeline XML exports.
#[derive(Debug, Parser)]
#[command(name = "clipscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Timeline XML files or directories to scan.
    pub inputs: Vec<PathBuf>,

    /// Common options for extraction.
    #[command(flatten)]
    pub extract: ExtractArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Convert a saved text report into a table.
    Export {
        /// Text report produced by a previous extraction.
        report: PathBuf,
        /// Output file (`.csv` or `.json`; default: report path with `.csv`).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Omit the UTF-8 byte order mark from CSV output.
        #[arg(long)]
        no_csv_bom: bool,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExtractArgs {
    /// Output formats (comma-separated: text,csv,json).
    #[arg(short, long, value_delimiter = ',', env = "CLIPSCAN_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "CLIPSCAN_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Clip name filter policy (legacy, any-media, exclude-media).
    #[arg(long, env = "CLIPSCAN_POLICY")]
    pub policy: Option<FilterPolicy>,

    /// Print the text report to stdout instead of writing files.
    #[arg(long)]
    pub stdout: bool,

    /// Rewrite outputs even if they already exist.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Omit the UTF-8 byte order mark from CSV output.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}
