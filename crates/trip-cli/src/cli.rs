//! CLI argument definitions for the trip-record preprocessor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use trip_model::columns;

#[derive(Parser)]
#[command(
    name = "tripprep",
    version,
    about = "Trip-record preprocessor - build a model-ready feature table",
    long_about = "Preprocess a columnar trip-record dataset into a model-ready feature table.\n\n\
                  Loads only the needed columns, derives datetime features, filters invalid\n\
                  records with one combined mask, narrows column types and writes compressed\n\
                  Parquet. Leakage columns are never read from storage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the preprocessing pipeline.
    Preprocess(PreprocessArgs),

    /// Print the columns physically present in a Parquet file.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct PreprocessArgs {
    /// Input Parquet file.
    #[arg(value_name = "INPUT", default_value = columns::DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// Output Parquet file.
    #[arg(value_name = "OUTPUT", default_value = columns::DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Run every stage and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a machine-readable run report to PATH.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Parquet file to inspect.
    #[arg(value_name = "INPUT", default_value = columns::DEFAULT_INPUT_PATH)]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
