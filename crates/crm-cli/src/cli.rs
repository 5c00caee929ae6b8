//! CLI argument definitions for the customer importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crm-import",
    version,
    about = "Bulk customer import with automatic column detection",
    long_about = "Import customer spreadsheets exported as comma-delimited text.\n\n\
                  Header columns are matched to customer fields by name, so files\n\
                  from different shops and tools can be imported without manual mapping."
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

    /// Allow customer values (names, phones) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List customer fields and the header spellings recognized for each.
    Fields(FieldsArgs),

    /// Show which column of a file each customer field was detected in.
    Detect(DetectArgs),

    /// Import one or more files and plan the customers to create.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// JSON file with extra header spellings per field.
    #[arg(long = "synonyms", value_name = "PATH")]
    pub synonyms: Option<PathBuf>,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// File to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON file with extra header spellings per field.
    #[arg(long = "synonyms", value_name = "PATH")]
    pub synonyms: Option<PathBuf>,

    /// Largest accepted file size in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES")]
    pub max_file_size: Option<u64>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Files or directories of `.csv`/`.txt` files to import.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// JSON file with extra header spellings per field.
    #[arg(long = "synonyms", value_name = "PATH")]
    pub synonyms: Option<PathBuf>,

    /// CSV of existing customers; rows with a known phone are skipped.
    #[arg(long = "existing", value_name = "PATH")]
    pub existing: Option<PathBuf>,

    /// Write the import plan as JSON to this file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the import plan as JSON instead of the summary tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Largest accepted file size in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Calling code used for local phone numbers.
    #[arg(long = "country-code", value_name = "CODE", default_value = "255")]
    pub country_code: String,
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
