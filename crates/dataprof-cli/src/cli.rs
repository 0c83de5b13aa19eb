//! CLI argument definitions for the dataset profiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dataprof",
    version,
    about = "Dataset profiler - column statistics, PII discovery, rule validation",
    long_about = "Profile tabular datasets (CSV, TSV, Excel).\n\n\
                  Produces per-column descriptive statistics, PII likelihood scores\n\
                  from pattern and entity-recognition signals, and rule-validation\n\
                  reports, cached as JSON artifacts in a per-dataset folder."
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

    /// Allow cell values in log output.
    ///
    /// Off by default: profiled data may contain personal information, so
    /// row-level values are replaced with a redaction token in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile a dataset and cache its report artifacts.
    Profile(ProfileArgs),

    /// Manage per-column validation rules.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Path to the dataset file (csv, tsv, tab, xls, xlsx, xlsm, xlsb).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dataset title, names the artifact folder (default: file stem).
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Column holding the record identifier.
    #[arg(long = "id-column", value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Column holding the record label.
    #[arg(long = "label-column", value_name = "COLUMN")]
    pub label_column: Option<String>,

    /// Treat the dataset as a user upload (stored under the upload root).
    #[arg(long = "uploaded")]
    pub uploaded: bool,

    /// Root folder for bundled dataset artifacts.
    #[arg(long = "data-root", value_name = "DIR", default_value = "data")]
    pub data_root: PathBuf,

    /// Root folder for uploaded dataset artifacts.
    #[arg(long = "upload-root", value_name = "DIR", default_value = "uploads")]
    pub upload_root: PathBuf,

    /// Rule store file.
    #[arg(long = "rules", value_name = "PATH", default_value = "rules.json")]
    pub rule_store: PathBuf,
}

#[derive(Parser)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Assign rules to a column (set union with existing assignments).
    Add(RuleEditArgs),

    /// Unassign rules from a column (set difference).
    Remove(RuleEditArgs),

    /// List the rule assignments stored for a dataset.
    List(RuleListArgs),
}

#[derive(Parser)]
pub struct RuleEditArgs {
    /// Dataset title the rules apply to.
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Column the rules apply to.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Rule names: built-ins ("Non Empty", "Alphanumeric Only",
    /// "Numeric Only", "Exact Length N") or stored regex names.
    #[arg(value_name = "RULE", required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Regex pattern to store under the (single) rule name being added.
    #[arg(long = "pattern", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Human-readable violation message for the stored regex.
    #[arg(long = "description", value_name = "TEXT", requires = "pattern")]
    pub description: Option<String>,

    /// Rule store file.
    #[arg(long = "rules", value_name = "PATH", default_value = "rules.json")]
    pub rule_store: PathBuf,
}

#[derive(Parser)]
pub struct RuleListArgs {
    /// Dataset title to list rules for.
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Rule store file.
    #[arg(long = "rules", value_name = "PATH", default_value = "rules.json")]
    pub rule_store: PathBuf,
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
