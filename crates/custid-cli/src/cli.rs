//! CLI argument definitions for the customer identity resolver.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Config file consulted when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "custid.toml";

#[derive(Parser)]
#[command(
    name = "custid",
    version,
    about = "Resolve partially redacted customer names against known customers",
    long_about = "Resolve partially redacted customer names (for example `f***iaawindy`)\n\
                  against previously seen customers so one buyer is not split into many\n\
                  identities across marketplace imports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Resolver config file (default: ./custid.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Allow customer names to appear in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve the customer column of a CSV export.
    Resolve(ResolveArgs),

    /// Show ranked candidates for one customer name.
    Suggest(SuggestArgs),

    /// Report how many known names are redacted.
    Stats(StatsArgs),
}

/// Where historical customer names come from.
#[derive(Args)]
pub struct HistoryArgs {
    /// CSV file of previously imported records.
    #[arg(long = "history", value_name = "CSV")]
    pub history: Option<PathBuf>,

    /// Customer column in the history file.
    #[arg(long = "history-column", value_name = "NAME", default_value = "customer")]
    pub history_column: String,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// CSV export to resolve.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Customer column in the input file.
    #[arg(long = "column", value_name = "NAME", default_value = "customer")]
    pub column: String,

    /// Output file (default: <INPUT>.resolved.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub history: HistoryArgs,

    /// Only accept confirmed matches; never adopt suggestions.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Minimum confidence (0-100) for a match.
    #[arg(long = "min-confidence", value_name = "SCORE")]
    pub min_confidence: Option<f64>,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Customer name to look up, redacted or not.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub history: HistoryArgs,

    /// Maximum candidates listed per bucket.
    #[arg(long = "max-results", value_name = "N")]
    pub max_results: Option<usize>,

    /// Minimum confidence (0-100) for a match.
    #[arg(long = "min-confidence", value_name = "SCORE")]
    pub min_confidence: Option<f64>,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub history: HistoryArgs,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
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
