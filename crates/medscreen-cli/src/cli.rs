//! CLI argument definitions for the screening assistant.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "medscreen",
    version,
    about = "Medical screening assistant - model-backed prognosis and risk checks",
    long_about = "Run decision-support screenings against locally stored model artifacts.\n\n\
                  Supports hepatitis prognosis, HIV risk, and tuberculosis risk analyses.\n\
                  Predictions are decision support only, never a diagnosis."
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

    /// Allow patient-level values in logs.
    ///
    /// Intake answers are health data. By default they are replaced with a
    /// redaction placeholder in log output; set this only in environments
    /// cleared for it.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one screening request from a JSON file.
    Screen(ScreenArgs),

    /// Show which model artifacts loaded and why the rest failed.
    Models(ModelsArgs),

    /// List the symptom vocabularies of the symptom-driven analyses.
    Symptoms,
}

#[derive(Parser)]
pub struct ScreenArgs {
    /// Path to a screening request JSON file.
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Directory holding the model artifacts (default: models).
    #[arg(long = "models-dir", value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Models manifest pinning artifact paths and checksums.
    ///
    /// Takes precedence over --models-dir.
    #[arg(long = "manifest", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Print the prediction as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ModelsArgs {
    /// Directory holding the model artifacts (default: models).
    #[arg(long = "models-dir", value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Models manifest pinning artifact paths and checksums.
    ///
    /// Takes precedence over --models-dir.
    #[arg(long = "manifest", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Print the availability report as JSON instead of a table.
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
