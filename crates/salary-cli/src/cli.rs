//! CLI argument definitions for the salary predictor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use salary_cli::profile::parse_years_arg;
use salary_standards::catalog;

#[derive(Parser)]
#[command(
    name = "salary-predictor",
    version,
    about = "Developer Salary Predictor - Estimate annual salary (USD) from a profile",
    long_about = "Estimate a developer's expected annual salary (USD) from years of \
                  experience, country, education, employment status, work arrangement \
                  and organization size, using a trained regression model."
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

    /// Allow profile values to appear in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict the annual salary for one profile.
    Predict(PredictArgs),

    /// Show the feature row a profile encodes to.
    Encode(EncodeArgs),

    /// Predict salaries for every profile in a CSV file.
    Batch(BatchArgs),

    /// List the selectable values for each profile field.
    Options,

    /// List the active column schema.
    Schema(SchemaArgs),
}

/// Model and schema locations shared by the commands that need them.
#[derive(Args)]
pub struct ModelArgs {
    /// Model artifact (default: $MODEL_PATH, then models/reg_model.json).
    #[arg(long = "model", value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Refuse to load a model whose SHA-256 differs from this digest.
    #[arg(long = "model-sha256", value_name = "HEX")]
    pub model_sha256: Option<String>,

    /// Column schema file, JSON array or TOML `columns` (default: $SALARY_SCHEMA_PATH, then built-in).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
}

/// Profile fields. Defaults mirror the input form.
#[derive(Args)]
pub struct ProfileArgs {
    /// Read the whole profile from a JSON file instead of the flags below.
    #[arg(long = "profile", value_name = "JSON")]
    pub profile: Option<PathBuf>,

    /// Years of professional coding experience (0 to 50).
    #[arg(
        long = "years",
        default_value_t = f64::from(catalog::DEFAULT_YEARS),
        value_parser = parse_years_arg
    )]
    pub years: f64,

    /// Country of residence.
    #[arg(long = "country", default_value = catalog::DEFAULT_COUNTRY)]
    pub country: String,

    /// Highest education level (see `options`).
    #[arg(long = "education", default_value = catalog::EDUCATION_LEVELS[0])]
    pub education: String,

    /// Employment status; repeat for multiple selections.
    #[arg(long = "employment", default_value = catalog::DEFAULT_EMPLOYMENT)]
    pub employment: Vec<String>,

    /// No employment selection at all.
    #[arg(long = "no-employment", conflicts_with = "employment")]
    pub no_employment: bool,

    /// Work arrangement.
    #[arg(long = "remote", default_value = catalog::REMOTE_OPTIONS[0])]
    pub remote: String,

    /// Organization size.
    #[arg(long = "org-size", default_value = catalog::ORG_SIZES[0])]
    pub org_size: String,
}

#[derive(Args)]
pub struct PredictArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Column schema file (default: $SALARY_SCHEMA_PATH, then built-in).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Print the row as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Include columns that are 0.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct BatchArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Input CSV with YearsCodePro, Country, EdLevel, Employment, RemoteWork, OrgSize columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SchemaArgs {
    /// Column schema file (default: $SALARY_SCHEMA_PATH, then built-in).
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,
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
