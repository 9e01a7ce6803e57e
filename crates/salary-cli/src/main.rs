//! Developer salary predictor CLI.

use clap::{ColorChoice, Parser};
use salary_cli::format::format_usd;
use salary_cli::logging::{LogConfig, LogFormat, init_logging};
use salary_core::PredictError;
use salary_standards::paths::DEFAULT_MODEL_PATH;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_batch_command, run_encode, run_options, run_predict, run_schema};

/// Exit code when the model artifact cannot be loaded.
const EXIT_MODEL_UNAVAILABLE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match cli.command {
        Command::Predict(args) => run_predict(&args).map(|salary| {
            println!("Estimated Annual Salary: {} USD", format_usd(salary));
        }),
        Command::Encode(args) => run_encode(&args),
        Command::Batch(args) => run_batch_command(&args).map(|summary| {
            eprintln!(
                "Predicted {} of {} rows ({} failed)",
                summary.predicted, summary.rows, summary.failed
            );
        }),
        Command::Options => run_options(),
        Command::Schema(args) => run_schema(&args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => report_error(&error),
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    match error.downcast_ref::<PredictError>() {
        Some(predict_error) if predict_error.is_model_unavailable() => {
            eprintln!(
                "Tip: train and export the model to {DEFAULT_MODEL_PATH}, or point --model / MODEL_PATH at it."
            );
            EXIT_MODEL_UNAVAILABLE
        }
        _ => 1,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
