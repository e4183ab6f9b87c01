//! Medical screening assistant CLI.

use clap::{ColorChoice, Parser};
use medscreen_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use medscreen_cli::commands::{ScreenOutcome, rejection_exit_code, run_models, run_screen};
use medscreen_cli::logging::{LogConfig, LogFormat, init_logging};
use medscreen_cli::summary;
use medscreen_model::ScreenError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Screen(args) => match run_screen(&args) {
            Ok(ScreenOutcome::Predicted(prediction)) => {
                let printed = if args.json {
                    summary::print_prediction_json(&prediction)
                } else {
                    summary::print_prediction(&prediction);
                    Ok(())
                };
                match printed {
                    Ok(()) => 0,
                    Err(error) => {
                        eprintln!("error: {error:#}");
                        1
                    }
                }
            }
            Ok(ScreenOutcome::Rejected(error)) => {
                print_rejection(&error);
                rejection_exit_code(&error)
            }
            Ok(ScreenOutcome::Malformed(message)) => {
                eprintln!("error: invalid screening request: {message}");
                2
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Models(args) => match run_models(&args) {
            Ok(bundle) => {
                let printed = if args.json {
                    summary::print_models_json(bundle)
                } else {
                    summary::print_models(bundle);
                    Ok(())
                };
                match printed {
                    Ok(()) if bundle.availability().loaded_count() == 0 => 1,
                    Ok(()) => 0,
                    Err(error) => {
                        eprintln!("error: {error:#}");
                        1
                    }
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Symptoms => {
            summary::print_symptoms();
            0
        }
    };
    std::process::exit(exit_code);
}

fn print_rejection(error: &ScreenError) {
    match error {
        ScreenError::EmptySelection | ScreenError::InvalidEncoding { .. } => {
            eprintln!("warning: {error}");
        }
        ScreenError::ModelUnavailable { .. } | ScreenError::Inference { .. } => {
            eprintln!("error: {error}");
        }
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
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config.log_data = cli.log_data;
    config
}
