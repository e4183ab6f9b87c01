//! Tests for CLI argument parsing.

use clap::{CommandFactory, Parser};

use medscreen_cli::cli::{Cli, Command};

#[test]
fn cli_definition_is_internally_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn screen_parses_request_path_and_model_flags() {
    let cli = Cli::try_parse_from([
        "medscreen",
        "screen",
        "request.json",
        "--models-dir",
        "artifacts",
        "--json",
    ])
    .unwrap();
    let Command::Screen(args) = cli.command else {
        panic!("expected the screen subcommand");
    };
    assert_eq!(args.request.to_str(), Some("request.json"));
    assert_eq!(args.models_dir.as_deref().and_then(|p| p.to_str()), Some("artifacts"));
    assert!(args.manifest.is_none());
    assert!(args.json);
}

#[test]
fn screen_accepts_a_manifest() {
    let cli = Cli::try_parse_from([
        "medscreen",
        "screen",
        "request.json",
        "--manifest",
        "models/manifest.toml",
    ])
    .unwrap();
    let Command::Screen(args) = cli.command else {
        panic!("expected the screen subcommand");
    };
    assert_eq!(
        args.manifest.as_deref().and_then(|p| p.to_str()),
        Some("models/manifest.toml")
    );
}

#[test]
fn screen_requires_a_request_path() {
    assert!(Cli::try_parse_from(["medscreen", "screen"]).is_err());
}

#[test]
fn models_parses_bare_and_with_json() {
    let cli = Cli::try_parse_from(["medscreen", "models"]).unwrap();
    let Command::Models(args) = cli.command else {
        panic!("expected the models subcommand");
    };
    assert!(!args.json);

    let cli = Cli::try_parse_from(["medscreen", "models", "--json"]).unwrap();
    let Command::Models(args) = cli.command else {
        panic!("expected the models subcommand");
    };
    assert!(args.json);
}

#[test]
fn symptoms_takes_no_arguments() {
    let cli = Cli::try_parse_from(["medscreen", "symptoms"]).unwrap();
    assert!(matches!(cli.command, Command::Symptoms));
    assert!(Cli::try_parse_from(["medscreen", "symptoms", "extra"]).is_err());
}

#[test]
fn logging_flags_are_global() {
    let cli = Cli::try_parse_from([
        "medscreen",
        "models",
        "-vv",
        "--log-format",
        "json",
        "--log-file",
        "run.log",
        "--log-data",
    ])
    .unwrap();
    assert!(cli.verbosity.is_present());
    assert_eq!(cli.log_file.as_deref().and_then(|p| p.to_str()), Some("run.log"));
    assert!(cli.log_data);
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["medscreen", "diagnose"]).is_err());
}
