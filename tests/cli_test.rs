//! Tests for CLI argument parsing and command dispatch

use std::sync::Arc;

use clap::Parser;
use tempfile::TempDir;

use arborplot::cli::args::{Cli, Commands};
use arborplot::cli::commands::dispatch;
use arborplot::cli::CliError;
use arborplot::config::Settings;
use arborplot::exitcode;
use arborplot::infrastructure::di::ServiceContainer;
use arborplot::infrastructure::pdf::PdfChartBackend;
use arborplot::infrastructure::traits::RealFileSystem;
use arborplot::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn container(temp: &TempDir) -> ServiceContainer {
    let settings = Settings {
        analysis_directory: temp.path().to_path_buf(),
        histogram_directory: temp.path().join("hist"),
        fonts_directory: temp.path().join("fonts"),
        ..Settings::default()
    };
    ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        Arc::new(PdfChartBackend::new()),
    )
}

fn parse(args: &[&str]) -> Commands {
    let cli = Cli::parse_from(std::iter::once("arborplot").chain(args.iter().copied()));
    cli.command.expect("subcommand")
}

#[test]
fn given_bar_command_when_dispatching_then_pdf_in_analysis_directory() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("length.json");
    std::fs::write(
        &results,
        r#"{"axon_result": 120.0, "basal_dendrites_result": [80.0, 95.0], "apical_dendrite_result": null}"#,
    )
    .unwrap();
    let command = parse(&[
        "bar",
        "--results",
        results.to_str().unwrap(),
        "--label",
        "neuron-7",
        "--figure",
        "total-length",
        "--percentage",
    ]);

    dispatch(&command, &container(&temp)).unwrap();

    assert!(temp.path().join("neuron-7-total-length.pdf").is_file());
}

#[test]
fn given_histograms_command_when_dispatching_then_files_in_histogram_directory() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("segments.json");
    std::fs::write(
        &results,
        r#"{"axon_result": [1.0, 2.0, 3.5], "apical_dendrite_result": [4.0, 4.5]}"#,
    )
    .unwrap();
    let command = parse(&["histograms", "--results", results.to_str().unwrap()]);

    dispatch(&command, &container(&temp)).unwrap();

    assert!(temp.path().join("hist/axon-plot.pdf").is_file());
    assert!(temp.path().join("hist/apical-dendrite-plot.pdf").is_file());
}

#[test]
fn given_invalid_color_when_dispatching_histogram_then_usage_exit_code() {
    let temp = TempDir::new().unwrap();
    let values = temp.path().join("values.json");
    std::fs::write(&values, "[1.0, 2.0]").unwrap();
    let command = parse(&[
        "histogram",
        "--values",
        values.to_str().unwrap(),
        "--title",
        "t",
        "--color",
        "blueish",
    ]);

    let err = dispatch(&command, &container(&temp)).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_results_file_when_dispatching_then_noinput_exit_code() {
    let temp = TempDir::new().unwrap();
    let command = parse(&[
        "bar",
        "-r",
        "/nonexistent/results.json",
        "-l",
        "n",
        "-f",
        "length",
    ]);

    let err = dispatch(&command, &container(&temp)).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_missing_output_dir_when_dispatching_then_cantcreat_exit_code() {
    let temp = TempDir::new().unwrap();
    let results = temp.path().join("r.json");
    std::fs::write(&results, r#"{"axon_result": 1.0}"#).unwrap();
    let missing = temp.path().join("missing");
    let command = parse(&[
        "bar",
        "-r",
        results.to_str().unwrap(),
        "-l",
        "n",
        "-f",
        "length",
        "-o",
        missing.to_str().unwrap(),
    ]);

    let err = dispatch(&command, &container(&temp)).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::CANTCREAT);
}
