//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::OutputTarget;
use crate::cli::args::{Cli, Commands, ConfigCommands, FigureArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DistributionResult, FigureLabels, Rgb, ScalarResult};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::input::load_json;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    // Needs neither settings nor services
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    if let Commands::Config { command } = command {
        return _config(command, cli.config.as_deref());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);
    dispatch(command, &container)
}

/// Run a plotting command against an already wired container.
pub fn dispatch(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Bar {
            results,
            figure,
            percentage,
        } => _bar(container, results, figure, *percentage),
        Commands::MinAvgMax {
            min,
            avg,
            max,
            figure,
        } => _min_avg_max(container, min, avg, max, figure),
        Commands::Histogram {
            values,
            title,
            normalized,
            color,
        } => _histogram(container, values, title, *normalized, color),
        Commands::Histograms { results } => _histograms(container, results),
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::Usage(
            "not a plotting command".to_string(),
        )),
    }
}

fn target_and_labels(container: &ServiceContainer, figure: &FigureArgs) -> (OutputTarget, FigureLabels) {
    let directory = figure
        .output_dir
        .clone()
        .unwrap_or_else(|| container.settings.analysis_directory.clone());
    let target = OutputTarget::new(directory, &figure.label);

    let mut labels = FigureLabels::new(&figure.figure);
    if let Some(x_label) = &figure.x_label {
        labels = labels.with_x_label(x_label);
    }
    if let Some(title) = &figure.title {
        labels = labels.with_title(title);
    }
    (target, labels)
}

#[instrument(skip(container))]
fn _bar(container: &ServiceContainer, results: &Path, figure: &FigureArgs, percentage: bool) -> CliResult<()> {
    let result: ScalarResult = load_json(container.fs.as_ref(), results)?;
    let (target, labels) = target_and_labels(container, figure);
    let path = container
        .plotter
        .plot_per_arbor_bar_chart(&result, &target, &labels, percentage)?;
    output::action("Written", &path.display());
    Ok(())
}

#[instrument(skip(container))]
fn _min_avg_max(
    container: &ServiceContainer,
    min: &Path,
    avg: &Path,
    max: &Path,
    figure: &FigureArgs,
) -> CliResult<()> {
    let min: ScalarResult = load_json(container.fs.as_ref(), min)?;
    let avg: ScalarResult = load_json(container.fs.as_ref(), avg)?;
    let max: ScalarResult = load_json(container.fs.as_ref(), max)?;
    let (target, labels) = target_and_labels(container, figure);
    let path = container
        .plotter
        .plot_min_avg_max_bar_chart(&min, &avg, &max, &target, &labels)?;
    output::action("Written", &path.display());
    Ok(())
}

#[instrument(skip(container))]
fn _histogram(
    container: &ServiceContainer,
    values: &Path,
    title: &str,
    normalized: bool,
    color: &str,
) -> CliResult<()> {
    let color: Rgb = color
        .parse()
        .map_err(|e| CliError::InvalidArgs(format!("--color: {e}")))?;
    let values: Vec<f64> = load_json(container.fs.as_ref(), values)?;
    debug!("{} values", values.len());
    let path = container
        .plotter
        .plot_histogram(&values, title, normalized, color)?;
    output::action("Written", &path.display());
    Ok(())
}

#[instrument(skip(container))]
fn _histograms(container: &ServiceContainer, results: &Path) -> CliResult<()> {
    let result: DistributionResult = load_json(container.fs.as_ref(), results)?;
    let paths: Vec<PathBuf> = container
        .plotter
        .plot_all_arbor_histograms(&result)?;
    if paths.is_empty() {
        output::warning("no arbor distributions in input, nothing written");
    }
    for path in paths {
        output::action("Written", &path.display());
    }
    Ok(())
}

fn _config(command: &ConfigCommands, config: Option<&Path>) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let text = Settings::load(config)?.to_toml()?;
            output::info(&text);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory on this platform"),
        },
    }
    Ok(())
}
