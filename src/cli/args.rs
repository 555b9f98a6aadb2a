//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Per-arbor distribution charts (axon, basal and apical dendrites) as PDF
#[derive(Parser, Debug)]
#[command(name = "arborplot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file, overrides the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Naming and labelling shared by the bar chart commands
#[derive(Args, Debug, Clone)]
pub struct FigureArgs {
    /// Morphology label, prefix of the output file
    #[arg(short, long)]
    pub label: String,

    /// Figure name, suffix of the output file
    #[arg(short, long)]
    pub figure: String,

    /// Value axis label
    #[arg(long)]
    pub x_label: Option<String>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Output directory (default: analysis_directory from config)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bar chart with one bar per arbor
    Bar {
        /// Scalar analysis result (JSON)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        results: PathBuf,

        #[command(flatten)]
        figure: FigureArgs,

        /// Annotate bars with their share of the total
        #[arg(short, long)]
        percentage: bool,
    },

    /// Grouped bar chart of minimum, average and maximum per arbor
    MinAvgMax {
        /// Minimum result (JSON)
        #[arg(long, value_hint = ValueHint::FilePath)]
        min: PathBuf,

        /// Average result (JSON)
        #[arg(long, value_hint = ValueHint::FilePath)]
        avg: PathBuf,

        /// Maximum result (JSON)
        #[arg(long, value_hint = ValueHint::FilePath)]
        max: PathBuf,

        #[command(flatten)]
        figure: FigureArgs,
    },

    /// Histogram of a JSON array of numbers
    Histogram {
        /// JSON array of values
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        values: PathBuf,

        /// Title, also names the file: <title>-plot.pdf
        #[arg(short, long)]
        title: String,

        /// Plot probability density instead of counts
        #[arg(short, long)]
        normalized: bool,

        /// Bar color as #rrggbb
        #[arg(short, long, default_value = "#0000ff")]
        color: String,
    },

    /// One histogram per arbor of a distribution result
    Histograms {
        /// Distribution result (JSON)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        results: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
