//! Domain layer: arbors, results, series and chart descriptions
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arbor;
pub mod chart;
pub mod color;
pub mod error;
pub mod histogram;
pub mod results;
pub mod series;
pub mod style;
pub mod ticks;

pub use arbor::{ArborId, ArborKind};
pub use chart::{Bar, BarChart, BarRow, FigureLabels, HistogramChart, LegendEntry};
pub use color::{ColorScheme, Rgb};
pub use error::DomainError;
pub use histogram::Histogram;
pub use results::{AnalysisResult, DistributionResult, ScalarResult};
pub use series::{MinAvgMaxSeries, PlotSeries, RangeEntry, SeriesEntry};
pub use style::ChartStyle;
pub use ticks::AxisScale;

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Returns the input unchanged when a variable cannot be resolved.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
