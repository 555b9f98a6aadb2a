//! Distribution plotter service
//!
//! Turns per-arbor analysis results into chart files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::application::{histogram_path, ApplicationError, ApplicationResult, IoResultExt, OutputTarget};
use crate::domain::{
    ArborId, BarChart, ChartStyle, ColorScheme, DistributionResult, DomainError, FigureLabels,
    Histogram, HistogramChart, MinAvgMaxSeries, PlotSeries, Rgb, ScalarResult,
};
use crate::infrastructure::traits::{ChartBackend, FileSystem};

/// Everything the plotter needs besides its I/O dependencies.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotterOptions {
    pub colors: ColorScheme,
    pub bar_style: ChartStyle,
    pub histogram_style: ChartStyle,
    /// Destination of `plot_histogram`, created on demand
    pub histogram_directory: PathBuf,
}

impl PlotterOptions {
    pub fn new(colors: ColorScheme, histogram_directory: impl Into<PathBuf>) -> Self {
        Self {
            colors,
            bar_style: ChartStyle::bar_chart(),
            histogram_style: ChartStyle::histogram(),
            histogram_directory: histogram_directory.into(),
        }
    }

    pub fn with_font_family(mut self, family: &str) -> Self {
        self.bar_style = self.bar_style.with_font_family(family);
        self.histogram_style = self.histogram_style.with_font_family(family);
        self
    }
}

/// Service rendering per-arbor bar charts and histograms.
///
/// Calls are stateless: every render gets its own chart value and style, so
/// one plotter can be shared across threads.
pub struct DistributionPlotter {
    backend: Arc<dyn ChartBackend>,
    fs: Arc<dyn FileSystem>,
    options: PlotterOptions,
}

impl DistributionPlotter {
    pub fn new(backend: Arc<dyn ChartBackend>, fs: Arc<dyn FileSystem>, options: PlotterOptions) -> Self {
        Self { backend, fs, options }
    }

    pub fn options(&self) -> &PlotterOptions {
        &self.options
    }

    /// One horizontal bar per present arbor, written to
    /// `<target.directory>/<label>-<figure_name>.pdf`.
    ///
    /// With `show_percentage`, every bar is annotated with its share of the
    /// summed magnitudes.
    #[instrument(level = "debug", skip(self, results, target), fields(figure = %labels.figure_name))]
    pub fn plot_per_arbor_bar_chart(
        &self,
        results: &ScalarResult,
        target: &OutputTarget,
        labels: &FigureLabels,
        show_percentage: bool,
    ) -> ApplicationResult<PathBuf> {
        let series = PlotSeries::from_results(results)?;
        if series.is_empty() {
            return Err(DomainError::EmptySeries.into());
        }
        self.ensure_output_directory(&target.directory)?;

        let chart = BarChart::per_arbor(
            &series,
            &self.options.colors,
            labels,
            show_percentage,
            self.options.bar_style.clone(),
        );
        let path = target.path(&labels.figure_name);
        self.backend
            .render_bar_chart(&chart, &path)
            .with_path_context("render bar chart", &path)?;

        info!("bar chart with {} bars: {}", chart.bar_count(), path.display());
        Ok(path)
    }

    /// Grouped bar chart with min, avg and max per arbor.
    ///
    /// The three results must describe the same arbors; the check runs
    /// before anything is written.
    #[instrument(level = "debug", skip(self, min, avg, max, target), fields(figure = %labels.figure_name))]
    pub fn plot_min_avg_max_bar_chart(
        &self,
        min: &ScalarResult,
        avg: &ScalarResult,
        max: &ScalarResult,
        target: &OutputTarget,
        labels: &FigureLabels,
    ) -> ApplicationResult<PathBuf> {
        let series = MinAvgMaxSeries::from_results(min, avg, max)?;
        debug!("arbors: {:?}", series.labels());
        debug!("min: {:?}", series.mins());
        debug!("avg: {:?}", series.avgs());
        debug!("max: {:?}", series.maxs());
        if series.is_empty() {
            return Err(DomainError::EmptySeries.into());
        }
        self.ensure_output_directory(&target.directory)?;

        let chart = BarChart::min_avg_max(
            &series,
            &self.options.colors,
            labels,
            self.options.bar_style.clone(),
        );
        let path = target.path(&labels.figure_name);
        self.backend
            .render_bar_chart(&chart, &path)
            .with_path_context("render min/avg/max chart", &path)?;

        info!("min/avg/max chart with {} arbors: {}", series.len(), path.display());
        Ok(path)
    }

    /// Histogram of `values`, written to `<histogram_directory>/<title>-plot.pdf`.
    #[instrument(level = "debug", skip(self, values), fields(samples = values.len()))]
    pub fn plot_histogram(
        &self,
        values: &[f64],
        title: &str,
        normalized: bool,
        color: Rgb,
    ) -> ApplicationResult<PathBuf> {
        let histogram = Histogram::from_values(values, normalized)
            .map_err(|e| with_title(e, title))?;
        let directory = &self.options.histogram_directory;
        self.create_histogram_directory(directory)?;

        let chart = HistogramChart::new(histogram, title, color, self.options.histogram_style.clone());
        let path = histogram_path(directory, title);
        self.backend
            .render_histogram(&chart, &path)
            .with_path_context("render histogram", &path)?;

        info!("histogram with {} bins: {}", chart.histogram.bin_count(), path.display());
        Ok(path)
    }

    /// One histogram per present arbor distribution: apical dendrite, basal
    /// dendrites by index, axon. Renders run in parallel; the returned paths
    /// keep that order.
    #[instrument(level = "debug", skip_all)]
    pub fn plot_all_arbor_histograms(&self, results: &DistributionResult) -> ApplicationResult<Vec<PathBuf>> {
        let mut jobs: Vec<(ArborId, &[f64])> = Vec::new();
        if let Some(apical) = &results.apical_dendrite_result {
            jobs.push((ArborId::apical(), apical.as_slice()));
        }
        if let Some(basals) = &results.basal_dendrites_result {
            jobs.extend(
                basals
                    .iter()
                    .enumerate()
                    .map(|(i, values)| (ArborId::basal(i), values.as_slice())),
            );
        }
        if let Some(axon) = &results.axon_result {
            jobs.push((ArborId::axon(), axon.as_slice()));
        }
        debug!("plot_all_arbor_histograms: {} arbors", jobs.len());
        if jobs.is_empty() {
            return Ok(Vec::new());
        }
        self.create_histogram_directory(&self.options.histogram_directory)?;

        jobs.par_iter()
            .map(|(arbor, values)| {
                let color = self.options.colors.color_for(arbor.kind);
                self.plot_histogram(values, &arbor.tag(), false, color)
            })
            .collect()
    }

    fn ensure_output_directory(&self, directory: &Path) -> ApplicationResult<()> {
        if self.fs.is_dir(directory) {
            Ok(())
        } else {
            Err(ApplicationError::OutputDirectoryMissing(directory.to_path_buf()))
        }
    }

    fn create_histogram_directory(&self, directory: &Path) -> ApplicationResult<()> {
        if self.fs.is_dir(directory) {
            return Ok(());
        }
        debug!("creating histogram directory {}", directory.display());
        self.fs
            .create_dir_all(directory)
            .with_path_context("create histogram directory", directory)
    }
}

fn with_title(error: DomainError, title: &str) -> DomainError {
    match error {
        DomainError::EmptyDistribution(reason) => DomainError::EmptyDistribution(format!("{title}: {reason}")),
        DomainError::NonFiniteValue { .. } => DomainError::NonFiniteValue {
            arbor: title.to_string(),
        },
        other => other,
    }
}
