//! Render-ready chart descriptions
//!
//! Built from series and histograms by the plotter; consumed by a chart backend.

use crate::domain::color::{ColorScheme, Rgb};
use crate::domain::histogram::Histogram;
use crate::domain::series::{MinAvgMaxSeries, PlotSeries};
use crate::domain::style::ChartStyle;
use crate::domain::ticks::AxisScale;

/// Desired number of ticks on value axes.
const AXIS_TICKS: usize = 6;

/// Text of a figure: file-name stem, axis label and title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FigureLabels {
    pub figure_name: String,
    pub x_label: Option<String>,
    pub title: Option<String>,
}

impl FigureLabels {
    pub fn new(figure_name: impl Into<String>) -> Self {
        Self {
            figure_name: figure_name.into(),
            ..Default::default()
        }
    }

    pub fn with_x_label(mut self, x_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub value: f64,
    pub color: Rgb,
}

/// One labelled row of a horizontal bar chart, holding one or more bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub label: String,
    pub bars: Vec<Bar>,
    /// Text drawn after the end of the row's last bar
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// Horizontal bar chart, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub rows: Vec<BarRow>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub legend: Vec<LegendEntry>,
    pub axis: AxisScale,
    pub style: ChartStyle,
}

impl BarChart {
    /// One bar per arbor, colored by arbor kind, optionally annotated with
    /// its share of the total.
    pub fn per_arbor(
        series: &PlotSeries,
        colors: &ColorScheme,
        labels: &FigureLabels,
        show_percentage: bool,
        style: ChartStyle,
    ) -> Self {
        let annotations: Vec<Option<String>> = if show_percentage {
            series
                .percentage_labels()
                .into_iter()
                .map(|p| Some(format!("  {p}")))
                .collect()
        } else {
            vec![None; series.len()]
        };

        let rows = series
            .entries
            .iter()
            .zip(annotations)
            .map(|(entry, annotation)| BarRow {
                label: entry.label.clone(),
                bars: vec![Bar {
                    value: entry.value,
                    color: colors.color_for(entry.arbor.kind),
                }],
                annotation,
            })
            .collect();

        Self {
            rows,
            title: labels.title.clone(),
            x_label: labels.x_label.clone(),
            legend: Vec::new(),
            axis: AxisScale::for_bars(series.values(), AXIS_TICKS),
            style,
        }
    }

    /// Three bars per arbor: min (light), avg (base color), max (dark).
    pub fn min_avg_max(
        series: &MinAvgMaxSeries,
        colors: &ColorScheme,
        labels: &FigureLabels,
        style: ChartStyle,
    ) -> Self {
        let rows = series
            .entries
            .iter()
            .map(|entry| {
                let base = colors.color_for(entry.arbor.kind);
                BarRow {
                    label: entry.label.clone(),
                    bars: vec![
                        Bar {
                            value: entry.min,
                            color: base.lighten(0.5),
                        },
                        Bar {
                            value: entry.avg,
                            color: base,
                        },
                        Bar {
                            value: entry.max,
                            color: base.darken(0.35),
                        },
                    ],
                    annotation: None,
                }
            })
            .collect();

        let grey = Rgb::from_u8(0x80, 0x80, 0x80);
        let legend = vec![
            LegendEntry {
                label: "Minimum".to_string(),
                color: grey.lighten(0.5),
            },
            LegendEntry {
                label: "Average".to_string(),
                color: grey,
            },
            LegendEntry {
                label: "Maximum".to_string(),
                color: grey.darken(0.35),
            },
        ];

        let values = series
            .mins()
            .into_iter()
            .chain(series.avgs())
            .chain(series.maxs());

        Self {
            rows,
            title: labels.title.clone(),
            x_label: labels.x_label.clone(),
            legend,
            axis: AxisScale::for_bars(values, AXIS_TICKS),
            style,
        }
    }

    pub fn bar_count(&self) -> usize {
        self.rows.iter().map(|r| r.bars.len()).sum()
    }

    /// Plot-area height: one bar unit per bar.
    pub fn plot_height(&self) -> f32 {
        self.bar_count() as f32 * self.style.bar_unit_height
    }
}

/// Histogram of one distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub histogram: Histogram,
    pub color: Rgb,
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: String,
    pub x_axis: AxisScale,
    pub y_axis: AxisScale,
    pub style: ChartStyle,
}

impl HistogramChart {
    pub fn new(histogram: Histogram, title: impl Into<String>, color: Rgb, style: ChartStyle) -> Self {
        let (lo, hi) = histogram.range();
        let x_axis = AxisScale::nice(lo, hi, AXIS_TICKS, false);
        let y_axis = AxisScale::nice(0.0, histogram.max_height(), AXIS_TICKS, !histogram.normalized);
        let y_label = if histogram.normalized {
            "Density"
        } else {
            "Samples"
        }
        .to_string();

        Self {
            histogram,
            color,
            title: title.into(),
            x_label: None,
            y_label,
            x_axis,
            y_axis,
            style,
        }
    }
}
