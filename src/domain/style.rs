//! Per-render chart style
//!
//! A `ChartStyle` is an immutable value handed to every render call. Nothing
//! about the look of a chart lives in process-wide state.

use crate::domain::color::Rgb;

/// Points per inch, the unit all style lengths are expressed in.
pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Preferred font family, matched against font file names
    pub font_family: String,
    pub title_size: f32,
    pub axis_label_size: f32,
    pub tick_label_size: f32,
    pub annotation_size: f32,
    pub legend_size: f32,
    /// Axis labels in bold
    pub bold_axis_labels: bool,
    /// Spine width in points; 0 hides the axis lines
    pub axis_line_width: f32,
    pub show_grid: bool,
    /// Figure width in points
    pub figure_width: f32,
    /// Height given to one bar row in points
    pub bar_unit_height: f32,
    /// Fraction of a row filled by its bars
    pub bar_fill: f32,
    /// Figure height of charts whose height does not depend on the data
    pub figure_height: f32,
    pub text_color: Rgb,
    pub annotation_color: Rgb,
    pub grid_color: Rgb,
}

impl ChartStyle {
    /// Horizontal per-arbor bar charts: 5in wide, 0.5in per bar.
    pub fn bar_chart() -> Self {
        Self {
            font_family: "Arial".to_string(),
            title_size: 15.0,
            axis_label_size: 10.0,
            tick_label_size: 10.0,
            annotation_size: 10.0,
            legend_size: 10.0,
            bold_axis_labels: false,
            axis_line_width: 0.0,
            show_grid: false,
            figure_width: 5.0 * POINTS_PER_INCH,
            bar_unit_height: 0.5 * POINTS_PER_INCH,
            bar_fill: 0.8,
            figure_height: 4.0 * POINTS_PER_INCH,
            text_color: Rgb::BLACK,
            annotation_color: Rgb::DIM_GREY,
            grid_color: Rgb::from_u8(0xeb, 0xeb, 0xeb),
        }
    }

    /// Histograms: smaller title, bold axis labels, fixed 6.4in x 4.8in figure.
    pub fn histogram() -> Self {
        Self {
            title_size: 10.0,
            bold_axis_labels: true,
            figure_width: 6.4 * POINTS_PER_INCH,
            figure_height: 4.8 * POINTS_PER_INCH,
            bar_fill: 1.0,
            ..Self::bar_chart()
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::bar_chart()
    }
}
