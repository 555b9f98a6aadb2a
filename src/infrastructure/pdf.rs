//! PDF chart backend (printpdf)
//!
//! Every render builds its own document from the chart value and its style;
//! no drawing state is shared between calls. Layout is done in points with
//! the origin at the bottom-left corner of the page.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon,
};
use tracing::{debug, instrument, warn};

use crate::domain::{BarChart, ChartStyle, HistogramChart, Rgb};
use crate::infrastructure::fonts::{catalog_for, BOLD_SUFFIXES};
use crate::infrastructure::traits::ChartBackend;

const MM_PER_PT: f32 = 25.4 / 72.0;
/// Outer whitespace around the drawing, in points
const PADDING: f32 = 8.0;
/// Gap between tick labels / row labels and the plot area
const LABEL_GAP: f32 = 6.0;
/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.52;

/// Renders charts into single-page PDF documents.
#[derive(Debug, Clone)]
pub struct PdfChartBackend {
    fonts_directory: Option<PathBuf>,
}

impl PdfChartBackend {
    /// Backend using the built-in Helvetica font only.
    pub fn new() -> Self {
        Self {
            fonts_directory: None,
        }
    }

    /// Backend looking up the style's font family in `fonts_directory`,
    /// falling back to Helvetica when it is not found.
    pub fn with_fonts_directory(fonts_directory: impl Into<PathBuf>) -> Self {
        Self {
            fonts_directory: Some(fonts_directory.into()),
        }
    }

    fn load_fonts(&self, doc: &PdfDocumentReference, style: &ChartStyle) -> io::Result<Fonts> {
        if let Some(dir) = &self.fonts_directory {
            let catalog = catalog_for(dir);
            if let Some(bytes) = catalog.load(&style.font_family) {
                match doc.add_external_font(&*bytes) {
                    Ok(regular) => {
                        let bold = BOLD_SUFFIXES
                            .iter()
                            .filter_map(|suffix| catalog.load(&format!("{}{}", style.font_family, suffix)))
                            .find_map(|bytes| doc.add_external_font(&*bytes).ok())
                            .unwrap_or_else(|| regular.clone());
                        return Ok(Fonts { regular, bold });
                    }
                    Err(e) => warn!(
                        "font {} unusable, falling back to Helvetica: {:?}",
                        style.font_family, e
                    ),
                }
            } else {
                debug!(
                    "font {} not found in {}, using Helvetica",
                    style.font_family,
                    dir.display()
                );
            }
        }
        Ok(Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(pdf_err)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(pdf_err)?,
        })
    }
}

impl Default for PdfChartBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBackend for PdfChartBackend {
    #[instrument(level = "debug", skip(self, chart), fields(rows = chart.rows.len()))]
    fn render_bar_chart(&self, chart: &BarChart, path: &Path) -> io::Result<()> {
        let style = &chart.style;
        let layout = BarLayout::new(chart);
        let (doc, canvas) = self.open(
            chart.title.as_deref().unwrap_or("bar chart"),
            layout.page_width,
            layout.page_height,
            style,
        )?;

        let plot = layout.plot;
        let axis = &chart.axis;
        let x_at = |value: f64| plot.left + plot.width * axis.fraction(value) as f32;

        if style.show_grid {
            for tick in &axis.ticks {
                canvas.stroke_line(
                    (x_at(*tick), plot.bottom),
                    (x_at(*tick), plot.top()),
                    0.8,
                    style.grid_color,
                );
            }
        }

        let rows = chart.rows.len().max(1) as f32;
        let row_height = plot.height / rows;
        for (i, row) in chart.rows.iter().enumerate() {
            let row_top = plot.top() - row_height * i as f32;
            let row_center = row_top - row_height / 2.0;
            let group = row_height * style.bar_fill;
            let bar_height = group / row.bars.len().max(1) as f32;
            let mut bar_top = row_center + group / 2.0;
            let mut row_end = x_at(0.0);

            for bar in &row.bars {
                let (x0, x1) = (x_at(0.0), x_at(bar.value));
                canvas.fill_rect(x0.min(x1), bar_top - bar_height, (x1 - x0).abs(), bar_height, bar.color);
                row_end = row_end.max(x1);
                bar_top -= bar_height;
            }

            canvas.text_right(
                &row.label,
                style.tick_label_size,
                plot.left - LABEL_GAP,
                row_center - style.tick_label_size * 0.35,
                style.text_color,
                false,
            );
            if let Some(annotation) = &row.annotation {
                canvas.text(
                    annotation,
                    style.annotation_size,
                    row_end,
                    row_center - style.annotation_size * 0.35,
                    style.annotation_color,
                    false,
                );
            }
        }

        if style.axis_line_width > 0.0 {
            canvas.stroke_rect(plot, style.axis_line_width, style.text_color);
        }

        let tick_y = plot.bottom - LABEL_GAP - style.tick_label_size * 0.75;
        for tick in &axis.ticks {
            canvas.text_centered(
                &axis.format_tick(*tick),
                style.tick_label_size,
                x_at(*tick),
                tick_y,
                style.text_color,
                false,
            );
        }

        if let Some(x_label) = &chart.x_label {
            canvas.text_centered(
                x_label,
                style.axis_label_size,
                plot.left + plot.width / 2.0,
                tick_y - LABEL_GAP - style.axis_label_size,
                style.text_color,
                style.bold_axis_labels,
            );
        }

        let mut cursor = layout.page_height - PADDING;
        if let Some(title) = &chart.title {
            cursor -= style.title_size;
            canvas.text_centered(
                title,
                style.title_size,
                plot.left + plot.width / 2.0,
                cursor,
                style.text_color,
                false,
            );
            cursor -= LABEL_GAP;
        }

        if !chart.legend.is_empty() {
            cursor -= style.legend_size;
            let swatch = style.legend_size * 0.8;
            let mut x = plot.left;
            for entry in &chart.legend {
                canvas.fill_rect(x, cursor, swatch, swatch, entry.color);
                x += swatch + 3.0;
                canvas.text(&entry.label, style.legend_size, x, cursor, style.text_color, false);
                x += text_width(&entry.label, style.legend_size) + 10.0;
            }
        }

        save(doc, canvas, path)
    }

    #[instrument(level = "debug", skip(self, chart), fields(bins = chart.histogram.bin_count()))]
    fn render_histogram(&self, chart: &HistogramChart, path: &Path) -> io::Result<()> {
        let style = &chart.style;
        let (page_width, page_height) = (style.figure_width, style.figure_height);
        let (doc, canvas) = self.open(&chart.title, page_width, page_height, style)?;

        let (x_axis, y_axis) = (&chart.x_axis, &chart.y_axis);
        let y_tick_width = y_axis
            .ticks
            .iter()
            .map(|t| text_width(&y_axis.format_tick(*t), style.tick_label_size))
            .fold(0.0, f32::max);

        let left = PADDING + y_tick_width + LABEL_GAP;
        let mut bottom = PADDING + style.tick_label_size + LABEL_GAP;
        if chart.x_label.is_some() {
            bottom += style.axis_label_size + LABEL_GAP;
        }
        let top_reserved = PADDING + style.title_size + LABEL_GAP + style.axis_label_size + LABEL_GAP;
        let plot = Area {
            left,
            bottom,
            width: (page_width - left - PADDING - 10.0).max(40.0),
            height: (page_height - bottom - top_reserved).max(40.0),
        };
        let x_at = |v: f64| plot.left + plot.width * x_axis.fraction(v) as f32;
        let y_at = |v: f64| plot.bottom + plot.height * y_axis.fraction(v) as f32;

        if style.show_grid {
            for tick in &y_axis.ticks {
                canvas.stroke_line((plot.left, y_at(*tick)), (plot.right(), y_at(*tick)), 0.8, style.grid_color);
            }
        }

        let hist = &chart.histogram;
        for (height, (lo, hi)) in hist.heights.iter().zip(hist.edges.iter().tuple_windows()) {
            if *height <= 0.0 {
                continue;
            }
            let (x0, x1) = (x_at(*lo), x_at(*hi));
            let (y0, y1) = (y_at(0.0), y_at(*height));
            canvas.fill_rect(x0, y0, x1 - x0, y1 - y0, chart.color);
            canvas.stroke_rect(
                Area {
                    left: x0,
                    bottom: y0,
                    width: x1 - x0,
                    height: y1 - y0,
                },
                0.5,
                chart.color.darken(0.2),
            );
        }

        if style.axis_line_width > 0.0 {
            canvas.stroke_rect(plot, style.axis_line_width, style.text_color);
        }

        for tick in &x_axis.ticks {
            canvas.text_centered(
                &x_axis.format_tick(*tick),
                style.tick_label_size,
                x_at(*tick),
                plot.bottom - LABEL_GAP - style.tick_label_size * 0.75,
                style.text_color,
                false,
            );
        }
        for tick in &y_axis.ticks {
            canvas.text_right(
                &y_axis.format_tick(*tick),
                style.tick_label_size,
                plot.left - LABEL_GAP,
                y_at(*tick) - style.tick_label_size * 0.35,
                style.text_color,
                false,
            );
        }

        if let Some(x_label) = &chart.x_label {
            canvas.text_centered(
                x_label,
                style.axis_label_size,
                plot.left + plot.width / 2.0,
                PADDING,
                style.text_color,
                style.bold_axis_labels,
            );
        }
        canvas.text(
            &chart.y_label,
            style.axis_label_size,
            PADDING,
            plot.top() + LABEL_GAP,
            style.text_color,
            style.bold_axis_labels,
        );
        canvas.text_centered(
            &chart.title,
            style.title_size,
            plot.left + plot.width / 2.0,
            page_height - PADDING - style.title_size,
            style.text_color,
            false,
        );

        save(doc, canvas, path)
    }
}

impl PdfChartBackend {
    fn open(
        &self,
        title: &str,
        width: f32,
        height: f32,
        style: &ChartStyle,
    ) -> io::Result<(PdfDocumentReference, Canvas)> {
        let (doc, page, layer) = PdfDocument::new(title, mm(width), mm(height), "chart");
        let fonts = self.load_fonts(&doc, style)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok((doc, Canvas { layer, fonts }))
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Rectangle in page points.
#[derive(Debug, Clone, Copy)]
struct Area {
    left: f32,
    bottom: f32,
    width: f32,
    height: f32,
}

impl Area {
    fn right(&self) -> f32 {
        self.left + self.width
    }

    fn top(&self) -> f32 {
        self.bottom + self.height
    }
}

/// Page geometry of a horizontal bar chart, sized to its content.
struct BarLayout {
    page_width: f32,
    page_height: f32,
    plot: Area,
}

impl BarLayout {
    fn new(chart: &BarChart) -> Self {
        let style = &chart.style;
        let label_width = chart
            .rows
            .iter()
            .map(|r| text_width(&r.label, style.tick_label_size))
            .fold(0.0, f32::max);
        let annotation_width = chart
            .rows
            .iter()
            .filter_map(|r| r.annotation.as_deref())
            .map(|a| text_width(a, style.annotation_size))
            .fold(0.0, f32::max);
        let last_tick_overhang = chart
            .axis
            .ticks
            .last()
            .map(|t| text_width(&chart.axis.format_tick(*t), style.tick_label_size) / 2.0)
            .unwrap_or(0.0);

        let left = PADDING + label_width + LABEL_GAP;
        let right = PADDING + annotation_width.max(last_tick_overhang);

        let mut bottom = PADDING + style.tick_label_size + LABEL_GAP;
        if chart.x_label.is_some() {
            bottom += style.axis_label_size + LABEL_GAP;
        }
        let mut top = PADDING;
        if chart.title.is_some() {
            top += style.title_size + LABEL_GAP;
        }
        if !chart.legend.is_empty() {
            top += style.legend_size + LABEL_GAP;
        }

        let plot = Area {
            left,
            bottom,
            width: style.figure_width * 0.775,
            height: chart.plot_height().max(style.bar_unit_height),
        };
        Self {
            page_width: left + plot.width + right,
            page_height: bottom + plot.height + top,
            plot,
        }
    }
}

/// Drawing helpers over one PDF layer.
struct Canvas {
    layer: PdfLayerReference,
    fonts: Fonts,
}

impl Canvas {
    fn fill_rect(&self, left: f32, bottom: f32, width: f32, height: f32, color: Rgb) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.layer.set_fill_color(pdf_color(color));
        self.layer.add_polygon(Polygon {
            rings: vec![corners(left, bottom, width, height)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }

    fn stroke_rect(&self, area: Area, thickness: f32, color: Rgb) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: corners(area.left, area.bottom, area.width, area.height),
            is_closed: true,
        });
    }

    fn stroke_line(&self, from: (f32, f32), to: (f32, f32), thickness: f32, color: Rgb) {
        self.layer.set_outline_color(pdf_color(color));
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(from.0), mm(from.1)), false),
                (Point::new(mm(to.0), mm(to.1)), false),
            ],
            is_closed: false,
        });
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, color: Rgb, bold: bool) {
        let font = if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        };
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(text, size, mm(x), mm(y), font);
    }

    fn text_centered(&self, text: &str, size: f32, center_x: f32, y: f32, color: Rgb, bold: bool) {
        let x = center_x - text_width(text, size) / 2.0;
        self.text(text, size, x, y, color, bold);
    }

    fn text_right(&self, text: &str, size: f32, right_x: f32, y: f32, color: Rgb, bold: bool) {
        let x = right_x - text_width(text, size);
        self.text(text, size, x, y, color, bold);
    }
}

fn corners(left: f32, bottom: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    let (right, top) = (left + width, bottom + height);
    [(left, bottom), (right, bottom), (right, top), (left, top)]
        .into_iter()
        .map(|(x, y)| (Point::new(mm(x), mm(y)), false))
        .collect()
}

/// Approximate rendered width of `text` in points.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_WIDTH
}

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_PT)
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}

fn pdf_err(e: printpdf::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("pdf: {e:?}"))
}

fn save(doc: PdfDocumentReference, canvas: Canvas, path: &Path) -> io::Result<()> {
    drop(canvas);
    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_err)?;
    debug!("wrote {}", path.display());
    Ok(())
}
