//! End-to-end rendering with the printpdf backend

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use arborplot::application::services::{DistributionPlotter, PlotterOptions};
use arborplot::application::OutputTarget;
use arborplot::domain::{ColorScheme, DistributionResult, FigureLabels, ScalarResult};
use arborplot::infrastructure::pdf::PdfChartBackend;
use arborplot::infrastructure::traits::RealFileSystem;
use arborplot::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn pdf_plotter(histogram_dir: &Path) -> DistributionPlotter {
    DistributionPlotter::new(
        Arc::new(PdfChartBackend::new()),
        Arc::new(RealFileSystem),
        PlotterOptions::new(ColorScheme::default(), histogram_dir),
    )
}

fn assert_pdf(path: &Path) {
    let bytes = std::fs::read(path).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF"), "{} is not a PDF", path.display());
}

#[test]
fn given_scenario_when_rendering_bar_chart_then_pdf_file_written() {
    let temp = TempDir::new().unwrap();
    let plotter = pdf_plotter(temp.path());
    let results = ScalarResult {
        axon_result: Some(120.0),
        basal_dendrites_result: Some(vec![80.0, 95.0]),
        apical_dendrite_result: None,
    };

    let path = plotter
        .plot_per_arbor_bar_chart(
            &results,
            &OutputTarget::new(temp.path(), "neuron-7"),
            &FigureLabels::new("total-length")
                .with_x_label("Total length (um)")
                .with_title("Total length"),
            true,
        )
        .unwrap();

    assert_eq!(path, temp.path().join("neuron-7-total-length.pdf"));
    assert_pdf(&path);
}

#[test]
fn given_existing_file_when_rendering_again_then_overwritten() {
    let temp = TempDir::new().unwrap();
    let plotter = pdf_plotter(temp.path());
    let target = OutputTarget::new(temp.path(), "n");
    std::fs::write(target.path("count"), b"stale").unwrap();
    let results = ScalarResult {
        apical_dendrite_result: Some(3.0),
        ..Default::default()
    };

    let path = plotter
        .plot_per_arbor_bar_chart(&results, &target, &FigureLabels::new("count"), false)
        .unwrap();

    assert_pdf(&path);
}

#[test]
fn given_min_avg_max_when_rendering_then_pdf_file_written() {
    let temp = TempDir::new().unwrap();
    let plotter = pdf_plotter(temp.path());
    let result = |scale: f64| ScalarResult {
        axon_result: Some(2.0 * scale),
        basal_dendrites_result: Some(vec![1.0 * scale]),
        apical_dendrite_result: Some(1.5 * scale),
    };

    let path = plotter
        .plot_min_avg_max_bar_chart(
            &result(1.0),
            &result(2.0),
            &result(3.0),
            &OutputTarget::new(temp.path(), "n"),
            &FigureLabels::new("radius").with_x_label("Radius (um)"),
        )
        .unwrap();

    assert_pdf(&path);
}

#[test]
fn given_distribution_result_when_rendering_all_histograms_then_one_file_per_arbor() {
    let temp = TempDir::new().unwrap();
    let histogram_dir = temp.path().join("hist");
    let plotter = pdf_plotter(&histogram_dir);
    let results = DistributionResult {
        axon_result: Some((0..200).map(|i| f64::from(i % 37)).collect()),
        basal_dendrites_result: Some(vec![vec![1.0, 2.0, 2.0, 3.0], vec![5.0; 10]]),
        apical_dendrite_result: None,
    };

    let paths = plotter.plot_all_arbor_histograms(&results).unwrap();

    assert_eq!(paths.len(), 3);
    let mut written: Vec<String> = std::fs::read_dir(&histogram_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(
        written,
        [
            "axon-plot.pdf",
            "basal-dendrite-0-plot.pdf",
            "basal-dendrite-1-plot.pdf",
        ]
    );
    paths.iter().for_each(|p| assert_pdf(p));
}
