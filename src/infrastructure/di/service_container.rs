//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{DistributionPlotter, PlotterOptions};
use crate::config::Settings;
use crate::infrastructure::pdf::PdfChartBackend;
use crate::infrastructure::traits::{ChartBackend, FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Chart renderer
    pub backend: Arc<dyn ChartBackend>,

    pub plotter: DistributionPlotter,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        let backend = PdfChartBackend::with_fonts_directory(settings.fonts_directory.clone());
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(backend))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        backend: Arc<dyn ChartBackend>,
    ) -> Self {
        let options = PlotterOptions::new(settings.colors.clone(), &settings.histogram_directory)
            .with_font_family(&settings.font_family);
        let plotter = DistributionPlotter::new(backend.clone(), fs.clone(), options);

        Self {
            settings: Arc::new(settings),
            fs,
            backend,
            plotter,
        }
    }
}
