//! Output file naming

use std::path::{Path, PathBuf};

/// Where bar charts of one morphology go: `<directory>/<label>-<figure>.pdf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub directory: PathBuf,
    pub morphology_label: String,
}

impl OutputTarget {
    pub fn new(directory: impl Into<PathBuf>, morphology_label: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            morphology_label: morphology_label.into(),
        }
    }

    pub fn path(&self, figure_name: &str) -> PathBuf {
        self.directory
            .join(format!("{}-{}.pdf", self.morphology_label, figure_name))
    }
}

/// Histogram file for `title` inside `directory`: `<directory>/<title>-plot.pdf`.
pub fn histogram_path(directory: &Path, title: &str) -> PathBuf {
    directory.join(format!("{title}-plot.pdf"))
}
