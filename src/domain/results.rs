//! Analysis results as produced by the morphology analysis

use serde::{Deserialize, Serialize};

use crate::domain::arbor::ArborId;

/// Per-arbor analysis result. Every field may be absent.
///
/// `T` is `f64` for scalar statistics and `Vec<f64>` for per-segment
/// distributions. Missing JSON keys and `null` both deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult<T> {
    pub axon_result: Option<T>,
    pub basal_dendrites_result: Option<Vec<T>>,
    pub apical_dendrite_result: Option<T>,
}

/// One scalar per arbor (e.g. total length).
pub type ScalarResult = AnalysisResult<f64>;

/// One value sequence per arbor (e.g. all segment lengths).
pub type DistributionResult = AnalysisResult<Vec<f64>>;

impl<T> Default for AnalysisResult<T> {
    fn default() -> Self {
        Self {
            axon_result: None,
            basal_dendrites_result: None,
            apical_dendrite_result: None,
        }
    }
}

impl<T> AnalysisResult<T> {
    /// Present values in plotting order: axon, basal dendrites by index, apical.
    pub fn entries(&self) -> Vec<(ArborId, &T)> {
        let mut entries = Vec::new();
        if let Some(axon) = &self.axon_result {
            entries.push((ArborId::axon(), axon));
        }
        if let Some(basals) = &self.basal_dendrites_result {
            entries.extend(
                basals
                    .iter()
                    .enumerate()
                    .map(|(i, value)| (ArborId::basal(i), value)),
            );
        }
        if let Some(apical) = &self.apical_dendrite_result {
            entries.push((ArborId::apical(), apical));
        }
        entries
    }

    /// Number of present values.
    pub fn present_count(&self) -> usize {
        usize::from(self.axon_result.is_some())
            + self.basal_dendrites_result.as_ref().map_or(0, Vec::len)
            + usize::from(self.apical_dendrite_result.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Number of basal dendrites, `None` when the field is absent.
    pub fn basal_count(&self) -> Option<usize> {
        self.basal_dendrites_result.as_ref().map(Vec::len)
    }
}
