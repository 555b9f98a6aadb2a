//! Histogram binning of a value distribution

use crate::domain::error::DomainError;

/// Upper bound on automatically chosen bins.
pub const MAX_BINS: usize = 50;

/// Binned distribution: `edges.len() == heights.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    /// Counts, or probability density when `normalized`
    pub heights: Vec<f64>,
    pub normalized: bool,
    pub sample_count: usize,
}

impl Histogram {
    /// Bin `values` with a Freedman–Diaconis bin count capped at [`MAX_BINS`].
    ///
    /// Constant input gets one unit-width bin centred on the value.
    pub fn from_values(values: &[f64], normalized: bool) -> Result<Self, DomainError> {
        if values.is_empty() {
            return Err(DomainError::EmptyDistribution("no values".to_string()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::NonFiniteValue {
                arbor: "distribution".to_string(),
            });
        }
        let (lo, hi) = min_max(values);
        let bins = if lo == hi {
            1
        } else {
            freedman_diaconis_bins(values).clamp(1, MAX_BINS)
        };
        Ok(Self::with_bins(values, bins, normalized))
    }

    /// Bin finite, non-empty `values` into `bins` equal-width bins.
    fn with_bins(values: &[f64], bins: usize, normalized: bool) -> Self {
        let (mut lo, mut hi) = min_max(values);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = ((v - lo) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        let n = values.len() as f64;
        let heights = counts
            .into_iter()
            .map(|c| {
                if normalized {
                    c as f64 / (n * width)
                } else {
                    c as f64
                }
            })
            .collect();

        Self {
            edges,
            heights,
            normalized,
            sample_count: values.len(),
        }
    }

    pub fn bin_count(&self) -> usize {
        self.heights.len()
    }

    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(0.0, f64::max)
    }

    /// Value range covered by the bins.
    pub fn range(&self) -> (f64, f64) {
        (
            self.edges.first().copied().unwrap_or(0.0),
            self.edges.last().copied().unwrap_or(1.0),
        )
    }
}

/// Freedman–Diaconis rule; falls back to `sqrt(n)` bins when the IQR is zero.
fn freedman_diaconis_bins(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    let iqr = percentile(&sorted, 75.0) - percentile(&sorted, 25.0);
    let h = 2.0 * iqr / n.cbrt();
    if h == 0.0 {
        return (n.sqrt() as usize).max(1);
    }
    let (lo, hi) = (sorted[0], sorted[sorted.len() - 1]);
    ((hi - lo) / h).ceil() as usize
}

/// Linear-interpolated percentile of sorted, non-empty data.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    let frac = rank - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * frac
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
