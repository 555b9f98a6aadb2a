//! Plot series derived from analysis results

use crate::domain::arbor::ArborId;
use crate::domain::error::DomainError;
use crate::domain::results::ScalarResult;

/// One labelled value of a per-arbor chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesEntry {
    pub arbor: ArborId,
    pub label: String,
    pub value: f64,
}

/// Ordered per-arbor values: axon, basal dendrites by index, apical.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSeries {
    pub entries: Vec<SeriesEntry>,
}

impl PlotSeries {
    /// Collect the present values of `results`. Absent fields are skipped.
    pub fn from_results(results: &ScalarResult) -> Result<Self, DomainError> {
        let entries = results
            .entries()
            .into_iter()
            .map(|(arbor, value)| {
                ensure_finite(arbor, *value)?;
                Ok(SeriesEntry {
                    arbor,
                    label: arbor.label(),
                    value: *value,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Share of each entry in the sum of all magnitudes, in percent.
    ///
    /// A zero total yields 0 for every entry.
    pub fn percentages(&self) -> Vec<f64> {
        let total: f64 = self.entries.iter().map(|e| e.value.abs()).sum();
        if total == 0.0 {
            return vec![0.0; self.entries.len()];
        }
        self.entries
            .iter()
            .map(|e| e.value.abs() / total * 100.0)
            .collect()
    }

    /// Percentages formatted for the bar overlay, e.g. `33.33%`.
    pub fn percentage_labels(&self) -> Vec<String> {
        self.percentages()
            .into_iter()
            .map(|p| format!("{p:.2}%"))
            .collect()
    }
}

/// Minimum, average and maximum of one arbor.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    pub arbor: ArborId,
    pub label: String,
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

/// Parallel min/avg/max values per arbor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MinAvgMaxSeries {
    pub entries: Vec<RangeEntry>,
}

impl MinAvgMaxSeries {
    /// Zip three results arbor by arbor.
    ///
    /// All three must have the same arbors present and the same number of
    /// basal dendrites.
    pub fn from_results(
        min: &ScalarResult,
        avg: &ScalarResult,
        max: &ScalarResult,
    ) -> Result<Self, DomainError> {
        check_presence("Axon", [&min.axon_result, &avg.axon_result, &max.axon_result])?;
        check_presence(
            "Apical Dendrite",
            [
                &min.apical_dendrite_result,
                &avg.apical_dendrite_result,
                &max.apical_dendrite_result,
            ],
        )?;
        let basal_counts = [min.basal_count(), avg.basal_count(), max.basal_count()];
        if basal_counts.iter().any(|c| *c != basal_counts[0]) {
            return Err(DomainError::MismatchedSeries {
                arbor: "Basal Dendrites".to_string(),
                reason: format!(
                    "basal dendrite counts differ (min: {}, avg: {}, max: {})",
                    describe_count(basal_counts[0]),
                    describe_count(basal_counts[1]),
                    describe_count(basal_counts[2]),
                ),
            });
        }

        let entries = min
            .entries()
            .into_iter()
            .zip(avg.entries())
            .zip(max.entries())
            .map(|(((arbor, lo), (_, mid)), (_, hi))| {
                for value in [*lo, *mid, *hi] {
                    ensure_finite(arbor, value)?;
                }
                Ok(RangeEntry {
                    arbor,
                    label: arbor.label(),
                    min: *lo,
                    avg: *mid,
                    max: *hi,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn mins(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.min).collect()
    }

    pub fn avgs(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.avg).collect()
    }

    pub fn maxs(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.max).collect()
    }
}

fn ensure_finite(arbor: ArborId, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFiniteValue {
            arbor: arbor.label(),
        })
    }
}

fn check_presence(arbor: &str, fields: [&Option<f64>; 3]) -> Result<(), DomainError> {
    let present = fields.map(Option::is_some);
    if present.iter().all(|p| *p == present[0]) {
        return Ok(());
    }
    let describe = |p: bool| if p { "present" } else { "absent" };
    Err(DomainError::MismatchedSeries {
        arbor: arbor.to_string(),
        reason: format!(
            "min is {}, avg is {}, max is {}",
            describe(present[0]),
            describe(present[1]),
            describe(present[2]),
        ),
    })
}

fn describe_count(count: Option<usize>) -> String {
    count.map_or_else(|| "absent".to_string(), |c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arbor::ArborKind;

    fn scenario() -> ScalarResult {
        ScalarResult {
            axon_result: Some(120.0),
            basal_dendrites_result: Some(vec![80.0, 95.0]),
            apical_dendrite_result: None,
        }
    }

    #[test]
    fn given_axon_and_two_basals_when_building_series_then_three_entries() {
        let series = PlotSeries::from_results(&scenario()).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.labels(), ["Axon", "Basal Dendrite 0", "Basal Dendrite 1"]);
        assert_eq!(series.values(), [120.0, 80.0, 95.0]);
        assert!(!series.labels().contains(&"Apical Dendrite"));
    }

    #[test]
    fn given_absent_axon_when_building_series_then_no_axon_label() {
        let results = ScalarResult {
            axon_result: None,
            ..scenario()
        };
        let series = PlotSeries::from_results(&results).unwrap();

        assert!(series.entries.iter().all(|e| e.arbor.kind != ArborKind::Axon));
        assert!(!series.labels().contains(&"Axon"));
    }

    #[test]
    fn given_nan_value_when_building_series_then_non_finite_error() {
        let results = ScalarResult {
            apical_dendrite_result: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            PlotSeries::from_results(&results),
            Err(DomainError::NonFiniteValue {
                arbor: "Apical Dendrite".to_string()
            })
        );
    }

    #[test]
    fn given_series_when_computing_percentages_then_sum_is_hundred() {
        let series = PlotSeries::from_results(&scenario()).unwrap();
        let total: f64 = series.percentages().iter().sum();
        assert!((total - 100.0).abs() < 1e-9);

        let labelled: f64 = series
            .percentage_labels()
            .iter()
            .map(|l| l.trim_end_matches('%').parse::<f64>().unwrap())
            .sum();
        assert!((labelled - 100.0).abs() < 0.02);
    }

    #[test]
    fn given_zero_total_when_computing_percentages_then_zero_without_panic() {
        let results = ScalarResult {
            axon_result: Some(0.0),
            ..Default::default()
        };
        let series = PlotSeries::from_results(&results).unwrap();

        assert_eq!(series.percentages(), [0.0]);
        assert_eq!(series.percentage_labels(), ["0.00%"]);
    }

    #[test]
    fn given_negative_values_when_computing_percentages_then_uses_magnitudes() {
        let results = ScalarResult {
            axon_result: Some(-1.0),
            apical_dendrite_result: Some(3.0),
            ..Default::default()
        };
        let series = PlotSeries::from_results(&results).unwrap();
        assert_eq!(series.percentages(), [25.0, 75.0]);
    }

    #[test]
    fn given_matching_results_when_zipping_min_avg_max_then_parallel_values() {
        let min = scenario();
        let avg = ScalarResult {
            axon_result: Some(130.0),
            basal_dendrites_result: Some(vec![85.0, 96.0]),
            apical_dendrite_result: None,
        };
        let max = ScalarResult {
            axon_result: Some(140.0),
            basal_dendrites_result: Some(vec![90.0, 97.0]),
            apical_dendrite_result: None,
        };

        let series = MinAvgMaxSeries::from_results(&min, &avg, &max).unwrap();

        assert_eq!(series.labels(), ["Axon", "Basal Dendrite 0", "Basal Dendrite 1"]);
        assert_eq!(series.mins(), [120.0, 80.0, 95.0]);
        assert_eq!(series.avgs(), [130.0, 85.0, 96.0]);
        assert_eq!(series.maxs(), [140.0, 90.0, 97.0]);
    }

    #[test]
    fn given_different_basal_counts_when_zipping_then_mismatch_error() {
        let min = scenario();
        let avg = ScalarResult {
            basal_dendrites_result: Some(vec![1.0]),
            ..scenario()
        };

        let err = MinAvgMaxSeries::from_results(&min, &avg, &scenario()).unwrap_err();
        match err {
            DomainError::MismatchedSeries { arbor, reason } => {
                assert_eq!(arbor, "Basal Dendrites");
                assert!(reason.contains("min: 2, avg: 1, max: 2"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn given_axon_missing_in_max_when_zipping_then_mismatch_error() {
        let max = ScalarResult {
            axon_result: None,
            ..scenario()
        };

        let err = MinAvgMaxSeries::from_results(&scenario(), &scenario(), &max).unwrap_err();
        assert_eq!(
            err,
            DomainError::MismatchedSeries {
                arbor: "Axon".to_string(),
                reason: "min is present, avg is present, max is absent".to_string(),
            }
        );
    }
}
