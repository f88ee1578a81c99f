//! Summary statistics over a Monte Carlo sample.
//!
//! Percentiles use the nearest-rank convention on the ascending sample:
//! the element at index `floor(N × q)`, no interpolation. The median is the
//! element at `floor(N / 2)`, so even-sized samples report the upper-middle
//! draw rather than an average.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::CostBreakdown;

/// Reduced result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStats {
    /// Mean total cost, USD.
    pub mean: f64,
    /// Per-category mean across all draws, USD.
    pub mean_breakdown: CostBreakdown,
    /// Sorted element at `floor(N / 2)`.
    pub median: f64,
    /// Sorted element at `floor(N × 0.05)`.
    pub p5: f64,
    /// Sorted element at `floor(N × 0.95)`.
    pub p95: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Sample size N.
    pub iterations: usize,
    /// Every total, ascending.
    pub distribution: Vec<f64>,
}

/// One histogram bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub range_start: f64,
    /// Upper edge.
    pub range_end: f64,
    /// Draws falling in the bin.
    pub count: usize,
}

impl HistogramBin {
    /// Midpoint of the bin.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.range_start + self.range_end) / 2.0
    }
}

impl SimulationStats {
    /// Reduce a sample of totals plus the per-category sums accumulated in
    /// the same pass.
    ///
    /// # Errors
    ///
    /// Returns `MonteCarlo` if the sample is empty.
    pub fn from_sample(mut totals: Vec<f64>, breakdown_sum: &CostBreakdown) -> ModelResult<Self> {
        let n = totals.len();
        if n == 0 {
            return Err(ModelError::monte_carlo("cannot reduce an empty sample"));
        }

        totals.sort_by(f64::total_cmp);

        let nf = n as f64;
        let (mean, variance) = if totals[0].to_bits() == totals[n - 1].to_bits() {
            // Constant sample: `sum / n` need not round back to the value.
            (totals[0], 0.0)
        } else {
            let mean = totals.iter().sum::<f64>() / nf;
            let variance = totals.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / nf;
            (mean, variance)
        };

        Ok(Self {
            mean,
            mean_breakdown: breakdown_sum.scaled(1.0 / nf),
            median: totals[n / 2],
            p5: totals[rank(n, 0.05)],
            p95: totals[rank(n, 0.95)],
            std_dev: variance.sqrt(),
            iterations: n,
            distribution: totals,
        })
    }

    /// Coefficient of variation, `std_dev / mean` (0 for a zero mean).
    #[must_use]
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean.abs() < f64::EPSILON {
            0.0
        } else {
            self.std_dev / self.mean.abs()
        }
    }

    /// Equal-width histogram over `[0.95 × p5, 1.05 × p95]`.
    ///
    /// Draws outside the window are not counted; the top edge is inclusive.
    #[must_use]
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        if bins == 0 || self.distribution.is_empty() {
            return Vec::new();
        }
        let lo = self.p5 * 0.95;
        let hi = self.p95 * 1.05;
        let step = (hi - lo) / bins as f64;

        let mut out: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                range_start: lo + i as f64 * step,
                range_end: lo + (i + 1) as f64 * step,
                count: 0,
            })
            .collect();

        if step <= 0.0 {
            // Degenerate sample: everything lands in the first bar.
            out[0].count = self.distribution.len();
            return out;
        }

        for &v in self.distribution.iter().filter(|v| (lo..=hi).contains(*v)) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let idx = ((v - lo) / step).floor() as usize;
            out[idx.min(bins - 1)].count += 1;
        }
        out
    }
}

/// Nearest-rank index `floor(n × q)`, capped at the last element.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rank(n: usize, q: f64) -> usize {
    ((n as f64 * q).floor() as usize).min(n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown_of(totals: &[f64]) -> CostBreakdown {
        CostBreakdown {
            health_care: totals.iter().sum(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_sample_rejected() {
        let err = SimulationStats::from_sample(Vec::new(), &CostBreakdown::default()).unwrap_err();
        assert!(matches!(err, ModelError::MonteCarlo(_)));
    }

    #[test]
    fn test_single_draw() {
        let stats = SimulationStats::from_sample(vec![42.0], &breakdown_of(&[42.0])).unwrap();
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.p5, 42.0);
        assert_eq!(stats.p95, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.iterations, 1);
        assert_eq!(stats.distribution, vec![42.0]);
    }

    #[test]
    fn test_constant_sample_has_zero_spread() {
        // A value whose repeated sum does not divide back exactly.
        let value = 286_329_280.764_174_4;
        for n in [20, 100, 2000] {
            let totals = vec![value; n];
            let stats = SimulationStats::from_sample(totals, &breakdown_of(&vec![value; n])).unwrap();
            assert_eq!(stats.mean, value, "n = {n}");
            assert_eq!(stats.std_dev, 0.0, "n = {n}");
            assert_eq!(stats.coefficient_of_variation(), 0.0);
        }
    }

    #[test]
    fn test_nearest_rank_indices() {
        // 0..100 shuffled: indices map straight to values.
        let totals: Vec<f64> = (0..100).rev().map(f64::from).collect();
        let stats = SimulationStats::from_sample(totals.clone(), &breakdown_of(&totals)).unwrap();
        assert_eq!(stats.median, 50.0);
        assert_eq!(stats.p5, 5.0);
        assert_eq!(stats.p95, 95.0);
        assert_eq!(stats.distribution[0], 0.0);
        assert_eq!(stats.distribution[99], 99.0);
    }

    #[test]
    fn test_even_median_takes_upper_middle() {
        let totals = vec![4.0, 1.0, 3.0, 2.0];
        let stats = SimulationStats::from_sample(totals.clone(), &breakdown_of(&totals)).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_population_std_dev() {
        let totals = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SimulationStats::from_sample(totals.clone(), &breakdown_of(&totals)).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_breakdown_divides_by_n() {
        let sum = CostBreakdown {
            carbon: 30.0,
            tourism: 10.0,
            ..Default::default()
        };
        let stats = SimulationStats::from_sample(vec![10.0, 15.0, 15.0], &sum).unwrap();
        assert!((stats.mean_breakdown.carbon - 10.0).abs() < 1e-12);
        assert!((stats.mean_breakdown.tourism - 10.0 / 3.0).abs() < 1e-12);
        assert!((stats.mean_breakdown.total() - stats.mean).abs() < 1e-9);
    }

    #[test]
    fn test_wire_names() {
        let stats = SimulationStats::from_sample(vec![1.0], &breakdown_of(&[1.0])).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("stdDev").is_some());
        assert!(json.get("meanBreakdown").is_some());
        assert!(json["meanBreakdown"].get("healthCare").is_some());
    }

    #[test]
    fn test_histogram_counts_window() {
        let totals: Vec<f64> = (1..=100).map(f64::from).collect();
        let stats = SimulationStats::from_sample(totals.clone(), &breakdown_of(&totals)).unwrap();
        let bins = stats.histogram(15);
        assert_eq!(bins.len(), 15);
        let counted: usize = bins.iter().map(|b| b.count).sum();
        let expected = totals
            .iter()
            .filter(|v| (stats.p5 * 0.95..=stats.p95 * 1.05).contains(*v))
            .count();
        assert_eq!(counted, expected);
        assert!(bins[0].center() > bins[0].range_start);
    }

    #[test]
    fn test_histogram_degenerate() {
        let stats = SimulationStats::from_sample(vec![0.0; 5], &CostBreakdown::default()).unwrap();
        let bins = stats.histogram(4);
        assert_eq!(bins[0].count, 5);
        assert!(stats.histogram(0).is_empty());
    }

    #[test]
    fn test_coefficient_of_variation() {
        let totals = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = SimulationStats::from_sample(totals.clone(), &breakdown_of(&totals)).unwrap();
        assert!((stats.coefficient_of_variation() - 0.4).abs() < 1e-12);
    }
}
