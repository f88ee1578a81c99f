//! Multi-country comparison.
//!
//! Runs one Monte Carlo simulation per country and ranks the results,
//! either by burden relative to national GDP or by absolute cost.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::rng::SimRng;
use crate::error::{ModelError, ModelResult};
use crate::model::{CostBreakdown, ModelInputs};
use crate::simulation::{MonteCarloEngine, Progress, SimulationStats};

/// Iterations per country unless configured otherwise.
pub const DEFAULT_COMPARISON_ITERATIONS: usize = 2000;

/// One country to compare.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryInput {
    /// ISO code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Baseline inputs.
    pub inputs: ModelInputs,
}

/// Simulation result for one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryComparison {
    /// ISO code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// National GDP used for the ratio, USD.
    pub national_gdp: f64,
    /// Simulation summary.
    pub stats: SimulationStats,
    /// Mean total cost as a percentage of national GDP.
    #[serde(rename = "percentGDPMean")]
    pub percent_gdp_mean: f64,
}

impl CountryComparison {
    /// Mean breakdown expressed as percent of national GDP.
    #[must_use]
    pub fn breakdown_percent_gdp(&self) -> CostBreakdown {
        if self.national_gdp > 0.0 {
            self.stats.mean_breakdown.scaled(100.0 / self.national_gdp)
        } else {
            CostBreakdown::default()
        }
    }
}

/// Ranking key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonSort {
    /// Mean cost as a share of GDP.
    #[default]
    PercentGdp,
    /// Mean absolute cost in USD.
    TotalCost,
}

impl std::str::FromStr for ComparisonSort {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gdp" | "percent-gdp" | "percentgdp" => Ok(Self::PercentGdp),
            "total" | "total-cost" | "totalcost" => Ok(Self::TotalCost),
            other => Err(ModelError::config(format!(
                "unknown sort key '{other}' (expected 'gdp' or 'total')"
            ))),
        }
    }
}

/// Simulate every country with `iterations` draws each.
///
/// Each country gets its own partition of `rng`, so adding or removing a
/// country never changes another country's draws beyond its position.
/// `progress` receives the share of countries completed.
///
/// # Errors
///
/// Fails on the first country whose simulation fails; partial rankings
/// are not returned.
pub fn compare(
    countries: &[CountryInput],
    iterations: usize,
    rng: &mut SimRng,
    progress: Option<Progress<'_>>,
) -> ModelResult<Vec<CountryComparison>> {
    let engine = MonteCarloEngine::new(iterations);
    let streams = rng.partition(countries.len());
    let total = countries.len();

    let mut results = Vec::with_capacity(total);
    for (i, (country, mut stream)) in countries.iter().zip(streams).enumerate() {
        let stats = engine.run(&country.inputs, &mut stream, None)?;
        let national_gdp = country.inputs.national_gdp();
        let percent_gdp_mean = if national_gdp > 0.0 {
            stats.mean / national_gdp * 100.0
        } else {
            0.0
        };

        results.push(CountryComparison {
            code: country.code.clone(),
            name: country.name.clone(),
            national_gdp,
            stats,
            percent_gdp_mean,
        });

        if let Some(report) = progress {
            report(u8::try_from((i + 1) * 100 / total).unwrap_or(100));
        }
    }

    info!(countries = total, iterations, "Comparison complete");
    Ok(results)
}

/// Sort descending by the chosen key.
pub fn sort_comparisons(results: &mut [CountryComparison], by: ComparisonSort) {
    let key = |c: &CountryComparison| match by {
        ComparisonSort::PercentGdp => c.percent_gdp_mean,
        ComparisonSort::TotalCost => c.stats.mean,
    };
    results.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}
