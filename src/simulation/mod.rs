//! Monte Carlo uncertainty engine.
//!
//! Runs N evaluations of the deterministic model against N independently
//! perturbed copies of one baseline and reduces the totals to
//! [`SimulationStats`].
//!
//! # Reproducibility
//!
//! The caller's [`SimRng`] is partitioned into one stream per iteration
//! before any work starts. Iteration `i` always consumes stream `i`, so the
//! result for a given seed does not depend on thread count or batch size.
//!
//! # Example
//!
//! ```rust
//! use sanicost::engine::SimRng;
//! use sanicost::model::ModelInputs;
//! use sanicost::simulation::simulate;
//!
//! let mut rng = SimRng::new(42);
//! let stats = simulate(&ModelInputs::default(), 200, &mut rng, None).unwrap();
//! assert!(stats.p5 <= stats.median && stats.median <= stats.p95);
//! ```

pub mod perturbation;
pub mod stats;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::engine::rng::SimRng;
use crate::error::{ModelError, ModelResult};
use crate::model::{evaluate, CostBreakdown, ModelInputs};

pub use perturbation::{Bounds, Perturbation, UncertaintyModel};
pub use stats::{HistogramBin, SimulationStats};

/// Default iteration count.
pub const DEFAULT_ITERATIONS: usize = 2000;
/// Default number of iterations between progress reports.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Advisory progress callback, called with a percentage in `0..=100`.
pub type Progress<'a> = &'a (dyn Fn(u8) + Sync);

/// Batched, parallel Monte Carlo engine.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    iterations: usize,
    batch_size: usize,
    model: UncertaintyModel,
}

impl MonteCarloEngine {
    /// Engine with the default uncertainty table and batch size.
    #[must_use]
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            batch_size: DEFAULT_BATCH_SIZE,
            model: UncertaintyModel::default(),
        }
    }

    /// Set the batch size (at least 1).
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Replace the uncertainty table.
    #[must_use]
    pub fn with_model(mut self, model: UncertaintyModel) -> Self {
        self.model = model;
        self
    }

    /// Iteration count.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Batch size.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run the simulation.
    ///
    /// # Errors
    ///
    /// - `MonteCarlo` when the iteration count is zero.
    /// - The baseline's validation error, before any draw is made.
    /// - The first evaluation error of any iteration; the run is aborted
    ///   rather than reduced over fewer draws.
    pub fn run(
        &self,
        baseline: &ModelInputs,
        rng: &mut SimRng,
        progress: Option<Progress<'_>>,
    ) -> ModelResult<SimulationStats> {
        let n = self.iterations;
        if n == 0 {
            return Err(ModelError::monte_carlo("iteration count must be positive"));
        }
        baseline.check()?;

        let mut streams = rng.partition(n);
        let mut totals = Vec::with_capacity(n);
        let mut breakdown_sum = CostBreakdown::default();
        let mut done = 0usize;

        for (batch_idx, batch) in streams.chunks_mut(self.batch_size).enumerate() {
            let draws = batch
                .par_iter_mut()
                .map(|stream| {
                    let variant = self.model.apply(baseline, stream);
                    evaluate(&variant).map(|out| (out.total_cost_usd, out.costs_usd))
                })
                .collect::<ModelResult<Vec<_>>>()?;

            for (total, costs) in &draws {
                totals.push(*total);
                breakdown_sum.accumulate(costs);
            }

            done += batch.len();
            let percent = u8::try_from(done * 100 / n).unwrap_or(100);
            debug!(batch = batch_idx, done, total = n, percent, "Monte Carlo batch complete");
            if let Some(report) = progress {
                report(percent);
            }
        }

        let stats = SimulationStats::from_sample(totals, &breakdown_sum)?;
        info!(
            iterations = n,
            seed = rng.master_seed(),
            mean = stats.mean,
            p5 = stats.p5,
            p95 = stats.p95,
            "Simulation complete"
        );
        Ok(stats)
    }
}

/// Simulate `iterations` perturbed evaluations of `baseline`.
///
/// Convenience wrapper over [`MonteCarloEngine`] with the default
/// uncertainty table and batch size.
///
/// # Errors
///
/// See [`MonteCarloEngine::run`].
pub fn simulate(
    baseline: &ModelInputs,
    iterations: usize,
    rng: &mut SimRng,
    progress: Option<Progress<'_>>,
) -> ModelResult<SimulationStats> {
    MonteCarloEngine::new(iterations).run(baseline, rng, progress)
}
