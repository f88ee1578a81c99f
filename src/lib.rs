//! # sanicost
//!
//! Economic cost of inadequate sanitation, with Monte Carlo uncertainty.
//!
//! - A deterministic evaluator over eight cost categories (health care,
//!   productivity, mortality, stunting, access time, carbon, cholera &
//!   funerals, tourism)
//! - A reproducible, parallel Monte Carlo engine that perturbs the inputs
//!   and reduces the totals to mean, percentiles and a per-category breakdown
//! - Jidoka guards: invalid inputs and non-finite costs stop the line
//!
//! ## Example
//!
//! ```rust
//! use sanicost::prelude::*;
//!
//! let inputs = ModelInputs::default();
//! let point = evaluate(&inputs).unwrap();
//!
//! let mut rng = SimRng::new(42);
//! let stats = simulate(&inputs, 500, &mut rng, None).unwrap();
//! assert!(stats.p5 <= point.total_cost_usd * 1.5);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Formulas mirror the published cost model
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod scenarios;
pub mod simulation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::comparison::{compare, sort_comparisons, ComparisonSort, CountryComparison};
    pub use crate::config::{AnalysisConfig, AnalysisConfigBuilder};
    pub use crate::engine::jidoka::{JidokaGuard, JidokaViolation};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::model::{
        evaluate, CostBreakdown, CostCategory, ModelInputs, ModelOutputs, MortalityMethod,
    };
    pub use crate::simulation::{simulate, MonteCarloEngine, SimulationStats};
}

/// Re-export for public API
pub use error::{ModelError, ModelResult};
