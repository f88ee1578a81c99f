//! Analysis configuration with YAML schema and validation.
//!
//! Implements Poka-Yoke (mistake-proofing) through:
//! - Type-safe configuration structs with unknown keys rejected
//! - Derived range checks via `validator`
//! - A semantic pass over the model inputs

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;
use validator::Validate;

use crate::engine::rng::SimRng;
use crate::error::{ModelError, ModelResult};
use crate::model::ModelInputs;
use crate::simulation::{MonteCarloEngine, DEFAULT_BATCH_SIZE, DEFAULT_ITERATIONS};

/// Upper bound on configured iterations.
pub const MAX_ITERATIONS: usize = 1_000_000;

/// Top-level analysis configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Analysis metadata.
    #[serde(default)]
    pub analysis: AnalysisMeta,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Monte Carlo settings.
    #[validate(nested)]
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,

    /// Baseline model inputs.
    #[validate(nested)]
    #[serde(default)]
    pub inputs: ModelInputs,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl AnalysisConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> ModelResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        // Poka-Yoke: validate all constraints
        config.validate()?;

        // Additional semantic validation
        config.validate_semantic()?;

        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> ModelResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> ModelResult<()> {
        if self.schema_version != "1.0" {
            return Err(ModelError::config(format!(
                "unsupported schema_version '{}' (expected 1.0)",
                self.schema_version
            )));
        }

        self.inputs.check()?;

        let carbon = &self.inputs.carbon;
        if let Some(preset) = carbon.emission_factor_source.preset_factor() {
            if (carbon.emission_factor - preset).abs() > f64::EPSILON {
                warn!(
                    source = ?carbon.emission_factor_source,
                    preset,
                    configured = carbon.emission_factor,
                    "Emission factor differs from its source preset"
                );
            }
        }

        Ok(())
    }

    /// Apply command-line overrides for the iteration count and seed.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `iterations` is zero or above
    /// [`MAX_ITERATIONS`].
    pub fn apply_overrides(
        &mut self,
        iterations: Option<usize>,
        seed: Option<u64>,
    ) -> ModelResult<()> {
        if let Some(n) = iterations {
            if n == 0 || n > MAX_ITERATIONS {
                return Err(ModelError::config(format!(
                    "iterations must be in 1..={MAX_ITERATIONS}, got {n}"
                )));
            }
            self.monte_carlo.iterations = n;
        }
        if seed.is_some() {
            self.reproducibility.seed = seed;
        }
        Ok(())
    }

    /// RNG for this analysis: seeded when a seed is configured, entropy otherwise.
    #[must_use]
    pub fn rng(&self) -> SimRng {
        self.reproducibility
            .seed
            .map_or_else(SimRng::from_entropy, SimRng::new)
    }

    /// Monte Carlo engine with the configured iteration count and batch size.
    #[must_use]
    pub fn engine(&self) -> MonteCarloEngine {
        MonteCarloEngine::new(self.monte_carlo.iterations)
            .with_batch_size(self.monte_carlo.batch_size)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            analysis: AnalysisMeta::default(),
            reproducibility: ReproducibilityConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            inputs: ModelInputs::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    name: Option<String>,
    seed: Option<u64>,
    iterations: Option<usize>,
    batch_size: Option<usize>,
    inputs: Option<ModelInputs>,
}

impl AnalysisConfigBuilder {
    /// Set the analysis name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the iteration count.
    #[must_use]
    pub const fn iterations(mut self, n: usize) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Set the batch size.
    #[must_use]
    pub const fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = Some(n);
        self
    }

    /// Set the baseline inputs.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // ModelInputs holds a String
    pub fn inputs(mut self, inputs: ModelInputs) -> Self {
        self.inputs = Some(inputs);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();

        if let Some(name) = self.name {
            config.analysis.name = name;
        }
        if self.seed.is_some() {
            config.reproducibility.seed = self.seed;
        }
        if let Some(n) = self.iterations {
            config.monte_carlo.iterations = n;
        }
        if let Some(n) = self.batch_size {
            config.monte_carlo.batch_size = n;
        }
        if let Some(inputs) = self.inputs {
            config.inputs = inputs;
        }

        config
    }
}

/// Analysis metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisMeta {
    /// Analysis name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Reproducibility settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed; absent means a fresh entropy seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Monte Carlo settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct MonteCarloConfig {
    /// Number of perturbed evaluations.
    #[validate(range(min = 1, max = 1_000_000))]
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Iterations between progress reports.
    #[validate(range(min = 1))]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

const fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

const fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::model::EmissionFactorSource;

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.reproducibility.seed, None);
        assert_eq!(config.monte_carlo.iterations, 2000);
        assert_eq!(config.monte_carlo.batch_size, 500);
        assert_eq!(config.inputs, ModelInputs::default());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .name("Malawi 2023")
            .seed(12345)
            .iterations(10_000)
            .batch_size(250)
            .build();

        assert_eq!(config.analysis.name, "Malawi 2023");
        assert_eq!(config.reproducibility.seed, Some(12345));
        assert_eq!(config.engine().iterations(), 10_000);
        assert_eq!(config.engine().batch_size(), 250);
    }

    #[test]
    fn test_minimal_yaml_uses_baseline() {
        let config = AnalysisConfig::from_yaml("reproducibility:\n  seed: 7\n").unwrap();
        assert_eq!(config.reproducibility.seed, Some(7));
        assert_eq!(config.inputs, ModelInputs::default());
    }

    #[test]
    fn test_empty_yaml_document() {
        let config = AnalysisConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_yaml_inputs_override() {
        let yaml = r"
monte_carlo:
  iterations: 500
inputs:
  macro:
    analysisYear: 2024
    currencyCode: XOF
    exchangeRate: 600
    gdpPerCapita: 900
    discountRate: 0.05
    hourlyWage: 0.6
    workingDaysPerYear: 250
    mortalityMethod: vsl
    vslMultiplier: 80
  health:
    population: 15000000
    diarrheaIncidenceUnder5: 3.0
    diarrheaIncidenceOver5: 0.4
    diarrheaDeathsUnder5: 3000
    diarrheaDeathsOver5: 1000
    attributionToSanitation: 0.88
    treatmentSeekingRate: 0.5
    costOutpatient: 4
    costInpatient: 35
  nutrition:
    stuntingPrevalence: 0.3
    attributionStunting: 0.5
    wageLossPercent: 0.1
  access:
    openDefecationPrevalence: 0.1
    dailyTimeForOD: 0.5
  carbon:
    percentWithPoorSanitation: 0.7
    emissionFactor: 52
    emissionFactorSource: SCARE
    socialCostOfCarbon: 100
  other:
    choleraResponseCost: 1000000
    funeralCostPerDeath: 150
    tourismLossPercentage: 0.05
    tourismReceipts: 20000000
";
        let config = AnalysisConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.monte_carlo.iterations, 500);
        assert_eq!(config.monte_carlo.batch_size, 500);
        assert_eq!(config.inputs.macro_.currency_code, "XOF");
        assert_eq!(
            config.inputs.macro_.mortality_method,
            crate::model::MortalityMethod::Vsl
        );
        assert_eq!(
            config.inputs.carbon.emission_factor_source,
            EmissionFactorSource::Scare
        );
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AnalysisConfig::builder().seed(1).iterations(100).build();
        config.apply_overrides(Some(250), Some(9)).unwrap();
        assert_eq!(config.monte_carlo.iterations, 250);
        assert_eq!(config.reproducibility.seed, Some(9));

        config.apply_overrides(None, None).unwrap();
        assert_eq!(config.monte_carlo.iterations, 250);
        assert_eq!(config.reproducibility.seed, Some(9));

        assert!(config.apply_overrides(Some(0), None).is_err());
        assert!(config.apply_overrides(Some(MAX_ITERATIONS + 1), None).is_err());
        assert_eq!(config.monte_carlo.iterations, 250);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(AnalysisConfig::from_yaml("solver: fast\n").is_err());
        assert!(AnalysisConfig::from_yaml("monte_carlo:\n  samples: 10\n").is_err());
    }

    #[test]
    fn test_iterations_out_of_range() {
        let err = AnalysisConfig::from_yaml("monte_carlo:\n  iterations: 0\n").unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
        assert!(AnalysisConfig::from_yaml("monte_carlo:\n  iterations: 1000001\n").is_err());
        assert!(AnalysisConfig::from_yaml("monte_carlo:\n  batch_size: 0\n").is_err());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut config = AnalysisConfig::default();
        config.inputs.health.treatment_seeking_rate = 1.5;
        let yaml = config.to_yaml().unwrap();
        let err = AnalysisConfig::from_yaml(&yaml).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_unsupported_schema_version() {
        let err = AnalysisConfig::from_yaml("schema_version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ModelError::Config { .. }));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::builder().seed(42).iterations(300).build();
        let back = AnalysisConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let config = AnalysisConfig::builder().seed(99).build();
        assert_eq!(config.rng().master_seed(), 99);
        let mut a = config.rng();
        let mut b = config.rng();
        assert_eq!(a.gen_f64().to_bits(), b.gen_f64().to_bits());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "analysis:\n  name: test\nreproducibility:\n  seed: 3").unwrap();
        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.analysis.name, "test");
        assert_eq!(config.reproducibility.seed, Some(3));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AnalysisConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
