//! Error types for sanicost.
//!
//! All fallible operations return `Result<T, ModelError>` instead of
//! panicking. Input-contract violations are reported before any cost is
//! computed; guard violations stop the line after evaluation.

use thiserror::Error;

/// Result type alias for sanicost operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for all sanicost operations.
#[derive(Debug, Error)]
pub enum ModelError {
    // ===== Input Contract =====
    /// An input field lies outside its documented domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// Wire name of the offending field (e.g. `health.population`).
        field: String,
        /// What the field must satisfy.
        message: String,
    },

    /// Derived range validation failed.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Jidoka Violations =====
    /// Numerical instability detected (NaN or Inf) in a computed figure.
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteValue {
        /// Location where the non-finite value was detected.
        location: String,
    },

    /// A cost component came out negative.
    #[error("Jidoka: negative cost {value:.6e} in category '{category}'")]
    NegativeCost {
        /// Cost category name.
        category: String,
        /// Offending value.
        value: f64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Domain Errors =====
    /// Monte Carlo error.
    #[error("Monte Carlo error: {0}")]
    MonteCarlo(String),

    /// Country code not in the supported table.
    #[error("Unknown country code: {0}")]
    UnknownCountry(String),
}

impl ModelError {
    /// Create an input-contract error for a field.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a Monte Carlo error.
    #[must_use]
    pub fn monte_carlo(message: impl Into<String>) -> Self {
        Self::MonteCarlo(message.into())
    }

    /// Check if this error is an invariant violation (bad input or a guard stop).
    #[must_use]
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::Validation(_)
                | Self::NonFiniteValue { .. }
                | Self::NegativeCost { .. }
        )
    }
}
