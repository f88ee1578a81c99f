//! Jidoka (自働化) - stop the line on a bad figure.
//!
//! Runs after every evaluation. Within the documented input domain the cost
//! formulas cannot produce NaN, infinities or negative costs; if one ever
//! appears, the guard halts instead of letting it reach a reduction where it
//! would silently skew means and percentiles.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{CostBreakdown, ModelOutputs};

/// Jidoka violation types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JidokaViolation {
    /// Non-finite value (NaN or Inf) detected.
    NonFiniteValue {
        /// Location of the value (e.g. `costsUSD.mortality`).
        location: String,
        /// The non-finite value itself.
        value: f64,
    },
    /// A cost component below zero.
    NegativeCost {
        /// Category wire name.
        category: String,
        /// Offending value.
        value: f64,
    },
}

impl From<JidokaViolation> for ModelError {
    fn from(v: JidokaViolation) -> Self {
        match v {
            JidokaViolation::NonFiniteValue { location, .. } => Self::NonFiniteValue { location },
            JidokaViolation::NegativeCost { category, value } => {
                Self::NegativeCost { category, value }
            }
        }
    }
}

/// Output guard. Every check is always on.
#[derive(Debug, Clone, Copy, Default)]
pub struct JidokaGuard;

impl JidokaGuard {
    /// Check one evaluation result.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, USD breakdown first.
    pub fn check(outputs: &ModelOutputs) -> Result<(), JidokaViolation> {
        Self::check_breakdown("costsUSD", &outputs.costs_usd)?;
        Self::check_breakdown("costsLocal", &outputs.costs_local)?;
        Self::check_scalar("totalCostUSD", outputs.total_cost_usd)?;
        Self::check_scalar("totalCostLocal", outputs.total_cost_local)?;
        Self::check_scalar("percentGDP", outputs.percent_gdp)
    }

    fn check_breakdown(prefix: &str, costs: &CostBreakdown) -> Result<(), JidokaViolation> {
        for (category, value) in costs.iter() {
            if !value.is_finite() {
                return Err(JidokaViolation::NonFiniteValue {
                    location: format!("{prefix}.{}", category.as_str()),
                    value,
                });
            }
            if value < 0.0 {
                return Err(JidokaViolation::NegativeCost {
                    category: category.as_str().to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    fn check_scalar(location: &str, value: f64) -> Result<(), JidokaViolation> {
        if !value.is_finite() {
            return Err(JidokaViolation::NonFiniteValue {
                location: location.to_string(),
                value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(costs: CostBreakdown) -> ModelOutputs {
        ModelOutputs {
            costs_usd: costs,
            costs_local: costs.scaled(2.0),
            total_cost_usd: costs.total(),
            total_cost_local: costs.total() * 2.0,
            percent_gdp: 1.0,
            currency_code: "XOF".to_string(),
        }
    }

    #[test]
    fn test_clean_outputs_pass() {
        let costs = CostBreakdown {
            carbon: 10.0,
            ..Default::default()
        };
        assert!(JidokaGuard::check(&outputs(costs)).is_ok());
    }

    #[test]
    fn test_nan_detected() {
        let costs = CostBreakdown {
            mortality: f64::NAN,
            ..Default::default()
        };
        let violation = JidokaGuard::check(&outputs(costs)).unwrap_err();
        match violation {
            JidokaViolation::NonFiniteValue { location, .. } => {
                assert_eq!(location, "costsUSD.mortality");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_negative_detected() {
        let costs = CostBreakdown {
            tourism: -3.0,
            ..Default::default()
        };
        let violation = JidokaGuard::check(&outputs(costs)).unwrap_err();
        assert!(matches!(violation, JidokaViolation::NegativeCost { ref category, .. } if category == "tourism"));
    }

    #[test]
    fn test_infinite_ratio_detected() {
        let mut out = outputs(CostBreakdown::default());
        out.percent_gdp = f64::INFINITY;
        assert!(JidokaGuard::check(&out).is_err());
    }

    #[test]
    fn test_negative_reported_before_later_nan() {
        let costs = CostBreakdown {
            health_care: -1.0,
            tourism: f64::NAN,
            ..Default::default()
        };
        let violation = JidokaGuard::check(&outputs(costs)).unwrap_err();
        assert!(matches!(violation, JidokaViolation::NegativeCost { ref category, .. } if category == "healthCare"));
    }

    #[test]
    fn test_local_breakdown_checked() {
        let mut out = outputs(CostBreakdown::default());
        out.costs_local.carbon = f64::INFINITY;
        let violation = JidokaGuard::check(&out).unwrap_err();
        assert!(matches!(violation, JidokaViolation::NonFiniteValue { ref location, .. } if location == "costsLocal.carbon"));
    }

    #[test]
    fn test_violation_into_error() {
        let err: ModelError = JidokaViolation::NegativeCost {
            category: "carbon".to_string(),
            value: -1.0,
        }
        .into();
        assert!(err.is_invariant_violation());
        assert!(err.to_string().contains("carbon"));
    }
}
