//! Input uncertainty model.
//!
//! Each perturbed field gets independent multiplicative uniform noise,
//! `value × U(1 - p, 1 + p)`, optionally clamped back into its domain.
//! The table is data, so alternative uncertainty assumptions can be
//! swapped in without touching the engine.

use serde::{Deserialize, Serialize};

use crate::engine::rng::SimRng;
use crate::model::{InputField, ModelInputs, MortalityMethod};

/// Closed interval a perturbed value is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Bounds {
    /// Probability / fraction domain.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Create bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the interval.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// One row of the uncertainty table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    /// Field being perturbed.
    pub field: InputField,
    /// Half-width `p` of the multiplicative band.
    pub half_width: f64,
    /// Optional clamp applied after the draw.
    pub bounds: Option<Bounds>,
    /// Only perturb under this mortality method.
    pub only_for: Option<MortalityMethod>,
}

impl Perturbation {
    const fn of(field: InputField, half_width: f64) -> Self {
        Self {
            field,
            half_width,
            bounds: None,
            only_for: None,
        }
    }

    const fn clamped(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    const fn when(mut self, method: MortalityMethod) -> Self {
        self.only_for = Some(method);
        self
    }

    /// Whether this row applies to a baseline valued with `method`.
    #[must_use]
    pub fn applies_to(&self, method: MortalityMethod) -> bool {
        self.only_for.map_or(true, |m| m == method)
    }

    /// Draw a perturbed value for `base`.
    pub fn draw(&self, base: f64, rng: &mut SimRng) -> f64 {
        let v = rng.vary(base, self.half_width);
        self.bounds.map_or(v, |b| b.clamp(v))
    }
}

/// Default uncertainty table, in draw order.
const DEFAULT_TABLE: [Perturbation; 26] = {
    use InputField as F;
    use MortalityMethod as M;
    [
        // Macro
        Perturbation::of(F::GdpPerCapita, 0.05),
        Perturbation::of(F::ExchangeRate, 0.05),
        Perturbation::of(F::HourlyWage, 0.20),
        Perturbation::of(F::VslMultiplier, 0.25).when(M::Vsl),
        Perturbation::of(F::DiscountRate, 0.20)
            .clamped(Bounds::new(0.01, 0.20))
            .when(M::HumanCapital),
        // Health & demographics
        Perturbation::of(F::Population, 0.02),
        Perturbation::of(F::IncidenceUnder5, 0.25),
        Perturbation::of(F::IncidenceOver5, 0.25),
        Perturbation::of(F::DeathsUnder5, 0.20),
        Perturbation::of(F::DeathsOver5, 0.20),
        Perturbation::of(F::AttributionToSanitation, 0.10).clamped(Bounds::new(0.1, 1.0)),
        // Health costs
        Perturbation::of(F::TreatmentSeekingRate, 0.15).clamped(Bounds::UNIT),
        Perturbation::of(F::CostOutpatient, 0.30),
        Perturbation::of(F::CostInpatient, 0.30),
        // Nutrition
        Perturbation::of(F::StuntingPrevalence, 0.10).clamped(Bounds::UNIT),
        Perturbation::of(F::AttributionStunting, 0.30).clamped(Bounds::UNIT),
        Perturbation::of(F::WageLossPercent, 0.20).clamped(Bounds::UNIT),
        // Access time
        Perturbation::of(F::OpenDefecationPrevalence, 0.10).clamped(Bounds::UNIT),
        Perturbation::of(F::DailyTimeForOd, 0.25),
        // Carbon
        Perturbation::of(F::PercentWithPoorSanitation, 0.10).clamped(Bounds::UNIT),
        Perturbation::of(F::EmissionFactor, 0.30),
        Perturbation::of(F::SocialCostOfCarbon, 0.40),
        // Other
        Perturbation::of(F::CholeraResponseCost, 0.50),
        Perturbation::of(F::FuneralCostPerDeath, 0.20),
        Perturbation::of(F::TourismReceipts, 0.10),
        Perturbation::of(F::TourismLossPercentage, 0.40).clamped(Bounds::UNIT),
    ]
};

/// Per-field uncertainty assumptions.
#[derive(Debug, Clone, PartialEq)]
pub struct UncertaintyModel {
    rows: Vec<Perturbation>,
}

impl Default for UncertaintyModel {
    fn default() -> Self {
        Self {
            rows: DEFAULT_TABLE.to_vec(),
        }
    }
}

impl UncertaintyModel {
    /// Model with no perturbation at all: every draw equals the baseline.
    #[must_use]
    pub const fn none() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add or replace the row for a field.
    #[must_use]
    pub fn with(mut self, field: InputField, half_width: f64, bounds: Option<Bounds>) -> Self {
        if let Some(row) = self.rows.iter_mut().find(|p| p.field == field) {
            row.half_width = half_width;
            row.bounds = bounds;
        } else {
            self.rows.push(Perturbation {
                field,
                half_width,
                bounds,
                only_for: None,
            });
        }
        self
    }

    /// Row for a field, if the field is perturbed.
    #[must_use]
    pub fn get(&self, field: InputField) -> Option<&Perturbation> {
        self.rows.iter().find(|p| p.field == field)
    }

    /// Rows in draw order.
    #[must_use]
    pub fn rows(&self) -> &[Perturbation] {
        &self.rows
    }

    /// Produce one perturbed variant of `baseline`.
    ///
    /// The baseline is read only; the variant is a fresh, exclusively owned
    /// copy. Every draw reads the baseline value, never a previous draw.
    #[must_use]
    pub fn apply(&self, baseline: &ModelInputs, rng: &mut SimRng) -> ModelInputs {
        let method = baseline.macro_.mortality_method;
        let mut variant = baseline.clone();
        for row in self.rows.iter().filter(|p| p.applies_to(method)) {
            variant.set(row.field, row.draw(baseline.get(row.field), rng));
        }
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> ModelInputs {
        ModelInputs::default()
    }

    #[test]
    fn test_default_table_rows() {
        let model = UncertaintyModel::default();
        assert_eq!(model.rows().len(), 26);
        assert!(model.get(InputField::WorkingDaysPerYear).is_none());
        assert_eq!(model.get(InputField::SocialCostOfCarbon).map(|p| p.half_width), Some(0.40));
        assert_eq!(
            model.get(InputField::AttributionToSanitation).and_then(|p| p.bounds),
            Some(Bounds::new(0.1, 1.0))
        );
    }

    #[test]
    fn test_baseline_not_mutated() {
        let base = baseline();
        let snapshot = base.clone();
        let mut rng = SimRng::new(42);
        let _ = UncertaintyModel::default().apply(&base, &mut rng);
        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_human_capital_leaves_vsl_untouched() {
        let base = baseline();
        let mut rng = SimRng::new(1);
        for _ in 0..200 {
            let v = UncertaintyModel::default().apply(&base, &mut rng);
            assert_eq!(v.macro_.vsl_multiplier, base.macro_.vsl_multiplier);
            assert!((0.01..=0.20).contains(&v.macro_.discount_rate));
        }
    }

    #[test]
    fn test_vsl_leaves_discount_rate_untouched() {
        let mut base = baseline();
        base.macro_.mortality_method = MortalityMethod::Vsl;
        let mut rng = SimRng::new(2);
        let mut moved = false;
        for _ in 0..200 {
            let v = UncertaintyModel::default().apply(&base, &mut rng);
            assert_eq!(v.macro_.discount_rate, base.macro_.discount_rate);
            moved |= v.macro_.vsl_multiplier != base.macro_.vsl_multiplier;
        }
        assert!(moved);
    }

    #[test]
    fn test_unlisted_fields_carried_through() {
        let base = baseline();
        let mut rng = SimRng::new(3);
        let v = UncertaintyModel::default().apply(&base, &mut rng);
        assert_eq!(v.macro_.working_days_per_year, base.macro_.working_days_per_year);
        assert_eq!(v.macro_.analysis_year, base.macro_.analysis_year);
        assert_eq!(v.macro_.currency_code, base.macro_.currency_code);
        assert_eq!(v.carbon.emission_factor_source, base.carbon.emission_factor_source);
    }

    #[test]
    fn test_clamps_hold_at_upper_edge() {
        let mut base = baseline();
        base.health.treatment_seeking_rate = 1.0;
        base.other.tourism_loss_percentage = 1.0;
        base.health.attribution_to_sanitation = 1.0;
        let mut rng = SimRng::new(4);
        for _ in 0..500 {
            let v = UncertaintyModel::default().apply(&base, &mut rng);
            assert!(v.health.treatment_seeking_rate <= 1.0);
            assert!(v.other.tourism_loss_percentage <= 1.0);
            assert!((0.1..=1.0).contains(&v.health.attribution_to_sanitation));
        }
    }

    #[test]
    fn test_none_model_is_identity() {
        let base = baseline();
        let mut rng = SimRng::new(5);
        assert_eq!(UncertaintyModel::none().apply(&base, &mut rng), base);
    }

    #[test]
    fn test_with_replaces_row() {
        let model = UncertaintyModel::default().with(InputField::Population, 0.5, None);
        assert_eq!(model.get(InputField::Population).map(|p| p.half_width), Some(0.5));
        assert_eq!(model.rows().len(), 26);
        assert_eq!(model.rows()[5].field, InputField::Population);

        let gated = UncertaintyModel::default().with(InputField::VslMultiplier, 0.1, None);
        let row = gated.get(InputField::VslMultiplier).unwrap();
        assert!(!row.applies_to(MortalityMethod::HumanCapital));
    }
}
