//! Deterministic cost evaluator.
//!
//! Pure function from one complete [`ModelInputs`] to one [`ModelOutputs`]:
//! no randomness, no I/O, no shared state. Each category is computed
//! independently and the eight results are returned together.

use crate::engine::jidoka::JidokaGuard;
use crate::error::ModelResult;

use super::discount::present_value;
use super::inputs::{
    AccessTimeInputs, CarbonInputs, HealthInputs, MacroInputs, ModelInputs, MortalityMethod,
    NutritionInputs, OtherCostsInputs,
};
use super::outputs::{CostBreakdown, ModelOutputs};

/// Share of the population under five.
pub const UNDER5_SHARE: f64 = 0.15;
/// Share of the population five and over.
pub const OVER5_SHARE: f64 = 0.85;
/// Share of treated cases handled as outpatients.
pub const OUTPATIENT_SHARE: f64 = 0.9;
/// Share of treated cases admitted.
pub const INPATIENT_SHARE: f64 = 0.1;
/// Work days lost per attributable episode.
pub const DAYS_LOST_PER_EPISODE: f64 = 2.0;
/// Paid hours per working day.
pub const HOURS_PER_DAY: f64 = 8.0;
/// Fraction of a lost wage counted as real loss (labour substitution).
pub const LABOUR_SUBSTITUTION: f64 = 0.5;
/// Years of foregone output valued under the human capital approach.
pub const HUMAN_CAPITAL_YEARS: u32 = 20;
/// Age a stunted child enters the workforce.
pub const WORK_START_AGE: u32 = 15;
/// Working life in years.
pub const WORK_DURATION: u32 = 40;
/// Working days per year used for lifetime earnings.
pub const EARNING_DAYS_PER_YEAR: f64 = 260.0;
/// Value of access time as a fraction of the hourly wage.
pub const ACCESS_TIME_WAGE_SHARE: f64 = 0.3;

/// Evaluate the cost model.
///
/// # Errors
///
/// Returns an input-contract error when `inputs` violates the documented
/// domain, and a Jidoka error if a computed figure is non-finite or negative.
///
/// # Example
///
/// ```rust
/// use sanicost::model::{evaluate, ModelInputs};
///
/// let out = evaluate(&ModelInputs::default()).unwrap();
/// assert!((out.costs_usd.total() - out.total_cost_usd).abs() < 1e-3);
/// ```
pub fn evaluate(inputs: &ModelInputs) -> ModelResult<ModelOutputs> {
    inputs.check()?;
    let outputs = compute(inputs);
    JidokaGuard::check(&outputs)?;
    Ok(outputs)
}

/// Attributable case and death counts shared between categories.
#[derive(Debug, Clone, Copy)]
struct Burden {
    attributable_cases: f64,
    attributable_deaths: f64,
}

impl Burden {
    fn from_health(health: &HealthInputs) -> Self {
        let total_cases = health.diarrhea_incidence_under5 * (health.population * UNDER5_SHARE)
            + health.diarrhea_incidence_over5 * (health.population * OVER5_SHARE);
        let total_deaths = health.diarrhea_deaths_under5 + health.diarrhea_deaths_over5;
        Self {
            attributable_cases: total_cases * health.attribution_to_sanitation,
            attributable_deaths: total_deaths * health.attribution_to_sanitation,
        }
    }
}

fn compute(inputs: &ModelInputs) -> ModelOutputs {
    let m = &inputs.macro_;
    let burden = Burden::from_health(&inputs.health);

    let costs_usd = CostBreakdown {
        health_care: health_care_cost(&inputs.health, burden),
        productivity: productivity_cost(m, burden),
        mortality: mortality_cost(m, burden),
        nutrition: nutrition_cost(m, &inputs.health, &inputs.nutrition),
        access_time: access_time_cost(m, &inputs.health, &inputs.access),
        carbon: carbon_cost(&inputs.health, &inputs.carbon),
        cholera_and_funerals: cholera_and_funeral_cost(&inputs.other, burden),
        tourism: tourism_cost(&inputs.other),
    };

    let total_cost_usd = costs_usd.total();
    let national_gdp = inputs.national_gdp();
    let percent_gdp = if national_gdp > 0.0 {
        total_cost_usd / national_gdp * 100.0
    } else {
        0.0
    };

    ModelOutputs {
        costs_usd,
        costs_local: costs_usd.scaled(m.exchange_rate),
        total_cost_usd,
        total_cost_local: total_cost_usd * m.exchange_rate,
        percent_gdp,
        currency_code: m.currency_code.clone(),
    }
}

fn health_care_cost(health: &HealthInputs, burden: Burden) -> f64 {
    let treated = burden.attributable_cases * health.treatment_seeking_rate;
    let unit_cost = health.cost_outpatient * OUTPATIENT_SHARE
        + health.cost_inpatient * INPATIENT_SHARE;
    treated * unit_cost
}

fn productivity_cost(m: &MacroInputs, burden: Burden) -> f64 {
    let daily_wage = m.hourly_wage * HOURS_PER_DAY;
    burden.attributable_cases * DAYS_LOST_PER_EPISODE * daily_wage * LABOUR_SUBSTITUTION
}

/// Value of one premature death under the selected regime.
#[must_use]
pub fn value_per_death(m: &MacroInputs) -> f64 {
    match m.mortality_method {
        MortalityMethod::HumanCapital => {
            present_value(m.gdp_per_capita, m.discount_rate, 0..HUMAN_CAPITAL_YEARS)
        }
        MortalityMethod::Vsl => m.gdp_per_capita * m.vsl_multiplier,
    }
}

fn mortality_cost(m: &MacroInputs, burden: Burden) -> f64 {
    burden.attributable_deaths * value_per_death(m)
}

/// Present value of lifetime earnings lost by one stunted child.
#[must_use]
pub fn stunting_cost_per_child(m: &MacroInputs, nutrition: &NutritionInputs) -> f64 {
    let annual_wage = m.hourly_wage * HOURS_PER_DAY * EARNING_DAYS_PER_YEAR;
    let annual_loss = annual_wage * nutrition.wage_loss_percent;
    present_value(
        annual_loss,
        m.discount_rate,
        WORK_START_AGE..WORK_START_AGE + WORK_DURATION,
    )
}

fn nutrition_cost(m: &MacroInputs, health: &HealthInputs, nutrition: &NutritionInputs) -> f64 {
    // one-year cohort out of five under-five age bands
    let annual_cohort = health.population * UNDER5_SHARE / 5.0;
    let attributable_stunted =
        annual_cohort * nutrition.stunting_prevalence * nutrition.attribution_stunting;
    attributable_stunted * stunting_cost_per_child(m, nutrition)
}

fn access_time_cost(m: &MacroInputs, health: &HealthInputs, access: &AccessTimeInputs) -> f64 {
    let od_population = health.population * access.open_defecation_prevalence;
    let hour_value = m.hourly_wage * ACCESS_TIME_WAGE_SHARE;
    od_population * 365.0 * access.daily_time_for_od * hour_value
}

fn carbon_cost(health: &HealthInputs, carbon: &CarbonInputs) -> f64 {
    let affected = health.population * carbon.percent_with_poor_sanitation;
    let tonnes = affected * carbon.emission_factor / 1000.0;
    // SCC is already a present value per tonne emitted today
    tonnes * carbon.social_cost_of_carbon
}

fn cholera_and_funeral_cost(other: &OtherCostsInputs, burden: Burden) -> f64 {
    other.cholera_response_cost + burden.attributable_deaths * other.funeral_cost_per_death
}

fn tourism_cost(other: &OtherCostsInputs) -> f64 {
    other.tourism_receipts * other.tourism_loss_percentage
}
