//! Country input estimation from raw development indicators.
//!
//! Fills a complete [`ModelInputs`] from whatever indicators are available,
//! falling back to income-level heuristics for the rest, and records where
//! every value came from. The evaluator never sees partial data: this is
//! the layer that repairs it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{
    AccessTimeInputs, CarbonInputs, EmissionFactorSource, HealthInputs, MacroInputs, ModelInputs,
    MortalityMethod, NutritionInputs, OtherCostsInputs, EMISSION_FACTOR_IPCC,
};
use crate::scenarios::baseline::{
    DEFAULT_DISCOUNT_RATE, DEFAULT_SOCIAL_COST_OF_CARBON, DEFAULT_VSL_MULTIPLIER,
    DEFAULT_WORKING_DAYS,
};

const DEFAULT_GDP_PER_CAPITA: f64 = 1000.0;
const DEFAULT_POPULATION: f64 = 10_000_000.0;
const DEFAULT_BIRTH_RATE: f64 = 25.0;
const DEFAULT_U5_MORTALITY_RATE: f64 = 40.0;
const DEFAULT_OD_PREVALENCE: f64 = 0.05;
/// Wage income as a share of GDP per capita.
const WAGE_SHARE_OF_GDP: f64 = 0.8;
/// Share of under-5 deaths caused by diarrhoea.
const DIARRHOEA_SHARE_U5_DEATHS: f64 = 0.09;
/// Older-age diarrhoeal deaths relative to under-5.
const O5_TO_U5_DEATHS: f64 = 0.35;
/// WASH-attributable deaths split between under-5 and over-5.
const WASH_U5_SPLIT: f64 = 0.70;
const WASH_O5_SPLIT: f64 = 0.30;
/// Default share of diarrhoeal burden attributable to sanitation.
const WHO_ATTRIBUTION: f64 = 0.88;

/// Raw indicators for one country. Absent, zero, negative or NaN means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIndicators {
    /// Total population.
    pub population: Option<f64>,
    /// GDP per capita, current USD.
    pub gdp_per_capita: Option<f64>,
    /// Local currency units per USD.
    pub exchange_rate: Option<f64>,
    /// Open defecation, percent of population.
    pub open_defecation: Option<f64>,
    /// Under-5 mortality per 1,000 live births.
    pub mortality_under5_rate: Option<f64>,
    /// International tourism receipts, USD.
    pub tourism_receipts: Option<f64>,
    /// Crude birth rate per 1,000 people.
    pub birth_rate: Option<f64>,
    /// Health expenditure per capita, USD.
    pub health_expenditure: Option<f64>,
    /// Diarrhoea prevalence among under-5s, percent.
    pub diarrhea_prevalence: Option<f64>,
    /// Stunting prevalence among under-5s, percent.
    pub stunting_prevalence: Option<f64>,
    /// Mortality attributed to unsafe WASH, per 100,000.
    pub wash_mortality: Option<f64>,
    /// Population using at least basic sanitation, percent.
    pub basic_sanitation: Option<f64>,
}

/// Estimated inputs plus provenance, keyed by input field name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedInputs {
    /// Complete input set.
    pub inputs: ModelInputs,
    /// Field name → where the value came from.
    pub sources: BTreeMap<String, String>,
}

/// Known, usable indicator value. Every indicator is a positive quantity.
fn known(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite() && *x > 0.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn fraction(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[derive(Default)]
struct Provenance(BTreeMap<String, String>);

impl Provenance {
    fn note(&mut self, field: &str, source: impl Into<String>) {
        self.0.insert(field.to_string(), source.into());
    }

    /// Record a measured value or a fallback, warning on the fallback.
    fn pick(&mut self, field: &str, raw: Option<f64>, measured: &str, fallback: f64) -> f64 {
        if let Some(v) = known(raw) {
            self.note(field, measured);
            v
        } else {
            warn!(field, fallback, "Indicator missing, using default");
            self.note(field, format!("Default ({fallback})"));
            fallback
        }
    }
}

/// Estimate a complete input set from raw indicators.
///
/// # Example
///
/// ```rust
/// use sanicost::scenarios::estimate::{estimate_inputs, RawIndicators};
///
/// let raw = RawIndicators { gdp_per_capita: Some(650.0), ..Default::default() };
/// let est = estimate_inputs(&raw, "MWK", 2024);
/// assert_eq!(est.inputs.macro_.gdp_per_capita, 650.0);
/// assert!(est.sources.contains_key("population"));
/// ```
#[must_use]
pub fn estimate_inputs(raw: &RawIndicators, currency_code: &str, analysis_year: u32) -> EstimatedInputs {
    let mut src = Provenance::default();

    // Macro
    let gdp_pc = src.pick(
        "gdpPerCapita",
        raw.gdp_per_capita,
        "Indicator: GDP per capita",
        DEFAULT_GDP_PER_CAPITA,
    );
    let exchange_rate = src.pick(
        "exchangeRate",
        raw.exchange_rate,
        "Indicator: market exchange rate",
        1.0,
    );
    let hourly_wage = gdp_pc / (DEFAULT_WORKING_DAYS * 8.0) * WAGE_SHARE_OF_GDP;
    src.note("hourlyWage", format!("Derived from GDP per capita ({gdp_pc:.0} USD)"));

    // Demography and mortality
    let population = src.pick(
        "population",
        raw.population,
        "Indicator: population",
        DEFAULT_POPULATION,
    );

    let (deaths_u5, deaths_o5, attribution) = if let Some(m) = known(raw.wash_mortality) {
        let total = m / 100_000.0 * population;
        src.note(
            "diarrheaDeathsUnder5",
            format!("Derived from WASH mortality rate ({m:.1} per 100k)"),
        );
        src.note("diarrheaDeathsOver5", "Derived from WASH mortality rate");
        src.note("attributionToSanitation", "Included in WASH mortality rate");
        (
            (total * WASH_U5_SPLIT).round(),
            (total * WASH_O5_SPLIT).round(),
            1.0,
        )
    } else {
        let birth_rate = known(raw.birth_rate).unwrap_or(DEFAULT_BIRTH_RATE);
        let u5_rate = known(raw.mortality_under5_rate);
        if u5_rate.is_none() {
            warn!(field = "diarrheaDeathsUnder5", "No mortality indicators, using defaults");
        }
        let births = population * birth_rate / 1000.0;
        let u5_deaths = births * u5_rate.unwrap_or(DEFAULT_U5_MORTALITY_RATE) / 1000.0;
        let diarrhoeal_u5 = (u5_deaths * DIARRHOEA_SHARE_U5_DEATHS).round();
        src.note(
            "diarrheaDeathsUnder5",
            if u5_rate.is_some() {
                "Derived from under-5 mortality (9% diarrhoeal)"
            } else {
                "Default estimate"
            },
        );
        src.note("diarrheaDeathsOver5", "Relative to under-5 deaths");
        src.note("attributionToSanitation", format!("WHO estimate ({WHO_ATTRIBUTION})"));
        (
            diarrhoeal_u5,
            (diarrhoeal_u5 * O5_TO_U5_DEATHS).round(),
            WHO_ATTRIBUTION,
        )
    };

    // Incidence
    let incidence_u5 = if let Some(p) = known(raw.diarrhea_prevalence) {
        src.note(
            "diarrheaIncidenceUnder5",
            format!("Indicator: diarrhoea prevalence ({p:.1}%)"),
        );
        p * 0.25
    } else {
        src.note("diarrheaIncidenceUnder5", "Estimated from income level");
        if gdp_pc > 10_000.0 {
            0.5
        } else if gdp_pc > 2000.0 {
            1.5
        } else {
            3.5
        }
    };
    let incidence_o5 = incidence_u5 * 0.15;
    src.note("diarrheaIncidenceOver5", "Relative to under-5 incidence");

    // Care seeking and unit costs
    let seeking = (0.4 + gdp_pc / 10_000.0 * 0.4).clamp(0.4, 0.95);
    src.note("treatmentSeekingRate", "Estimated from GDP per capita");

    let cost_outpatient = if let Some(h) = known(raw.health_expenditure) {
        src.note("costOutpatient", "Indicator: health expenditure per capita");
        (h * 0.1).max(1.0)
    } else {
        src.note("costOutpatient", "Estimated at 0.5% of GDP per capita");
        (gdp_pc * 0.005).max(2.0)
    };
    let cost_inpatient = (cost_outpatient * 8.0).max(15.0);
    src.note("costInpatient", "Estimated at 8x outpatient cost");

    // Nutrition
    let stunting = if let Some(s) = known(raw.stunting_prevalence) {
        src.note("stuntingPrevalence", format!("Indicator: stunting ({s:.1}%)"));
        s / 100.0
    } else {
        src.note("stuntingPrevalence", "Estimated from income level");
        if gdp_pc < 1000.0 {
            0.40
        } else if gdp_pc < 3000.0 {
            0.25
        } else {
            0.10
        }
    };

    // Access
    let od = if let Some(v) = known(raw.open_defecation) {
        src.note("openDefecationPrevalence", "Indicator: open defecation");
        v / 100.0
    } else {
        src.note("openDefecationPrevalence", "Default (5%)");
        DEFAULT_OD_PREVALENCE
    };

    // Carbon
    let poor_sanitation = if let Some(b) = known(raw.basic_sanitation) {
        src.note(
            "percentWithPoorSanitation",
            "Indicator: population without basic sanitation",
        );
        1.0 - b / 100.0
    } else {
        src.note("percentWithPoorSanitation", "Estimated from open defecation");
        (od * 3.0 + 0.2).min(0.95)
    };

    // Other
    let tourism_receipts = if let Some(t) = known(raw.tourism_receipts) {
        src.note("tourismReceipts", "Indicator: tourism receipts");
        t
    } else {
        src.note("tourismReceipts", "Estimated at 2% of GDP");
        gdp_pc * population * 0.02
    };

    for (field, note) in [
        ("analysisYear", "Analysis setting"),
        ("discountRate", "Model assumption"),
        ("workingDaysPerYear", "Model assumption"),
        ("mortalityMethod", "User selection"),
        ("vslMultiplier", "Standard assumption (70x GDP per capita)"),
        ("attributionStunting", "Model assumption (50%)"),
        ("wageLossPercent", "Literature estimate (10%)"),
        ("dailyTimeForOD", "Model assumption (30 min/day)"),
        ("emissionFactor", "IPCC estimate (average latrine)"),
        ("socialCostOfCarbon", "Global estimate ($100/t)"),
        ("choleraResponseCost", "Model estimate"),
        ("funeralCostPerDeath", "Estimated at 20% of annual income"),
        ("tourismLossPercentage", "Model assumption (5%)"),
    ] {
        src.note(field, note);
    }

    let inputs = ModelInputs {
        macro_: MacroInputs {
            analysis_year,
            currency_code: currency_code.to_string(),
            exchange_rate,
            gdp_per_capita: gdp_pc,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            hourly_wage,
            working_days_per_year: DEFAULT_WORKING_DAYS,
            mortality_method: MortalityMethod::HumanCapital,
            vsl_multiplier: DEFAULT_VSL_MULTIPLIER,
        },
        health: HealthInputs {
            population,
            diarrhea_incidence_under5: round2(incidence_u5),
            diarrhea_incidence_over5: round2(incidence_o5),
            diarrhea_deaths_under5: deaths_u5,
            diarrhea_deaths_over5: deaths_o5,
            attribution_to_sanitation: attribution,
            treatment_seeking_rate: round2(seeking),
            cost_outpatient: round2(cost_outpatient),
            cost_inpatient: round2(cost_inpatient),
        },
        nutrition: NutritionInputs {
            stunting_prevalence: fraction(stunting),
            attribution_stunting: 0.50,
            wage_loss_percent: 0.10,
        },
        access: AccessTimeInputs {
            open_defecation_prevalence: fraction(od),
            daily_time_for_od: 0.5,
        },
        carbon: CarbonInputs {
            percent_with_poor_sanitation: fraction(round2(poor_sanitation)),
            emission_factor: EMISSION_FACTOR_IPCC,
            emission_factor_source: EmissionFactorSource::Ipcc,
            social_cost_of_carbon: DEFAULT_SOCIAL_COST_OF_CARBON,
        },
        other: OtherCostsInputs {
            cholera_response_cost: gdp_pc * 2000.0,
            funeral_cost_per_death: gdp_pc * 0.2,
            tourism_loss_percentage: 0.05,
            tourism_receipts,
        },
    };

    EstimatedInputs {
        inputs,
        sources: src.0,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::evaluate;
    use proptest::prelude::*;

    fn opt(range: std::ops::Range<f64>) -> impl Strategy<Value = Option<f64>> {
        prop::option::of(range)
    }

    proptest! {
        /// Any combination of plausible indicators yields evaluable inputs.
        #[test]
        fn prop_estimates_are_in_domain(
            population in opt(1e5..2e8),
            gdp in opt(100.0..60_000.0),
            fx in opt(0.5..20_000.0),
            od in opt(0.0..80.0),
            u5 in opt(2.0..150.0),
            births in opt(5.0..50.0),
            stunting in opt(1.0..60.0),
            wash in opt(0.1..150.0),
            basic in opt(5.0..100.0),
        ) {
            let raw = RawIndicators {
                population,
                gdp_per_capita: gdp,
                exchange_rate: fx,
                open_defecation: od,
                mortality_under5_rate: u5,
                birth_rate: births,
                stunting_prevalence: stunting,
                wash_mortality: wash,
                basic_sanitation: basic,
                ..Default::default()
            };
            let est = estimate_inputs(&raw, "XOF", 2024);
            prop_assert!(est.inputs.check().is_ok());
            prop_assert!(evaluate(&est.inputs).is_ok());
        }
    }
}
