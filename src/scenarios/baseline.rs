//! Reference baseline.
//!
//! A low-income country profile with roughly Malawian magnitudes. Used as
//! `ModelInputs::default()`, as the fallback inputs of an analysis config,
//! and as the fixture the golden values are recorded against.

use crate::model::{
    AccessTimeInputs, CarbonInputs, EmissionFactorSource, HealthInputs, MacroInputs, ModelInputs,
    MortalityMethod, NutritionInputs, OtherCostsInputs, EMISSION_FACTOR_IPCC,
};

/// Default VSL multiple of GDP per capita.
pub const DEFAULT_VSL_MULTIPLIER: f64 = 70.0;
/// Default social cost of carbon, USD per tonne.
pub const DEFAULT_SOCIAL_COST_OF_CARBON: f64 = 100.0;
/// Default annual discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;
/// Default working days per year.
pub const DEFAULT_WORKING_DAYS: f64 = 260.0;

impl Default for ModelInputs {
    fn default() -> Self {
        reference_baseline()
    }
}

/// The reference baseline input set.
#[must_use]
pub fn reference_baseline() -> ModelInputs {
    ModelInputs {
        macro_: MacroInputs {
            analysis_year: 2023,
            currency_code: "MWK".to_string(),
            exchange_rate: 1700.0,
            gdp_per_capita: 600.0,
            discount_rate: DEFAULT_DISCOUNT_RATE,
            hourly_wage: 0.50,
            working_days_per_year: DEFAULT_WORKING_DAYS,
            mortality_method: MortalityMethod::HumanCapital,
            vsl_multiplier: DEFAULT_VSL_MULTIPLIER,
        },
        health: HealthInputs {
            population: 20_000_000.0,
            diarrhea_incidence_under5: 3.5,
            diarrhea_incidence_over5: 0.5,
            diarrhea_deaths_under5: 4500.0,
            diarrhea_deaths_over5: 1500.0,
            attribution_to_sanitation: 0.88,
            treatment_seeking_rate: 0.60,
            cost_outpatient: 5.0,
            cost_inpatient: 40.0,
        },
        nutrition: NutritionInputs {
            stunting_prevalence: 0.30,
            attribution_stunting: 0.50,
            wage_loss_percent: 0.10,
        },
        access: AccessTimeInputs {
            open_defecation_prevalence: 0.06,
            daily_time_for_od: 0.5,
        },
        carbon: CarbonInputs {
            percent_with_poor_sanitation: 0.60,
            emission_factor: EMISSION_FACTOR_IPCC,
            emission_factor_source: EmissionFactorSource::Ipcc,
            social_cost_of_carbon: DEFAULT_SOCIAL_COST_OF_CARBON,
        },
        other: OtherCostsInputs {
            cholera_response_cost: 2_000_000.0,
            funeral_cost_per_death: 200.0,
            tourism_loss_percentage: 0.05,
            tourism_receipts: 50_000_000.0,
        },
    }
}
