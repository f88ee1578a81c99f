//! Model input set.
//!
//! A complete, read-only snapshot of everything the cost model needs,
//! grouped into six categories. Wire names are camelCase so the records
//! round-trip with the presentation layer unchanged.
//!
//! Poka-Yoke: ranges are declared on the fields with `validator`; the
//! semantic pass in [`ModelInputs::check`] adds finiteness, which derived
//! range checks cannot see.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ModelError, ModelResult};

/// Largest magnitude accepted for any numeric input.
///
/// Every cost is a product of at most six inputs, so under this ceiling
/// each cost figure and its local-currency conversion stay finite. Only
/// the %GDP ratio can still overflow, for a vanishing national GDP, and
/// the output guard reports that.
pub const MAX_INPUT_MAGNITUDE: f64 = 1e12;

/// Kilograms of CO2e per person per year, IPCC 2019 pit latrine / septic tank in a warm climate.
pub const EMISSION_FACTOR_IPCC: f64 = 35.0;
/// Kilograms of CO2e per person per year, SCARE estimate including containment and emptying.
pub const EMISSION_FACTOR_SCARE: f64 = 52.0;

/// How a premature death is valued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MortalityMethod {
    /// Discounted foregone GDP contribution over 20 years.
    #[default]
    HumanCapital,
    /// Value of statistical life as a multiple of GDP per capita.
    Vsl,
}

impl MortalityMethod {
    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HumanCapital => "humanCapital",
            Self::Vsl => "vsl",
        }
    }
}

/// Provenance of the sanitation emission factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmissionFactorSource {
    /// IPCC 2019 refinement.
    #[default]
    #[serde(rename = "IPCC")]
    Ipcc,
    /// SCARE tool.
    #[serde(rename = "SCARE")]
    Scare,
    /// User-supplied factor.
    Custom,
}

impl EmissionFactorSource {
    /// Literature preset for this source, `None` for a custom factor.
    #[must_use]
    pub const fn preset_factor(self) -> Option<f64> {
        match self {
            Self::Ipcc => Some(EMISSION_FACTOR_IPCC),
            Self::Scare => Some(EMISSION_FACTOR_SCARE),
            Self::Custom => None,
        }
    }
}

/// Macroeconomic context and valuation choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MacroInputs {
    /// Year the analysis refers to.
    pub analysis_year: u32,
    /// ISO 4217 code of the local currency.
    #[validate(length(min = 1))]
    pub currency_code: String,
    /// Local currency units per USD.
    #[validate(range(exclusive_min = 0.0))]
    pub exchange_rate: f64,
    /// GDP per capita, USD.
    #[validate(range(exclusive_min = 0.0))]
    pub gdp_per_capita: f64,
    /// Annual discount rate as a fraction.
    #[validate(range(min = 0.0, exclusive_max = 1.0))]
    pub discount_rate: f64,
    /// Hourly wage, USD.
    #[validate(range(exclusive_min = 0.0))]
    pub hourly_wage: f64,
    /// Working days per year. Carried through; the model uses a fixed 260.
    #[validate(range(min = 0.0, max = 366.0))]
    pub working_days_per_year: f64,
    /// Mortality valuation regime.
    pub mortality_method: MortalityMethod,
    /// VSL as a multiple of GDP per capita.
    #[validate(range(exclusive_min = 0.0))]
    pub vsl_multiplier: f64,
}

/// Population and diarrhoeal disease burden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HealthInputs {
    /// Total population.
    #[validate(range(exclusive_min = 0.0))]
    pub population: f64,
    /// Diarrhoeal cases per child under five per year.
    #[validate(range(min = 0.0))]
    pub diarrhea_incidence_under5: f64,
    /// Diarrhoeal cases per person aged five and over per year.
    #[validate(range(min = 0.0))]
    pub diarrhea_incidence_over5: f64,
    /// Annual diarrhoeal deaths under five.
    #[validate(range(min = 0.0))]
    pub diarrhea_deaths_under5: f64,
    /// Annual diarrhoeal deaths five and over.
    #[validate(range(min = 0.0))]
    pub diarrhea_deaths_over5: f64,
    /// Fraction of disease attributable to poor sanitation.
    #[validate(range(min = 0.0, max = 1.0))]
    pub attribution_to_sanitation: f64,
    /// Fraction of cases that seek treatment.
    #[validate(range(min = 0.0, max = 1.0))]
    pub treatment_seeking_rate: f64,
    /// Outpatient cost per case, USD.
    #[validate(range(min = 0.0))]
    pub cost_outpatient: f64,
    /// Inpatient cost per case, USD.
    #[validate(range(min = 0.0))]
    pub cost_inpatient: f64,
}

/// Child stunting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInputs {
    /// Stunting prevalence among under-fives.
    #[validate(range(min = 0.0, max = 1.0))]
    pub stunting_prevalence: f64,
    /// Fraction of stunting attributable to sanitation.
    #[validate(range(min = 0.0, max = 1.0))]
    pub attribution_stunting: f64,
    /// Future wage penalty of a stunted child.
    #[validate(range(min = 0.0, max = 1.0))]
    pub wage_loss_percent: f64,
}

/// Time lost reaching open-defecation sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccessTimeInputs {
    /// Share of the population practising open defecation.
    #[validate(range(min = 0.0, max = 1.0))]
    pub open_defecation_prevalence: f64,
    /// Hours per person per day.
    #[serde(rename = "dailyTimeForOD")]
    #[validate(range(min = 0.0))]
    pub daily_time_for_od: f64,
}

/// Greenhouse gas emissions from poor sanitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarbonInputs {
    /// Share of the population on unimproved sanitation or open defecation.
    #[validate(range(min = 0.0, max = 1.0))]
    pub percent_with_poor_sanitation: f64,
    /// kg CO2e per person per year.
    #[validate(range(min = 0.0))]
    pub emission_factor: f64,
    /// Where the emission factor came from.
    #[serde(default)]
    pub emission_factor_source: EmissionFactorSource,
    /// USD per metric ton CO2e.
    #[validate(range(min = 0.0))]
    pub social_cost_of_carbon: f64,
}

impl CarbonInputs {
    /// Switch the emission factor source, applying its preset.
    ///
    /// A custom source keeps the current factor.
    #[must_use]
    pub fn with_source(mut self, source: EmissionFactorSource) -> Self {
        if let Some(factor) = source.preset_factor() {
            self.emission_factor = factor;
        }
        self.emission_factor_source = source;
        self
    }

    /// Use a user-supplied emission factor.
    #[must_use]
    pub fn with_custom_factor(mut self, kg_per_person: f64) -> Self {
        self.emission_factor = kg_per_person;
        self.emission_factor_source = EmissionFactorSource::Custom;
        self
    }
}

/// Cholera response, funerals and tourism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtherCostsInputs {
    /// Annual cholera outbreak response, USD.
    #[validate(range(min = 0.0))]
    pub cholera_response_cost: f64,
    /// Funeral cost per death, USD.
    #[validate(range(min = 0.0))]
    pub funeral_cost_per_death: f64,
    /// Fraction of tourism receipts lost.
    #[validate(range(min = 0.0, max = 1.0))]
    pub tourism_loss_percentage: f64,
    /// Annual tourism receipts, USD.
    #[validate(range(min = 0.0))]
    pub tourism_receipts: f64,
}

/// Complete input set for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ModelInputs {
    /// Macroeconomic context.
    #[validate(nested)]
    #[serde(rename = "macro")]
    pub macro_: MacroInputs,
    /// Health burden.
    #[validate(nested)]
    pub health: HealthInputs,
    /// Stunting.
    #[validate(nested)]
    pub nutrition: NutritionInputs,
    /// Access time.
    #[validate(nested)]
    pub access: AccessTimeInputs,
    /// Carbon.
    #[validate(nested)]
    pub carbon: CarbonInputs,
    /// Secondary costs.
    #[validate(nested)]
    pub other: OtherCostsInputs,
}

/// Every numeric input field, addressable without naming the struct path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    ExchangeRate,
    GdpPerCapita,
    DiscountRate,
    HourlyWage,
    WorkingDaysPerYear,
    VslMultiplier,
    Population,
    IncidenceUnder5,
    IncidenceOver5,
    DeathsUnder5,
    DeathsOver5,
    AttributionToSanitation,
    TreatmentSeekingRate,
    CostOutpatient,
    CostInpatient,
    StuntingPrevalence,
    AttributionStunting,
    WageLossPercent,
    OpenDefecationPrevalence,
    DailyTimeForOd,
    PercentWithPoorSanitation,
    EmissionFactor,
    SocialCostOfCarbon,
    CholeraResponseCost,
    FuneralCostPerDeath,
    TourismLossPercentage,
    TourismReceipts,
}

impl InputField {
    /// All numeric fields in declaration order.
    pub const ALL: [Self; 27] = [
        Self::ExchangeRate,
        Self::GdpPerCapita,
        Self::DiscountRate,
        Self::HourlyWage,
        Self::WorkingDaysPerYear,
        Self::VslMultiplier,
        Self::Population,
        Self::IncidenceUnder5,
        Self::IncidenceOver5,
        Self::DeathsUnder5,
        Self::DeathsOver5,
        Self::AttributionToSanitation,
        Self::TreatmentSeekingRate,
        Self::CostOutpatient,
        Self::CostInpatient,
        Self::StuntingPrevalence,
        Self::AttributionStunting,
        Self::WageLossPercent,
        Self::OpenDefecationPrevalence,
        Self::DailyTimeForOd,
        Self::PercentWithPoorSanitation,
        Self::EmissionFactor,
        Self::SocialCostOfCarbon,
        Self::CholeraResponseCost,
        Self::FuneralCostPerDeath,
        Self::TourismLossPercentage,
        Self::TourismReceipts,
    ];

    /// Dotted wire path, e.g. `health.population`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ExchangeRate => "macro.exchangeRate",
            Self::GdpPerCapita => "macro.gdpPerCapita",
            Self::DiscountRate => "macro.discountRate",
            Self::HourlyWage => "macro.hourlyWage",
            Self::WorkingDaysPerYear => "macro.workingDaysPerYear",
            Self::VslMultiplier => "macro.vslMultiplier",
            Self::Population => "health.population",
            Self::IncidenceUnder5 => "health.diarrheaIncidenceUnder5",
            Self::IncidenceOver5 => "health.diarrheaIncidenceOver5",
            Self::DeathsUnder5 => "health.diarrheaDeathsUnder5",
            Self::DeathsOver5 => "health.diarrheaDeathsOver5",
            Self::AttributionToSanitation => "health.attributionToSanitation",
            Self::TreatmentSeekingRate => "health.treatmentSeekingRate",
            Self::CostOutpatient => "health.costOutpatient",
            Self::CostInpatient => "health.costInpatient",
            Self::StuntingPrevalence => "nutrition.stuntingPrevalence",
            Self::AttributionStunting => "nutrition.attributionStunting",
            Self::WageLossPercent => "nutrition.wageLossPercent",
            Self::OpenDefecationPrevalence => "access.openDefecationPrevalence",
            Self::DailyTimeForOd => "access.dailyTimeForOD",
            Self::PercentWithPoorSanitation => "carbon.percentWithPoorSanitation",
            Self::EmissionFactor => "carbon.emissionFactor",
            Self::SocialCostOfCarbon => "carbon.socialCostOfCarbon",
            Self::CholeraResponseCost => "other.choleraResponseCost",
            Self::FuneralCostPerDeath => "other.funeralCostPerDeath",
            Self::TourismLossPercentage => "other.tourismLossPercentage",
            Self::TourismReceipts => "other.tourismReceipts",
        }
    }

    /// Field name without the category prefix.
    #[must_use]
    pub fn name(self) -> &'static str {
        let path = self.path();
        path.split_once('.').map_or(path, |(_, name)| name)
    }
}

impl ModelInputs {
    /// Read a numeric field.
    #[must_use]
    pub const fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::ExchangeRate => self.macro_.exchange_rate,
            InputField::GdpPerCapita => self.macro_.gdp_per_capita,
            InputField::DiscountRate => self.macro_.discount_rate,
            InputField::HourlyWage => self.macro_.hourly_wage,
            InputField::WorkingDaysPerYear => self.macro_.working_days_per_year,
            InputField::VslMultiplier => self.macro_.vsl_multiplier,
            InputField::Population => self.health.population,
            InputField::IncidenceUnder5 => self.health.diarrhea_incidence_under5,
            InputField::IncidenceOver5 => self.health.diarrhea_incidence_over5,
            InputField::DeathsUnder5 => self.health.diarrhea_deaths_under5,
            InputField::DeathsOver5 => self.health.diarrhea_deaths_over5,
            InputField::AttributionToSanitation => self.health.attribution_to_sanitation,
            InputField::TreatmentSeekingRate => self.health.treatment_seeking_rate,
            InputField::CostOutpatient => self.health.cost_outpatient,
            InputField::CostInpatient => self.health.cost_inpatient,
            InputField::StuntingPrevalence => self.nutrition.stunting_prevalence,
            InputField::AttributionStunting => self.nutrition.attribution_stunting,
            InputField::WageLossPercent => self.nutrition.wage_loss_percent,
            InputField::OpenDefecationPrevalence => self.access.open_defecation_prevalence,
            InputField::DailyTimeForOd => self.access.daily_time_for_od,
            InputField::PercentWithPoorSanitation => self.carbon.percent_with_poor_sanitation,
            InputField::EmissionFactor => self.carbon.emission_factor,
            InputField::SocialCostOfCarbon => self.carbon.social_cost_of_carbon,
            InputField::CholeraResponseCost => self.other.cholera_response_cost,
            InputField::FuneralCostPerDeath => self.other.funeral_cost_per_death,
            InputField::TourismLossPercentage => self.other.tourism_loss_percentage,
            InputField::TourismReceipts => self.other.tourism_receipts,
        }
    }

    /// Overwrite a numeric field.
    pub fn set(&mut self, field: InputField, value: f64) {
        let slot = match field {
            InputField::ExchangeRate => &mut self.macro_.exchange_rate,
            InputField::GdpPerCapita => &mut self.macro_.gdp_per_capita,
            InputField::DiscountRate => &mut self.macro_.discount_rate,
            InputField::HourlyWage => &mut self.macro_.hourly_wage,
            InputField::WorkingDaysPerYear => &mut self.macro_.working_days_per_year,
            InputField::VslMultiplier => &mut self.macro_.vsl_multiplier,
            InputField::Population => &mut self.health.population,
            InputField::IncidenceUnder5 => &mut self.health.diarrhea_incidence_under5,
            InputField::IncidenceOver5 => &mut self.health.diarrhea_incidence_over5,
            InputField::DeathsUnder5 => &mut self.health.diarrhea_deaths_under5,
            InputField::DeathsOver5 => &mut self.health.diarrhea_deaths_over5,
            InputField::AttributionToSanitation => &mut self.health.attribution_to_sanitation,
            InputField::TreatmentSeekingRate => &mut self.health.treatment_seeking_rate,
            InputField::CostOutpatient => &mut self.health.cost_outpatient,
            InputField::CostInpatient => &mut self.health.cost_inpatient,
            InputField::StuntingPrevalence => &mut self.nutrition.stunting_prevalence,
            InputField::AttributionStunting => &mut self.nutrition.attribution_stunting,
            InputField::WageLossPercent => &mut self.nutrition.wage_loss_percent,
            InputField::OpenDefecationPrevalence => &mut self.access.open_defecation_prevalence,
            InputField::DailyTimeForOd => &mut self.access.daily_time_for_od,
            InputField::PercentWithPoorSanitation => {
                &mut self.carbon.percent_with_poor_sanitation
            }
            InputField::EmissionFactor => &mut self.carbon.emission_factor,
            InputField::SocialCostOfCarbon => &mut self.carbon.social_cost_of_carbon,
            InputField::CholeraResponseCost => &mut self.other.cholera_response_cost,
            InputField::FuneralCostPerDeath => &mut self.other.funeral_cost_per_death,
            InputField::TourismLossPercentage => &mut self.other.tourism_loss_percentage,
            InputField::TourismReceipts => &mut self.other.tourism_receipts,
        };
        *slot = value;
    }

    /// National GDP in USD (`population × gdpPerCapita`).
    #[must_use]
    pub fn national_gdp(&self) -> f64 {
        self.health.population * self.macro_.gdp_per_capita
    }

    /// Check the input contract.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidInput`] for the first non-finite field or
    /// field above [`MAX_INPUT_MAGNITUDE`], and
    /// [`ModelError::Validation`] when any declared range is violated.
    pub fn check(&self) -> ModelResult<()> {
        for field in InputField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(ModelError::invalid_input(
                    field.path(),
                    format!("must be finite, got {value}"),
                ));
            }
            if value.abs() > MAX_INPUT_MAGNITUDE {
                return Err(ModelError::invalid_input(
                    field.path(),
                    format!("magnitude {value:e} exceeds {MAX_INPUT_MAGNITUDE:e}"),
                ));
            }
        }
        self.validate()?;
        Ok(())
    }
}
