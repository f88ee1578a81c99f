//! Deterministic sanitation cost model.
//!
//! Eight cost categories evaluated independently from one input set:
//! - Health care and productivity from attributable diarrhoeal cases
//! - Mortality under the human capital or VSL regime
//! - Stunting as discounted lifetime earnings lost
//! - Access time, carbon, cholera & funerals, tourism

pub mod discount;
pub mod evaluator;
pub mod inputs;
pub mod outputs;

pub use evaluator::{evaluate, stunting_cost_per_child, value_per_death};
pub use inputs::{
    AccessTimeInputs, CarbonInputs, EmissionFactorSource, HealthInputs, InputField, MacroInputs,
    ModelInputs, MortalityMethod, NutritionInputs, OtherCostsInputs, EMISSION_FACTOR_IPCC,
    EMISSION_FACTOR_SCARE, MAX_INPUT_MAGNITUDE,
};
pub use outputs::{CostBreakdown, CostCategory, ModelOutputs};
