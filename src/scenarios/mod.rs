//! Ready-made inputs.
//!
//! - `baseline`: the reference low-income profile and default assumptions
//! - `countries`: supported ISO codes and currencies
//! - `estimate`: complete inputs from partial development indicators

pub mod baseline;
pub mod countries;
pub mod estimate;

pub use baseline::reference_baseline;
pub use countries::{country, find_country, Country, SUPPORTED_COUNTRIES};
pub use estimate::{estimate_inputs, EstimatedInputs, RawIndicators};
