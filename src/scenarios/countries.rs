//! Supported countries.
//!
//! Least-developed and priority countries for sanitation investment, keyed
//! by ISO 3166-1 alpha-2 code with their ISO 4217 currency.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};

/// A supported country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// ISO 4217 currency code.
    pub currency: &'static str,
}

const fn c(code: &'static str, name: &'static str, currency: &'static str) -> Country {
    Country {
        code,
        name,
        currency,
    }
}

/// All supported countries, alphabetical by name.
pub const SUPPORTED_COUNTRIES: [Country; 40] = [
    c("AF", "Afghanistan", "AFN"),
    c("AO", "Angola", "AOA"),
    c("BD", "Bangladesh", "BDT"),
    c("BJ", "Benin", "XOF"),
    c("BF", "Burkina Faso", "XOF"),
    c("BI", "Burundi", "BIF"),
    c("KH", "Cambodia", "KHR"),
    c("CF", "Central African Republic", "XAF"),
    c("TD", "Chad", "XAF"),
    c("CD", "Dem. Rep. Congo", "CDF"),
    c("DJ", "Djibouti", "DJF"),
    c("ER", "Eritrea", "ERN"),
    c("ET", "Ethiopia", "ETB"),
    c("GM", "Gambia", "GMD"),
    c("GN", "Guinea", "GNF"),
    c("GW", "Guinea-Bissau", "XOF"),
    c("HT", "Haiti", "HTG"),
    c("LA", "Laos", "LAK"),
    c("LS", "Lesotho", "LSL"),
    c("LR", "Liberia", "LRD"),
    c("MG", "Madagascar", "MGA"),
    c("MW", "Malawi", "MWK"),
    c("ML", "Mali", "XOF"),
    c("MR", "Mauritania", "MRU"),
    c("MZ", "Mozambique", "MZN"),
    c("MM", "Myanmar", "MMK"),
    c("NP", "Nepal", "NPR"),
    c("NE", "Niger", "XOF"),
    c("RW", "Rwanda", "RWF"),
    c("SN", "Senegal", "XOF"),
    c("SL", "Sierra Leone", "SLE"),
    c("SO", "Somalia", "SOS"),
    c("SS", "South Sudan", "SSP"),
    c("SD", "Sudan", "SDG"),
    c("TZ", "Tanzania", "TZS"),
    c("TL", "Timor-Leste", "USD"),
    c("TG", "Togo", "XOF"),
    c("UG", "Uganda", "UGX"),
    c("YE", "Yemen", "YER"),
    c("ZM", "Zambia", "ZMW"),
];

/// Look up a country by ISO code, ignoring case.
#[must_use]
pub fn find_country(code: &str) -> Option<&'static Country> {
    let code = code.trim();
    SUPPORTED_COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Look up a country, failing with `UnknownCountry`.
///
/// # Errors
///
/// Returns `UnknownCountry` if the code is not in the table.
pub fn country(code: &str) -> ModelResult<&'static Country> {
    find_country(code).ok_or_else(|| ModelError::UnknownCountry(code.to_string()))
}
