//! Time value of money.

use std::ops::Range;

/// Present value of `annual` received in each year of `years`.
///
/// Year `t` is discounted by `(1 + rate)^t`, so year 0 is undiscounted.
/// An empty range is worth nothing.
#[must_use]
pub fn present_value(annual: f64, rate: f64, years: Range<u32>) -> f64 {
    years
        .map(|t| annual / (1.0 + rate).powi(i32::try_from(t).unwrap_or(i32::MAX)))
        .sum()
}
