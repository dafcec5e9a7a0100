//! Rounding helpers for KPI values.
//!
//! Percentages on the dashboard are produced by rounding the raw fraction to
//! one decimal place and only then scaling by 100, so a 45.3% share shows up
//! as `50.0`. Keep that order when adding new percentage KPIs.

/// Rounds `value` to `decimals` places.
///
/// Rounding is decided on the exact binary value of `value`, with exact ties
/// going to the even digit. This matches decimal formatting, so `0.45`
/// (stored slightly above 0.45) rounds up to `0.5` while `0.25` rounds down to
/// `0.2`.
///
/// Non-finite values are returned unchanged.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Share of `part` in `whole` as shown on the dashboard.
///
/// Computes `round_to(part / whole, 1) * 100`. Returns `0.0` when `whole` is
/// zero.
pub fn rounded_share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64, 1) * 100.0
}

/// Formats a KPI value the way the dashboard prints it: whole numbers keep a
/// trailing `.0`, everything else uses the shortest exact representation.
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
