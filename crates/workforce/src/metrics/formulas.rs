//! The two turnover formulas.
//!
//! Both express churn as a percentage of a headcount denominator and both
//! return 0 when that denominator is 0 — a rate over an empty population
//! is reported as zero, never as an error.

/// "Modern" turnover: `((hires + exits) / 2) / avg(active_start,
/// active_end) × 100`.
pub fn turnover_modern(hires: u32, exits: u32, active_start: u32, active_end: u32) -> f64 {
    let active_mean = f64::from(active_start + active_end) / 2.0;
    if active_mean > 0.0 {
        (f64::from(hires + exits) / 2.0) / active_mean * 100.0
    } else {
        0.0
    }
}

/// "Alternative" turnover: `((hires + exits) / 2) / active_end × 100`.
///
/// Algebraically `((hires + exits) / (2 × active_end)) × 100`, which is
/// how the monthly series states it.
pub fn turnover_alternative(hires: u32, exits: u32, active_end: u32) -> f64 {
    if active_end > 0 {
        (f64::from(hires + exits) / 2.0) / f64::from(active_end) * 100.0
    } else {
        0.0
    }
}

/// Round to two decimals, the reporting precision of every rate table.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
