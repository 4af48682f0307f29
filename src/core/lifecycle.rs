//! Fan lifecycle rates: conversion, churn, retention and net growth.
//!
//! Every rate is a percentage. Empty cohorts never produce NaN or infinity;
//! each function documents the value it falls back to instead.

pub const DEFAULT_CONVERSION_PERIOD_DAYS: u32 = 30;

const DAYS_PER_YEAR: f64 = 365.0;

/// Free-to-paying conversion over `period_days`, annualized linearly by
/// `365 / period_days`. Returns 0 when there are no free fans.
pub fn calculate_conversion_rate(
    new_paying_fans: u64,
    total_free_fans: u64,
    period_days: u32,
) -> f64 {
    if total_free_fans == 0 || period_days == 0 {
        return 0.0;
    }
    let period_rate = new_paying_fans as f64 / total_free_fans as f64 * 100.0;
    period_rate * (DAYS_PER_YEAR / period_days as f64)
}

/// Share of the starting cohort that churned. Returns 0 for an empty cohort.
pub fn calculate_churn_rate(churned_fans: u64, starting_fans: u64) -> f64 {
    if starting_fans == 0 {
        return 0.0;
    }
    churned_fans as f64 / starting_fans as f64 * 100.0
}

/// Share of the starting cohort that stayed. An empty cohort counts as fully
/// retained (100), unlike churn.
pub fn calculate_retention_rate(retained_fans: u64, starting_fans: u64) -> f64 {
    if starting_fans == 0 {
        return 100.0;
    }
    retained_fans as f64 / starting_fans as f64 * 100.0
}

/// Net change of the cohort relative to its starting size. Negative when
/// churn outpaces acquisition. Returns 0 for an empty cohort.
pub fn calculate_net_growth_rate(new_fans: u64, churned_fans: u64, starting_fans: u64) -> f64 {
    if starting_fans == 0 {
        return 0.0;
    }
    (new_fans as f64 - churned_fans as f64) / starting_fans as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate_is_annualized() {
        let rate = calculate_conversion_rate(100, 10_000, DEFAULT_CONVERSION_PERIOD_DAYS);
        assert!((rate - 12.1667).abs() < 0.001);
        assert_eq!(rate.round(), 12.0);

        // A year-long window needs no scaling
        let yearly = calculate_conversion_rate(100, 10_000, 365);
        assert!((yearly - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_rate_guards() {
        assert_eq!(calculate_conversion_rate(10, 0, 30), 0.0);
        assert_eq!(calculate_conversion_rate(10, 100, 0), 0.0);
        assert_eq!(calculate_conversion_rate(0, 100, 30), 0.0);
    }

    #[test]
    fn test_churn_rate() {
        assert_eq!(calculate_churn_rate(20, 1000), 2.0);
        assert_eq!(calculate_churn_rate(10, 0), 0.0);
    }

    #[test]
    fn test_retention_rate_defaults_to_full() {
        assert_eq!(calculate_retention_rate(980, 1000), 98.0);
        assert_eq!(calculate_retention_rate(0, 0), 100.0);
    }

    #[test]
    fn test_net_growth_rate_sign() {
        assert_eq!(calculate_net_growth_rate(100, 20, 1000), 8.0);
        assert_eq!(calculate_net_growth_rate(20, 100, 1000), -8.0);
        assert_eq!(calculate_net_growth_rate(50, 50, 1000), 0.0);
        assert_eq!(calculate_net_growth_rate(5, 1, 0), 0.0);
    }
}
