//! Revenue metrics: monthly fan spend, velocity, concentration and change.
use crate::core::series::TimeSeriesPoint;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use tracing::debug;

/// Per-tier values keyed by caller-defined tier names.
pub type TierMap<V> = BTreeMap<String, V>;

const TIER_LABELS: [(&str, &str); 3] = [
    ("free", "Free"),
    ("supporter", "Supporter"),
    ("superfan", "Superfan"),
];

/// Relative change (in percent) between half-period means that counts as a
/// real shift in revenue pace.
pub const TREND_THRESHOLD_PERCENT: f64 = 5.0;

/// Gini coefficient below which revenue is considered healthy.
pub const HEALTHY_GINI_MAX: f64 = 0.4;
/// Gini coefficient below which revenue is considered moderately concentrated.
pub const MODERATE_GINI_MAX: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Accelerating,
    Decelerating,
    Stable,
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Trend::Accelerating => "accelerating",
                Trend::Decelerating => "decelerating",
                Trend::Stable => "stable",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthScore {
    #[default]
    Healthy,
    Moderate,
    Concentrated,
}

impl Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HealthScore::Healthy => "healthy",
                HealthScore::Moderate => "moderate",
                HealthScore::Concentrated => "concentrated",
            }
        )
    }
}

impl HealthScore {
    pub fn from_gini(gini: f64) -> Self {
        if gini < HEALTHY_GINI_MAX {
            HealthScore::Healthy
        } else if gini < MODERATE_GINI_MAX {
            HealthScore::Moderate
        } else {
            HealthScore::Concentrated
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueVelocity {
    pub daily: f64,
    pub weekly: f64,
    pub trend: Trend,
}

/// How much of total revenue the top spenders contribute, and how unequal
/// the spend distribution is overall.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueConcentration {
    pub top_1_percent: f64,
    pub top_10_percent: f64,
    pub top_20_percent: f64,
    pub gini_coefficient: f64,
    pub health_score: HealthScore,
}

/// Display label for a tier key. Unknown keys are title-cased.
pub fn tier_label(key: &str) -> String {
    if let Some((_, label)) = TIER_LABELS.iter().find(|(k, _)| *k == key) {
        return label.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Monthly fan spend: revenue per paying fan, rounded half-up to cents.
/// Returns 0 when there are no paying fans.
pub fn calculate_mfs(total_revenue: f64, paying_fans: u64) -> f64 {
    if paying_fans == 0 {
        return 0.0;
    }
    round_cents(total_revenue / paying_fans as f64)
}

/// Monthly fan spend for every tier present in either map. A tier without
/// fans yields 0 without affecting the others.
pub fn calculate_mfs_by_tier(
    revenue_by_tier: &TierMap<f64>,
    fans_by_tier: &TierMap<u64>,
) -> TierMap<f64> {
    let tiers: BTreeSet<&String> = revenue_by_tier.keys().chain(fans_by_tier.keys()).collect();
    tiers
        .into_iter()
        .map(|tier| {
            let revenue = revenue_by_tier.get(tier).copied().unwrap_or(0.0);
            let fans = fans_by_tier.get(tier).copied().unwrap_or(0);
            (tier.clone(), calculate_mfs(revenue, fans))
        })
        .collect()
}

/// Average daily revenue over the series together with the caller's period
/// total and a trend read from the first and second halves of the series.
pub fn calculate_revenue_velocity(
    time_series: &[TimeSeriesPoint],
    period_total: f64,
) -> RevenueVelocity {
    RevenueVelocity {
        daily: mean(time_series.iter().map(|p| p.value)),
        weekly: period_total,
        trend: classify_trend(time_series),
    }
}

fn classify_trend(time_series: &[TimeSeriesPoint]) -> Trend {
    if time_series.len() < 2 {
        return Trend::Stable;
    }
    let (first, second) = time_series.split_at(time_series.len() / 2);
    let first_mean = mean(first.iter().map(|p| p.value));
    let second_mean = mean(second.iter().map(|p| p.value));
    let change = calculate_percent_change(second_mean, first_mean);
    debug!("Trend half means: {first_mean} -> {second_mean} ({change:.2}%)");

    if change > TREND_THRESHOLD_PERCENT {
        Trend::Accelerating
    } else if change < -TREND_THRESHOLD_PERCENT {
        Trend::Decelerating
    } else {
        Trend::Stable
    }
}

/// Computes top-percentile revenue shares and the Gini coefficient over a list
/// of per-fan revenue contributions.
pub fn calculate_revenue_concentration(revenues: &[f64]) -> RevenueConcentration {
    let total: f64 = revenues.iter().sum();
    if revenues.is_empty() || total <= 0.0 {
        return RevenueConcentration::default();
    }

    let mut ascending = revenues.to_vec();
    ascending.sort_by(|a, b| a.total_cmp(b));

    let n = ascending.len();
    let top_share = |percent: usize| -> f64 {
        let count = (n * percent).div_ceil(100).max(1);
        let top: f64 = ascending.iter().rev().take(count).sum();
        top / total * 100.0
    };

    let weighted: f64 = ascending
        .iter()
        .enumerate()
        .map(|(i, x)| (i + 1) as f64 * x)
        .sum();
    let gini = ((2.0 * weighted - (n as f64 + 1.0) * total) / (n as f64 * total)).clamp(0.0, 1.0);
    debug!("Revenue concentration over {n} fans: gini={gini:.4}");

    RevenueConcentration {
        top_1_percent: top_share(1),
        top_10_percent: top_share(10),
        top_20_percent: top_share(20),
        gini_coefficient: gini,
        health_score: HealthScore::from_gini(gini),
    }
}

/// Percent change from `previous` to `current`. A zero baseline reports 100
/// for any gain and 0 otherwise.
pub fn calculate_percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    (current - previous) / previous * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn round_cents(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}
