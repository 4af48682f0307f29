//! Composes every metric group into one snapshot for a dataset.
use crate::core::config::AppConfig;
use crate::core::dates::{self, Granularity};
use crate::core::geo::{self, Country, GeoMetric, RegionTotals};
use crate::core::lifecycle;
use crate::core::revenue::{self, RevenueConcentration, RevenueVelocity, TierMap};
use crate::core::series::{self, Aggregation, TimeSeriesPoint};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FanLifecycle {
    pub conversion_rate: f64,
    pub churn_rate: f64,
    pub retention_rate: f64,
    pub net_growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region_id: String,
    pub name: String,
    pub totals: RegionTotals,
}

/// Everything a dashboard shows for one creator and date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub creator: String,
    pub days: i64,
    pub granularity: Granularity,
    pub revenue_change: f64,
    pub mfs: f64,
    pub mfs_by_tier: TierMap<f64>,
    pub velocity: RevenueVelocity,
    pub concentration: RevenueConcentration,
    pub lifecycle: FanLifecycle,
    pub revenue_trend: Vec<TimeSeriesPoint>,
    pub revenue_buckets: Vec<TimeSeriesPoint>,
    pub revenue_sparkline: Vec<TimeSeriesPoint>,
    pub fan_sparkline: Vec<TimeSeriesPoint>,
    pub top_countries_by_fans: Vec<Country>,
    pub top_countries_by_revenue: Vec<Country>,
    pub regions: Vec<RegionSummary>,
}

impl DashboardSnapshot {
    /// Runs every metric over the dataset. Identical input always produces an
    /// identical snapshot.
    pub fn compute(config: &AppConfig) -> Self {
        let settings = &config.settings;
        let revenue_data = &config.revenue;
        let fans = &config.fans;

        let days = dates::get_days_in_range(&config.range);
        let granularity = config.range.granularity();
        debug!(
            "Computing dashboard for {} over {days} days ({granularity})",
            config.creator
        );

        let fan_lifecycle = FanLifecycle {
            conversion_rate: lifecycle::calculate_conversion_rate(
                fans.new_paying,
                fans.free,
                settings.conversion_period_days,
            ),
            churn_rate: lifecycle::calculate_churn_rate(fans.churned, fans.starting),
            retention_rate: lifecycle::calculate_retention_rate(fans.retained, fans.starting),
            net_growth_rate: lifecycle::calculate_net_growth_rate(
                fans.new,
                fans.churned,
                fans.starting,
            ),
        };

        let top_countries = |metric: GeoMetric| -> Vec<Country> {
            geo::get_top_countries(&config.regions, metric, settings.top_countries)
                .into_iter()
                .cloned()
                .collect()
        };

        DashboardSnapshot {
            creator: config.creator.clone(),
            days,
            granularity,
            revenue_change: revenue::calculate_percent_change(
                revenue_data.period_total,
                revenue_data.previous_total,
            ),
            mfs: revenue::calculate_mfs(revenue_data.period_total, fans.paying),
            mfs_by_tier: revenue::calculate_mfs_by_tier(&revenue_data.by_tier, &fans.by_tier),
            velocity: revenue::calculate_revenue_velocity(
                &revenue_data.daily,
                revenue_data.period_total,
            ),
            concentration: revenue::calculate_revenue_concentration(&revenue_data.per_fan),
            lifecycle: fan_lifecycle,
            revenue_trend: series::calculate_moving_average(
                &revenue_data.daily,
                settings.moving_average_window,
            ),
            revenue_buckets: series::resample(&revenue_data.daily, granularity, Aggregation::Sum),
            revenue_sparkline: series::get_sparkline_data(
                &revenue_data.daily,
                settings.sparkline_points,
            ),
            fan_sparkline: series::get_sparkline_data(&fans.daily, settings.sparkline_points),
            top_countries_by_fans: top_countries(GeoMetric::Fans),
            top_countries_by_revenue: top_countries(GeoMetric::Revenue),
            regions: config
                .regions
                .iter()
                .map(|r| RegionSummary {
                    region_id: r.region_id.clone(),
                    name: r.name.clone(),
                    totals: geo::aggregate_region_totals(&r.countries),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::revenue::{HealthScore, Trend};

    fn sample_config() -> AppConfig {
        serde_yaml::from_str(
            r#"
creator: "Nova Sound"
range:
  start: "2025-01-01"
  end: "2025-01-07"
revenue:
  period_total: 12600
  previous_total: 10500
  daily:
    - { date: "2025-01-01", value: 1500 }
    - { date: "2025-01-02", value: 1600 }
    - { date: "2025-01-03", value: 1700 }
    - { date: "2025-01-04", value: 1800 }
    - { date: "2025-01-05", value: 1900 }
    - { date: "2025-01-06", value: 2000 }
    - { date: "2025-01-07", value: 2100 }
  by_tier: { free: 0, supporter: 34200, superfan: 25410 }
  per_fan: [10, 10, 10, 10]
fans:
  by_tier: { free: 8934, supporter: 3420, superfan: 847 }
  starting: 1000
  new: 100
  new_paying: 100
  churned: 20
  retained: 980
  free: 10000
  paying: 1260
regions:
  - region_id: "na"
    name: "North America"
    fans: 7000
    revenue: 35000
    countries:
      - { country_code: "US", name: "United States", fans: 6000, revenue: 30000 }
      - { country_code: "CA", name: "Canada", fans: 1000, revenue: 5000 }
  - region_id: "eu"
    name: "Europe"
    fans: 3000
    revenue: 12000
    countries:
      - { country_code: "GB", name: "United Kingdom", fans: 2000, revenue: 8000 }
      - { country_code: "DE", name: "Germany", fans: 1000, revenue: 4000 }
settings:
  top_countries: 3
  moving_average_window: 3
  sparkline_points: 4
"#,
        )
        .expect("sample config should parse")
    }

    #[test]
    fn test_snapshot_metrics() {
        let snapshot = DashboardSnapshot::compute(&sample_config());

        assert_eq!(snapshot.days, 7);
        assert_eq!(snapshot.granularity, Granularity::Day);
        assert!((snapshot.revenue_change - 20.0).abs() < 1e-9);
        assert_eq!(snapshot.mfs, 10.0);
        assert_eq!(snapshot.mfs_by_tier["superfan"], 30.0);
        assert_eq!(snapshot.velocity.daily, 1800.0);
        assert_eq!(snapshot.velocity.trend, Trend::Accelerating);
        assert_eq!(snapshot.concentration.health_score, HealthScore::Healthy);

        assert_eq!(snapshot.lifecycle.churn_rate, 2.0);
        assert_eq!(snapshot.lifecycle.retention_rate, 98.0);
        assert_eq!(snapshot.lifecycle.net_growth_rate, 8.0);
        assert_eq!(snapshot.lifecycle.conversion_rate.round(), 12.0);

        assert_eq!(snapshot.revenue_trend.len(), 7);
        assert_eq!(snapshot.revenue_trend[2].value, 1600.0);
        assert_eq!(snapshot.revenue_buckets.len(), 7);
        assert_eq!(snapshot.revenue_sparkline.len(), 4);
        assert!(snapshot.fan_sparkline.is_empty());
    }

    #[test]
    fn test_snapshot_geography() {
        let snapshot = DashboardSnapshot::compute(&sample_config());

        let by_fans: Vec<&str> = snapshot
            .top_countries_by_fans
            .iter()
            .map(|c| c.country_code.as_str())
            .collect();
        assert_eq!(by_fans, vec!["US", "GB", "CA"]);
        assert_eq!(snapshot.top_countries_by_revenue[0].country_code, "US");

        assert_eq!(snapshot.regions.len(), 2);
        assert_eq!(snapshot.regions[0].totals.fans, 7000);
        assert_eq!(snapshot.regions[0].totals.revenue, 35_000.0);
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let config = sample_config();
        assert_eq!(
            DashboardSnapshot::compute(&config),
            DashboardSnapshot::compute(&config)
        );
    }
}
