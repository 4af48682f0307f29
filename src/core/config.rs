use crate::core::dates::DateRange;
use crate::core::geo::Region;
use crate::core::lifecycle::DEFAULT_CONVERSION_PERIOD_DAYS;
use crate::core::revenue::TierMap;
use crate::core::series::TimeSeriesPoint;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RevenueData {
    /// Revenue for the current period, e.g. a trailing 7-day sum.
    #[serde(default)]
    pub period_total: f64,
    /// Revenue for the comparison period.
    #[serde(default)]
    pub previous_total: f64,
    #[serde(default)]
    pub daily: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub by_tier: TierMap<f64>,
    /// Revenue contributed by each paying fan.
    #[serde(default)]
    pub per_fan: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FanData {
    #[serde(default)]
    pub by_tier: TierMap<u64>,
    #[serde(default)]
    pub daily: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub starting: u64,
    #[serde(default)]
    pub new: u64,
    #[serde(default)]
    pub new_paying: u64,
    #[serde(default)]
    pub churned: u64,
    #[serde(default)]
    pub retained: u64,
    #[serde(default)]
    pub free: u64,
    #[serde(default)]
    pub paying: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default = "default_moving_average_window")]
    pub moving_average_window: usize,
    #[serde(default = "default_sparkline_points")]
    pub sparkline_points: usize,
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,
    #[serde(default = "default_conversion_period_days")]
    pub conversion_period_days: u32,
}

fn default_moving_average_window() -> usize {
    7
}

fn default_sparkline_points() -> usize {
    7
}

fn default_top_countries() -> usize {
    5
}

fn default_conversion_period_days() -> u32 {
    DEFAULT_CONVERSION_PERIOD_DAYS
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            moving_average_window: default_moving_average_window(),
            sparkline_points: default_sparkline_points(),
            top_countries: default_top_countries(),
            conversion_period_days: default_conversion_period_days(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub creator: String,
    pub range: DateRange,
    #[serde(default)]
    pub revenue: RevenueData,
    #[serde(default)]
    pub fans: FanData,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub settings: Settings,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fanmetrics", "fanmetrics")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config for {}", config.creator);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::Granularity;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
creator: "Nova Sound"
range:
  start: "2025-01-01"
  end: "2025-01-07"
revenue:
  period_total: 12600
  previous_total: 10500
  daily:
    - date: "2025-01-01"
      value: 1500
    - date: "2025-01-02"
      value: 1600
  by_tier:
    free: 0
    supporter: 34200
  per_fan: [10, 20, 30]
fans:
  by_tier:
    free: 8934
    supporter: 3420
  starting: 1000
  churned: 20
regions:
  - region_id: "na"
    name: "North America"
    fans: 7000
    revenue: 35000
    countries:
      - country_code: "US"
        name: "United States"
        flag: "🇺🇸"
        fans: 6000
        revenue: 30000
        percent: 60
settings:
  top_countries: 3
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.creator, "Nova Sound");
        assert_eq!(config.range.granularity(), Granularity::Day);
        assert_eq!(config.revenue.period_total, 12600.0);
        assert_eq!(config.revenue.daily.len(), 2);
        assert_eq!(config.revenue.daily[1].value, 1600.0);
        assert_eq!(config.revenue.by_tier["supporter"], 34200.0);
        assert_eq!(config.revenue.per_fan, vec![10.0, 20.0, 30.0]);
        assert_eq!(config.fans.by_tier["free"], 8934);
        assert_eq!(config.fans.starting, 1000);
        assert_eq!(config.fans.new, 0);
        assert_eq!(config.regions.len(), 1);
        assert_eq!(config.regions[0].countries[0].country_code, "US");
        assert!(config.regions[0].countries[0].metros.is_empty());

        assert_eq!(config.settings.top_countries, 3);
        assert_eq!(config.settings.moving_average_window, 7);
        assert_eq!(config.settings.conversion_period_days, 30);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml_str = r#"
creator: "Empty"
range:
  start: "2025-01-01"
  end: "2025-06-30"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.range.granularity(), Granularity::Month);
        assert!(config.revenue.daily.is_empty());
        assert!(config.regions.is_empty());
        assert_eq!(config.settings.sparkline_points, 7);
    }

    #[test]
    fn test_invalid_range_is_rejected() {
        let yaml_str = r#"
creator: "Backwards"
range:
  start: "2025-02-01"
  end: "2025-01-01"
"#;
        let result: Result<AppConfig, _> = serde_yaml::from_str(yaml_str);
        assert!(result.is_err());
    }
}
