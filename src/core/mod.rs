//! Metric calculations for creator dashboards. Everything here except
//! `config` and `log` is pure.

pub mod config;
pub mod dashboard;
pub mod dates;
pub mod format;
pub mod geo;
pub mod lifecycle;
pub mod log;
pub mod revenue;
pub mod series;

// Re-export main types for cleaner imports
pub use dashboard::DashboardSnapshot;
pub use dates::{DateRange, Granularity};
pub use geo::{Country, GeoMetric, Metro, Region, RegionTotals};
pub use revenue::{HealthScore, RevenueConcentration, RevenueVelocity, TierMap, Trend};
pub use series::{Aggregation, TimeSeriesPoint};
