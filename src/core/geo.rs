//! Geographic breakdowns: region → country → metro.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metro {
    pub metro_id: String,
    pub display_name: String,
    pub fans: u64,
    pub revenue: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub country_code: String,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    pub fans: u64,
    pub revenue: f64,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub metros: Vec<Metro>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: String,
    pub name: String,
    pub fans: u64,
    pub revenue: f64,
    #[serde(default)]
    pub percent: f64,
    #[serde(default)]
    pub countries: Vec<Country>,
}

/// Metric used to rank countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoMetric {
    Fans,
    Revenue,
}

impl Display for GeoMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                GeoMetric::Fans => "fans",
                GeoMetric::Revenue => "revenue",
            }
        )
    }
}

impl FromStr for GeoMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fans" => Ok(GeoMetric::Fans),
            "revenue" => Ok(GeoMetric::Revenue),
            _ => Err(anyhow::anyhow!("Invalid geographic metric: {}", s)),
        }
    }
}

impl Country {
    pub fn metric(&self, metric: GeoMetric) -> f64 {
        match metric {
            GeoMetric::Fans => self.fans as f64,
            GeoMetric::Revenue => self.revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionTotals {
    pub fans: u64,
    pub revenue: f64,
}

/// Ranks every country across all regions by `metric`, highest first, and
/// keeps the first `limit`. Ties keep their original order.
pub fn get_top_countries(regions: &[Region], metric: GeoMetric, limit: usize) -> Vec<&Country> {
    let mut countries: Vec<&Country> = regions.iter().flat_map(|r| r.countries.iter()).collect();
    countries.sort_by(|a, b| b.metric(metric).total_cmp(&a.metric(metric)));
    countries.truncate(limit);
    countries
}

/// Sums fans and revenue over the given countries. Metros are not visited.
pub fn aggregate_region_totals(countries: &[Country]) -> RegionTotals {
    countries.iter().fold(RegionTotals::default(), |acc, c| RegionTotals {
        fans: acc.fans + c.fans,
        revenue: acc.revenue + c.revenue,
    })
}
