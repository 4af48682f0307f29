use super::ui;
use crate::core::config::AppConfig;
use crate::core::dates::{Granularity, format_date_for_granularity};
use crate::core::format::format_currency;
use crate::core::series::{self, Aggregation, TimeSeriesPoint};
use anyhow::Result;
use chrono::NaiveDateTime;
use comfy_table::Cell;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct TrendRow {
    pub label: String,
    pub revenue: f64,
    pub moving_average: f64,
}

/// Buckets daily revenue by `granularity` and pairs every bucket with its
/// trailing moving average.
pub fn trend_rows(
    daily: &[TimeSeriesPoint],
    granularity: Granularity,
    window: usize,
) -> Vec<TrendRow> {
    let buckets = series::resample(daily, granularity, Aggregation::Sum);
    let averages = series::calculate_moving_average(&buckets, window);
    debug!(
        "Resampled {} points into {} {granularity} buckets",
        daily.len(),
        buckets.len()
    );

    buckets
        .iter()
        .zip(averages)
        .map(|(bucket, avg)| TrendRow {
            label: format_date_for_granularity(NaiveDateTime::from(bucket.date), granularity),
            revenue: bucket.value,
            moving_average: avg.value,
        })
        .collect()
}

pub fn render(config: &AppConfig, granularity: Option<Granularity>, json: bool) -> Result<String> {
    let granularity = granularity.unwrap_or(config.range.granularity());
    let window = config.settings.moving_average_window;
    let rows = trend_rows(&config.revenue.daily, granularity, window);

    if json {
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Period ({granularity})")),
        ui::header_cell("Revenue"),
        ui::header_cell(&format!("{window}-period avg")),
    ]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.label),
            ui::value_cell(format_currency(row.revenue)),
            ui::value_cell(format_currency(row.moving_average)),
        ]);
    }

    let mut output = ui::section_title("Revenue trend", &config.creator);
    output.push_str(&table.to_string());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_trend_rows_monthly() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let daily: Vec<TimeSeriesPoint> = (0..4)
            .map(|i| TimeSeriesPoint {
                date: start + chrono::Duration::days(i),
                value: 100.0,
            })
            .collect();

        let rows = trend_rows(&daily, Granularity::Month, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Jan 2025");
        assert_eq!(rows[0].revenue, 200.0);
        assert_eq!(rows[1].label, "Feb 2025");
        assert_eq!(rows[1].moving_average, 200.0);
    }
}
