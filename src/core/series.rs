//! Time-series smoothing, downsampling and resampling.
use crate::core::dates::{Granularity, bucket_start};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One bucket of a time series. Series are ordered by date by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// How values falling into the same bucket are combined by [`resample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Trailing moving average. The window grows from the first point until it
/// reaches `window_size`, then slides. Dates are kept as-is.
pub fn calculate_moving_average(
    data: &[TimeSeriesPoint],
    window_size: usize,
) -> Vec<TimeSeriesPoint> {
    let window_size = window_size.max(1);

    data.iter()
        .enumerate()
        .map(|(i, point)| {
            let start = (i + 1).saturating_sub(window_size);
            let window = &data[start..=i];
            TimeSeriesPoint {
                date: point.date,
                value: window.iter().map(|p| p.value).sum::<f64>() / window.len() as f64,
            }
        })
        .collect()
}

/// Downsamples a series to exactly `point_count` evenly spaced points,
/// keeping the first and last. Short series are returned unchanged.
pub fn get_sparkline_data(data: &[TimeSeriesPoint], point_count: usize) -> Vec<TimeSeriesPoint> {
    if data.len() <= point_count {
        return data.to_vec();
    }
    match point_count {
        0 => Vec::new(),
        1 => data.last().copied().into_iter().collect(),
        _ => {
            let last = data.len() - 1;
            let steps = point_count - 1;
            (0..point_count)
                .map(|i| data[(i * last + steps / 2) / steps])
                .collect()
        }
    }
}

/// Groups consecutive points into `granularity` buckets. Each output point is
/// dated at its bucket's first day.
pub fn resample(
    data: &[TimeSeriesPoint],
    granularity: Granularity,
    aggregation: Aggregation,
) -> Vec<TimeSeriesPoint> {
    let mut buckets: Vec<(NaiveDate, f64, usize)> = Vec::new();

    for point in data {
        let anchor = bucket_start(point.date, granularity);
        match buckets.last_mut() {
            Some((date, sum, count)) if *date == anchor => {
                *sum += point.value;
                *count += 1;
            }
            _ => buckets.push((anchor, point.value, 1)),
        }
    }

    buckets
        .into_iter()
        .map(|(date, sum, count)| TimeSeriesPoint {
            date,
            value: match aggregation {
                Aggregation::Sum => sum,
                Aggregation::Mean => sum / count as f64,
            },
        })
        .collect()
}
