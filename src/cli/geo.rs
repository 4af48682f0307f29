use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::{format_compact_number, format_currency, format_percent_no_sign};
use crate::core::geo::{self, Country, GeoMetric, RegionTotals};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct RegionRow<'a> {
    region_id: &'a str,
    name: &'a str,
    totals: RegionTotals,
}

#[derive(Serialize)]
struct GeoReport<'a> {
    metric: GeoMetric,
    top_countries: Vec<&'a Country>,
    regions: Vec<RegionRow<'a>>,
}

pub fn render(
    config: &AppConfig,
    metric: GeoMetric,
    limit: Option<usize>,
    json: bool,
) -> Result<String> {
    let limit = limit.unwrap_or(config.settings.top_countries);
    debug!("Ranking top {limit} countries by {metric}");

    let report = GeoReport {
        metric,
        top_countries: geo::get_top_countries(&config.regions, metric, limit),
        regions: config
            .regions
            .iter()
            .map(|r| RegionRow {
                region_id: &r.region_id,
                name: &r.name,
                totals: geo::aggregate_region_totals(&r.countries),
            })
            .collect(),
    };
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut regions = ui::new_styled_table();
    regions.set_header(vec![
        ui::header_cell("Region"),
        ui::header_cell("Fans"),
        ui::header_cell("Revenue"),
    ]);
    for row in &report.regions {
        regions.add_row(vec![
            Cell::new(row.name),
            ui::value_cell(format_compact_number(row.totals.fans as f64)),
            ui::value_cell(format_currency(row.totals.revenue)),
        ]);
    }

    let mut countries = ui::new_styled_table();
    countries.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Country"),
        ui::header_cell("Fans"),
        ui::header_cell("Revenue"),
        ui::header_cell("Share"),
    ]);
    for (rank, country) in report.top_countries.iter().enumerate() {
        countries.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(format!("{} {}", country.flag, country.name).trim()),
            ui::value_cell(format_compact_number(country.fans as f64)),
            ui::value_cell(format_currency(country.revenue)),
            ui::value_cell(format_percent_no_sign(country.percent)),
        ]);
    }

    let mut output = ui::section_title("Geography", &config.creator);
    output.push_str(&regions.to_string());
    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text(&format!("Top countries by {metric}"), ui::StyleType::Label)
    ));
    output.push_str(&countries.to_string());
    Ok(output)
}
