use super::ui;
use crate::core::config::AppConfig;
use crate::core::format::{format_compact_number, format_currency, format_percent_no_sign};
use crate::core::revenue::tier_label;
use crate::core::{DashboardSnapshot, RevenueConcentration, TierMap};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize)]
struct RevenueReport<'a> {
    creator: &'a str,
    mfs: f64,
    mfs_by_tier: &'a TierMap<f64>,
    concentration: &'a RevenueConcentration,
}

pub fn render(config: &AppConfig, snapshot: &DashboardSnapshot, json: bool) -> Result<String> {
    if json {
        let report = RevenueReport {
            creator: &snapshot.creator,
            mfs: snapshot.mfs,
            mfs_by_tier: &snapshot.mfs_by_tier,
            concentration: &snapshot.concentration,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut output = ui::section_title("Revenue", &snapshot.creator);
    output.push_str(&tier_table(config, snapshot));
    output.push_str("\n\n");
    output.push_str(&concentration_table(&snapshot.concentration));
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Overall monthly fan spend:", ui::StyleType::Label),
        ui::style_text(&format_currency(snapshot.mfs), ui::StyleType::Value)
    ));
    Ok(output)
}

fn tier_table(config: &AppConfig, snapshot: &DashboardSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Tier"),
        ui::header_cell("Revenue"),
        ui::header_cell("Fans"),
        ui::header_cell("MFS"),
    ]);

    let tiers: BTreeSet<&String> = config
        .revenue
        .by_tier
        .keys()
        .chain(config.fans.by_tier.keys())
        .collect();
    for tier in tiers {
        let revenue = config.revenue.by_tier.get(tier).copied().unwrap_or(0.0);
        let fans = config.fans.by_tier.get(tier).copied().unwrap_or(0);
        let mfs = snapshot.mfs_by_tier.get(tier).copied().unwrap_or(0.0);
        table.add_row(vec![
            Cell::new(tier_label(tier)),
            ui::value_cell(format_currency(revenue)),
            ui::value_cell(format_compact_number(fans as f64)),
            ui::value_cell(format_currency(mfs)),
        ]);
    }
    table.to_string()
}

fn concentration_table(concentration: &RevenueConcentration) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Top 1%"),
        ui::header_cell("Top 10%"),
        ui::header_cell("Top 20%"),
        ui::header_cell("Gini"),
        ui::header_cell("Health"),
    ]);
    table.add_row(vec![
        ui::value_cell(format_percent_no_sign(concentration.top_1_percent)),
        ui::value_cell(format_percent_no_sign(concentration.top_10_percent)),
        ui::value_cell(format_percent_no_sign(concentration.top_20_percent)),
        ui::value_cell(format!("{:.2}", concentration.gini_coefficient)),
        Cell::new(concentration.health_score.to_string()),
    ]);
    table.to_string()
}
