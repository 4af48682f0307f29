use super::ui;
use crate::core::DashboardSnapshot;
use crate::core::config::AppConfig;
use crate::core::format::{format_compact_number, format_percent_no_sign};
use crate::core::revenue::tier_label;
use anyhow::Result;
use comfy_table::Cell;

pub fn render(config: &AppConfig, snapshot: &DashboardSnapshot, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(&snapshot.lifecycle)?);
    }

    let lifecycle = &snapshot.lifecycle;
    let mut rates = ui::new_styled_table();
    rates.set_header(vec![
        ui::header_cell("Conversion (annualized)"),
        ui::header_cell("Churn"),
        ui::header_cell("Retention"),
        ui::header_cell("Net growth"),
    ]);
    rates.add_row(vec![
        ui::value_cell(format_percent_no_sign(lifecycle.conversion_rate)),
        ui::value_cell(format_percent_no_sign(lifecycle.churn_rate)),
        ui::value_cell(format_percent_no_sign(lifecycle.retention_rate)),
        ui::change_cell(lifecycle.net_growth_rate),
    ]);

    let mut tiers = ui::new_styled_table();
    tiers.set_header(vec![ui::header_cell("Tier"), ui::header_cell("Fans")]);
    for (tier, count) in &config.fans.by_tier {
        tiers.add_row(vec![
            Cell::new(tier_label(tier)),
            ui::value_cell(format_compact_number(*count as f64)),
        ]);
    }

    let mut output = ui::section_title("Fans", &snapshot.creator);
    output.push_str(&rates.to_string());
    output.push_str("\n\n");
    output.push_str(&tiers.to_string());
    if !snapshot.fan_sparkline.is_empty() {
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Fan growth:", ui::StyleType::Label),
            ui::sparkline(&snapshot.fan_sparkline)
        ));
    }
    Ok(output)
}
