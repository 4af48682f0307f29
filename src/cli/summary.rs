use super::ui;
use crate::core::DashboardSnapshot;
use crate::core::format::{format_currency, format_percent_no_sign};
use anyhow::Result;
use comfy_table::Cell;

impl DashboardSnapshot {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);

        let rows = vec![
            ("Revenue", ui::value_cell(format_currency(self.velocity.weekly))),
            ("Change vs. previous", ui::change_cell(self.revenue_change)),
            ("Monthly fan spend", ui::value_cell(format_currency(self.mfs))),
            ("Avg. daily revenue", ui::value_cell(format_currency(self.velocity.daily))),
            ("Revenue trend", ui::value_cell(self.velocity.trend.to_string())),
            (
                "Revenue health",
                ui::value_cell(self.concentration.health_score.to_string()),
            ),
            (
                "Conversion (annualized)",
                ui::value_cell(format_percent_no_sign(self.lifecycle.conversion_rate)),
            ),
            ("Net growth", ui::change_cell(self.lifecycle.net_growth_rate)),
            ("Sparkline", ui::value_cell(ui::sparkline(&self.revenue_sparkline))),
        ];
        for (label, cell) in rows {
            table.add_row(vec![Cell::new(label), cell]);
        }

        let mut output = ui::section_title("Dashboard", &self.creator);
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {} days by {}",
            ui::style_text("Range:", ui::StyleType::Label),
            self.days,
            ui::style_text(&self.granularity.to_string(), ui::StyleType::Subtle)
        ));
        output
    }
}

pub fn render(snapshot: &DashboardSnapshot, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }
    Ok(snapshot.display_as_table())
}
