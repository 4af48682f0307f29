use crate::core::format;
use crate::core::series::TimeSeriesPoint;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Value,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Value => style(text).green().bold(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned cell for numeric values.
pub fn value_cell(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Right)
}

/// Creates a cell for displaying percentage change with color coding.
pub fn change_cell(change: f64) -> Cell {
    let text = format::format_percent(change);
    let color = if change >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Renders a series as a row of block characters scaled between its min and
/// max values.
pub fn sparkline(points: &[TimeSeriesPoint]) -> String {
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.value), hi.max(p.value))
        });
    let span = max - min;
    let top = SPARK_BARS.len() - 1;

    points
        .iter()
        .map(|p| {
            let level = if span > 0.0 {
                ((p.value - min) / span * top as f64).round() as usize
            } else {
                0
            };
            SPARK_BARS[level.min(top)]
        })
        .collect()
}

/// Heading printed above each report section.
pub fn section_title(title: &str, creator: &str) -> String {
    format!(
        "{}: {}\n\n",
        style_text(title, StyleType::Label),
        style_text(creator, StyleType::Title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn points(values: &[f64]) -> Vec<TimeSeriesPoint> {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        values
            .iter()
            .map(|v| TimeSeriesPoint { date, value: *v })
            .collect()
    }

    #[test]
    fn test_sparkline_scales_to_range() {
        assert_eq!(sparkline(&points(&[0.0, 7.0])), "▁█");
        assert_eq!(sparkline(&points(&[1.0, 1.0, 1.0])), "▁▁▁");
        assert_eq!(sparkline(&[]), "");
    }
}
