//! Number, currency and percent rendering for dashboard labels.

const COMPACT_SUFFIXES: [(f64, &str); 3] = [(1e3, "K"), (1e6, "M"), (1e9, "B")];

/// Renders a number with a one-decimal `K`/`M`/`B` suffix once it reaches a
/// thousand, otherwise as a plain integer. The suffix follows the rounded
/// value, so `999_960` reads `1.0M` rather than `1000.0K`.
pub fn format_compact_number(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let magnitude = n.abs();
    let whole = magnitude.round();
    if whole < 1e3 {
        return drop_negative_zero(format!("{sign}{whole:.0}"));
    }

    let mut scaled = whole;
    let mut unit = "";
    for (threshold, suffix) in COMPACT_SUFFIXES {
        scaled = (magnitude / threshold * 10.0).round() / 10.0;
        unit = suffix;
        if scaled < 1e3 {
            break;
        }
    }
    format!("{sign}{scaled:.1}{unit}")
}

/// Renders a dollar amount. Whole amounts drop the decimals, anything else
/// keeps exactly two.
pub fn format_currency(n: f64) -> String {
    let sign = if n < 0.0 { "-" } else { "" };
    let amount = n.abs();

    let rendered = if amount.fract() == 0.0 {
        format!("{sign}${}", group_thousands(&format!("{amount:.0}")))
    } else {
        let fixed = format!("{amount:.2}");
        match fixed.split_once('.') {
            Some((whole, cents)) => format!("{sign}${}.{cents}", group_thousands(whole)),
            None => format!("{sign}${}", group_thousands(&fixed)),
        }
    };
    drop_negative_zero(rendered)
}

/// Renders a percentage with an explicit `+` for non-negative values.
pub fn format_percent(n: f64) -> String {
    let rendered = drop_negative_zero(format!("{n:.1}"));
    if rendered.starts_with('-') {
        format!("{rendered}%")
    } else {
        format!("+{rendered}%")
    }
}

/// Renders a percentage without a leading `+`.
pub fn format_percent_no_sign(n: f64) -> String {
    format!("{}%", drop_negative_zero(format!("{n:.1}")))
}

// a value that rounds to zero never keeps its minus sign
fn drop_negative_zero(rendered: String) -> String {
    match rendered.strip_prefix('-') {
        Some(rest) if !rest.bytes().any(|b| matches!(b, b'1'..=b'9')) => rest.to_string(),
        _ => rendered,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
