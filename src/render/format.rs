//! Text formatting shared by every view.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// `£` amount with thousands separators and up to three decimals.
/// A missing amount renders as `£0`.
pub fn format_currency(amount: Option<f64>) -> String {
    match amount {
        Some(n) if n.is_finite() => format!("£{}", format_decimal(n)),
        _ => "£0".to_string(),
    }
}

/// Integer with thousands separators, e.g. `12,345`.
pub fn format_count(n: u64) -> String {
    group_thousands(&n.to_string())
}

/// Like [`format_count`] but keeps up to three fraction digits.
pub fn format_decimal(n: f64) -> String {
    let rounded = (n * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `12 Mar 2024`. Unparseable input is returned as-is; empty input as `-`.
pub fn format_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "-".to_string();
    }
    parse_timestamp(raw)
        .map(|dt| dt.format("%-d %b %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `12 Mar 2024, 14:05` in UTC.
pub fn format_date_time(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "-".to_string();
    }
    parse_timestamp(raw)
        .map(|dt| dt.format("%-d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Cut to `max` characters and append `...` when longer.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}...", head)
}

/// Bytes as the largest whole unit, e.g. `1.5 GB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
