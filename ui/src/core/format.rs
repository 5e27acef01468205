//! Formatting helpers for presenting results.

use time::{macros::format_description, OffsetDateTime};

/// `0.9234` -> `"92.3%"`
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "—".to_string();
    }
    format!("{:.1}%", fraction * 100.0)
}

/// Feature contribution with an explicit sign, e.g. `+0.4500` / `-0.1000`.
pub fn format_contribution(value: f64) -> String {
    format!("{value:+.4}")
}

/// File size the way the drop zone shows it: `12.5 KB`.
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute] UTC"
    ))
    .unwrap_or_else(|_| "—".to_string())
}
