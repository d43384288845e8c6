//! Formatting helpers for presenting scans.

use time::macros::format_description;

use super::timing;

pub fn format_percent(value: f64) -> String {
    format!("{value:.0}%")
}

/// `2025-09-28 14:30` in local time.
pub fn format_timestamp(epoch_millis: i64) -> String {
    timing::local_datetime(epoch_millis)
        .and_then(|dt| {
            dt.format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .ok()
        })
        .unwrap_or_else(|| "Unknown date".to_string())
}

pub fn format_item_count(count: usize) -> String {
    if count == 1 {
        "1 item identified".to_string()
    } else {
        format!("{count} items identified")
    }
}
