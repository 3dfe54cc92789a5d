//! Time and string helpers
//!
//! Pure functions: timestamp capture, ISO-8601 formatting, ISO-week
//! labeling for metric bucketing, and case-insensitive matching for
//! free-text filters.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

/// Capture the current UTC timestamp
#[inline]
#[must_use]
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Format a timestamp as an ISO-8601 string (`2026-02-19T08:30:00Z`)
#[inline]
#[must_use]
pub fn to_iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// ISO-week label for a timestamp, e.g. `2026-W08`
#[must_use]
pub fn iso_week_label(ts: &DateTime<Utc>) -> String {
    let week = ts.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Case-insensitive substring match
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
