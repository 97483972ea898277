//! Display-date formatting for article bylines.

use chrono::{DateTime, Local, NaiveDate};

const DISPLAY_DATE_FORMAT: &str = "%B %-d, %Y";

/// Formats `input` (`YYYY-MM-DD` or RFC 3339) as a display date such as
/// `October 19, 2026`.
///
/// Invalid input yields an empty string instead of an error.
pub fn format_display_date(input: &str) -> String {
    let trimmed = input.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|value| value.date_naive())
        });

    parsed
        .map(|date| date.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Today's local date in display form.
pub fn today_display_date() -> String {
    Local::now()
        .date_naive()
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}
