//! Eruption start times as typed into the run form.
//!
//! The canonical form is `YYYY MM DD HH:MM` (UTC, 16 characters). The puff
//! command line also takes a compact `YYYYMMDDHHMM` and hour offsets from
//! now (`+6`, `-1.5`); [`normalize_eruption_date`] rewrites those into the
//! canonical form.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

pub const ERUPTION_DATE_FORMAT: &str = "%Y %m %d %H:%M";
pub const ERUPTION_DATE_LEN: usize = 16;
const COMPACT_LEN: usize = 12;

/// Length in characters as the browser counts them for ASCII input.
pub fn has_canonical_length(value: &str) -> bool {
    value.chars().count() == ERUPTION_DATE_LEN
}

pub fn parse_canonical(value: &str) -> Option<NaiveDateTime> {
    if !has_canonical_length(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, ERUPTION_DATE_FORMAT).ok()
}

pub fn normalize_eruption_date(input: &str, now: DateTime<Utc>) -> String {
    let trimmed = input.trim();

    if trimmed.starts_with('+') || trimmed.starts_with('-') {
        if let Some(offset) = parse_hour_offset(trimmed) {
            if let Some(at) = now.checked_add_signed(offset) {
                return at.format(ERUPTION_DATE_FORMAT).to_string();
            }
        }
        return input.to_string();
    }

    if trimmed.len() == COMPACT_LEN && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return format!(
            "{} {} {} {}:{}",
            &trimmed[0..4],
            &trimmed[4..6],
            &trimmed[6..8],
            &trimmed[8..10],
            &trimmed[10..12]
        );
    }

    input.to_string()
}

fn parse_hour_offset(value: &str) -> Option<Duration> {
    let hours: f64 = value.parse().ok()?;
    if !hours.is_finite() {
        return None;
    }
    Duration::try_seconds((hours * 3600.0).round() as i64)
}

#[cfg(test)]
#[path = "tests/eruption_date_tests.rs"]
mod tests;
