use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};

use crate::engine::AvailabilityError;

const ISO_DAY: &str = "%Y-%m-%d";

/// Parse a calendar day, discarding any time-of-day suffix.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS...` and `YYYY-MM-DD HH:MM...`.
/// A time part, when present, must itself be a well-formed time of day.
/// All forms of the same calendar day yield the same value.
pub fn parse_day(raw: &str) -> Result<NaiveDate, AvailabilityError> {
    let trimmed = raw.trim();
    let malformed = || AvailabilityError::MalformedDate {
        value: raw.to_string(),
    };

    let (day, rest) = match (trimmed.get(..10), trimmed.get(10..)) {
        (Some(day), Some(rest)) => (day, rest),
        _ => return Err(malformed()),
    };
    match rest.strip_prefix(['T', ' ']) {
        Some(time) if !is_time_of_day(time) => return Err(malformed()),
        None if !rest.is_empty() => return Err(malformed()),
        _ => {}
    }

    let bytes = day.as_bytes();
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shape_ok {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(day, ISO_DAY).map_err(|_| malformed())
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`, optionally followed by `Z` or a
/// `±HH`, `±HHMM` or `±HH:MM` offset.
fn is_time_of_day(raw: &str) -> bool {
    let time = match raw.strip_suffix(['Z', 'z']) {
        Some(time) => time,
        None => match strip_offset(raw) {
            Some(time) => time,
            None => return false,
        },
    };
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(time, fmt).is_ok())
}

/// `None` when a sign is present but the offset after it is not well formed.
fn strip_offset(raw: &str) -> Option<&str> {
    let Some(at) = raw.rfind(['+', '-']) else {
        return Some(raw);
    };
    let offset = &raw.as_bytes()[at + 1..];
    let well_formed = match offset.len() {
        2 | 4 => offset.iter().all(u8::is_ascii_digit),
        5 => offset
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 2 { *b == b':' } else { b.is_ascii_digit() }),
        _ => false,
    };
    well_formed.then(|| &raw[..at])
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(ISO_DAY).to_string()
}

/// Every day from `start` through `end`, both inclusive. Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Number of calendar days touched by `[start, end]`; zero for a reversed range.
pub fn inclusive_len(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(0)
}

pub fn to_iso_strings(days: &BTreeSet<NaiveDate>) -> Vec<String> {
    days.iter().map(|d| format_day(*d)).collect()
}
