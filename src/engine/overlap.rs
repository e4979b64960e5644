use chrono::NaiveDate;

use crate::day::parse_day;

use super::AvailabilityError;

/// Closed-interval intersection of `[start_a, end_a]` and `[start_b, end_b]`.
///
/// Both endpoints are inclusive: a room held through its check-out day cannot
/// take a new check-in on that day.
pub fn date_ranges_overlap(
    start_a: NaiveDate,
    end_a: NaiveDate,
    start_b: NaiveDate,
    end_b: NaiveDate,
) -> bool {
    start_a <= end_b && start_b <= end_a
}

/// String form of [`date_ranges_overlap`]. Malformed input is an error, never
/// a silent "no overlap".
pub fn date_strings_overlap(
    start_a: &str,
    end_a: &str,
    start_b: &str,
    end_b: &str,
) -> Result<bool, AvailabilityError> {
    Ok(date_ranges_overlap(
        parse_day(start_a)?,
        parse_day(end_a)?,
        parse_day(start_b)?,
        parse_day(end_b)?,
    ))
}
