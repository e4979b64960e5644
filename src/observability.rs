use crate::model::ValidationResult;

/// Counter: single-room availability checks. Labels: outcome.
pub const AVAILABILITY_CHECKS_TOTAL: &str = "roomcheck_availability_checks_total";

/// Counter: CLI queries executed. Labels: command, status.
pub const QUERIES_TOTAL: &str = "roomcheck_queries_total";

/// Counter: booking validations. Labels: outcome.
pub const VALIDATIONS_TOTAL: &str = "roomcheck_validations_total";

/// Counter: bookings accepted into a snapshot.
pub const BOOKINGS_LOADED_TOTAL: &str = "roomcheck_bookings_loaded_total";

/// Counter: records dropped because of malformed dates.
pub const RECORDS_SKIPPED_TOTAL: &str = "roomcheck_records_skipped_total";

pub fn availability_outcome(available: bool) -> &'static str {
    if available { "available" } else { "unavailable" }
}

pub fn validation_outcome(result: &ValidationResult) -> &'static str {
    if result.is_valid { "valid" } else { "conflict" }
}

pub fn status_label<T, E>(result: &Result<T, E>) -> &'static str {
    if result.is_ok() { "ok" } else { "error" }
}
