/// Bookings accepted in a single snapshot.
pub const MAX_SNAPSHOT_BOOKINGS: usize = 100_000;

/// Longest stay (inclusive day count) accepted for one booking or candidate range.
pub const MAX_STAY_DAYS: i64 = 3_660;

/// Rooms accepted in a single validation request.
pub const MAX_ROOMS_PER_REQUEST: usize = 256;

/// Longest identifier accepted at the boundary.
pub const MAX_ID_LEN: usize = 256;
