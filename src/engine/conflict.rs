use std::collections::HashSet;

use tracing::debug;

use crate::model::*;

use super::availability::occupying;

/// Active bookings of `room_id` that overlap `range`.
pub fn conflicts_for_room<'a>(
    room_id: &RoomId,
    property_id: &PropertyId,
    range: &StayRange,
    bookings: &'a [Booking],
    exclude_booking_id: Option<&BookingId>,
) -> Vec<&'a Booking> {
    occupying(bookings, property_id, room_id, exclude_booking_id)
        .filter(|b| b.stay().overlaps(range))
        .collect()
}

/// Check every requested room independently. A single blocked room
/// invalidates the whole attempt.
pub fn validate_booking(
    room_ids: &[RoomId],
    property_id: &PropertyId,
    range: &StayRange,
    bookings: &[Booking],
    exclude_booking_id: Option<&BookingId>,
) -> ValidationResult {
    let mut conflicting_rooms = Vec::new();
    let mut conflicting_bookings: Vec<Booking> = Vec::new();
    let mut seen_rooms = HashSet::new();
    let mut seen_bookings = HashSet::new();

    for room_id in room_ids {
        if !seen_rooms.insert(room_id) {
            continue;
        }
        let hits = conflicts_for_room(room_id, property_id, range, bookings, exclude_booking_id);
        if hits.is_empty() {
            continue;
        }
        debug!(
            room = %room_id,
            property = %property_id,
            blockers = hits.len(),
            "room unavailable for {}..={}",
            range.check_in,
            range.check_out
        );
        conflicting_rooms.push(room_id.clone());
        for booking in hits {
            if seen_bookings.insert(&booking.id) {
                conflicting_bookings.push(booking.clone());
            }
        }
    }

    ValidationResult {
        is_valid: conflicting_rooms.is_empty(),
        conflicting_rooms,
        conflicting_bookings,
    }
}
