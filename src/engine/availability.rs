use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::day::days_inclusive;
use crate::limits::MAX_STAY_DAYS;
use crate::model::*;

// ── Occupancy filter ──────────────────────────────────────────────

/// Bookings that hold `room_id` in `property_id`, skipping inert statuses
/// and the booking being edited.
pub(crate) fn occupying<'a, 'q>(
    bookings: &'a [Booking],
    property_id: &'q PropertyId,
    room_id: &'q RoomId,
    exclude_booking_id: Option<&'q BookingId>,
) -> impl Iterator<Item = &'a Booking> + 'q
where
    'a: 'q,
{
    bookings.iter().filter(move |b| {
        b.property_id == *property_id
            && b.includes_room(room_id)
            && b.status.occupies_room()
            && exclude_booking_id.is_none_or(|ex| b.id != *ex)
    })
}

// ── Availability ──────────────────────────────────────────────────

pub fn is_room_available(
    room_id: &RoomId,
    property_id: &PropertyId,
    range: &StayRange,
    bookings: &[Booking],
    exclude_booking_id: Option<&BookingId>,
) -> bool {
    !occupying(bookings, property_id, room_id, exclude_booking_id)
        .any(|b| b.stay().overlaps(range))
}

/// Rooms from `room_ids` that are free for `range`, in input order.
pub fn available_rooms(
    room_ids: &[RoomId],
    property_id: &PropertyId,
    range: &StayRange,
    bookings: &[Booking],
    exclude_booking_id: Option<&BookingId>,
) -> Vec<RoomId> {
    room_ids
        .iter()
        .filter(|room| {
            is_room_available(room, property_id, range, bookings, exclude_booking_id)
        })
        .cloned()
        .collect()
}

// ── Booked-day enumeration ────────────────────────────────────────

/// Every day held by an active booking of this room, check-out day included.
///
/// Each booking contributes at most `MAX_STAY_DAYS` days from its check-in;
/// snapshots loaded through `ingest` never exceed that.
pub fn booked_dates_for_room(
    room_id: &RoomId,
    property_id: &PropertyId,
    bookings: &[Booking],
) -> BTreeSet<NaiveDate> {
    collect_days(occupying(bookings, property_id, room_id, None))
}

/// Union of booked days across all rooms of a property, with the same
/// per-booking cap as [`booked_dates_for_room`].
pub fn booked_dates_for_property(
    property_id: &PropertyId,
    bookings: &[Booking],
) -> BTreeSet<NaiveDate> {
    collect_days(
        bookings
            .iter()
            .filter(|b| b.property_id == *property_id && b.status.occupies_room()),
    )
}

fn collect_days<'a>(bookings: impl Iterator<Item = &'a Booking>) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();
    for booking in bookings {
        days.extend(
            days_inclusive(booking.check_in, booking.check_out).take(MAX_STAY_DAYS as usize),
        );
    }
    days
}
