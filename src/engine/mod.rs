//! Room availability over an immutable booking snapshot.
//!
//! Every function here is a pure query: the caller passes the snapshot in,
//! nothing is cached or mutated, and "not available" is an answer rather
//! than an error. Server-side reservation is the only authority on races;
//! these checks mirror it for client-side validation.

mod availability;
mod conflict;
mod error;
mod overlap;

pub use availability::{
    available_rooms, booked_dates_for_property, booked_dates_for_room, is_room_available,
};
pub use conflict::{conflicts_for_room, validate_booking};
pub use error::AvailabilityError;
pub use overlap::{date_ranges_overlap, date_strings_overlap};
