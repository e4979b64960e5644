use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::day::{inclusive_len, parse_day};
use crate::engine::AvailabilityError;
use crate::limits::MAX_STAY_DAYS;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Property identifier as issued by the backend.
    PropertyId
);
string_id!(RoomId);
string_id!(
    /// UUID for admin-created bookings, the guest token for guest bookings.
    BookingId
);

/// Booking lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Expired,
}

impl BookingStatus {
    /// Cancelled and expired bookings stay in the snapshot but hold no rooms.
    pub fn occupies_room(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Expired => "expired",
        }
    }
}

/// Inclusive day range `[check_in, check_out]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self { check_in, check_out }
    }

    /// Zero-length stay on a single day.
    pub fn day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Parse a candidate range from `YYYY-MM-DD` strings.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, AvailabilityError> {
        let range = Self::new(parse_day(check_in)?, parse_day(check_out)?);
        if range.len_days() > MAX_STAY_DAYS {
            return Err(AvailabilityError::LimitExceeded("stay too long"));
        }
        Ok(range)
    }

    /// Days touched by the range, both endpoints counted.
    pub fn len_days(&self) -> i64 {
        inclusive_len(self.check_in, self.check_out)
    }

    pub fn overlaps(&self, other: &StayRange) -> bool {
        crate::engine::date_ranges_overlap(
            self.check_in,
            self.check_out,
            other.check_in,
            other.check_out,
        )
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day <= self.check_out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub property_id: PropertyId,
    pub room_ids: Vec<RoomId>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    pub fn stay(&self) -> StayRange {
        StayRange::new(self.check_in, self.check_out)
    }

    pub fn includes_room(&self, room_id: &RoomId) -> bool {
        self.room_ids.contains(room_id)
    }

    /// Human-facing handle: the reference id when present, else the booking id.
    pub fn display_ref(&self) -> &str {
        self.reference_id.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Outcome of validating a (possibly multi-room) booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub conflicting_rooms: Vec<RoomId>,
    pub conflicting_bookings: Vec<Booking>,
}

impl ValidationResult {
    /// One line per conflicting room, naming the blocking bookings.
    pub fn describe(&self) -> Vec<String> {
        self.conflicting_rooms
            .iter()
            .map(|room| {
                let blockers: Vec<String> = self
                    .conflicting_bookings
                    .iter()
                    .filter(|b| b.includes_room(room))
                    .map(|b| format!("{} ({} to {})", b.display_ref(), b.check_in, b.check_out))
                    .collect();
                format!("room {room} is unavailable due to {}", blockers.join(", "))
            })
            .collect()
    }
}
