//! Booking snapshots from backend JSON.
//!
//! The REST backend returns bookings in two envelopes (admin and guest) and
//! the front-end keeps a flat record form. All three decode here into
//! [`Booking`] values with validated calendar days.

use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::{Config, MalformedDatePolicy};
use crate::day::{inclusive_len, parse_day};
use crate::engine::AvailabilityError;
use crate::limits::*;
use crate::model::*;
use crate::observability::{BOOKINGS_LOADED_TOTAL, RECORDS_SKIPPED_TOTAL};

// ── Wire shapes ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Room entry of a booking response: line items carry `roomId`, plain rooms `id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    LineItem {
        #[serde(rename = "roomId")]
        room_id: String,
    },
    Room {
        id: String,
    },
}

impl RoomRef {
    fn into_id(self) -> String {
        match self {
            RoomRef::LineItem { room_id } => room_id,
            RoomRef::Room { id } => id,
        }
    }
}

fn room_ids(rooms: Option<Vec<RoomRef>>) -> Vec<String> {
    rooms.unwrap_or_default().into_iter().map(RoomRef::into_id).collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingAdminResponse {
    pub booking_id: String,
    pub property: PropertySummary,
    /// Absent and `null` both mean no rooms.
    #[serde(default)]
    pub rooms: Option<Vec<RoomRef>>,
    #[serde(default)]
    pub reference_id: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingGuestResponse {
    pub property: PropertySummary,
    #[serde(default)]
    pub rooms: Option<Vec<RoomRef>>,
    #[serde(default)]
    pub reference_id: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub status: BookingStatus,
    /// Guests never see the booking UUID; the token identifies the booking.
    pub token: String,
}

/// Flat booking as kept in front-end state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    pub property_id: String,
    #[serde(default)]
    pub room_ids: Option<Vec<String>>,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
}

/// Any accepted booking shape. Admin is tried first since it is the only one
/// carrying `bookingId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookingPayload {
    Admin(BookingAdminResponse),
    Guest(BookingGuestResponse),
    Record(BookingRecord),
}

struct RawBooking {
    id: String,
    reference_id: Option<String>,
    property_id: String,
    room_ids: Vec<String>,
    check_in: String,
    check_out: String,
    status: BookingStatus,
}

impl From<BookingPayload> for RawBooking {
    fn from(payload: BookingPayload) -> Self {
        match payload {
            BookingPayload::Admin(b) => RawBooking {
                id: b.booking_id,
                reference_id: b.reference_id,
                property_id: b.property.id,
                room_ids: room_ids(b.rooms),
                check_in: b.check_in_date,
                check_out: b.check_out_date,
                status: b.status,
            },
            BookingPayload::Guest(b) => RawBooking {
                id: b.token,
                reference_id: b.reference_id,
                property_id: b.property.id,
                room_ids: room_ids(b.rooms),
                check_in: b.check_in_date,
                check_out: b.check_out_date,
                status: b.status,
            },
            BookingPayload::Record(b) => RawBooking {
                id: b.id,
                reference_id: b.reference_id,
                property_id: b.property_id,
                room_ids: b.room_ids.unwrap_or_default(),
                check_in: b.check_in,
                check_out: b.check_out,
                status: b.status,
            },
        }
    }
}

impl TryFrom<BookingPayload> for Booking {
    type Error = AvailabilityError;

    fn try_from(payload: BookingPayload) -> Result<Self, Self::Error> {
        let raw = RawBooking::from(payload);
        if raw.id.len() > MAX_ID_LEN
            || raw.property_id.len() > MAX_ID_LEN
            || raw.room_ids.iter().any(|r| r.len() > MAX_ID_LEN)
        {
            return Err(AvailabilityError::LimitExceeded("identifier too long"));
        }
        if raw.room_ids.len() > MAX_ROOMS_PER_REQUEST {
            return Err(AvailabilityError::LimitExceeded("too many rooms on booking"));
        }

        let check_in = parse_day(&raw.check_in)?;
        let check_out = parse_day(&raw.check_out)?;
        if inclusive_len(check_in, check_out) > MAX_STAY_DAYS {
            return Err(AvailabilityError::LimitExceeded("stay too long"));
        }

        Ok(Booking {
            id: BookingId(raw.id),
            reference_id: raw.reference_id,
            property_id: PropertyId(raw.property_id),
            room_ids: raw.room_ids.into_iter().map(RoomId).collect(),
            check_in,
            check_out,
            status: raw.status,
        })
    }
}

// ── Snapshot ─────────────────────────────────────────────────────

/// Immutable booking collection handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    bookings: Vec<Booking>,
    skipped: usize,
}

impl Snapshot {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            skipped: 0,
        }
    }

    /// Decode a JSON array of booking payloads.
    pub fn from_json(json: &str, config: &Config) -> Result<Self, AvailabilityError> {
        let payloads: Vec<BookingPayload> = serde_json::from_str(json)?;
        Self::from_payloads(payloads, config)
    }

    pub fn from_payloads(
        payloads: Vec<BookingPayload>,
        config: &Config,
    ) -> Result<Self, AvailabilityError> {
        if payloads.len() > MAX_SNAPSHOT_BOOKINGS {
            return Err(AvailabilityError::LimitExceeded("too many bookings in snapshot"));
        }

        let mut bookings = Vec::with_capacity(payloads.len());
        let mut skipped = 0usize;
        for (index, payload) in payloads.into_iter().enumerate() {
            match Booking::try_from(payload) {
                Ok(booking) => bookings.push(booking),
                Err(AvailabilityError::MalformedDate { value })
                    if config.malformed_dates == MalformedDatePolicy::AssumeAvailable =>
                {
                    warn!("skipping booking #{index}: malformed date {value:?}");
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        metrics::counter!(BOOKINGS_LOADED_TOTAL).increment(bookings.len() as u64);
        if skipped > 0 {
            metrics::counter!(RECORDS_SKIPPED_TOTAL).increment(skipped as u64);
        }
        Ok(Self { bookings, skipped })
    }

    pub fn load(path: &Path, config: &Config) -> Result<Self, AvailabilityError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json, config)?;
        info!(
            "loaded {} bookings from {} ({} skipped)",
            snapshot.bookings.len(),
            path.display(),
            snapshot.skipped
        );
        Ok(snapshot)
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Records dropped under [`MalformedDatePolicy::AssumeAvailable`].
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> Config {
        Config {
            malformed_dates: MalformedDatePolicy::AssumeAvailable,
            ..Config::default()
        }
    }

    #[test]
    fn admin_response_uses_booking_id() {
        let json = r#"[{
            "bookingId": "4f1c2a",
            "property": { "id": "prop-1", "name": "Sea View" },
            "rooms": [{ "roomId": "R1", "lineTotal": 120 }, { "roomId": "R2" }],
            "referenceId": "GH-2024-007",
            "checkInDate": "2024-10-10",
            "checkOutDate": "2024-10-12",
            "status": "confirmed",
            "token": "tok-9",
            "isPaid": true
        }]"#;
        let snapshot = Snapshot::from_json(json, &Config::default()).unwrap();
        let b = &snapshot.bookings()[0];
        assert_eq!(b.id, BookingId::from("4f1c2a"));
        assert_eq!(b.property_id, PropertyId::from("prop-1"));
        assert_eq!(b.room_ids, vec![RoomId::from("R1"), RoomId::from("R2")]);
        assert_eq!(b.reference_id.as_deref(), Some("GH-2024-007"));
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn guest_response_uses_token() {
        let json = r#"[{
            "property": { "id": "prop-1" },
            "rooms": [{ "id": "R3" }],
            "checkInDate": "2024-10-10T00:00:00",
            "checkOutDate": "2024-10-12",
            "status": "pending",
            "token": "guest-token"
        }]"#;
        let snapshot = Snapshot::from_json(json, &Config::default()).unwrap();
        let b = &snapshot.bookings()[0];
        assert_eq!(b.id, BookingId::from("guest-token"));
        assert_eq!(b.room_ids, vec![RoomId::from("R3")]);
        assert_eq!(b.check_in.to_string(), "2024-10-10");
    }

    #[test]
    fn null_rooms_decode_as_empty() {
        let json = r#"[
            { "bookingId": "4f1c2a", "property": { "id": "prop-1" }, "rooms": null,
              "checkInDate": "2024-10-10", "checkOutDate": "2024-10-12",
              "status": "confirmed", "token": "tok-9" },
            { "property": { "id": "prop-1" }, "rooms": null,
              "checkInDate": "2024-10-10", "checkOutDate": "2024-10-12",
              "status": "pending", "token": "guest-token" },
            { "id": "b-1", "propertyId": "prop-1", "roomIds": null,
              "checkIn": "2024-10-10", "checkOut": "2024-10-12", "status": "pending" }
        ]"#;
        let snapshot = Snapshot::from_json(json, &Config::default()).unwrap();
        let ids: Vec<&str> = snapshot.bookings().iter().map(|b| b.id.as_str()).collect();
        // The admin record must not fall through to the guest shape.
        assert_eq!(ids, vec!["4f1c2a", "guest-token", "b-1"]);
        assert!(snapshot.bookings().iter().all(|b| b.room_ids.is_empty()));
    }

    #[test]
    fn flat_record_accepted() {
        let json = r#"[{
            "id": "b-1",
            "propertyId": "prop-1",
            "roomIds": ["R1"],
            "checkIn": "2024-02-15",
            "checkOut": "2024-02-18",
            "status": "expired",
            "guestName": "A. Guest"
        }]"#;
        let snapshot = Snapshot::from_json(json, &Config::default()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.bookings()[0].status, BookingStatus::Expired);
    }

    #[test]
    fn malformed_date_rejected_by_default() {
        let json = r#"[{
            "id": "b-1", "propertyId": "p", "roomIds": ["R1"],
            "checkIn": "2024-02-31", "checkOut": "2024-03-02", "status": "pending"
        }]"#;
        let err = Snapshot::from_json(json, &Config::default()).unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::MalformedDate {
                value: "2024-02-31".into()
            }
        );
    }

    #[test]
    fn malformed_date_skipped_when_lenient() {
        let json = r#"[
            { "id": "b-1", "propertyId": "p", "roomIds": ["R1"],
              "checkIn": "soon", "checkOut": "2024-03-02", "status": "pending" },
            { "id": "b-2", "propertyId": "p", "roomIds": ["R1"],
              "checkIn": "2024-03-05", "checkOut": "2024-03-06", "status": "pending" }
        ]"#;
        let snapshot = Snapshot::from_json(json, &lenient()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.skipped(), 1);
        assert_eq!(snapshot.bookings()[0].id, BookingId::from("b-2"));
    }

    #[test]
    fn unknown_status_is_a_json_error() {
        let json = r#"[{ "id": "b-1", "propertyId": "p", "roomIds": [],
            "checkIn": "2024-03-01", "checkOut": "2024-03-02", "status": "checked_in" }]"#;
        assert!(matches!(
            Snapshot::from_json(json, &lenient()),
            Err(AvailabilityError::Json(_))
        ));
    }

    #[test]
    fn overlong_stay_rejected_under_any_policy() {
        let json = r#"[{ "id": "b-1", "propertyId": "p", "roomIds": ["R1"],
            "checkIn": "2000-01-01", "checkOut": "2030-01-01", "status": "pending" }]"#;
        assert_eq!(
            Snapshot::from_json(json, &lenient()).unwrap_err(),
            AvailabilityError::LimitExceeded("stay too long")
        );
    }

    #[test]
    fn reversed_stay_is_kept() {
        let json = r#"[{ "id": "b-1", "propertyId": "p", "roomIds": ["R1"],
            "checkIn": "2024-03-05", "checkOut": "2024-03-01", "status": "pending" }]"#;
        assert_eq!(Snapshot::from_json(json, &Config::default()).unwrap().len(), 1);
    }
}
