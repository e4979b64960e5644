use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::calendar::{parse_month, MonthView, Selection};
use crate::day::to_iso_strings;
use crate::engine::*;
use crate::ingest::Snapshot;
use crate::limits::MAX_ROOMS_PER_REQUEST;
use crate::model::*;
use crate::observability::{
    availability_outcome, validation_outcome, AVAILABILITY_CHECKS_TOTAL, VALIDATIONS_TOTAL,
};

pub const USAGE: &str = "\
usage: roomcheck <command> [args]
  check    <property> <room> <check-in> <check-out> [exclude-booking-id]
  validate <property> <room,room,...> <check-in> <check-out> [exclude-booking-id]
  booked   <property> [room]
  calendar <property> <YYYY-MM> [room]";

/// Parsed command-line query.
#[derive(Debug, PartialEq)]
pub enum Command {
    Check {
        property_id: PropertyId,
        room_id: RoomId,
        range: StayRange,
        exclude: Option<BookingId>,
    },
    Validate {
        property_id: PropertyId,
        room_ids: Vec<RoomId>,
        range: StayRange,
        exclude: Option<BookingId>,
    },
    Booked {
        property_id: PropertyId,
        room_id: Option<RoomId>,
    },
    Calendar {
        property_id: PropertyId,
        year: i32,
        month: u32,
        room_id: Option<RoomId>,
    },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::Check { .. } => "check",
            Command::Validate { .. } => "validate",
            Command::Booked { .. } => "booked",
            Command::Calendar { .. } => "calendar",
        }
    }
}

fn invalid(msg: impl Into<String>) -> AvailabilityError {
    AvailabilityError::InvalidCommand(msg.into())
}

pub fn parse_args(args: &[String]) -> Result<Command, AvailabilityError> {
    let (name, rest) = args.split_first().ok_or_else(|| invalid("missing command"))?;
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    match (name.as_str(), rest.as_slice()) {
        ("check", [property, room, check_in, check_out, tail @ ..]) if tail.len() <= 1 => {
            Ok(Command::Check {
                property_id: PropertyId::from(*property),
                room_id: RoomId::from(*room),
                range: StayRange::parse(check_in, check_out)?,
                exclude: tail.first().map(|id| BookingId::from(*id)),
            })
        }
        ("validate", [property, rooms, check_in, check_out, tail @ ..]) if tail.len() <= 1 => {
            let room_ids: Vec<RoomId> = rooms
                .split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(RoomId::from)
                .collect();
            if room_ids.is_empty() {
                return Err(invalid("no rooms given"));
            }
            if room_ids.len() > MAX_ROOMS_PER_REQUEST {
                return Err(AvailabilityError::LimitExceeded("too many rooms in request"));
            }
            Ok(Command::Validate {
                property_id: PropertyId::from(*property),
                room_ids,
                range: StayRange::parse(check_in, check_out)?,
                exclude: tail.first().map(|id| BookingId::from(*id)),
            })
        }
        ("booked", [property, tail @ ..]) if tail.len() <= 1 => Ok(Command::Booked {
            property_id: PropertyId::from(*property),
            room_id: tail.first().map(|r| RoomId::from(*r)),
        }),
        ("calendar", [property, month, tail @ ..]) if tail.len() <= 1 => {
            let (year, month) = parse_month(month)?;
            Ok(Command::Calendar {
                property_id: PropertyId::from(*property),
                year,
                month,
                room_id: tail.first().map(|r| RoomId::from(*r)),
            })
        }
        ("check" | "validate" | "booked" | "calendar", _) => {
            Err(invalid(format!("wrong arguments for {name}")))
        }
        (other, _) => Err(invalid(format!("unknown command {other:?}"))),
    }
}

/// Run a command against the snapshot. `today` anchors past-day marks.
pub fn execute(
    command: &Command,
    snapshot: &Snapshot,
    today: NaiveDate,
) -> Result<Value, AvailabilityError> {
    let bookings = snapshot.bookings();
    match command {
        Command::Check {
            property_id,
            room_id,
            range,
            exclude,
        } => {
            let available =
                is_room_available(room_id, property_id, range, bookings, exclude.as_ref());
            let outcome = availability_outcome(available);
            metrics::counter!(AVAILABILITY_CHECKS_TOTAL, "outcome" => outcome).increment(1);
            Ok(json!({
                "propertyId": property_id,
                "roomId": room_id,
                "checkIn": range.check_in,
                "checkOut": range.check_out,
                "available": available,
            }))
        }
        Command::Validate {
            property_id,
            room_ids,
            range,
            exclude,
        } => {
            let result = validate_booking(room_ids, property_id, range, bookings, exclude.as_ref());
            metrics::counter!(VALIDATIONS_TOTAL, "outcome" => validation_outcome(&result))
                .increment(1);
            let messages = result.describe();
            let mut value = serde_json::to_value(&result)?;
            value["messages"] = json!(messages);
            Ok(value)
        }
        Command::Booked {
            property_id,
            room_id,
        } => {
            let days = match room_id {
                Some(room) => booked_dates_for_room(room, property_id, bookings),
                None => booked_dates_for_property(property_id, bookings),
            };
            Ok(json!({
                "propertyId": property_id,
                "roomId": room_id,
                "dates": to_iso_strings(&days),
            }))
        }
        Command::Calendar {
            property_id,
            year,
            month,
            room_id,
        } => {
            let days = match room_id {
                Some(room) => booked_dates_for_room(room, property_id, bookings),
                None => booked_dates_for_property(property_id, bookings),
            };
            let view = MonthView::build(*year, *month, &days, &Selection::default(), today)?;
            let mut value = serde_json::to_value(&view)?;
            value["title"] = json!(view.title());
            Ok(value)
        }
    }
}
