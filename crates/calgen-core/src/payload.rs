//! Wire payload construction for event insertion.
//!
//! This module turns an [`EventRequest`] into the JSON body the Calendar
//! API's events.insert endpoint expects. The date and times are parsed as
//! naive wall-clock values and then localized in the requested zone: the
//! clock values are interpreted as already being in that zone, never shifted
//! into it. The provider always receives fully zoned timestamps.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, offset::LocalResult};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ValidationError;
use crate::request::EventRequest;

/// JSON body for the events.insert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventPayload {
    /// Event title.
    pub summary: String,
    /// Zoned start timestamp.
    pub start: EventDateTime,
    /// Zoned end timestamp.
    pub end: EventDateTime,
    /// Attendees; omitted from the JSON entirely when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
}

/// A zoned timestamp as the Calendar API encodes it: an RFC 3339 datetime
/// carrying the zone's UTC offset, plus the IANA zone name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

/// One attendee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub email: String,
}

/// Builds the events.insert body for a request.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the title is empty, the date or either
/// time cannot be parsed, the timezone is not a recognized IANA name, or a
/// wall-clock value does not exist in the zone (spring-forward gap). An
/// ambiguous wall-clock value (fall-back hour) resolves to the earlier
/// instant.
pub fn build_payload(request: &EventRequest) -> Result<EventPayload, ValidationError> {
    if request.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(request.date.clone()))?;
    let start = parse_time(&request.start_time)?;
    let end = parse_time(&request.end_time)?;

    let tz: Tz = request
        .timezone
        .parse()
        .map_err(|_| ValidationError::UnknownTimezone(request.timezone.clone()))?;

    let start = localize(date.and_time(start), tz)?;
    let end = localize(date.and_time(end), tz)?;

    // Trim each address; an attendee list that ends up empty is the same as
    // no attendees at all.
    let attendees = request.attendees.as_ref().and_then(|emails| {
        let records: Vec<Attendee> = emails
            .iter()
            .map(|email| email.trim())
            .filter(|email| !email.is_empty())
            .map(|email| Attendee {
                email: email.to_string(),
            })
            .collect();
        (!records.is_empty()).then_some(records)
    });

    Ok(EventPayload {
        summary: request.title.clone(),
        start,
        end,
        attendees,
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}

/// Attaches `tz` to a naive wall-clock value.
fn localize(naive: NaiveDateTime, tz: Tz) -> Result<EventDateTime, ValidationError> {
    let zoned = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            return Err(ValidationError::NonexistentLocalTime {
                datetime: naive.to_string(),
                timezone: tz.name().to_string(),
            });
        }
    };

    Ok(EventDateTime {
        date_time: zoned.to_rfc3339(),
        time_zone: tz.name().to_string(),
    })
}
