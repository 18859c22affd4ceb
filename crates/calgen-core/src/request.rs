//! Logical event requests.
//!
//! An [`EventRequest`] is the tool's own description of an event to create:
//! wall-clock date and times plus a zone name, before any provider-specific
//! encoding. Requests are built from CLI flags or sheet rows and handed to
//! [`crate::payload::build_payload`] for transmission.

/// Default start time when none is given.
pub const DEFAULT_START_TIME: &str = "00:00";

/// Default end time when none is given.
pub const DEFAULT_END_TIME: &str = "23:59";

/// Default timezone when none is given.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Default target calendar when none is given.
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// A logical request to create one calendar event.
///
/// Times are wall-clock values in `timezone`; they are localized (never
/// converted) when the wire payload is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    /// Event title (becomes the provider's `summary`).
    pub title: String,
    /// Event date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time of day, `HH:MM` (24-hour).
    pub start_time: String,
    /// End time of day, `HH:MM` (24-hour).
    pub end_time: String,
    /// IANA timezone name the times are expressed in.
    pub timezone: String,
    /// Attendee email addresses; `None` means the payload carries no
    /// attendees field at all.
    pub attendees: Option<Vec<String>>,
    /// Identifier of the calendar to insert into.
    pub calendar_id: String,
}

impl EventRequest {
    /// Creates a request for the given title and date with all defaults:
    /// full-day time range, UTC, primary calendar, no attendees.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            start_time: DEFAULT_START_TIME.to_string(),
            end_time: DEFAULT_END_TIME.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            attendees: None,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
        }
    }

    /// Sets the start and end times of day.
    pub fn with_times(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time = start.into();
        self.end_time = end.into();
        self
    }

    /// Sets the timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Sets the attendee list.
    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = Some(attendees);
        self
    }

    /// Sets the target calendar.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }
}

/// Splits a comma-separated attendee flag into trimmed email strings.
///
/// Empty entries (from stray commas) are dropped.
pub fn parse_attendee_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_uses_defaults() {
        let req = EventRequest::new("Standup", "2024-03-20");
        assert_eq!(req.start_time, "00:00");
        assert_eq!(req.end_time, "23:59");
        assert_eq!(req.timezone, "UTC");
        assert_eq!(req.calendar_id, "primary");
        assert!(req.attendees.is_none());
    }

    #[test]
    fn builder_methods() {
        let req = EventRequest::new("Review", "2024-03-21")
            .with_times("09:00", "10:30")
            .with_timezone("Europe/London")
            .with_attendees(vec!["a@x.com".to_string()])
            .with_calendar_id("team@group.calendar.google.com");

        assert_eq!(req.start_time, "09:00");
        assert_eq!(req.end_time, "10:30");
        assert_eq!(req.timezone, "Europe/London");
        assert_eq!(req.attendees, Some(vec!["a@x.com".to_string()]));
        assert_eq!(req.calendar_id, "team@group.calendar.google.com");
    }

    #[test]
    fn attendee_list_is_trimmed() {
        let attendees = parse_attendee_list("a@x.com, b@y.com");
        assert_eq!(attendees, vec!["a@x.com".to_string(), "b@y.com".to_string()]);
    }

    #[test]
    fn attendee_list_drops_empty_entries() {
        let attendees = parse_attendee_list("a@x.com,, ,b@y.com,");
        assert_eq!(attendees, vec!["a@x.com".to_string(), "b@y.com".to_string()]);
    }

    #[test]
    fn attendee_list_of_blank_input_is_empty() {
        assert!(parse_attendee_list("").is_empty());
        assert!(parse_attendee_list("  ,  ").is_empty());
    }
}
