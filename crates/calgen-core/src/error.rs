//! Validation errors for event requests and sheet input.

use thiserror::Error;

/// Errors raised while validating an event request or a sheet.
///
/// Every variant describes input the user can fix; none of them indicate a
/// provider or network problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The event title is empty or whitespace-only.
    #[error("event title must not be empty")]
    EmptyTitle,

    /// The date string could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A time string could not be parsed as `HH:MM` (24-hour).
    #[error("invalid time {0:?}: expected HH:MM (24-hour)")]
    InvalidTime(String),

    /// The timezone is not a recognized IANA zone name.
    #[error("unknown timezone {0:?}: expected an IANA name such as \"America/New_York\"")]
    UnknownTimezone(String),

    /// The wall-clock time does not exist in the zone (skipped by a DST
    /// transition).
    #[error("{datetime} does not exist in {timezone} (skipped by a DST transition)")]
    NonexistentLocalTime { datetime: String, timezone: String },

    /// The sheet header is missing one or more required columns.
    #[error("sheet must contain the columns Title, Date and Timezone; missing: {missing} (found: {found})")]
    MissingColumns { missing: String, found: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_input() {
        let err = ValidationError::InvalidDate("20-03-2024".to_string());
        assert!(err.to_string().contains("20-03-2024"));

        let err = ValidationError::UnknownTimezone("Mars/Olympus".to_string());
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn display_lists_missing_columns() {
        let err = ValidationError::MissingColumns {
            missing: "Timezone".to_string(),
            found: "Title, Date".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing: Timezone"));
        assert!(msg.contains("found: Title, Date"));
    }
}
