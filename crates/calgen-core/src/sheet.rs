//! Sheet input for batch event creation.
//!
//! A sheet is a CSV file with a header row. `Title`, `Date` and `Timezone`
//! are required columns (matched case-exactly); any other column, notably
//! `Country`, is accepted and ignored. One data row describes one event.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::ValidationError;
use crate::request::EventRequest;

/// Columns every sheet must declare in its header.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Title", "Date", "Timezone"];

/// Errors raised while reading a sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The file could not be opened.
    #[error("failed to open sheet {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be read or decoded.
    #[error("failed to read sheet record: {0}")]
    Csv(#[from] csv::Error),

    /// The header failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// One data row of a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SheetRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Date")]
    pub date: String,
    /// The row's timezone cell; may be blank, in which case the command's
    /// default timezone applies.
    #[serde(rename = "Timezone")]
    pub timezone: Option<String>,
}

impl SheetRow {
    /// Derives the event request for this row.
    ///
    /// The row's timezone wins when present and non-blank (after trimming);
    /// otherwise `default_timezone` applies. Times are always the full-day
    /// defaults for sheet rows.
    pub fn into_request(self, default_timezone: &str, calendar_id: &str) -> EventRequest {
        let timezone = match self.timezone.as_deref().map(str::trim) {
            Some(tz) if !tz.is_empty() => tz.to_string(),
            _ => default_timezone.to_string(),
        };

        EventRequest::new(self.title, self.date)
            .with_timezone(timezone)
            .with_calendar_id(calendar_id)
    }
}

/// Reads and validates a sheet, returning its rows in file order.
///
/// # Errors
///
/// Fails with [`ValidationError::MissingColumns`] before returning any row
/// when the header lacks a required column, so callers can reject a sheet
/// before contacting the provider.
pub fn read_sheet(path: &Path) -> Result<Vec<SheetRow>, SheetError> {
    let file = File::open(path).map_err(|source| SheetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == **required))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns {
            missing: missing.join(", "),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        }
        .into());
    }

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<SheetRow>, csv::Error>>()?;

    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
