//! Core types: event requests, payload mapping, sheet parsing

pub mod error;
pub mod payload;
pub mod request;
pub mod sheet;
pub mod tracing;

pub use error::ValidationError;
pub use payload::{Attendee, EventDateTime, EventPayload, build_payload};
pub use request::{
    DEFAULT_CALENDAR_ID, DEFAULT_END_TIME, DEFAULT_START_TIME, DEFAULT_TIMEZONE, EventRequest,
    parse_attendee_list,
};
pub use sheet::{REQUIRED_COLUMNS, SheetError, SheetRow, read_sheet};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
