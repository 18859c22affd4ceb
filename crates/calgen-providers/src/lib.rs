//! CalendarService trait and the Google Calendar implementation.
//!
//! This crate is the boundary between the commands and the remote calendar
//! provider:
//!
//! - [`CalendarService`] - the two remote operations the tool needs
//!   (insert an event, list calendars), object-safe so tests can mock it
//! - [`ProviderError`] - error taxonomy for provider operations
//! - [`google`] - the Google Calendar backend: credential store, OAuth
//!   flow, and API client
//!
//! ```text
//! commands ──&dyn CalendarService──► GoogleService
//!                                      ├── TokenStorage (token.json)
//!                                      ├── AuthorizationFlow (browser)
//!                                      └── GoogleCalendarClient (API v3)
//! ```

pub mod error;
pub mod google;
pub mod service;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use service::{BoxFuture, CalendarService, CalendarSummary, CreatedEvent};
