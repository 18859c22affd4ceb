//! CalendarService trait definition.
//!
//! [`CalendarService`] is the seam between the commands and the remote
//! calendar backend: commands take a `&dyn CalendarService`, so unit tests
//! can supply a mock implementation and assert on the payloads it receives
//! without any network access.

use std::future::Future;
use std::pin::Pin;

use calgen_core::EventPayload;

use crate::error::ProviderResult;

/// One calendar visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSummary {
    /// Unique identifier for the calendar.
    pub id: String,
    /// Human-readable name of the calendar.
    pub name: String,
    /// Whether this is the account's primary calendar.
    pub primary: bool,
}

impl CalendarSummary {
    /// Creates a new summary with the given ID and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary: false,
        }
    }

    /// Builder method to mark as primary.
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }
}

/// The provider's answer to a successful event insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// The identifier the provider assigned to the event.
    pub id: String,
    /// Browser link to the event, when the provider returns one.
    pub html_link: Option<String>,
}

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The operations the commands need from a calendar backend.
///
/// Implementations manage their own authentication state; callers never see
/// tokens, only the two remote operations.
pub trait CalendarService: Send + Sync {
    /// Inserts one event into the given calendar and returns what the
    /// provider created.
    fn insert_event<'a>(
        &'a self,
        calendar_id: &'a str,
        payload: &'a EventPayload,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>>;

    /// Lists the calendars visible to the authenticated account.
    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarSummary>>>;
}
