//! Test double for [`CalendarService`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use calgen_core::EventPayload;
use calgen_providers::{
    BoxFuture, CalendarService, CalendarSummary, CreatedEvent, ProviderError, ProviderResult,
};

/// Records every call and optionally fails a chosen insertion.
pub(crate) struct MockService {
    inserted: Mutex<Vec<(String, EventPayload)>>,
    fail_on_insert: Option<usize>,
    list_calls: AtomicUsize,
    calendars: Vec<CalendarSummary>,
}

impl MockService {
    pub(crate) fn new() -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            fail_on_insert: None,
            list_calls: AtomicUsize::new(0),
            calendars: vec![
                CalendarSummary::new("primary", "My Calendar").with_primary(true),
                CalendarSummary::new("work@example.com", "Work"),
            ],
        }
    }

    /// Makes the insertion at `index` (0-based) fail.
    pub(crate) fn failing_on(index: usize) -> Self {
        Self {
            fail_on_insert: Some(index),
            ..Self::new()
        }
    }

    /// Returns every attempted insertion, in call order.
    pub(crate) fn inserted(&self) -> Vec<(String, EventPayload)> {
        self.inserted.lock().unwrap().clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl CalendarService for MockService {
    fn insert_event<'a>(
        &'a self,
        calendar_id: &'a str,
        payload: &'a EventPayload,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>> {
        Box::pin(async move {
            let mut inserted = self.inserted.lock().unwrap();
            let index = inserted.len();
            inserted.push((calendar_id.to_string(), payload.clone()));

            if self.fail_on_insert == Some(index) {
                return Err(ProviderError::server("injected failure"));
            }

            Ok(CreatedEvent {
                id: format!("event-{}", index + 1),
                html_link: None,
            })
        })
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarSummary>>> {
        Box::pin(async move {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.calendars.clone())
        })
    }
}
