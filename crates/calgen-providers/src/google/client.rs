//! Google Calendar API client.
//!
//! A low-level HTTP client for the two Calendar API v3 endpoints this tool
//! consumes: events.insert (scoped to a calendar id) and the account's
//! calendarList.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use calgen_core::EventPayload;

use crate::error::{ProviderError, ProviderResult};
use crate::service::{CalendarSummary, CreatedEvent};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a new client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Updates the access token (after a refresh).
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
    }

    /// Inserts an event into a calendar and returns the created identifiers.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        payload: &EventPayload,
    ) -> ProviderResult<CreatedEvent> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let body = serde_json::to_string(payload)
            .map_err(|e| ProviderError::internal(format!("failed to encode event: {}", e)))?;

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = Self::check_status(response, &format!("calendar {}", calendar_id)).await?;

        let created: InsertedEvent = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse insert response: {}", e))
        })?;

        debug!("created event {} in calendar {}", created.id, calendar_id);
        Ok(CreatedEvent {
            id: created.id,
            html_link: created.html_link,
        })
    }

    /// Lists the calendars visible to the authenticated account.
    pub async fn list_calendars(&self) -> ProviderResult<Vec<CalendarSummary>> {
        let url = format!("{}/users/me/calendarList", CALENDAR_API_BASE);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body = Self::check_status(response, "calendar list").await?;

        let list: CalendarListResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse calendar list: {}", e))
        })?;

        debug!("fetched {} calendars", list.items.len());
        Ok(list
            .items
            .into_iter()
            .map(|entry| CalendarSummary::new(entry.id, entry.summary).with_primary(entry.primary))
            .collect())
    }

    /// Maps the response status to an error, or returns the body on success.
    async fn check_status(response: reqwest::Response, context: &str) -> ProviderResult<String> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProviderError::authentication(
                "access token expired or invalid",
            ));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::authorization(format!(
                "access denied to {}",
                context
            )));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found(format!("{} not found", context)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ProviderError::bad_request(format!(
                "request rejected: {}",
                body
            )));
        }

        if !status.is_success() {
            return Err(ProviderError::server(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        Ok(body)
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::network("request timeout")
    } else if e.is_connect() {
        ProviderError::network(format!("connection failed: {}", e))
    } else {
        ProviderError::network(format!("request failed: {}", e))
    }
}

/// Response from the events.insert endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    id: String,
    html_link: Option<String>,
}

/// Response from the calendarList endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListResponse {
    #[serde(default)]
    items: Vec<CalendarListEntry>,
}

/// A calendar from the calendar list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarListEntry {
    id: String,
    summary: String,
    #[serde(default)]
    primary: bool,
}
