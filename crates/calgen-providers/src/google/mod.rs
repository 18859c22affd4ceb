//! Google Calendar backend.
//!
//! This module provides [`GoogleService`], a [`crate::CalendarService`]
//! backed by the Google Calendar API v3.
//!
//! # Authentication
//!
//! 1. Users download an OAuth client ID JSON (`credentials.json`) from the
//!    Google Cloud Console
//! 2. On first use the service opens the browser to Google's consent page
//!    (authorization-code flow with PKCE, loopback redirect)
//! 3. The resulting tokens are persisted to `token.json` and reused; an
//!    expired access token is refreshed in place without the browser
//!
//! # Example
//!
//! ```ignore
//! use calgen_providers::google::{GoogleConfig, GoogleService};
//!
//! let service = GoogleService::new(GoogleConfig::new());
//! let calendars = service.list_calendars().await?;
//! ```

mod client;
mod config;
mod oauth;
mod service;
mod tokens;

pub use client::GoogleCalendarClient;
pub use config::{GoogleConfig, OAuthCredentials};
pub use oauth::{AuthorizationFlow, InstalledFlow, OAuthClient, PkceFlow};
pub use service::GoogleService;
pub use tokens::{TokenInfo, TokenStorage};
