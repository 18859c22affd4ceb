//! Google Calendar service implementation.
//!
//! [`GoogleService`] owns the credential lifecycle and implements
//! [`CalendarService`]. Before each remote operation it makes sure a usable
//! access token exists: a valid persisted token is used as-is, an expired
//! one with a refresh token is refreshed in place (and re-persisted), and
//! anything else falls back to the interactive authorization flow.

use tokio::sync::Mutex;
use tracing::{debug, info};

use calgen_core::EventPayload;

use crate::error::{ProviderError, ProviderResult};
use crate::service::{BoxFuture, CalendarService, CalendarSummary, CreatedEvent};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;
use super::oauth::{AuthorizationFlow, InstalledFlow, OAuthClient};
use super::tokens::{TokenInfo, TokenStorage};

/// Google Calendar backend.
pub struct GoogleService {
    config: GoogleConfig,
    token_storage: TokenStorage,
    auth_flow: Box<dyn AuthorizationFlow>,
    state: Mutex<ServiceState>,
}

/// Mutable per-invocation state: the token file is read at most once and the
/// API client is built lazily.
#[derive(Default)]
struct ServiceState {
    loaded: bool,
    tokens: Option<TokenInfo>,
    client: Option<GoogleCalendarClient>,
}

/// How to turn the cached credential (or its absence) into a usable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthStrategy {
    /// The cached access token is still valid.
    UseExisting,
    /// The access token expired but a refresh token exists.
    Refresh,
    /// No usable cached credential; run the interactive flow.
    Interactive,
}

fn auth_strategy(tokens: Option<&TokenInfo>, required_scopes: &[String]) -> AuthStrategy {
    match tokens {
        None => AuthStrategy::Interactive,
        // A scope change invalidates the stored grant.
        Some(t) if !t.has_scopes(required_scopes) => AuthStrategy::Interactive,
        Some(t) if !t.is_expired() => AuthStrategy::UseExisting,
        Some(t) if t.refresh_token.is_some() => AuthStrategy::Refresh,
        Some(_) => AuthStrategy::Interactive,
    }
}

impl GoogleService {
    /// Creates a service that uses the browser-driven [`InstalledFlow`] for
    /// first-time authorization.
    pub fn new(config: GoogleConfig) -> Self {
        let flow = InstalledFlow::new(&config);
        Self::with_flow(config, Box::new(flow))
    }

    /// Creates a service with a custom authorization flow (used by tests to
    /// inject a canned credential).
    pub fn with_flow(config: GoogleConfig, auth_flow: Box<dyn AuthorizationFlow>) -> Self {
        let token_storage = TokenStorage::new(&config.token_path);
        Self {
            config,
            token_storage,
            auth_flow,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Acquires a usable credential eagerly.
    ///
    /// Remote operations do this on demand; calling it directly is only
    /// useful to separate the (possibly interactive) authorization step from
    /// the first API call.
    pub async fn authenticate(&self) -> ProviderResult<()> {
        let mut state = self.state.lock().await;
        self.ensure_client_locked(&mut state).await
    }

    /// Makes sure `state.client` holds a client with a valid access token.
    async fn ensure_client_locked(&self, state: &mut ServiceState) -> ProviderResult<()> {
        if !state.loaded {
            state.tokens = self.token_storage.load();
            state.loaded = true;
        }

        match auth_strategy(state.tokens.as_ref(), &self.config.scopes) {
            AuthStrategy::UseExisting => {}
            AuthStrategy::Refresh => {
                let Some(tokens) = state.tokens.as_mut() else {
                    return Err(ProviderError::internal("refresh strategy without tokens"));
                };
                let Some(refresh_token) = tokens.refresh_token.clone() else {
                    return Err(ProviderError::internal(
                        "refresh strategy without refresh token",
                    ));
                };

                debug!("refreshing expired access token");
                let oauth = OAuthClient::new(tokens.credentials(), self.config.timeout);
                let (access_token, expires_in) = oauth.refresh_token(&refresh_token).await?;

                tokens.update_access_token(access_token, expires_in);
                self.token_storage.save(tokens)?;
                state.client = None;
            }
            AuthStrategy::Interactive => {
                info!("no usable cached credential, starting authorization flow");
                let tokens = self.auth_flow.run(&self.config.scopes).await?;
                self.token_storage.save(&tokens)?;
                state.tokens = Some(tokens);
                state.client = None;
            }
        }

        if state.client.is_none() {
            let Some(tokens) = state.tokens.as_ref() else {
                return Err(ProviderError::internal("no tokens after authentication"));
            };
            state.client = Some(GoogleCalendarClient::new(
                &tokens.access_token,
                self.config.timeout,
            ));
        }

        Ok(())
    }
}

impl CalendarService for GoogleService {
    fn insert_event<'a>(
        &'a self,
        calendar_id: &'a str,
        payload: &'a EventPayload,
    ) -> BoxFuture<'a, ProviderResult<CreatedEvent>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            self.ensure_client_locked(&mut state).await?;
            let Some(client) = state.client.as_ref() else {
                return Err(ProviderError::internal("API client not available"));
            };
            client.insert_event(calendar_id, payload).await
        })
    }

    fn list_calendars(&self) -> BoxFuture<'_, ProviderResult<Vec<CalendarSummary>>> {
        Box::pin(async move {
            let mut state = self.state.lock().await;
            self.ensure_client_locked(&mut state).await?;
            let Some(client) = state.client.as_ref() else {
                return Err(ProviderError::internal("API client not available"));
            };
            client.list_calendars().await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::config::OAuthCredentials;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_credentials() -> OAuthCredentials {
        OAuthCredentials::new("test-id.apps.googleusercontent.com", "test-secret")
    }

    fn scoped_token(scopes: Vec<String>) -> TokenInfo {
        TokenInfo::new("access", None, Some(3600), scopes, &test_credentials())
    }

    /// Authorization flow that returns a prepared credential and counts runs.
    struct FakeFlow {
        tokens: TokenInfo,
        runs: Arc<AtomicUsize>,
    }

    impl AuthorizationFlow for FakeFlow {
        fn run<'a>(&'a self, _scopes: &'a [String]) -> BoxFuture<'a, ProviderResult<TokenInfo>> {
            self.runs.fetch_add(1, Ordering::SeqCst);
            let tokens = self.tokens.clone();
            Box::pin(async move { Ok(tokens) })
        }
    }

    fn scope() -> String {
        GoogleConfig::DEFAULT_SCOPE.to_string()
    }

    #[test]
    fn strategy_without_tokens_is_interactive() {
        assert_eq!(auth_strategy(None, &[scope()]), AuthStrategy::Interactive);
    }

    #[test]
    fn strategy_with_valid_tokens_uses_them() {
        let tokens = scoped_token(vec![scope()]);
        assert_eq!(
            auth_strategy(Some(&tokens), &[scope()]),
            AuthStrategy::UseExisting
        );
    }

    #[test]
    fn strategy_with_expired_refreshable_tokens_refreshes() {
        let mut tokens = scoped_token(vec![scope()]);
        tokens.refresh_token = Some("refresh".to_string());
        tokens.expires_at = Some(chrono::Utc::now() - chrono::Duration::hours(1));
        assert_eq!(
            auth_strategy(Some(&tokens), &[scope()]),
            AuthStrategy::Refresh
        );
    }

    #[test]
    fn strategy_with_expired_unrefreshable_tokens_is_interactive() {
        let mut tokens = scoped_token(vec![scope()]);
        tokens.expires_at = Some(chrono::Utc::now() - chrono::Duration::hours(1));
        assert_eq!(
            auth_strategy(Some(&tokens), &[scope()]),
            AuthStrategy::Interactive
        );
    }

    #[test]
    fn strategy_with_missing_scope_is_interactive() {
        let tokens = scoped_token(vec!["other-scope".to_string()]);
        assert_eq!(
            auth_strategy(Some(&tokens), &[scope()]),
            AuthStrategy::Interactive
        );
    }

    #[tokio::test]
    async fn authenticate_persists_tokens_from_flow() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        let config = GoogleConfig::new().with_token_path(&token_path);

        let runs = Arc::new(AtomicUsize::new(0));
        let flow = FakeFlow {
            tokens: scoped_token(vec![scope()]),
            runs: Arc::clone(&runs),
        };

        let service = GoogleService::with_flow(config, Box::new(flow));
        service.authenticate().await.unwrap();

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(token_path.exists());

        let stored = TokenStorage::new(&token_path).load().unwrap();
        assert_eq!(stored.access_token, "access");
    }

    #[tokio::test]
    async fn authenticate_reuses_valid_cached_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        TokenStorage::new(&token_path)
            .save(&scoped_token(vec![scope()]))
            .unwrap();

        let runs = Arc::new(AtomicUsize::new(0));
        let flow = FakeFlow {
            tokens: scoped_token(vec![scope()]),
            runs: Arc::clone(&runs),
        };

        let config = GoogleConfig::new().with_token_path(&token_path);
        let service = GoogleService::with_flow(config, Box::new(flow));
        service.authenticate().await.unwrap();

        // The interactive flow must not run when the cached token is valid.
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authenticate_only_reads_the_token_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        TokenStorage::new(&token_path)
            .save(&scoped_token(vec![scope()]))
            .unwrap();

        let runs = Arc::new(AtomicUsize::new(0));
        let flow = FakeFlow {
            tokens: scoped_token(vec![scope()]),
            runs: Arc::clone(&runs),
        };

        let config = GoogleConfig::new().with_token_path(&token_path);
        let service = GoogleService::with_flow(config, Box::new(flow));
        service.authenticate().await.unwrap();

        // Deleting the file after the first load must not matter.
        std::fs::remove_file(&token_path).unwrap();
        service.authenticate().await.unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
