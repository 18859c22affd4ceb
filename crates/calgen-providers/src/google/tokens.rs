//! OAuth token persistence.
//!
//! Tokens are stored as JSON at a configurable path (`token.json` by
//! default) and span process invocations: the file is read at most once and
//! written at most once per run. The stored material includes the client
//! id/secret that obtained it, so an expired access token can be refreshed
//! without the client-secret file being present.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};

use super::config::OAuthCredentials;

/// Persisted OAuth token material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token for obtaining new access tokens.
    pub refresh_token: Option<String>,

    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// The OAuth scopes that were granted.
    pub scopes: Vec<String>,

    /// The client ID the tokens were issued to.
    pub client_id: String,

    /// The client secret paired with `client_id` (needed for refresh).
    pub client_secret: String,

    /// When the tokens were last acquired or refreshed.
    pub last_refresh: DateTime<Utc>,
}

impl TokenInfo {
    /// Expiry safety margin: refresh this long before the actual expiry.
    const EXPIRY_BUFFER_SECS: i64 = 60;

    /// Creates token info from a token-endpoint response.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
        scopes: Vec<String>,
        credentials: &OAuthCredentials,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: expires_in_secs.map(Self::expiry_from_now),
            scopes,
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            last_refresh: Utc::now(),
        }
    }

    /// Returns true if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            // No expiry recorded: assume the token is still valid.
            None => false,
        }
    }

    /// Returns true if the token was granted all of the required scopes.
    pub fn has_scopes(&self, required: &[String]) -> bool {
        required.iter().all(|scope| self.scopes.contains(scope))
    }

    /// Returns the credentials the tokens were issued to.
    pub fn credentials(&self) -> OAuthCredentials {
        OAuthCredentials::new(&self.client_id, &self.client_secret)
    }

    /// Replaces the access token after a refresh.
    pub fn update_access_token(
        &mut self,
        access_token: impl Into<String>,
        expires_in_secs: Option<i64>,
    ) {
        self.access_token = access_token.into();
        self.expires_at = expires_in_secs.map(Self::expiry_from_now);
        self.last_refresh = Utc::now();
    }

    fn expiry_from_now(expires_in_secs: i64) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(expires_in_secs - Self::EXPIRY_BUFFER_SECS)
    }
}

/// File-backed token storage.
pub struct TokenStorage {
    path: PathBuf,
}

impl TokenStorage {
    /// Creates a token storage at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the persisted tokens, if any.
    ///
    /// A missing file is a normal first-run condition. An unreadable or
    /// unparsable file is treated as no cached credential (a warning is
    /// logged) so the caller falls through to re-acquisition.
    pub fn load(&self) -> Option<TokenInfo> {
        if !self.path.exists() {
            debug!("no token file at {}", self.path.display());
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("could not read token file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(tokens) => {
                debug!("loaded tokens from {}", self.path.display());
                Some(tokens)
            }
            Err(e) => {
                warn!(
                    "ignoring unparsable token file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persists tokens, replacing any previous file.
    ///
    /// Writes to a temp file first and renames for atomicity; on Unix the
    /// final file gets mode 0600.
    pub fn save(&self, tokens: &TokenInfo) -> ProviderResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ProviderError::configuration(format!(
                    "failed to create token directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(tokens)
            .map_err(|e| ProviderError::internal(format!("failed to serialize tokens: {}", e)))?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &content).map_err(|e| {
            ProviderError::configuration(format!(
                "failed to write token file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            ProviderError::configuration(format!(
                "failed to rename token file into place: {}",
                e
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }

        debug!("saved tokens to {}", self.path.display());
        Ok(())
    }

    /// Returns the token storage path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> OAuthCredentials {
        OAuthCredentials::new("test-id.apps.googleusercontent.com", "test-secret")
    }

    #[test]
    fn token_info_creation() {
        let token = TokenInfo::new(
            "access-token",
            Some("refresh-token".to_string()),
            Some(3600),
            vec!["scope1".to_string()],
            &test_credentials(),
        );

        assert_eq!(token.access_token, "access-token");
        assert_eq!(token.refresh_token, Some("refresh-token".to_string()));
        assert_eq!(token.client_id, "test-id.apps.googleusercontent.com");
        assert!(token.expires_at.is_some());
        assert!(!token.is_expired());
    }

    #[test]
    fn token_info_expired() {
        let mut token = TokenInfo::new("access", None, Some(3600), vec![], &test_credentials());
        token.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(token.is_expired());
    }

    #[test]
    fn token_without_expiry_is_not_expired() {
        let token = TokenInfo::new("access", None, None, vec![], &test_credentials());
        assert!(!token.is_expired());
    }

    #[test]
    fn token_scope_check() {
        let token = TokenInfo::new(
            "access",
            None,
            None,
            vec!["scope1".to_string(), "scope2".to_string()],
            &test_credentials(),
        );

        assert!(token.has_scopes(&["scope1".to_string()]));
        assert!(token.has_scopes(&["scope1".to_string(), "scope2".to_string()]));
        assert!(!token.has_scopes(&["scope3".to_string()]));
    }

    #[test]
    fn update_access_token_replaces_expiry() {
        let mut token = TokenInfo::new("old", None, Some(3600), vec![], &test_credentials());
        token.expires_at = Some(Utc::now() - Duration::hours(1));
        assert!(token.is_expired());

        token.update_access_token("new", Some(3600));
        assert_eq!(token.access_token, "new");
        assert!(!token.is_expired());
    }

    #[test]
    fn credentials_round_trip() {
        let token = TokenInfo::new("access", None, None, vec![], &test_credentials());
        assert_eq!(token.credentials(), test_credentials());
    }

    #[test]
    fn storage_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let storage = TokenStorage::new(&path);

        let token = TokenInfo::new(
            "access-token",
            Some("refresh-token".to_string()),
            Some(3600),
            vec!["scope1".to_string()],
            &test_credentials(),
        );
        storage.save(&token).unwrap();
        assert!(path.exists());

        let loaded = TokenStorage::new(&path).load().unwrap();
        assert_eq!(loaded.access_token, "access-token");
        assert_eq!(loaded.refresh_token, Some("refresh-token".to_string()));
        assert_eq!(loaded.client_secret, "test-secret");
    }

    #[test]
    fn storage_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::new(dir.path().join("token.json"));
        assert!(storage.load().is_none());
    }

    #[test]
    fn storage_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();

        let storage = TokenStorage::new(&path);
        assert!(storage.load().is_none());
    }

    #[test]
    fn storage_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let storage = TokenStorage::new(&path);

        let mut token = TokenInfo::new("first", None, None, vec![], &test_credentials());
        storage.save(&token).unwrap();

        token.update_access_token("second", None);
        storage.save(&token).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.access_token, "second");
    }

    #[cfg(unix)]
    #[test]
    fn storage_sets_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let storage = TokenStorage::new(&path);

        let token = TokenInfo::new("access", None, None, vec![], &test_credentials());
        storage.save(&token).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
