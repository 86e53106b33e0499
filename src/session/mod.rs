//! Session and token lifecycle management
//!
//! The [`SessionManager`] owns the credential store and claims decoder and
//! drives the auth endpoints: signup, login, refresh, logout. It is the only
//! writer of the credential slots, and it holds the single-flight refresh
//! lock that the authenticated request executor relies on.
//!
//! There is no ambient singleton: one manager is constructed at startup and
//! handed (via `Arc`) to whatever needs it.

use std::time::Duration;

use reqwest::Client as HttpClient;
use tokio::sync::Mutex;

use crate::client::models::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, SignupRequest, User,
};
use crate::error::{ApiError, Result};

pub mod claims;
pub mod store;

pub use claims::Claims;
pub use store::{CredentialKind, CredentialStore};

/// HTTP request timeout in seconds, applied to every network attempt
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Session state derived from the credential store and claims decoder.
///
/// Never persisted: recomputed on demand. `LoggedIn` iff an access token is
/// stored, decodes, and its expiry is strictly in the future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { subject_id: String, email: String },
}

/// Orchestrates login, registration, refresh, logout, and session queries
pub struct SessionManager {
    http: HttpClient,
    base_url: String,
    store: CredentialStore,
    /// Serializes refresh + store-write so concurrent 401s coalesce into a
    /// single backend refresh (single-flight).
    refresh_lock: Mutex<()>,
}

impl SessionManager {
    /// Create a manager talking to `base_url` with credentials in `store`
    pub fn new(base_url: String, store: CredentialStore) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            refresh_lock: Mutex::new(()),
        })
    }

    /// Base URL this session talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Reuse the manager's HTTP client (shares the connection pool)
    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Create an account. Does not establish a session — callers log in
    /// separately. Stored credentials are never touched.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        let body = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        };

        self.post_json("/auth/signup", &body).await
    }

    /// Log in and store both returned credentials. On failure nothing is
    /// stored and any previous session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post_json("/auth/login", &body).await?;

        self.store
            .set(CredentialKind::Access, &response.access_token)?;
        self.store
            .set(CredentialKind::Refresh, &response.refresh_token)?;

        log::debug!("session established for {}", response.user.email);
        Ok(response)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Any failure — missing refresh token, network error, backend rejection,
    /// malformed response, store write failure — tears down the whole session
    /// before the error propagates. There is no partial-credential state.
    #[allow(dead_code)]
    pub async fn refresh(&self) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Single-flight refresh for the executor's 401 path.
    ///
    /// `stale_access` is the token the failed attempt used. If the stored
    /// access token already differs by the time the lock is acquired, a
    /// concurrent caller refreshed first: return the fresh token without
    /// another backend round-trip.
    pub async fn refresh_after_unauthorized(&self, stale_access: &str) -> Result<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.store.get(CredentialKind::Access) {
            if current != stale_access {
                log::debug!("refresh coalesced: another caller already renewed the session");
                return Ok(current);
            }
        }

        self.refresh_locked().await
    }

    /// Refresh body; caller must hold `refresh_lock`.
    async fn refresh_locked(&self) -> Result<String> {
        match self.try_refresh().await {
            Ok(token) => Ok(token),
            Err(err) => {
                // A failed refresh always tears down the whole session.
                self.logout();
                Err(err)
            }
        }
    }

    async fn try_refresh(&self) -> Result<String> {
        let refresh_token = self
            .store
            .get(CredentialKind::Refresh)
            .ok_or(ApiError::NoRefreshCredential)?;

        let body = RefreshRequest { refresh_token };
        let response: RefreshResponse = self.post_json("/auth/refresh", &body).await?;

        self.store
            .set(CredentialKind::Access, &response.access_token)?;
        if let Some(rotated) = &response.refresh_token {
            self.store.set(CredentialKind::Refresh, rotated)?;
        }

        log::debug!("access token refreshed");
        Ok(response.access_token)
    }

    /// Clear both credential slots. Idempotent and infallible: teardown must
    /// always leave a clean logged-out state, so store errors are only logged.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear_all() {
            log::warn!("failed to clear credential store on logout: {}", e);
        }
    }

    /// The stored access token, if any. Presence only — expiry is not
    /// checked here; expired tokens stay in storage until the next refresh
    /// or logout (lazy invalidation).
    pub fn access_token(&self) -> Option<String> {
        self.store.get(CredentialKind::Access)
    }

    /// Whether a refresh token is stored
    pub fn has_refresh_token(&self) -> bool {
        self.store.get(CredentialKind::Refresh).is_some()
    }

    /// Decode the stored access token's claims, expired or not.
    /// Decode failure reads as "no claims".
    pub fn claims(&self) -> Option<Claims> {
        let token = self.store.get(CredentialKind::Access)?;
        match claims::decode(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                log::debug!("stored access token has no usable claims: {}", e);
                None
            }
        }
    }

    /// Pure session-state read: logged in iff an access token is stored,
    /// decodes, and has not expired.
    pub fn current_session(&self) -> SessionState {
        match self.claims() {
            Some(claims) if !claims.is_expired() => SessionState::LoggedIn {
                subject_id: claims.subject_id,
                email: claims.email,
            },
            _ => SessionState::LoggedOut,
        }
    }

    /// `current_session() != LoggedOut`
    pub fn is_authenticated(&self) -> bool {
        self.current_session() != SessionState::LoggedOut
    }

    /// POST a JSON body to an unauthenticated auth endpoint and decode the
    /// success payload
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let text = response.text().await.map_err(ApiError::from)?;

        if !status.is_success() {
            return Err(ApiError::from_response(status, &text).into());
        }

        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("failed to parse {} response: {}", path, e)).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::claims::tests::make_token;
    use chrono::Utc;
    use tempfile::tempdir;

    fn manager_for(url: &str, dir: &std::path::Path) -> SessionManager {
        SessionManager::new(url.to_string(), CredentialStore::new(dir)).unwrap()
    }

    fn token_with_exp(sub: &str, email: &str, exp: i64) -> String {
        make_token(&serde_json::json!({ "sub": sub, "email": email, "exp": exp }))
    }

    #[test]
    fn test_current_session_without_credentials_is_logged_out() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());

        assert_eq!(mgr.current_session(), SessionState::LoggedOut);
        assert!(!mgr.is_authenticated());
    }

    #[test]
    fn test_current_session_with_valid_token_is_logged_in() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());
        let token = token_with_exp("user-1", "a@x.com", Utc::now().timestamp() + 3600);

        mgr.store.set(CredentialKind::Access, &token).unwrap();

        assert_eq!(
            mgr.current_session(),
            SessionState::LoggedIn {
                subject_id: "user-1".to_string(),
                email: "a@x.com".to_string(),
            }
        );
    }

    #[test]
    fn test_expired_token_reads_as_logged_out_but_stays_stored() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());
        let token = token_with_exp("user-1", "a@x.com", Utc::now().timestamp() - 10);

        mgr.store.set(CredentialKind::Access, &token).unwrap();

        // Lazy invalidation: logged out, yet the token is still physically there
        assert_eq!(mgr.current_session(), SessionState::LoggedOut);
        assert_eq!(mgr.access_token(), Some(token));
    }

    #[test]
    fn test_malformed_token_reads_as_logged_out() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());

        mgr.store
            .set(CredentialKind::Access, "only-one-segment")
            .unwrap();

        assert!(mgr.claims().is_none());
        assert_eq!(mgr.current_session(), SessionState::LoggedOut);
    }

    #[test]
    fn test_logout_is_idempotent() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());

        mgr.store.set(CredentialKind::Access, "a").unwrap();
        mgr.store.set(CredentialKind::Refresh, "r").unwrap();

        mgr.logout();
        assert!(!mgr.is_authenticated());
        assert_eq!(mgr.access_token(), None);

        // Logging out again from a logged-out state changes nothing and
        // does not error
        mgr.logout();
        assert!(!mgr.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_stores_both_credentials() {
        let mut server = mockito::Server::new_async().await;
        let access = token_with_exp("user-1", "a@x.com", Utc::now().timestamp() + 3600);

        let _login = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(format!(
                r#"{{
                    "access_token": "{access}",
                    "refresh_token": "refresh-1",
                    "token_type": "bearer",
                    "expires_in": 3600,
                    "user": {{ "id": "user-1", "email": "a@x.com" }}
                }}"#
            ))
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());

        let response = mgr.login("a@x.com", "p").await.unwrap();
        assert_eq!(response.user.id, "user-1");
        assert_eq!(mgr.access_token(), Some(access));
        assert!(mgr.has_refresh_token());
        assert!(mgr.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_failure_stores_nothing() {
        let mut server = mockito::Server::new_async().await;

        let _login = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"detail":"Incorrect email or password"}"#)
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());

        let err = mgr.login("a@x.com", "wrong").await.unwrap_err();
        assert!(err.to_string().contains("Incorrect email or password"));
        assert_eq!(mgr.access_token(), None);
        assert!(!mgr.has_refresh_token());
    }

    #[tokio::test]
    async fn test_register_does_not_establish_session() {
        let mut server = mockito::Server::new_async().await;

        let _signup = server
            .mock("POST", "/auth/signup")
            .with_status(200)
            .with_body(r#"{ "id": "user-9", "email": "new@x.com" }"#)
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());

        let user = mgr.register("new@x.com", "Passw0rd!").await.unwrap();
        assert_eq!(user.id, "user-9");
        assert!(!mgr.is_authenticated());
        assert_eq!(mgr.access_token(), None);
    }

    #[tokio::test]
    async fn test_refresh_replaces_access_keeps_refresh() {
        let mut server = mockito::Server::new_async().await;
        let new_access = token_with_exp("user-1", "a@x.com", Utc::now().timestamp() + 3600);

        let _refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(format!(r#"{{ "access_token": "{new_access}" }}"#))
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());
        mgr.store.set(CredentialKind::Access, "stale").unwrap();
        mgr.store.set(CredentialKind::Refresh, "refresh-1").unwrap();

        let token = mgr.refresh().await.unwrap();
        assert_eq!(token, new_access);
        assert_eq!(mgr.access_token(), Some(new_access));
        // No rotated refresh token in the response: stored one is kept
        assert_eq!(
            mgr.store.get(CredentialKind::Refresh).as_deref(),
            Some("refresh-1")
        );
    }

    #[tokio::test]
    async fn test_refresh_accepts_rotated_refresh_token() {
        let mut server = mockito::Server::new_async().await;
        let new_access = token_with_exp("user-1", "a@x.com", Utc::now().timestamp() + 3600);

        let _refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(200)
            .with_body(format!(
                r#"{{ "access_token": "{new_access}", "refresh_token": "refresh-2" }}"#
            ))
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());
        mgr.store.set(CredentialKind::Refresh, "refresh-1").unwrap();

        mgr.refresh().await.unwrap();
        assert_eq!(
            mgr.store.get(CredentialKind::Refresh).as_deref(),
            Some("refresh-2")
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_wipes_both_slots() {
        let mut server = mockito::Server::new_async().await;

        let _refresh = server
            .mock("POST", "/auth/refresh")
            .with_status(401)
            .with_body(r#"{"detail":"Refresh token revoked"}"#)
            .create_async()
            .await;

        let temp = tempdir().unwrap();
        let mgr = manager_for(&server.url(), temp.path());
        mgr.store.set(CredentialKind::Access, "stale").unwrap();
        mgr.store.set(CredentialKind::Refresh, "revoked").unwrap();

        let err = mgr.refresh().await.unwrap_err();
        assert!(err.to_string().contains("Refresh token revoked"));
        assert!(!mgr.is_authenticated());
        assert_eq!(mgr.access_token(), None);
        assert!(!mgr.has_refresh_token());
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_fails_and_tears_down() {
        let temp = tempdir().unwrap();
        let mgr = manager_for("http://localhost:0", temp.path());
        mgr.store.set(CredentialKind::Access, "orphan").unwrap();

        let err = mgr.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Api(ApiError::NoRefreshCredential)
        ));
        // Torn down like any other refresh failure
        assert_eq!(mgr.access_token(), None);
    }

    #[tokio::test]
    async fn test_refresh_after_unauthorized_coalesces() {
        let temp = tempdir().unwrap();
        // Server would refuse, but no request should go out at all
        let mgr = manager_for("http://localhost:0", temp.path());
        mgr.store.set(CredentialKind::Access, "fresh-token").unwrap();
        mgr.store.set(CredentialKind::Refresh, "refresh-1").unwrap();

        // The stored access token differs from the stale one the caller saw,
        // so the refresh is skipped and the fresh token returned as-is
        let token = mgr.refresh_after_unauthorized("stale-token").await.unwrap();
        assert_eq!(token, "fresh-token");
        assert!(mgr.has_refresh_token());
    }
}
