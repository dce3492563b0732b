use std::sync::Arc;

use gateway::AuthGateway;
use models::{AuthFailure, AuthenticatedSession, Credentials, RegistrationRequest, StoredSessionRecord, UserProfile};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::errors::SessionError;
use crate::storage::CredentialStore;

const NO_ACTIVE_SESSION: &str = "No active session";
const EMPTY_TOKEN: &str = "malformed response: empty token";

/// Couples the remote gateway with the local credential store.
///
/// Holds no session state of its own; every query goes to the store.
#[derive(Clone)]
pub struct SessionRepository {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn CredentialStore>,
}

impl SessionRepository {
    pub fn new(gateway: Arc<dyn AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        Self { gateway, store }
    }

    /// Authenticate and persist the session before returning it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use gateway::api::mock::MockAuthGateway;
    /// use models::AuthenticatedSession;
    /// use service::storage::mock::MemoryCredentialStore;
    /// use service::SessionRepository;
    /// let gw = Arc::new(MockAuthGateway::with_outcomes([Ok(AuthenticatedSession::new("abc", 1, "a@b.com", "A", "USER"))]));
    /// let repo = SessionRepository::new(gw, Arc::new(MemoryCredentialStore::new()));
    /// let session = tokio_test::block_on(repo.login("a@b.com", "secret")).unwrap();
    /// assert_eq!(session.token(), "abc");
    /// assert!(tokio_test::block_on(repo.is_logged_in()));
    /// ```
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthenticatedSession, SessionError> {
        let session = self.gateway.login(&Credentials::new(email, password)).await?;
        self.persist(&session).await?;
        info!(user_id = session.user_id(), "user_logged_in");
        Ok(session)
    }

    /// Create an account with role `USER`; on success the new session is stored.
    #[instrument(skip(self, password, phone_number), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthenticatedSession, SessionError> {
        let request = RegistrationRequest::new(name, email, password, phone_number.map(str::to_owned));
        let session = self.gateway.register(&request).await?;
        self.persist(&session).await?;
        info!(user_id = session.user_id(), "user_registered");
        Ok(session)
    }

    async fn persist(&self, session: &AuthenticatedSession) -> Result<(), SessionError> {
        if session.token().is_empty() {
            return Err(AuthFailure::new(EMPTY_TOKEN).into());
        }
        self.store.write(&StoredSessionRecord::from(session)).await.map_err(|e| {
            warn!(error = %e, "session_persist_failed");
            SessionError::Storage(e)
        })
    }

    /// A read failure counts as logged out.
    pub async fn is_logged_in(&self) -> bool {
        self.stored().await.is_some_and(|r| !r.token.is_empty())
    }

    /// Clear the stored session. Errors are logged, never returned.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        match self.store.clear().await {
            Ok(()) => info!("user_logged_out"),
            Err(e) => warn!(error = %e, "logout_clear_failed"),
        }
    }

    pub async fn current_token(&self) -> Option<String> {
        self.stored().await.map(|r| r.token)
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.stored().await.map(|r| r.profile())
    }

    /// Check the stored token with the server. The store is left as is.
    #[instrument(skip(self))]
    pub async fn validate_session(&self) -> Result<AuthenticatedSession, SessionError> {
        let token = self
            .current_token()
            .await
            .ok_or_else(|| AuthFailure::new(NO_ACTIVE_SESSION))?;
        let session = self.gateway.validate_token(&token).await?;
        debug!(user_id = session.user_id(), "session_valid");
        Ok(session)
    }

    /// Latest stored record now, and every later login or logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<StoredSessionRecord>> {
        self.store.subscribe()
    }

    async fn stored(&self) -> Option<StoredSessionRecord> {
        match self.store.read().await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "session_read_failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::MemoryCredentialStore;
    use gateway::api::mock::MockAuthGateway;

    fn session(token: &str) -> AuthenticatedSession {
        AuthenticatedSession::new(token, 42, "a@b.com", "Alice", "USER")
    }

    fn repo(gw: MockAuthGateway) -> (SessionRepository, Arc<MockAuthGateway>, Arc<MemoryCredentialStore>) {
        let gw = Arc::new(gw);
        let store = Arc::new(MemoryCredentialStore::new());
        (SessionRepository::new(gw.clone(), store.clone()), gw, store)
    }

    #[tokio::test]
    async fn login_success_persists_before_returning() {
        let (repo, gw, store) = repo(MockAuthGateway::with_outcomes([Ok(session("abc"))]));
        let s = repo.login("a@b.com", "secret").await.unwrap();
        assert_eq!(s.token(), "abc");
        assert_eq!(gw.login_calls(), 1);
        assert_eq!(store.entries()["jwt_token"], "abc");
        assert!(repo.is_logged_in().await);
        assert_eq!(repo.current_token().await.as_deref(), Some("abc"));
        let user = repo.current_user().await.unwrap();
        assert_eq!((user.user_id, user.name.as_str()), (42, "Alice"));
    }

    #[tokio::test]
    async fn login_failure_leaves_store_untouched() {
        let (repo, _gw, store) = repo(MockAuthGateway::with_outcomes([Err(AuthFailure::new("Invalid credentials"))]));
        let err = repo.login("a@b.com", "wrong").await.unwrap_err();
        assert_eq!(err.user_message().as_deref(), Some("Invalid credentials"));
        assert!(store.entries().is_empty());
        assert!(!repo.is_logged_in().await);
    }

    #[tokio::test]
    async fn failure_does_not_clear_an_existing_session() {
        let (repo, gw, _store) = repo(MockAuthGateway::with_outcomes([Ok(session("old"))]));
        repo.login("a@b.com", "secret").await.unwrap();
        gw.push(Err(AuthFailure::new("nope")));
        assert!(repo.login("a@b.com", "bad").await.is_err());
        assert_eq!(repo.current_token().await.as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn empty_token_is_rejected_and_not_stored() {
        let (repo, _gw, store) = repo(MockAuthGateway::with_outcomes([Ok(session(""))]));
        let err = repo.login("a@b.com", "secret").await.unwrap_err();
        assert_eq!(err.user_message().as_deref(), Some("malformed response: empty token"));
        assert!(store.entries().is_empty());
        assert!(!repo.is_logged_in().await);
    }

    #[tokio::test]
    async fn register_sends_user_role_and_persists() {
        let (repo, gw, _store) = repo(MockAuthGateway::with_outcomes([Ok(session("reg"))]));
        repo.register("Alice", "a@b.com", "secret1", Some("555")).await.unwrap();
        let sent = gw.last_registration().unwrap();
        assert_eq!(sent.role, "USER");
        assert_eq!(sent.phone_number.as_deref(), Some("555"));
        assert_eq!(repo.current_token().await.as_deref(), Some("reg"));
    }

    #[tokio::test]
    async fn storage_failure_after_remote_success_is_propagated() {
        let (repo, _gw, store) = repo(MockAuthGateway::with_outcomes([Ok(session("abc"))]));
        store.set_failing(true);
        let err = repo.login("a@b.com", "secret").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!repo.is_logged_in().await);
    }

    #[tokio::test]
    async fn logout_twice_equals_logout_once() {
        let (repo, _gw, _store) = repo(MockAuthGateway::with_outcomes([Ok(session("abc"))]));
        repo.login("a@b.com", "secret").await.unwrap();
        repo.logout().await;
        repo.logout().await;
        assert!(!repo.is_logged_in().await);
        assert_eq!(repo.current_token().await, None);
        assert_eq!(repo.current_user().await, None);
    }

    #[tokio::test]
    async fn logout_failure_is_swallowed() {
        let (repo, _gw, store) = repo(MockAuthGateway::with_outcomes([Ok(session("abc"))]));
        repo.login("a@b.com", "secret").await.unwrap();
        store.set_failing(true);
        repo.logout().await;
        assert!(repo.is_logged_in().await);
    }

    #[tokio::test]
    async fn validate_without_session_makes_no_call() {
        let (repo, gw, _store) = repo(MockAuthGateway::new());
        let err = repo.validate_session().await.unwrap_err();
        assert_eq!(err.user_message().as_deref(), Some("No active session"));
        assert_eq!(gw.total_calls(), 0);
    }

    #[tokio::test]
    async fn validate_sends_stored_token_and_keeps_store() {
        let (repo, gw, _store) = repo(MockAuthGateway::with_outcomes([
            Ok(session("abc")),
            Err(AuthFailure::new("Token expired")),
        ]));
        repo.login("a@b.com", "secret").await.unwrap();
        let err = repo.validate_session().await.unwrap_err();
        assert_eq!(err.to_string(), "Token expired");
        assert_eq!(gw.last_token().as_deref(), Some("abc"));
        assert!(repo.is_logged_in().await);
    }

    #[tokio::test]
    async fn subscribers_observe_login_and_logout() {
        let (repo, _gw, _store) = repo(MockAuthGateway::with_outcomes([Ok(session("abc"))]));
        let mut rx = repo.subscribe();
        assert!(rx.borrow_and_update().is_none());
        repo.login("a@b.com", "secret").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_some());
        repo.logout().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }
}
