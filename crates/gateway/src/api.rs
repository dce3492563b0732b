use async_trait::async_trait;
use models::{AuthOutcome, Credentials, RegistrationRequest};

/// Remote auth operations. Each call makes exactly one attempt and folds every
/// failure, transport or server-reported, into `AuthFailure`.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AuthOutcome;
    async fn register(&self, request: &RegistrationRequest) -> AuthOutcome;
    async fn validate_token(&self, token: &str) -> AuthOutcome;
}

/// Scripted gateway for tests and doc examples
pub mod mock {
    use super::*;
    use models::AuthFailure;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// Replays queued outcomes in order, whatever the endpoint.
    ///
    /// ```
    /// use gateway::api::{AuthGateway, mock::MockAuthGateway};
    /// use models::{AuthenticatedSession, Credentials};
    /// let gw = MockAuthGateway::with_outcomes([Ok(AuthenticatedSession::new("abc", 1, "a@b.com", "A", "USER"))]);
    /// let outcome = tokio_test::block_on(gw.login(&Credentials::new("a@b.com", "pw")));
    /// assert_eq!(outcome.unwrap().token(), "abc");
    /// assert_eq!(gw.login_calls(), 1);
    /// ```
    #[derive(Default)]
    pub struct MockAuthGateway {
        outcomes: Mutex<VecDeque<AuthOutcome>>,
        login_calls: AtomicUsize,
        register_calls: AtomicUsize,
        validate_calls: AtomicUsize,
        last_login: Mutex<Option<Credentials>>,
        last_registration: Mutex<Option<RegistrationRequest>>,
        last_token: Mutex<Option<String>>,
        gate: Option<Arc<Notify>>,
    }

    /// Releases calls held by a gated mock, one per `release`.
    #[derive(Clone)]
    pub struct Gate(Arc<Notify>);

    impl Gate {
        pub fn release(&self) {
            self.0.notify_one();
        }
    }

    impl MockAuthGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_outcomes(outcomes: impl IntoIterator<Item = AuthOutcome>) -> Self {
            let gw = Self::default();
            gw.outcomes.lock().unwrap().extend(outcomes);
            gw
        }

        /// Hold every call after it is counted until the returned gate is released.
        pub fn gated(mut self) -> (Self, Gate) {
            let notify = Arc::new(Notify::new());
            self.gate = Some(Arc::clone(&notify));
            (self, Gate(notify))
        }

        pub fn push(&self, outcome: AuthOutcome) {
            self.outcomes.lock().unwrap().push_back(outcome);
        }

        pub fn login_calls(&self) -> usize {
            self.login_calls.load(Ordering::SeqCst)
        }

        pub fn register_calls(&self) -> usize {
            self.register_calls.load(Ordering::SeqCst)
        }

        pub fn validate_calls(&self) -> usize {
            self.validate_calls.load(Ordering::SeqCst)
        }

        pub fn total_calls(&self) -> usize {
            self.login_calls() + self.register_calls() + self.validate_calls()
        }

        pub fn last_login(&self) -> Option<Credentials> {
            self.last_login.lock().unwrap().clone()
        }

        pub fn last_registration(&self) -> Option<RegistrationRequest> {
            self.last_registration.lock().unwrap().clone()
        }

        pub fn last_token(&self) -> Option<String> {
            self.last_token.lock().unwrap().clone()
        }

        async fn next_outcome(&self) -> AuthOutcome {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AuthFailure::new("no scripted outcome")))
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn login(&self, credentials: &Credentials) -> AuthOutcome {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_login.lock().unwrap() = Some(credentials.clone());
            self.next_outcome().await
        }

        async fn register(&self, request: &RegistrationRequest) -> AuthOutcome {
            self.register_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_registration.lock().unwrap() = Some(request.clone());
            self.next_outcome().await
        }

        async fn validate_token(&self, token: &str) -> AuthOutcome {
            self.validate_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_token.lock().unwrap() = Some(token.to_string());
            self.next_outcome().await
        }
    }
}
