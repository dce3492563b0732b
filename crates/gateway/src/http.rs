use std::time::Duration;

use async_trait::async_trait;
use models::{ApiEnvelope, AuthFailure, AuthOutcome, AuthenticatedSession, Credentials, RegistrationRequest};
use reqwest::{RequestBuilder, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::api::AuthGateway;
use crate::config::GatewayConfig;

/// Where an operation goes and how its failures read when the server says nothing.
struct Endpoint {
    path: &'static str,
    fallback: &'static str,
    /// Whether a bare error status reports its reason phrase before the fallback.
    reason_phrase: bool,
}

const LOGIN: Endpoint = Endpoint { path: "api/auth/login", fallback: "Login failed", reason_phrase: true };
const REGISTER: Endpoint = Endpoint { path: "api/auth/register", fallback: "Registration failed", reason_phrase: false };
const VALIDATE: Endpoint =
    Endpoint { path: "api/auth/validate", fallback: "Token validation failed", reason_phrase: true };

/// Construction errors. Call failures never surface here; they become `AuthFailure`.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid base url {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// reqwest-backed gateway. Build one per process and share it.
#[derive(Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: Url,
    request_timeout: Duration,
}

impl HttpAuthGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut raw = config.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| GatewayError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .build()?;
        Ok(Self { client, base_url, request_timeout: config.request_timeout() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthFailure> {
        self.base_url
            .join(path)
            .map_err(|e| AuthFailure::new(format!("invalid endpoint {path}: {e}")))
    }

    async fn exchange(&self, request: RequestBuilder, endpoint: &Endpoint) -> AuthOutcome {
        let response = request
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| transport_failure(&e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_failure(&e))?;
        let envelope = serde_json::from_slice::<ApiEnvelope<AuthenticatedSession>>(&body);

        if status.is_success() {
            return match envelope {
                Ok(ApiEnvelope { data: Some(session), .. }) if session.token().is_empty() => {
                    Err(AuthFailure::new("malformed response: empty token"))
                }
                Ok(ApiEnvelope { data: Some(session), .. }) => Ok(session),
                Ok(env) => {
                    debug!(%status, envelope_status = env.status, "success status without session data");
                    Err(AuthFailure::new(env.message().unwrap_or(endpoint.fallback)))
                }
                Err(e) => Err(AuthFailure::new(format!("malformed response: {e}"))),
            };
        }

        let server_message = envelope.ok().and_then(|env| env.message().map(str::to_string));
        debug!(%status, has_message = server_message.is_some(), "auth service rejected request");
        Err(AuthFailure::new(server_message.unwrap_or_else(|| bare_status_text(status, endpoint))))
    }
}

fn bare_status_text(status: StatusCode, endpoint: &Endpoint) -> String {
    let reason = if endpoint.reason_phrase { status.canonical_reason() } else { None };
    reason.unwrap_or(endpoint.fallback).to_string()
}

/// Transport errors keep only their text; callers cannot branch on the category.
fn transport_failure(e: &reqwest::Error) -> AuthFailure {
    if e.is_timeout() {
        AuthFailure::new("timeout")
    } else if e.is_connect() {
        AuthFailure::new(format!("connection failed: {e}"))
    } else if e.is_decode() || e.is_body() {
        AuthFailure::new(format!("malformed response: {e}"))
    } else {
        AuthFailure::new(e.to_string())
    }
}

fn log_outcome(operation: &'static str, outcome: &AuthOutcome) {
    match outcome {
        Ok(session) => info!(operation, user_id = session.user_id(), "auth call succeeded"),
        Err(failure) => warn!(operation, reason = %failure, "auth call failed"),
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        let url = self.endpoint(LOGIN.path)?;
        let outcome = self.exchange(self.client.post(url).json(credentials), &LOGIN).await;
        log_outcome("login", &outcome);
        outcome
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegistrationRequest) -> AuthOutcome {
        let url = self.endpoint(REGISTER.path)?;
        let outcome = self.exchange(self.client.post(url).json(request), &REGISTER).await;
        log_outcome("register", &outcome);
        outcome
    }

    #[instrument(skip_all)]
    async fn validate_token(&self, token: &str) -> AuthOutcome {
        let url = self.endpoint(VALIDATE.path)?;
        let outcome = self.exchange(self.client.get(url).bearer_auth(token), &VALIDATE).await;
        log_outcome("validate_token", &outcome);
        outcome
    }
}
