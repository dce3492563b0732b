use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = "USER";

/// Login input. Lives only for the duration of one gateway call.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration input as sent to the auth service.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub role: String,
}

impl RegistrationRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            phone_number,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish()
    }
}

/// A session issued by the auth service. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedSession {
    token: String,
    user_id: i64,
    email: String,
    name: String,
    role: String,
}

impl AuthenticatedSession {
    pub fn new(
        token: impl Into<String>,
        user_id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            user_id,
            email: email.into(),
            name: name.into(),
            role: role.into(),
        }
    }

    pub fn token(&self) -> &str { &self.token }
    pub fn user_id(&self) -> i64 { self.user_id }
    pub fn email(&self) -> &str { &self.email }
    pub fn name(&self) -> &str { &self.name }
    pub fn role(&self) -> &str { &self.role }
}

/// Any remote failure: transport or server-reported, reduced to display text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct AuthFailure {
    message: Option<String>,
}

impl AuthFailure {
    /// Blank messages count as no message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::without_message()
        } else {
            Self { message: Some(message) }
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("authentication failed"))
    }
}

/// Result of one gateway call.
pub type AuthOutcome = Result<AuthenticatedSession, AuthFailure>;
