//! Data model shared by the gateway, the session repository and the screens.
//! - Wire types mirror the auth service JSON (camelCase).
//! - `session_record` owns the flat persistence layout.
//! - `validation` holds the fixed, user-facing input checks.

pub mod auth;
pub mod envelope;
pub mod errors;
pub mod session_record;
pub mod validation;

pub use auth::{AuthFailure, AuthOutcome, AuthenticatedSession, Credentials, RegistrationRequest, DEFAULT_ROLE};
pub use envelope::ApiEnvelope;
pub use errors::ValidationError;
pub use session_record::{StoredSessionRecord, UserProfile};
