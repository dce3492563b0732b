//! Session persistence and orchestration on top of the gateway.
//! - `storage`: durable key-value store for the session record, observable via watch.
//! - `auth`: the session repository, single writer and single source of truth.
//! - `runtime`: startup environment checks.

pub mod auth;
pub mod errors;
pub mod runtime;
pub mod storage;

pub use auth::{SessionError, SessionRepository};
pub use errors::StoreError;
pub use storage::{CredentialStore, FileCredentialStore, JsonMapStore};
