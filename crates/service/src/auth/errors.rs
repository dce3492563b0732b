use models::AuthFailure;
use thiserror::Error;

use crate::errors::StoreError;

/// Failures of a repository operation
#[derive(Debug, Error)]
pub enum SessionError {
    /// The remote call failed, whatever the cause.
    #[error("{0}")]
    Rejected(#[from] AuthFailure),
    /// The remote call succeeded but the session could not be persisted.
    #[error("could not save session: {0}")]
    Storage(#[from] StoreError),
}

impl SessionError {
    /// Text to show the user, `None` when the server gave nothing usable.
    pub fn user_message(&self) -> Option<String> {
        match self {
            SessionError::Rejected(failure) => failure.message().map(str::to_owned),
            SessionError::Storage(_) => Some(self.to_string()),
        }
    }
}
