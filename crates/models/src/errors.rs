use thiserror::Error;

/// Local input validation failures. `Display` is the exact message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email and password cannot be empty")]
    MissingCredentials,
    #[error("Name cannot be empty")]
    MissingName,
    #[error("Email cannot be empty")]
    MissingEmail,
    #[error("Password cannot be empty")]
    MissingPassword,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}
