//! Input checks run by the screens before any network activity.
//!
//! "Blank" means empty or whitespace-only. Password length is counted in
//! characters, not bytes.

use crate::ValidationError;

const MIN_PASSWORD_CHARS: usize = 6;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if is_blank(email) || is_blank(password) {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Ordered checks; the first failure wins.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::MissingName);
    }
    if is_blank(email) {
        return Err(ValidationError::MissingEmail);
    }
    if is_blank(password) {
        return Err(ValidationError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}
