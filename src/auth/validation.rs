//! Form-level checks run before an auth action touches storage.

use std::sync::LazyLock;

use regex::Regex;

use super::AuthError;

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(AuthError::Validation(
            "Please enter a valid email address.".into(),
        ))
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(AuthError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        )))
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    validate_password(password)
}

/// Registration form: credentials plus a matching confirmation.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    validate_credentials(email, password)?;
    if password != confirm_password {
        return Err(AuthError::Validation("Passwords do not match.".into()));
    }
    Ok(())
}
