//! Local accounts and the persisted login session.

pub mod registry;
pub mod session;
pub mod validation;

pub use registry::AccountRegistry;
pub use session::SessionStore;

use thiserror::Error;

use crate::db::StorageError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email already registered.")]
    DuplicateAccount,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("No user logged in.")]
    NoActiveSession,

    #[error("{0}")]
    Validation(String),

    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::StorageUnavailable(err.to_string())
    }
}

/// Emails compare case-insensitively and are stored lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
