use thiserror::Error;

use crate::auth::AuthError;
use crate::db::StorageError;
use crate::diagnosis::DiagnosisError;

/// Errors surfaced to the UI layer. Every variant carries a message fit
/// for display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Email already registered.")]
    DuplicateAccount,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("No user logged in.")]
    NoActiveSession,

    #[error("{0}")]
    Processing(String),

    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    Validation(String),

    #[error("Internal lock error")]
    LockPoisoned,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::DuplicateAccount => AppError::DuplicateAccount,
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::NoActiveSession => AppError::NoActiveSession,
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::StorageUnavailable(msg) => AppError::StorageUnavailable(msg),
        }
    }
}

impl From<DiagnosisError> for AppError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::Processing(other.to_string()),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::StorageUnavailable(err.to_string())
    }
}
