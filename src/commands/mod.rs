//! UI-facing actions.
//!
//! Each command takes the shared `CoreState` and never fails hard:
//! auth actions return an `ActionOutcome`, data actions a
//! `Result<T, String>` whose error is ready to display.

pub mod account;
pub mod analysis;
pub mod dashboard;

use serde::Serialize;

use crate::config::AppConfig;
use crate::diagnosis::OllamaClient;
use crate::error::AppError;

/// Success flag plus an optional message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Display text for an error. Internal failures are logged and replaced
/// by `fallback`.
pub(crate) fn user_message(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::DuplicateAccount
        | AppError::InvalidCredentials
        | AppError::NoActiveSession
        | AppError::Processing(_)
        | AppError::Validation(_) => err.to_string(),
        AppError::StorageUnavailable(_) | AppError::LockPoisoned => {
            tracing::error!(error = %err, "Action failed");
            fallback.to_string()
        }
    }
}

/// Generation service availability for the status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    /// Whether Ollama answered at the configured URL.
    pub ollama_available: bool,
    /// Whether the configured model is pulled.
    pub model_available: bool,
    pub model: String,
    pub error: Option<String>,
}

/// Probe the configured Ollama instance for the configured model.
pub fn check_ai_status(config: &AppConfig) -> AiStatus {
    let unavailable = |error: String| AiStatus {
        ollama_available: false,
        model_available: false,
        model: config.model.clone(),
        error: Some(error),
    };

    let client = match OllamaClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return unavailable(e.to_string()),
    };
    match client.is_model_available(&config.model) {
        Ok(model_available) => AiStatus {
            ollama_available: true,
            model_available,
            model: config.model.clone(),
            error: (!model_available)
                .then(|| format!("Model {} is not installed. Run: ollama pull {}", config.model, config.model)),
        },
        Err(e) => {
            tracing::debug!(error = %e, "AI status check failed");
            unavailable(e.to_string())
        }
    }
}
