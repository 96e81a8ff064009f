pub mod analysis; // Symptom analysis, follow-ups, history summary
pub mod auth;
pub mod commands;
pub mod config;
pub mod core_state;
pub mod crypto;
pub mod db;
pub mod diagnosis; // Text-generation boundary (Ollama)
pub mod error;
pub mod models;
pub mod records;

use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::core_state::{ollama_generator, CoreState};
use crate::db::SqliteStore;
use crate::diagnosis::{LlmDiagnosisGenerator, OllamaClient};
use crate::error::AppError;

/// State used by the desktop shell: SQLite on disk, Ollama for generation.
pub type AppState = CoreState<SqliteStore, LlmDiagnosisGenerator<OllamaClient>>;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default filter. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Start HealthFlow from environment configuration.
pub fn run() -> Result<AppState, AppError> {
    init_tracing();
    let config = AppConfig::from_env();
    tracing::info!(
        "{} starting v{}",
        config::APP_NAME,
        config::APP_VERSION
    );
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        ollama_url = %config.ollama_url,
        model = %config.model,
        "Configuration loaded"
    );

    let generator = ollama_generator(&config)?;
    let state = CoreState::open_sqlite(config, generator)?;
    match state.current_user()? {
        Some(user) => tracing::info!(user_id = %user.user_id, "Resumed previous session"),
        None => tracing::info!("No active session"),
    }
    Ok(state)
}
