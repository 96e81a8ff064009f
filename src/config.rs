use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "HealthFlow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default local Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model used for symptom normalization and history summaries.
pub const DEFAULT_MODEL: &str = "medgemma:4b";

/// Default HTTP timeout for generation requests (5 minutes, CPU inference is slow).
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

/// Default base URL reported in metadata.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9002";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,healthflow_lib=debug"
}

/// Get the application data directory
/// ~/HealthFlow/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Path of the JSON file backing the local store.
pub fn local_store_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("local_store.json")
}

/// Path of the SQLite database backing the local store.
pub fn local_db_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("healthflow.db")
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Public base URL. Metadata only, no behavior depends on it.
    pub base_url: String,
    pub ollama_url: String,
    pub model: String,
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            data_dir: app_data_dir(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Build config from `HEALTHFLOW_*` environment variables, defaulting
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_timeout_secs = match non_empty("HEALTHFLOW_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Invalid HEALTHFLOW_HTTP_TIMEOUT_SECS, using default");
                defaults.http_timeout_secs
            }),
            None => defaults.http_timeout_secs,
        };

        Self {
            base_url: non_empty("HEALTHFLOW_BASE_URL").unwrap_or(defaults.base_url),
            ollama_url: non_empty("HEALTHFLOW_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            model: non_empty("HEALTHFLOW_MODEL").unwrap_or(defaults.model),
            data_dir: non_empty("HEALTHFLOW_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            http_timeout_secs,
        }
    }
}
