//! Application state shared by every UI action.
//!
//! `CoreState` owns the storage port, the diagnosis generator, the
//! password hasher and the in-memory session. The persisted session is
//! only read at startup (`restore`); afterwards the in-memory copy is
//! authoritative and every change is written through.

use std::sync::{Mutex, RwLock};

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::analysis;
use crate::auth::{AccountRegistry, SessionStore};
use crate::config::{self, AppConfig};
use crate::crypto::PasswordHasher;
use crate::db::{JsonFileStore, KeyValueStore, LocalStore, SqliteStore};
use crate::diagnosis::{DiagnosisGenerator, LlmDiagnosisGenerator, OllamaClient};
use crate::error::AppError;
use crate::models::{Account, Appointment, DiagnosisResult, HealthRecord, SessionUser};
use crate::records::RecordStore;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState<S: KeyValueStore, G: DiagnosisGenerator> {
    store: LocalStore<S>,
    generator: G,
    hasher: PasswordHasher,
    /// Logged-in user. `None` when unauthenticated.
    session: RwLock<Option<SessionUser>>,
    /// Diagnosis of the latest analysis, until a follow-up is booked for it.
    pending_diagnosis: Mutex<Option<DiagnosisResult>>,
    pub config: AppConfig,
}

/// Everything the dashboard shows for the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub user: SessionUser,
    pub health_records: Vec<HealthRecord>,
    pub upcoming_appointments: Vec<Appointment>,
}

impl<S: KeyValueStore, G: DiagnosisGenerator> CoreState<S, G> {
    /// Unauthenticated state over `backend`. Call `restore` to pick up a
    /// persisted session.
    pub fn new(backend: S, generator: G, config: AppConfig) -> Self {
        Self {
            store: LocalStore::new(backend),
            generator,
            hasher: PasswordHasher::default(),
            session: RwLock::new(None),
            pending_diagnosis: Mutex::new(None),
            config,
        }
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn store(&self) -> &LocalStore<S> {
        &self.store
    }

    pub fn registry(&self) -> AccountRegistry<'_, S> {
        AccountRegistry::new(&self.store, &self.hasher)
    }

    pub fn sessions(&self) -> SessionStore<'_, S> {
        SessionStore::new(&self.store)
    }

    pub fn records(&self) -> RecordStore<'_, S> {
        RecordStore::new(&self.store)
    }

    // ── Session ─────────────────────────────────────────────

    /// Load and re-validate the persisted session.
    pub fn restore(&self) -> Result<Option<SessionUser>, AppError> {
        let restored = self.sessions().restore(&self.registry());
        *self.session.write().map_err(|_| AppError::LockPoisoned)? = restored.clone();
        Ok(restored)
    }

    pub fn current_user(&self) -> Result<Option<SessionUser>, AppError> {
        self.session
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| AppError::LockPoisoned)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current_user(), Ok(Some(_)))
    }

    fn begin_session(&self, user: SessionUser) -> Result<(), AppError> {
        let mut guard = self.session.write().map_err(|_| AppError::LockPoisoned)?;
        self.sessions().persist(&user);
        tracing::info!(user_id = %user.user_id, "Session started");
        *guard = Some(user);
        Ok(())
    }

    fn end_session(&self) -> Result<(), AppError> {
        let mut guard = self.session.write().map_err(|_| AppError::LockPoisoned)?;
        self.sessions().clear();
        *guard = None;
        if let Ok(mut pending) = self.pending_diagnosis.lock() {
            *pending = None;
        }
        Ok(())
    }

    // ── Accounts ────────────────────────────────────────────

    /// Create an account. Does not log in.
    pub fn register(&self, email: &str, password: &str) -> Result<Account, AppError> {
        Ok(self.registry().register(email, password)?)
    }

    /// On failure the current session, if any, is left as it was.
    pub fn login(&self, email: &str, password: &str) -> Result<SessionUser, AppError> {
        let account = self.registry().authenticate(email, password)?;
        let user = SessionUser::from(&account);
        self.begin_session(user.clone())?;
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        let user_id = self.current_user()?.map(|u| u.user_id);
        self.end_session()?;
        tracing::info!(user_id = ?user_id, "Logged out");
        Ok(())
    }

    /// Remove the logged-in account and end the session. Health records
    /// and appointments stay. If the accounts cannot be rewritten the
    /// session is kept.
    pub fn delete_account(&self) -> Result<(), AppError> {
        let user = self.current_user()?.ok_or(AppError::NoActiveSession)?;
        if !self.registry().remove(&user.email)? {
            tracing::warn!(user_id = %user.user_id, "Logged-in account was not in the registry");
        }
        self.end_session()?;
        tracing::info!(user_id = %user.user_id, "Account deleted");
        Ok(())
    }

    // ── Analysis ────────────────────────────────────────────

    pub fn analyze_symptoms(&self, symptoms: &str) -> Result<HealthRecord, AppError> {
        let record = analysis::analyze_symptoms(
            &self.records(),
            &self.generator,
            symptoms,
            &mut rand::thread_rng(),
            Local::now(),
        )?;
        *self
            .pending_diagnosis
            .lock()
            .map_err(|_| AppError::LockPoisoned)? = Some(record.diagnosis());
        Ok(record)
    }

    /// The diagnosis a follow-up can currently be booked for.
    pub fn pending_diagnosis(&self) -> Result<Option<DiagnosisResult>, AppError> {
        self.pending_diagnosis
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| AppError::LockPoisoned)
    }

    /// Book a follow-up for the latest analysis.
    pub fn schedule_follow_up(&self, date: NaiveDate, time: &str) -> Result<Appointment, AppError> {
        let mut pending = self
            .pending_diagnosis
            .lock()
            .map_err(|_| AppError::LockPoisoned)?;
        let diagnosis = pending.as_ref().ok_or_else(|| {
            AppError::Validation("Analyze your symptoms before scheduling a follow-up.".into())
        })?;
        let appointment =
            analysis::schedule_follow_up(&self.records(), diagnosis, date, time, Local::now())?;
        *pending = None;
        Ok(appointment)
    }

    pub fn summarize_history(&self) -> Result<String, AppError> {
        analysis::summarize_history(&self.records(), &self.generator)
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<DashboardData, AppError> {
        let user = self.current_user()?.ok_or(AppError::NoActiveSession)?;
        let records = self.records();
        Ok(DashboardData {
            user,
            health_records: records.list_health_records(),
            upcoming_appointments: records.upcoming_appointments(today),
        })
    }
}

// ═══════════════════════════════════════════════════════════
// On-disk constructors
// ═══════════════════════════════════════════════════════════

impl<G: DiagnosisGenerator> CoreState<SqliteStore, G> {
    /// Open `healthflow.db` under the configured data dir and restore the
    /// persisted session.
    pub fn open_sqlite(config: AppConfig, generator: G) -> Result<Self, AppError> {
        let path = config::local_db_path(&config.data_dir);
        let backend = SqliteStore::open(&path)?;
        tracing::info!(path = %path.display(), "SQLite store opened");
        let state = Self::new(backend, generator, config);
        state.restore()?;
        Ok(state)
    }
}

impl<G: DiagnosisGenerator> CoreState<JsonFileStore, G> {
    /// Open `local_store.json` under the configured data dir and restore the
    /// persisted session.
    pub fn open_json(config: AppConfig, generator: G) -> Result<Self, AppError> {
        let path = config::local_store_path(&config.data_dir);
        let backend = JsonFileStore::open(&path)?;
        let state = Self::new(backend, generator, config);
        state.restore()?;
        Ok(state)
    }
}

/// Generator backed by the configured Ollama instance and model.
pub fn ollama_generator(
    config: &AppConfig,
) -> Result<LlmDiagnosisGenerator<OllamaClient>, AppError> {
    let client = OllamaClient::from_config(config)?;
    Ok(LlmDiagnosisGenerator::new(client, config.model.clone()))
}
