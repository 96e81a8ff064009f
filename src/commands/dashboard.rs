use chrono::Local;

use super::{user_message, ActionOutcome};
use crate::core_state::{CoreState, DashboardData};
use crate::db::KeyValueStore;
use crate::diagnosis::DiagnosisGenerator;
use crate::error::AppError;
use crate::models::{Appointment, HealthRecord};

/// Records and this week's appointments for the logged-in user.
pub fn get_dashboard<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> Result<DashboardData, String> {
    state
        .dashboard(Local::now().date_naive())
        .map_err(|e| user_message(&e, "Could not load the dashboard."))
}

pub fn list_health_records<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> Vec<HealthRecord> {
    state.records().list_health_records()
}

pub fn list_appointments<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> Vec<Appointment> {
    state.records().list_appointments()
}

pub fn generate_health_summary<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> Result<String, String> {
    state
        .summarize_history()
        .map_err(|e| user_message(&e, "Failed to generate AI summary. Please try again."))
}

/// Remove every saved health record. Requires a logged-in user.
pub fn clear_health_history<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> ActionOutcome {
    if !state.is_authenticated() {
        return ActionOutcome::failed(AppError::NoActiveSession.to_string());
    }
    state.records().clear_health_records();
    ActionOutcome::ok_with("Health history cleared.")
}
