use chrono::NaiveDate;

use super::user_message;
use crate::analysis::AVAILABLE_TIMES;
use crate::core_state::CoreState;
use crate::db::KeyValueStore;
use crate::diagnosis::DiagnosisGenerator;
use crate::models::{Appointment, HealthRecord};

const MISSING_SLOT: &str = "Please select a date and time for your appointment.";

/// Analyze symptoms and save the resulting health record.
pub fn analyze_symptoms<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
    symptoms: &str,
) -> Result<HealthRecord, String> {
    state
        .analyze_symptoms(symptoms)
        .map_err(|e| user_message(&e, "An unknown error occurred."))
}

pub fn available_times() -> Vec<String> {
    AVAILABLE_TIMES.iter().map(|t| t.to_string()).collect()
}

/// Book a follow-up for the latest analysis. `date` is `YYYY-MM-DD`.
pub fn schedule_appointment<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
    date: Option<&str>,
    time: Option<&str>,
) -> Result<Appointment, String> {
    let (Some(date), Some(time)) = (date, time) else {
        return Err(MISSING_SLOT.into());
    };
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date: {e}"))?;

    state
        .schedule_follow_up(date, time)
        .map_err(|e| user_message(&e, "Could not schedule the appointment."))
}

/// Confirmation line shown after booking.
pub fn appointment_confirmation(appointment: &Appointment) -> String {
    format!(
        "Your appointment for {} is scheduled on {} at {}.",
        appointment.reason,
        appointment.date.format("%Y-%m-%d"),
        appointment.time.format("%H:%M")
    )
}
