//! Symptom analysis, follow-up scheduling and history summary.
//!
//! These flows sit between the UI actions and the stores: they validate
//! input, call the diagnosis generator, and decide what gets persisted.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, Utc};
use rand::Rng;

use crate::db::KeyValueStore;
use crate::diagnosis::{
    mock_diagnosis, sanitize_user_text, DiagnosisGenerator, NormalizeSymptomsInput,
    SummarizeHistoryInput,
};
use crate::error::AppError;
use crate::models::{Appointment, DiagnosisResult, HealthRecord};
use crate::records::RecordStore;

pub const MIN_SYMPTOM_CHARS: usize = 10;

/// Bookable follow-up slots, in display order.
pub const AVAILABLE_TIMES: [&str; 6] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

pub const FOLLOW_UP_DOCTOR: &str = "Dr. AI Consult";
pub const DEFAULT_REASON: &str = "Follow-up";

const NORMALIZE_FAILED: &str = "Failed to normalize symptoms due to an AI processing error.";
const SUMMARY_FAILED: &str = "Failed to generate AI summary. Please try again.";
const NO_RECORDS: &str = "You have no health records to summarize.";

/// Record and appointment ids are creation timestamps.
pub fn timestamp_id(now: DateTime<Local>) -> String {
    now.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn validate_symptoms(symptoms: &str) -> Result<(), AppError> {
    if symptoms.trim().chars().count() < MIN_SYMPTOM_CHARS {
        return Err(AppError::Validation(format!(
            "Please describe your symptoms in at least {MIN_SYMPTOM_CHARS} characters."
        )));
    }
    Ok(())
}

/// Analyze a symptom description and save the result.
///
/// The generator sees the sanitized text; the record keeps what the user
/// typed. Nothing is written unless normalization succeeds.
pub fn analyze_symptoms<S, G, R>(
    records: &RecordStore<'_, S>,
    generator: &G,
    symptoms: &str,
    rng: &mut R,
    now: DateTime<Local>,
) -> Result<HealthRecord, AppError>
where
    S: KeyValueStore,
    G: DiagnosisGenerator + ?Sized,
    R: Rng + ?Sized,
{
    let cleaned = sanitize_user_text(symptoms);
    validate_symptoms(&cleaned)?;

    let normalized = generator
        .normalize_symptoms(&NormalizeSymptomsInput { symptoms: cleaned })
        .map_err(|e| {
            tracing::error!(error = %e, "Symptom normalization failed");
            AppError::Processing(NORMALIZE_FAILED.into())
        })?
        .normalized_symptoms;

    let diagnosis = mock_diagnosis(Some(&normalized), rng);
    let record = HealthRecord {
        id: timestamp_id(now),
        date: now.date_naive(),
        symptoms: symptoms.to_string(),
        normalized_symptoms: Some(normalized),
        potential_conditions: diagnosis.potential_conditions,
        urgency: diagnosis.urgency,
        recommended_tests: diagnosis.recommended_tests,
        summary: None,
    };

    tracing::info!(
        record_id = %record.id,
        urgency = %record.urgency,
        conditions = record.potential_conditions.len(),
        "Symptoms analyzed"
    );
    if record.urgency.is_elevated() {
        tracing::warn!(record_id = %record.id, urgency = %record.urgency, "Elevated urgency");
    }
    records.append_health_record(record.clone());
    Ok(record)
}

/// Parse a slot label, accepting only the bookable ones.
pub fn parse_slot(time: &str) -> Result<NaiveTime, AppError> {
    let time = time.trim();
    if !AVAILABLE_TIMES.contains(&time) {
        return Err(AppError::Validation(format!(
            "Please choose one of the available times: {}.",
            AVAILABLE_TIMES.join(", ")
        )));
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| AppError::Validation(format!("Invalid time {time}: {e}")))
}

/// Book a follow-up for a diagnosis on `date` at one of the fixed slots.
pub fn schedule_follow_up<S: KeyValueStore>(
    records: &RecordStore<'_, S>,
    diagnosis: &DiagnosisResult,
    date: NaiveDate,
    time: &str,
    now: DateTime<Local>,
) -> Result<Appointment, AppError> {
    let today = now.date_naive();
    if date < today {
        return Err(AppError::Validation(
            "Appointments cannot be scheduled in the past.".into(),
        ));
    }
    let time = parse_slot(time)?;

    let appointment = Appointment {
        id: timestamp_id(now),
        date,
        time,
        reason: diagnosis
            .potential_conditions
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_REASON.to_string()),
        doctor: Some(FOLLOW_UP_DOCTOR.to_string()),
    };
    tracing::info!(appointment_id = %appointment.id, %date, "Follow-up scheduled");
    records.append_appointment(appointment.clone());
    Ok(appointment)
}

/// Ask the generator for an overview of every stored record.
pub fn summarize_history<S, G>(
    records: &RecordStore<'_, S>,
    generator: &G,
) -> Result<String, AppError>
where
    S: KeyValueStore,
    G: DiagnosisGenerator + ?Sized,
{
    let history = records.list_health_records();
    if history.is_empty() {
        return Err(AppError::Validation(NO_RECORDS.into()));
    }

    let prompt_history: Vec<HealthRecord> = history
        .iter()
        .cloned()
        .map(|mut record| {
            record.symptoms = sanitize_user_text(&record.symptoms);
            record
        })
        .collect();
    let health_history = serde_json::to_string(&prompt_history)
        .map_err(|e| AppError::Processing(format!("Could not encode history: {e}")))?;

    let output = generator
        .summarize_history(&SummarizeHistoryInput { health_history })
        .map_err(|e| {
            tracing::error!(error = %e, records = history.len(), "History summary failed");
            AppError::Processing(SUMMARY_FAILED.into())
        })?;

    tracing::info!(records = history.len(), "History summarized");
    Ok(output.summary)
}
