use serde::{Deserialize, Serialize};

use super::DiagnosisError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeSymptomsInput {
    /// The user's symptoms in natural language.
    pub symptoms: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeSymptomsOutput {
    /// Symptoms in concise, standardized medical terminology.
    pub normalized_symptoms: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeHistoryInput {
    /// JSON-encoded array of health records.
    pub health_history: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizeHistoryOutput {
    pub summary: String,
}

impl NormalizeSymptomsInput {
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        if self.symptoms.trim().is_empty() {
            return Err(DiagnosisError::InvalidInput("symptoms are empty".into()));
        }
        Ok(())
    }
}

impl NormalizeSymptomsOutput {
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        if self.normalized_symptoms.trim().is_empty() {
            return Err(DiagnosisError::SchemaViolation(
                "normalizedSymptoms is empty".into(),
            ));
        }
        Ok(())
    }
}

impl SummarizeHistoryInput {
    /// The history must be a JSON array.
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        match serde_json::from_str::<serde_json::Value>(&self.health_history) {
            Ok(serde_json::Value::Array(_)) => Ok(()),
            Ok(_) => Err(DiagnosisError::InvalidInput(
                "healthHistory is not a JSON array".into(),
            )),
            Err(e) => Err(DiagnosisError::InvalidInput(format!(
                "healthHistory is not valid JSON: {e}"
            ))),
        }
    }
}

impl SummarizeHistoryOutput {
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        if self.summary.trim().is_empty() {
            return Err(DiagnosisError::SchemaViolation("summary is empty".into()));
        }
        Ok(())
    }
}
