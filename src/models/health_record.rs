use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Urgency;

/// Outcome of the diagnosis step for one symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub potential_conditions: Vec<String>,
    pub urgency: Urgency,
    pub recommended_tests: Vec<String>,
}

/// One saved symptom analysis. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    /// Creation timestamp (RFC 3339, UTC, milliseconds).
    pub id: String,
    pub date: NaiveDate,
    pub symptoms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_symptoms: Option<String>,
    pub potential_conditions: Vec<String>,
    pub urgency: Urgency,
    pub recommended_tests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl HealthRecord {
    pub fn diagnosis(&self) -> DiagnosisResult {
        DiagnosisResult {
            potential_conditions: self.potential_conditions.clone(),
            urgency: self.urgency,
            recommended_tests: self.recommended_tests.clone(),
        }
    }
}
