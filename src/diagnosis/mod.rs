//! Boundary to the text-generation service.
//!
//! Two request/response operations, both schema-checked in and out:
//! symptom normalization and history summarization. `DiagnosisGenerator`
//! is the seam the app depends on; `LlmDiagnosisGenerator` implements it
//! over any `LlmClient`, and `OllamaClient` is the local HTTP client.

#[cfg(test)]
pub(crate) mod fake;
pub mod generator;
pub mod mock;
pub mod ollama;
pub mod prompt;
pub mod sanitize;
pub mod types;

pub use generator::LlmDiagnosisGenerator;
pub use mock::mock_diagnosis;
pub use ollama::OllamaClient;
pub use sanitize::sanitize_user_text;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("Ollama is not running at {0}")]
    OllamaConnection(String),

    #[error("Ollama returned error (status {status}): {body}")]
    OllamaError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Response does not match schema: {0}")]
    SchemaViolation(String),

    #[error("Input rejected: {0}")]
    InvalidInput(String),
}

/// The two generation operations the app needs.
pub trait DiagnosisGenerator {
    fn normalize_symptoms(
        &self,
        input: &NormalizeSymptomsInput,
    ) -> Result<NormalizeSymptomsOutput, DiagnosisError>;

    fn summarize_history(
        &self,
        input: &SummarizeHistoryInput,
    ) -> Result<SummarizeHistoryOutput, DiagnosisError>;
}

/// Raw prompt-in, text-out LLM access (allows mocking)
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, DiagnosisError>;
}

impl<T: DiagnosisGenerator + ?Sized> DiagnosisGenerator for &T {
    fn normalize_symptoms(
        &self,
        input: &NormalizeSymptomsInput,
    ) -> Result<NormalizeSymptomsOutput, DiagnosisError> {
        (**self).normalize_symptoms(input)
    }

    fn summarize_history(
        &self,
        input: &SummarizeHistoryInput,
    ) -> Result<SummarizeHistoryOutput, DiagnosisError> {
        (**self).summarize_history(input)
    }
}
