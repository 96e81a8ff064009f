use serde::de::DeserializeOwned;

use super::prompt::{
    build_normalize_prompt, build_summarize_prompt, NORMALIZE_SYSTEM_PROMPT,
    SUMMARIZE_SYSTEM_PROMPT,
};
use super::{
    DiagnosisError, DiagnosisGenerator, LlmClient, NormalizeSymptomsInput,
    NormalizeSymptomsOutput, SummarizeHistoryInput, SummarizeHistoryOutput,
};

/// `DiagnosisGenerator` over a prompt-based LLM with a fixed model name.
pub struct LlmDiagnosisGenerator<C: LlmClient> {
    client: C,
    model: String,
}

impl<C: LlmClient> LlmDiagnosisGenerator<C> {
    pub fn new(client: C, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// The model name being used.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn ask<T: DeserializeOwned>(&self, prompt: &str, system: &str) -> Result<T, DiagnosisError> {
        let raw = self.client.generate(&self.model, prompt, system)?;
        parse_json_reply(&raw)
    }
}

impl<C: LlmClient> DiagnosisGenerator for LlmDiagnosisGenerator<C> {
    fn normalize_symptoms(
        &self,
        input: &NormalizeSymptomsInput,
    ) -> Result<NormalizeSymptomsOutput, DiagnosisError> {
        input.validate()?;
        let output: NormalizeSymptomsOutput = self.ask(
            &build_normalize_prompt(&input.symptoms),
            NORMALIZE_SYSTEM_PROMPT,
        )?;
        output.validate()?;
        Ok(NormalizeSymptomsOutput {
            normalized_symptoms: output.normalized_symptoms.trim().to_string(),
        })
    }

    fn summarize_history(
        &self,
        input: &SummarizeHistoryInput,
    ) -> Result<SummarizeHistoryOutput, DiagnosisError> {
        input.validate()?;
        let output: SummarizeHistoryOutput = self.ask(
            &build_summarize_prompt(&input.health_history),
            SUMMARIZE_SYSTEM_PROMPT,
        )?;
        output.validate()?;
        Ok(SummarizeHistoryOutput {
            summary: output.summary.trim().to_string(),
        })
    }
}

/// Parse the JSON object in a model reply, tolerating ```json fences
/// and chatter around the object.
fn parse_json_reply<T: DeserializeOwned>(raw: &str) -> Result<T, DiagnosisError> {
    let start = raw.find('{');
    let end = raw.rfind('}');
    let body = match (start, end) {
        (Some(s), Some(e)) if s < e => &raw[s..=e],
        _ => {
            return Err(DiagnosisError::ResponseParsing(
                "no JSON object in model reply".into(),
            ))
        }
    };
    serde_json::from_str(body).map_err(|e| DiagnosisError::SchemaViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::ollama::MockLlmClient;

    fn generator(reply: &str) -> LlmDiagnosisGenerator<MockLlmClient> {
        LlmDiagnosisGenerator::new(MockLlmClient::new(reply), "medgemma:4b")
    }

    #[test]
    fn normalize_parses_schema_reply() {
        let gen = generator(r#"{"normalizedSymptoms": " Productive cough; pyrexia x3 days "}"#);
        let out = gen
            .normalize_symptoms(&NormalizeSymptomsInput {
                symptoms: "persistent cough and fever for three days".into(),
            })
            .unwrap();
        assert_eq!(out.normalized_symptoms, "Productive cough; pyrexia x3 days");
        assert_eq!(gen.model(), "medgemma:4b");
    }

    #[test]
    fn fenced_reply_is_accepted() {
        let gen = generator("Sure!\n```json\n{\"summary\": \"Recurring headaches.\"}\n```");
        let out = gen
            .summarize_history(&SummarizeHistoryInput {
                health_history: "[]".into(),
            })
            .unwrap();
        assert_eq!(out.summary, "Recurring headaches.");
    }

    #[test]
    fn wrong_schema_is_rejected() {
        let gen = generator(r#"{"normalized": "Cough"}"#);
        let result = gen.normalize_symptoms(&NormalizeSymptomsInput {
            symptoms: "coughing a lot".into(),
        });
        assert!(matches!(result, Err(DiagnosisError::SchemaViolation(_))));
    }

    #[test]
    fn blank_field_is_rejected() {
        let gen = generator(r#"{"summary": "   "}"#);
        let result = gen.summarize_history(&SummarizeHistoryInput {
            health_history: "[]".into(),
        });
        assert!(matches!(result, Err(DiagnosisError::SchemaViolation(_))));
    }

    #[test]
    fn prose_reply_is_parse_error() {
        let gen = generator("I think you have a cold.");
        let result = gen.normalize_symptoms(&NormalizeSymptomsInput {
            symptoms: "sneezing".into(),
        });
        assert!(matches!(result, Err(DiagnosisError::ResponseParsing(_))));
    }

    #[test]
    fn invalid_input_never_reaches_client() {
        let gen = LlmDiagnosisGenerator::new(MockLlmClient::failing("unreachable"), "m");
        let result = gen.normalize_symptoms(&NormalizeSymptomsInput { symptoms: " ".into() });
        assert!(matches!(result, Err(DiagnosisError::InvalidInput(_))));
    }

    #[test]
    fn client_failure_propagates() {
        let gen = LlmDiagnosisGenerator::new(MockLlmClient::failing("http://localhost:11434"), "m");
        let result = gen.summarize_history(&SummarizeHistoryInput {
            health_history: "[]".into(),
        });
        assert!(matches!(result, Err(DiagnosisError::OllamaConnection(_))));
    }
}
