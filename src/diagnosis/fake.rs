use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{
    DiagnosisError, DiagnosisGenerator, NormalizeSymptomsInput, NormalizeSymptomsOutput,
    SummarizeHistoryInput, SummarizeHistoryOutput,
};

/// Scripted generator for tests. Counts calls and keeps the last input
/// of each kind; `None` replies fail as if the service were down.
pub struct FakeGenerator {
    normalized: Option<String>,
    summary: Option<String>,
    pub normalize_calls: AtomicUsize,
    pub summarize_calls: AtomicUsize,
    last_symptoms: Mutex<Option<String>>,
    last_history: Mutex<Option<String>>,
}

impl FakeGenerator {
    pub fn new(normalized: &str, summary: &str) -> Self {
        Self {
            normalized: Some(normalized.to_string()),
            summary: Some(summary.to_string()),
            normalize_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
            last_symptoms: Mutex::new(None),
            last_history: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            normalized: None,
            summary: None,
            normalize_calls: AtomicUsize::new(0),
            summarize_calls: AtomicUsize::new(0),
            last_symptoms: Mutex::new(None),
            last_history: Mutex::new(None),
        }
    }

    pub fn last_symptoms(&self) -> Option<String> {
        self.last_symptoms.lock().unwrap().clone()
    }

    pub fn last_history(&self) -> Option<String> {
        self.last_history.lock().unwrap().clone()
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.normalize_calls.load(Ordering::SeqCst),
            self.summarize_calls.load(Ordering::SeqCst),
        )
    }
}

impl DiagnosisGenerator for FakeGenerator {
    fn normalize_symptoms(
        &self,
        input: &NormalizeSymptomsInput,
    ) -> Result<NormalizeSymptomsOutput, DiagnosisError> {
        self.normalize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_symptoms.lock().unwrap() = Some(input.symptoms.clone());
        input.validate()?;
        self.normalized
            .clone()
            .map(|normalized_symptoms| NormalizeSymptomsOutput { normalized_symptoms })
            .ok_or_else(|| DiagnosisError::OllamaConnection("http://localhost:11434".into()))
    }

    fn summarize_history(
        &self,
        input: &SummarizeHistoryInput,
    ) -> Result<SummarizeHistoryOutput, DiagnosisError> {
        self.summarize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history.lock().unwrap() = Some(input.health_history.clone());
        input.validate()?;
        self.summary
            .clone()
            .map(|summary| SummarizeHistoryOutput { summary })
            .ok_or_else(|| DiagnosisError::OllamaConnection("http://localhost:11434".into()))
    }
}
