//! Placeholder diagnosis until a real symptom-checker API is wired in.

use rand::Rng;

use crate::models::{DiagnosisResult, Urgency};

const CONDITION_PREFIX_CHARS: usize = 20;

pub const BASELINE_CONDITIONS: [&str; 2] = ["Common Cold", "Allergy"];
pub const RECOMMENDED_TESTS: [&str; 2] = ["Complete Blood Count (CBC)", "Urinalysis"];

/// Build a mock diagnosis from the normalized symptoms.
///
/// Urgency: a first draw above 0.7 is High, else a second draw above 0.4
/// is Medium, else Low. Critical is never produced.
pub fn mock_diagnosis<R: Rng + ?Sized>(normalized: Option<&str>, rng: &mut R) -> DiagnosisResult {
    let mut potential_conditions = Vec::with_capacity(3);
    if let Some(text) = normalized.map(str::trim).filter(|t| !t.is_empty()) {
        let prefix: String = text.chars().take(CONDITION_PREFIX_CHARS).collect();
        potential_conditions.push(format!("Condition related to {prefix}..."));
    }
    potential_conditions.extend(BASELINE_CONDITIONS.iter().map(|c| c.to_string()));

    let urgency = if rng.gen::<f64>() > 0.7 {
        Urgency::High
    } else if rng.gen::<f64>() > 0.4 {
        Urgency::Medium
    } else {
        Urgency::Low
    };

    DiagnosisResult {
        potential_conditions,
        urgency,
        recommended_tests: RECOMMENDED_TESTS.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn leading_condition_quotes_normalized_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = mock_diagnosis(Some("Productive cough with pyrexia"), &mut rng);
        assert_eq!(
            result.potential_conditions,
            vec![
                "Condition related to Productive cough wit...".to_string(),
                "Common Cold".to_string(),
                "Allergy".to_string(),
            ]
        );
        assert_eq!(result.recommended_tests.len(), 2);
    }

    #[test]
    fn without_normalized_text_only_baseline() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = mock_diagnosis(None, &mut rng);
        assert_eq!(result.potential_conditions, vec!["Common Cold", "Allergy"]);
        let blank = mock_diagnosis(Some("   "), &mut rng);
        assert_eq!(blank.potential_conditions.len(), 2);
    }

    #[test]
    fn prefix_counts_characters_not_bytes() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = mock_diagnosis(Some("céphalée fébrile persistante"), &mut rng);
        assert_eq!(
            result.potential_conditions[0],
            "Condition related to céphalée fébrile per..."
        );
    }

    #[test]
    fn low_draws_give_low_urgency() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(mock_diagnosis(None, &mut rng).urgency, Urgency::Low);
    }

    #[test]
    fn high_draws_give_high_urgency() {
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(mock_diagnosis(None, &mut rng).urgency, Urgency::High);
    }

    #[test]
    fn never_critical() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert_ne!(mock_diagnosis(None, &mut rng).urgency, Urgency::Critical);
        }
    }
}
