pub const NORMALIZE_SYSTEM_PROMPT: &str = r#"
You are a medical assistant that normalizes user-provided symptoms into a
structured format. You rewrite what the user reports; you do not diagnose.

RULES:
1. Use concise, standardized medical terminology.
2. Keep every symptom the user mentions, including duration and severity.
3. NEVER add symptoms that are not in the user's text.
4. Output MUST be a single JSON object and nothing else.
"#;

pub const SUMMARIZE_SYSTEM_PROMPT: &str = r#"
You are an expert medical AI assistant. You analyze a patient's health
history, provided as a JSON array of past records, and write a concise,
professional summary.

RULES:
1. Synthesize the records into insights; do not just list them.
2. Do not assume the records are in any particular order; use their dates.
3. Output MUST be a single JSON object and nothing else.
"#;

/// Build the normalization prompt for one symptom description.
pub fn build_normalize_prompt(symptoms: &str) -> String {
    format!(
        r#"User Symptoms:
<symptoms>
{symptoms}
</symptoms>

Please normalize these symptoms into a concise, standardized medical terminology.
Return only the normalized symptoms, as JSON:

{{"normalizedSymptoms": "..."}}"#
    )
}

/// Build the history summary prompt around a JSON-encoded record array.
pub fn build_summarize_prompt(health_history: &str) -> String {
    format!(
        r#"Provide a concise, professional summary that highlights:
1. Key recurring symptoms or conditions.
2. Any noticeable trends over time (e.g., increasing frequency of headaches).
3. A high-level overview of the patient's reported health journey.

Format the summary as clean, readable prose with actionable insights.

Health History Data:
<history>
{health_history}
</history>

Respond as JSON:

{{"summary": "..."}}"#
    )
}
