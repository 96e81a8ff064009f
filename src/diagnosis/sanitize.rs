use std::sync::LazyLock;

use regex::Regex;

/// Longest user text forwarded to the generator, in characters.
pub const MAX_INPUT_CHARS: usize = 2_000;

const FILTERED: &str = "[FILTERED]";

/// Clean user-written text before it is placed inside a prompt.
///
/// Strips invisible Unicode and control characters (newline and tab
/// stay), replaces prompt delimiters and known injection phrases with
/// `[FILTERED]`, then truncates to `MAX_INPUT_CHARS` at a word boundary.
pub fn sanitize_user_text(raw: &str) -> String {
    let text = remove_invisible_unicode(raw);
    let text = remove_control_characters(&text);
    let text = remove_injection_patterns(&text);
    let cleaned = truncate_at_word_boundary(&text, MAX_INPUT_CHARS);
    if cleaned != raw {
        tracing::debug!(
            original_chars = raw.chars().count(),
            cleaned_chars = cleaned.chars().count(),
            "User text modified before prompting"
        );
    }
    cleaned
}

fn remove_invisible_unicode(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{2069}'
                | '\u{FEFF}'
                | '\u{00AD}'
                | '\u{034F}'
                | '\u{061C}'
                | '\u{180E}'
            )
        })
        .collect()
}

fn remove_control_characters(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

static INJECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Our own prompt delimiters
        Regex::new(r"(?i)<\s*/?\s*(?:symptoms|history)\s*>").unwrap(),
        // Role override attempts
        Regex::new(r"(?i)ignore\s+(?:previous|above|all\s+prior|the\s+above)\s+(?:instructions?|rules?|prompts?)").unwrap(),
        Regex::new(r"(?i)forget\s+(?:everything|all|your)\s+(?:previous|prior)?").unwrap(),
        Regex::new(r"(?i)new\s+instructions?:").unwrap(),
        Regex::new(r"(?i)you\s+are\s+now\s+(?:a|an)\s+").unwrap(),
        // Chat-template role tags
        Regex::new(r"(?i)system\s*:").unwrap(),
        Regex::new(r"(?i)assistant\s*:").unwrap(),
        Regex::new(r"<<SYS>>").unwrap(),
        Regex::new(r"\[INST\]").unwrap(),
        Regex::new(r"<\|im_start\|>").unwrap(),
        Regex::new(r"<\|im_end\|>").unwrap(),
    ]
});

fn remove_injection_patterns(text: &str) -> String {
    let mut result = text.to_string();
    for pattern in INJECTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, FILTERED).into_owned();
    }
    result
}

/// Cut to at most `max` characters, backing up to the last whitespace.
fn truncate_at_word_boundary(text: &str, max: usize) -> String {
    let Some((cut, _)) = text.char_indices().nth(max) else {
        return text.to_string();
    };
    let truncated = &text[..cut];
    match truncated.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => truncated[..pos].to_string(),
        _ => truncated.to_string(),
    }
}
