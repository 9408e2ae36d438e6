//! Age extraction from free text

use once_cell::sync::Lazy;
use regex::Regex;

static AGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:i'm|im|i am)\s+(\d{1,3})\b").unwrap(),
        Regex::new(r"\b(\d{1,3})\s*(?:years? old|yrs? old|yo|y o)\b").unwrap(),
        Regex::new(r"\bage\s+(?:is\s+)?(\d{1,3})\b").unwrap(),
        Regex::new(r"^(\d{1,3})$").unwrap(),
    ]
});

/// Age stated in normalized text, if any
pub fn extract_age(normalized: &str) -> Option<u32> {
    AGE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(normalized)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}
