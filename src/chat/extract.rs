//! Task title extraction for creation-intent messages.
//!
//! An ordered chain of regex patterns is tried until the first success.
//! Patterns run case-insensitively against the *raw* message so the
//! extracted title keeps its original casing. "Not found" is an explicit
//! variant, never an empty string.

use once_cell::sync::Lazy;
use regex::Regex;

/// Outcome of a title extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleExtraction {
    /// A non-empty, trimmed title.
    Title(String),
    NoMatch,
}

/// Ordered extraction patterns. Straight and curly quotes are accepted.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Quoted title after a creation verb.
        r#"(?i)crear.*?["“']([^"”']+)["”']"#,
        r#"(?i)create.*?["“']([^"”']+)["”']"#,
        // "nueva tarea:" / "new task:" followed by the rest of the line.
        r"(?i)nueva tarea:\s*(.+)",
        r"(?i)new task:\s*(.+)",
        r#"(?i)agregar.*?["“']([^"”']+)["”']"#,
        r#"(?i)add.*?["“']([^"”']+)["”']"#,
    ]
    .iter()
    .map(|p| Regex::new(p).expect("extraction pattern must compile"))
    .collect()
});

/// Pull a task title out of a raw creation-intent message.
pub fn title(raw: &str) -> TitleExtraction {
    for pattern in PATTERNS.iter() {
        if let Some(caps) = pattern.captures(raw) {
            let candidate = caps[1].trim();
            if !candidate.is_empty() {
                return TitleExtraction::Title(candidate.to_string());
            }
        }
    }
    TitleExtraction::NoMatch
}
