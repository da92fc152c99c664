//! Content-based format detection.
//!
//! The pattern directory mixes XML and JSON under arbitrary extensions,
//! so the format is decided by the first meaningful character.

/// Shape of a pattern document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
    Unrecognized,
}

/// Classify decoded document text.
pub fn classify(text: &str) -> Format {
    let start = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    match start.chars().next() {
        Some('<') => Format::Xml,
        Some('{') | Some('[') => Format::Json,
        _ => Format::Unrecognized,
    }
}
