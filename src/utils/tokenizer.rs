//! Splits normalized text into sentences and words.
//!
//! Both functions are pure: calling them again on the same text restarts the
//! sequence from the beginning.

/// Sentences of normalized text, trimmed, empty ones skipped.
/// Case is preserved.
pub fn sentences(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    normalized
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}

/// Lowercase words of normalized text with surrounding periods removed.
pub fn words(normalized: &str) -> impl Iterator<Item = String> + '_ {
    normalized
        .split_whitespace()
        .map(|word| word.trim_matches('.'))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}
