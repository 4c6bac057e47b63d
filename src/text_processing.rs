//! # Text Processing Module
//!
//! Normalization and tokenization shared by the availability matcher.
//!
//! All comparisons between ingredient names and pantry entries go through
//! [`normalize`] first, so matching is never case-sensitive.

use std::collections::HashSet;
use tracing::trace;

/// Lowercase and trim a name for comparison
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Split a name into its set of significant words
///
/// Lowercases, strips every character that is neither a word character
/// (letter, ASCII digit, underscore) nor whitespace, splits on whitespace and
/// drops single-character tokens. Numeric symbols such as `½` or `²` are
/// stripped like punctuation.
///
/// # Examples
///
/// ```rust
/// use pantry_match::text_processing::tokenize;
///
/// let tokens = tokenize("Yellow onion, diced (1 large)");
/// assert!(tokens.contains("onion"));
/// assert!(tokens.contains("diced"));
/// assert!(!tokens.contains("1"));
/// ```
pub fn tokenize(name: &str) -> HashSet<String> {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_ascii_digit() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Check whether two names share enough significant words
///
/// True when at least one token, and at least half of the smaller token set,
/// appears in the larger set. An empty token set on either side is never
/// enough evidence for a match.
pub fn tokens_overlap_enough(a: &str, b: &str) -> bool {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return false;
    }

    let (smaller, larger) = if tokens_a.len() <= tokens_b.len() {
        (&tokens_a, &tokens_b)
    } else {
        (&tokens_b, &tokens_a)
    };

    let match_count = smaller.iter().filter(|t| larger.contains(*t)).count();
    let result = match_count >= smaller.len().min(1) && match_count * 2 >= smaller.len();

    trace!(
        "Token overlap '{}' vs '{}': {}/{} -> {}",
        a,
        b,
        match_count,
        smaller.len(),
        result
    );
    result
}
