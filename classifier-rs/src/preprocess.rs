//! Text normalization
//!
//! Turns a raw message into the token stream the model is trained and
//! scored on.

use crate::stopwords::is_stopword;

/// Tokens of this many characters or fewer are dropped
const MIN_TOKEN_CHARS: usize = 2;

/// Normalize `text` into an ordered token sequence.
///
/// Lowercases, strips everything that is not a letter, digit or whitespace,
/// splits on whitespace and drops short tokens and stopwords. Duplicates are
/// kept because term frequency feeds the likelihood.
pub fn preprocess(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS && !is_stopword(token))
        .map(str::to_string)
        .collect()
}
