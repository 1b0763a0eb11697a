//! Comment text moderation

use thiserror::Error;

/// Substrings that may not appear anywhere in a comment
pub const BAD_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Message shown on the `text` field when a bad word is found
pub const WARNING: &str = "Не ругайтесь!";

/// Message shown on the `text` field when it is left empty
pub const FIELD_REQUIRED: &str = "This field is required.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModerationError {
    #[error("{}", WARNING)]
    ProfanityDetected,

    #[error("{}", FIELD_REQUIRED)]
    Empty,
}

/// Check comment text before it is stored.
///
/// Matching is a case-sensitive substring search, so a bad word inside a
/// longer word is rejected as well.
pub fn validate_comment_text(text: &str) -> Result<(), ModerationError> {
    if text.trim().is_empty() {
        return Err(ModerationError::Empty);
    }

    if let Some(word) = BAD_WORDS.iter().find(|word| text.contains(*word)) {
        tracing::debug!(bad_word = %word, "Comment rejected by moderation");
        return Err(ModerationError::ProfanityDetected);
    }

    Ok(())
}
