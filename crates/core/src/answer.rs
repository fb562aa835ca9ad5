//! Answer submission checks.
//!
//! These produce the user-facing rejections; the hard at-most-once invariant
//! is a unique `(question_id, user_id)` constraint at the storage layer, so
//! a read-then-write race can never create a duplicate ledger entry.

use crate::error::CoreError;

/// Validate a submission against the caller's current level.
///
/// The level check runs first: a mismatched level is rejected regardless of
/// the answer content.
pub fn validate_submission(
    question_level: i32,
    user_level: i32,
    answer_text: &str,
) -> Result<(), CoreError> {
    if question_level != user_level {
        return Err(CoreError::LevelMismatch {
            question_level,
            user_level,
        });
    }
    if answer_text.trim().is_empty() {
        return Err(CoreError::Validation("Answer must not be empty".into()));
    }
    Ok(())
}
