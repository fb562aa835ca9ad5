//! Engine orchestration: the submit-answer / mark-attendance pipeline.

pub mod submission;

pub use submission::{submit_daily_answer, ProgressionSnapshot};
