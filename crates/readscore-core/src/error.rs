//! Error types for scoring and reading attempts.
//!
//! Only caller contract violations and retryable conditions surface here.
//! An empty passage and a sentence with no applicable mutation are resolved
//! inside the engine and never become errors.

use thiserror::Error;

/// Errors that can occur while scoring a reading attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The answer set does not line up with the quiz.
    #[error("expected {expected} answers, got {actual}")]
    MismatchedAnswerLength { expected: usize, actual: usize },

    /// The reading interval was too short to produce a meaningful rate.
    #[error("reading took {elapsed_ms}ms, at least {min_ms}ms is required; please retry")]
    InsufficientElapsedTime { elapsed_ms: i64, min_ms: i64 },
}

impl ScoringError {
    /// Returns `true` if the caller should ask the reader to try again
    /// instead of treating the error as a bug.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScoringError::InsufficientElapsedTime { .. })
    }
}

/// Errors raised by [`crate::session::Attempt`] when its lifecycle is driven
/// out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("reading has already started")]
    AlreadyStarted,

    #[error("reading has not started")]
    NotStarted,

    #[error("reading has not finished")]
    NotFinished,

    #[error("no quiz has been generated for this passage")]
    NoQuiz,

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl SessionError {
    /// Returns `true` for errors that leave the attempt usable for a retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            SessionError::Scoring(e) => e.is_retryable(),
            _ => false,
        }
    }
}
