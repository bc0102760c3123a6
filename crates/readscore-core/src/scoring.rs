//! Reading-rate and comprehension scoring.
//!
//! WPM is total passage words divided by elapsed minutes. Accuracy is the
//! share of answers matching the quiz labels, and the final score is their
//! product. Readings shorter than a minimum interval have no defined rate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoringError;
use crate::quiz::QuizSet;

/// Characters removed from a passage before counting words.
pub const STRIPPED_PUNCTUATION: [char; 6] = [',', ':', ';', '"', '\'', '.'];

/// Default minimum reading interval, in milliseconds.
pub const DEFAULT_MIN_ELAPSED_MS: i64 = 3_000;

/// Count the words of a passage.
///
/// Commas, colons, semicolons, quotes and periods are removed first, then
/// the text is split on whitespace.
pub fn word_count(passage: &str) -> usize {
    let cleaned: String = passage
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    cleaned.split_whitespace().count()
}

/// Result of scoring one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Words per minute; `None` when the reading was too short.
    pub wpm: Option<f64>,
    /// Share of correct answers; `None` for an empty quiz.
    pub accuracy: Option<f64>,
    /// `wpm * accuracy`; `None` when either is undefined.
    pub final_score: Option<f64>,
    /// Number of correct answers.
    pub correct: usize,
    /// Number of questions.
    pub total: usize,
}

/// Scores reading attempts with a configurable minimum reading interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringEngine {
    min_elapsed: Duration,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            min_elapsed: Duration::milliseconds(DEFAULT_MIN_ELAPSED_MS),
        }
    }
}

impl ScoringEngine {
    pub fn new(min_elapsed: Duration) -> Self {
        Self { min_elapsed }
    }

    /// Build an engine from a threshold in (possibly fractional) seconds.
    pub fn with_min_secs(secs: f64) -> Self {
        let ms = (secs.max(0.0) * 1000.0).round() as i64;
        Self::new(Duration::milliseconds(ms))
    }

    pub fn min_elapsed(&self) -> Duration {
        self.min_elapsed
    }

    /// Words per minute over the interval `start..end`.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::InsufficientElapsedTime` when the interval is
    /// shorter than the minimum (including negative intervals). The caller
    /// should ask the reader to retry.
    pub fn reading_rate(
        &self,
        total_words: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64, ScoringError> {
        let elapsed = end - start;
        if elapsed < self.min_elapsed || elapsed <= Duration::zero() {
            debug!(
                elapsed_ms = elapsed.num_milliseconds(),
                min_ms = self.min_elapsed.num_milliseconds(),
                "reading interval below threshold"
            );
            return Err(ScoringError::InsufficientElapsedTime {
                elapsed_ms: elapsed.num_milliseconds(),
                min_ms: self.min_elapsed.num_milliseconds(),
            });
        }

        let minutes = match elapsed.num_nanoseconds() {
            Some(ns) => ns as f64 / 60_000_000_000.0,
            None => elapsed.num_milliseconds() as f64 / 60_000.0,
        };
        Ok(total_words as f64 / minutes)
    }

    /// Score an attempt.
    ///
    /// An interval below the threshold does not fail the call: it yields a
    /// card without `wpm` or `final_score`.
    ///
    /// # Errors
    ///
    /// Returns `ScoringError::MismatchedAnswerLength` if `answers` and
    /// `quiz` differ in length.
    pub fn score(
        &self,
        total_words: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        quiz: &QuizSet,
        answers: &[bool],
    ) -> Result<ScoreCard, ScoringError> {
        let wpm = self.reading_rate(total_words, start, end).ok();
        score_with_rate(wpm, quiz, answers)
    }
}

/// Combine an already-measured rate with a quiz and its answers.
///
/// # Errors
///
/// Returns `ScoringError::MismatchedAnswerLength` if `answers` and `quiz`
/// differ in length.
pub fn score_with_rate(
    wpm: Option<f64>,
    quiz: &QuizSet,
    answers: &[bool],
) -> Result<ScoreCard, ScoringError> {
    let (correct, accuracy) = accuracy(quiz, answers)?;
    let final_score = match (wpm, accuracy) {
        (Some(w), Some(a)) => Some(w * a),
        _ => None,
    };

    Ok(ScoreCard {
        wpm,
        accuracy,
        final_score,
        correct,
        total: quiz.len(),
    })
}

/// Count matching answers and the resulting accuracy.
///
/// Accuracy is `None` for an empty quiz.
///
/// # Errors
///
/// Returns `ScoringError::MismatchedAnswerLength` if the lengths differ.
pub fn accuracy(quiz: &QuizSet, answers: &[bool]) -> Result<(usize, Option<f64>), ScoringError> {
    if answers.len() != quiz.len() {
        return Err(ScoringError::MismatchedAnswerLength {
            expected: quiz.len(),
            actual: answers.len(),
        });
    }

    let correct = quiz
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.is_correct(**a))
        .count();

    let accuracy = if quiz.is_empty() {
        None
    } else {
        Some(correct as f64 / quiz.len() as f64)
    };
    Ok((correct, accuracy))
}

/// Score an attempt with the default minimum reading interval.
///
/// # Errors
///
/// Returns `ScoringError::MismatchedAnswerLength` if `answers` and `quiz`
/// differ in length.
pub fn score(
    total_words: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    quiz: &QuizSet,
    answers: &[bool],
) -> Result<ScoreCard, ScoringError> {
    ScoringEngine::default().score(total_words, start, end, quiz, answers)
}
