//! Reading attempts.
//!
//! An [`Attempt`] owns one passage together with its timing and quiz. The
//! timing and quiz are created lazily and never regenerated while the same
//! passage is active; replacing the passage discards both.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;
use crate::quiz::{QuizGenerator, QuizSet};
use crate::scoring::{score_with_rate, word_count, ScoreCard, ScoringEngine};

/// Timing for one read-through of a passage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadingSession {
    pub total_words: usize,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Defined once both timestamps exist and the interval is long enough.
    pub wpm: Option<f64>,
}

impl ReadingSession {
    pub fn new(total_words: usize) -> Self {
        Self {
            total_words,
            ..Default::default()
        }
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.wpm.is_some()
    }
}

/// One reader's attempt at one passage.
#[derive(Debug, Clone)]
pub struct Attempt {
    id: Uuid,
    passage: String,
    reading: ReadingSession,
    quiz: Option<QuizSet>,
    scoring: ScoringEngine,
}

impl Attempt {
    pub fn new(passage: impl Into<String>) -> Self {
        let passage = passage.into();
        let reading = ReadingSession::new(word_count(&passage));
        let id = Uuid::new_v4();
        debug!(%id, total_words = reading.total_words, "attempt created");
        Self {
            id,
            passage,
            reading,
            quiz: None,
            scoring: ScoringEngine::default(),
        }
    }

    /// Use a scoring engine with a different minimum reading interval.
    pub fn with_scoring(mut self, scoring: ScoringEngine) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn passage(&self) -> &str {
        &self.passage
    }

    pub fn reading(&self) -> &ReadingSession {
        &self.reading
    }

    pub fn total_words(&self) -> usize {
        self.reading.total_words
    }

    pub fn wpm(&self) -> Option<f64> {
        self.reading.wpm
    }

    /// The quiz, if one has been generated.
    pub fn quiz_set(&self) -> Option<&QuizSet> {
        self.quiz.as_ref()
    }

    /// Record the moment reading began.
    pub fn start(&mut self, at: DateTime<Utc>) -> Result<(), SessionError> {
        if self.reading.is_started() {
            return Err(SessionError::AlreadyStarted);
        }
        self.reading.start_time = Some(at);
        info!(id = %self.id, "reading started");
        Ok(())
    }

    /// Record the moment reading ended and compute the rate.
    ///
    /// A reading that is too short leaves the attempt started, so the
    /// reader can keep going and finish again later. Once finished, further
    /// calls return the recorded rate.
    pub fn finish(&mut self, at: DateTime<Utc>) -> Result<f64, SessionError> {
        if let Some(wpm) = self.reading.wpm {
            return Ok(wpm);
        }
        let start = self.reading.start_time.ok_or(SessionError::NotStarted)?;

        let wpm = self
            .scoring
            .reading_rate(self.reading.total_words, start, at)?;
        self.reading.end_time = Some(at);
        self.reading.wpm = Some(wpm);
        info!(id = %self.id, wpm, "reading finished");
        Ok(wpm)
    }

    /// The quiz for this passage, generating it on first call.
    ///
    /// Later calls return the same quiz regardless of `count` or `rng`.
    pub fn quiz<R: Rng + ?Sized>(
        &mut self,
        generator: &QuizGenerator,
        count: usize,
        rng: &mut R,
    ) -> Result<&QuizSet, SessionError> {
        if !self.reading.is_finished() {
            return Err(SessionError::NotFinished);
        }
        let passage = &self.passage;
        Ok(self
            .quiz
            .get_or_insert_with(|| generator.generate(passage, count, rng)))
    }

    /// Score the submitted answers against this attempt's quiz.
    pub fn submit(&self, answers: &[bool]) -> Result<ScoreCard, SessionError> {
        let quiz = self.quiz.as_ref().ok_or(SessionError::NoQuiz)?;
        let card = score_with_rate(self.reading.wpm, quiz, answers)?;
        info!(
            id = %self.id,
            correct = card.correct,
            total = card.total,
            final_score = ?card.final_score,
            "answers submitted"
        );
        Ok(card)
    }

    /// Swap in a new passage, discarding the timing and quiz.
    pub fn replace_passage(&mut self, passage: impl Into<String>) {
        self.passage = passage.into();
        self.reading = ReadingSession::new(word_count(&self.passage));
        self.quiz = None;
        self.id = Uuid::new_v4();
        debug!(id = %self.id, "passage replaced, attempt reset");
    }
}
