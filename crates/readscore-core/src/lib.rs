//! readscore-core: Statement falsification, quiz generation and reading-rate scoring.
//!
//! A passage is split into sentences, a sample of them is turned into
//! True/False statements (some mutated to be false), and the reader's speed
//! and answers are combined into a single score.

pub mod config;
pub mod error;
pub mod falsifier;
pub mod lexicon;
pub mod model;
pub mod quiz;
pub mod scoring;
pub mod segmenter;
pub mod session;

pub use error::{ScoringError, SessionError};
pub use model::{Question, Sentence, Strategy};
pub use quiz::{generate_quiz, QuizSet};
pub use scoring::{score, word_count, ScoreCard};
pub use segmenter::segment;
pub use session::Attempt;
