//! Core data model types for readscore.
//!
//! These are the values that flow between the segmenter, the falsifier, the
//! quiz assembler and the scoring engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A trimmed piece of a passage, delimited by a terminal period.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    /// Build a sentence from raw text. Returns `None` when the trimmed text
    /// is empty.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Fallback sentence covering a whole passage. May be empty when the
    /// passage itself is blank.
    pub(crate) fn whole_passage(passage: &str) -> Self {
        Self(passage.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sentence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A mutation technique the falsifier can apply to a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Antonym,
    Numeric,
    Negation,
}

impl Strategy {
    /// All strategies in default priority order.
    pub const ALL: [Strategy; 3] = [Strategy::Antonym, Strategy::Numeric, Strategy::Negation];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Antonym => write!(f, "antonym"),
            Strategy::Numeric => write!(f, "numeric"),
            Strategy::Negation => write!(f, "negation"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "antonym" | "antonyms" => Ok(Strategy::Antonym),
            "numeric" | "number" => Ok(Strategy::Numeric),
            "negation" | "not" => Ok(Strategy::Negation),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// A single True/False comprehension statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The statement shown to the reader.
    pub statement: String,
    /// `false` exactly when `statement` differs from `source`.
    pub correct_answer: bool,
    /// The sentence the statement was derived from.
    pub source: String,
    /// The mutation that changed the sentence, if any.
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

impl Question {
    /// A question that repeats its source sentence verbatim.
    pub fn unchanged(sentence: &Sentence) -> Self {
        Self {
            statement: sentence.as_str().to_string(),
            correct_answer: true,
            source: sentence.as_str().to_string(),
            strategy: None,
        }
    }

    /// Build a question from a source sentence and a candidate statement.
    ///
    /// The label is derived from the text, not from intent: an unchanged
    /// statement is always True and carries no strategy.
    pub fn from_statement(
        sentence: &Sentence,
        statement: String,
        strategy: Option<Strategy>,
    ) -> Self {
        if statement == sentence.as_str() {
            return Self::unchanged(sentence);
        }
        Self {
            statement,
            correct_answer: false,
            source: sentence.as_str().to_string(),
            strategy,
        }
    }

    /// Whether a submitted answer matches this question's label.
    pub fn is_correct(&self, answer: bool) -> bool {
        self.correct_answer == answer
    }
}

/// Parse a reader's True/False answer.
pub fn parse_answer(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "0" => Ok(false),
        other => Err(format!("expected true or false, got '{other}'")),
    }
}

/// Parse a comma-separated list of answers, e.g. `"t,f,true,false"`.
pub fn parse_answers(s: &str) -> Result<Vec<bool>, String> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_answer)
        .collect()
}
