//! Quiz assembly: sample sentences, falsify some, label all.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::falsifier::Falsifier;
use crate::model::{Question, Strategy};
use crate::segmenter::segment;

/// Number of questions generated when the caller does not ask otherwise.
pub const DEFAULT_QUESTION_COUNT: usize = 4;

/// Decides which sampled sentences the generator tries to falsify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum FalsificationPolicy {
    /// Attempt falsification only when the sentence has a copula, a digit
    /// or a table adjective.
    #[default]
    ContentCheck,
    /// Attempt falsification with the given probability, regardless of
    /// content.
    CoinFlip {
        #[serde(default = "default_probability")]
        probability: f64,
    },
}

fn default_probability() -> f64 {
    0.5
}

/// An ordered set of labeled statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSet {
    pub questions: Vec<Question>,
}

/// True/False balance of a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBalance {
    pub true_count: usize,
    pub false_count: usize,
    pub per_strategy: HashMap<Strategy, usize>,
}

impl QuizSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// The correct answers, in question order.
    pub fn answer_key(&self) -> Vec<bool> {
        self.questions.iter().map(|q| q.correct_answer).collect()
    }

    /// Count True and False questions and which strategies produced them.
    pub fn balance(&self) -> QuizBalance {
        let mut balance = QuizBalance::default();
        for q in &self.questions {
            if q.correct_answer {
                balance.true_count += 1;
            } else {
                balance.false_count += 1;
            }
            if let Some(strategy) = q.strategy {
                *balance.per_strategy.entry(strategy).or_default() += 1;
            }
        }
        balance
    }

    /// Save the quiz as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize quiz")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write quiz to {}", path.display()))?;
        Ok(())
    }

    /// Load a quiz from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read quiz from {}", path.display()))?;
        let quiz: QuizSet = serde_json::from_str(&content).context("failed to parse quiz JSON")?;
        Ok(quiz)
    }
}

impl<'a> IntoIterator for &'a QuizSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

/// Builds quizzes from passages.
#[derive(Debug, Clone, Default)]
pub struct QuizGenerator {
    falsifier: Falsifier,
    policy: FalsificationPolicy,
}

impl QuizGenerator {
    pub fn new(falsifier: Falsifier, policy: FalsificationPolicy) -> Self {
        Self { falsifier, policy }
    }

    pub fn falsifier(&self) -> &Falsifier {
        &self.falsifier
    }

    pub fn policy(&self) -> FalsificationPolicy {
        self.policy
    }

    /// Generate up to `count` questions from `passage`.
    ///
    /// Sentences are sampled uniformly without replacement and questions
    /// keep the sampling order. Each label is derived from whether the
    /// statement actually differs from its sentence.
    pub fn generate<R: Rng + ?Sized>(&self, passage: &str, count: usize, rng: &mut R) -> QuizSet {
        let sentences = segment(passage);
        let amount = count.min(sentences.len());

        let questions: Vec<Question> = index::sample(rng, sentences.len(), amount)
            .into_iter()
            .map(|i| {
                let sentence = &sentences[i];
                if self.should_falsify(sentence.as_str(), rng) {
                    self.falsifier.falsify(sentence, rng).into_question(sentence)
                } else {
                    Question::unchanged(sentence)
                }
            })
            .collect();

        let quiz = QuizSet::new(questions);
        let balance = quiz.balance();
        debug!(
            sentences = sentences.len(),
            requested = count,
            generated = quiz.len(),
            true_count = balance.true_count,
            false_count = balance.false_count,
            "quiz generated"
        );
        quiz
    }

    fn should_falsify<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> bool {
        match self.policy {
            FalsificationPolicy::ContentCheck => self.falsifier.is_falsifiable(sentence),
            FalsificationPolicy::CoinFlip { probability } => {
                rng.gen_bool(probability.clamp(0.0, 1.0))
            }
        }
    }
}

/// Generate a quiz with the default generator.
///
/// With `Some(seed)` the result is reproducible; with `None` the generator
/// is seeded from the operating system.
pub fn generate_quiz(passage: &str, count: usize, seed: Option<u64>) -> QuizSet {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    QuizGenerator::default().generate(passage, count, &mut rng)
}
