//! Statement falsification.
//!
//! A [`Falsifier`] tries to invert the truth of a sentence with one of three
//! text mutations (see [`Strategy`]). Each mutation either returns a changed
//! statement or reports that it did not apply; the caller never infers
//! success from intent.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::lexicon::AntonymTable;
use crate::model::{Question, Sentence, Strategy};

static COPULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(is|are|was|were|can|should|will)\b").expect("copula pattern is valid")
});

static CONTRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([Tt]here|[Ii]t|[Tt]hat)['’]s\b").expect("contraction pattern is valid")
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

/// Increments used by numeric perturbation unless configured otherwise.
pub const DEFAULT_INCREMENTS: [u64; 5] = [1, 2, 3, 5, 10];

/// How the falsifier picks among its strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySelection {
    /// Try strategies in order; the first that changes the sentence wins.
    #[default]
    Priority,
    /// Pick one strategy at random and apply only that one.
    Random,
    /// Shuffle the order, then fall back like `Priority`.
    Shuffled,
}

/// Outcome of a falsification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Falsification {
    Changed { statement: String, strategy: Strategy },
    Unchanged,
}

impl Falsification {
    pub fn is_changed(&self) -> bool {
        matches!(self, Falsification::Changed { .. })
    }

    /// Turn the outcome into a labeled question for `sentence`.
    pub fn into_question(self, sentence: &Sentence) -> Question {
        match self {
            Falsification::Changed {
                statement,
                strategy,
            } => Question::from_statement(sentence, statement, Some(strategy)),
            Falsification::Unchanged => Question::unchanged(sentence),
        }
    }
}

/// Applies truth-inverting mutations to sentences.
#[derive(Debug, Clone)]
pub struct Falsifier {
    table: AntonymTable,
    selection: StrategySelection,
    order: Vec<Strategy>,
    increments: Vec<u64>,
}

impl Default for Falsifier {
    fn default() -> Self {
        Self::new(AntonymTable::builtin())
    }
}

impl Falsifier {
    /// A priority-ordered falsifier over the given antonym table.
    pub fn new(table: AntonymTable) -> Self {
        Self {
            table,
            selection: StrategySelection::default(),
            order: Strategy::ALL.to_vec(),
            increments: DEFAULT_INCREMENTS.to_vec(),
        }
    }

    pub fn with_selection(mut self, selection: StrategySelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the strategies to use, in priority order.
    pub fn with_order(mut self, order: Vec<Strategy>) -> Self {
        self.order = order;
        self
    }

    /// Set the increments numeric perturbation draws from. Zero is ignored.
    pub fn with_increments(mut self, increments: Vec<u64>) -> Self {
        self.increments = increments.into_iter().filter(|&i| i > 0).collect();
        self
    }

    pub fn table(&self) -> &AntonymTable {
        &self.table
    }

    pub fn selection(&self) -> StrategySelection {
        self.selection
    }

    pub fn order(&self) -> &[Strategy] {
        &self.order
    }

    /// Whether the sentence has anything a mutation could plausibly target:
    /// a whole-word copula or modal, a digit, or a word from the table.
    pub fn is_falsifiable(&self, sentence: &str) -> bool {
        COPULA.is_match(sentence)
            || sentence.bytes().any(|b| b.is_ascii_digit())
            || WORD
                .find_iter(sentence)
                .any(|m| self.table.contains(strip_trailing_punctuation(m.as_str())))
    }

    /// Attempt to falsify `sentence` according to the selection policy.
    pub fn falsify<R: Rng + ?Sized>(&self, sentence: &Sentence, rng: &mut R) -> Falsification {
        let text = sentence.as_str();

        let candidates: Vec<Strategy> = match self.selection {
            StrategySelection::Priority => self.order.clone(),
            StrategySelection::Random => self.order.choose(rng).copied().into_iter().collect(),
            StrategySelection::Shuffled => {
                let mut order = self.order.clone();
                order.shuffle(rng);
                order
            }
        };

        for strategy in candidates {
            match self.apply(strategy, text, rng) {
                Some(statement) => {
                    trace!(%strategy, original = text, %statement, "sentence falsified");
                    return Falsification::Changed {
                        statement,
                        strategy,
                    };
                }
                None => trace!(%strategy, sentence = text, "strategy did not apply"),
            }
        }

        debug!(sentence = text, "no eligible mutation, keeping sentence true");
        Falsification::Unchanged
    }

    /// Apply a single strategy. Returns `None` if it leaves the text as is.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        strategy: Strategy,
        sentence: &str,
        rng: &mut R,
    ) -> Option<String> {
        let result = match strategy {
            Strategy::Antonym => substitute_antonym(sentence, &self.table),
            Strategy::Numeric => perturb_number(sentence, &self.increments, rng),
            Strategy::Negation => insert_negation(sentence),
        };
        result.filter(|s| s != sentence)
    }
}

fn strip_trailing_punctuation(word: &str) -> &str {
    word.trim_end_matches(|c: char| !c.is_alphanumeric())
}

/// Replace the first word found in `table` with its antonym.
///
/// Lookup ignores case and trailing punctuation. The punctuation is kept and
/// the original word's capitalization is carried over to the antonym.
pub fn substitute_antonym(sentence: &str, table: &AntonymTable) -> Option<String> {
    for m in WORD.find_iter(sentence) {
        let token = m.as_str();
        let word = strip_trailing_punctuation(token);
        if word.is_empty() {
            continue;
        }
        let Some(antonym) = table.get(word) else {
            continue;
        };
        if antonym.eq_ignore_ascii_case(word) {
            continue;
        }

        let replacement = format!("{}{}", match_case(word, antonym), &token[word.len()..]);
        return Some(format!(
            "{}{}{}",
            &sentence[..m.start()],
            replacement,
            &sentence[m.end()..]
        ));
    }
    None
}

fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let Some(first) = chars.next() else {
        return replacement.to_string();
    };
    let rest: Vec<char> = chars.collect();

    if first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| !c.is_lowercase()) {
        replacement.to_uppercase()
    } else if first.is_uppercase() {
        let mut out = String::with_capacity(replacement.len());
        let mut rc = replacement.chars();
        if let Some(f) = rc.next() {
            out.extend(f.to_uppercase());
            out.push_str(rc.as_str());
        }
        out
    } else {
        replacement.to_string()
    }
}

/// Increase one randomly chosen number in the sentence.
///
/// Every maximal digit run that fits in a `u64` is a candidate. The first
/// occurrence of the chosen run is replaced by its value plus one of
/// `increments`.
pub fn perturb_number<R: Rng + ?Sized>(
    sentence: &str,
    increments: &[u64],
    rng: &mut R,
) -> Option<String> {
    let runs: Vec<(&str, u64)> = DIGIT_RUN
        .find_iter(sentence)
        .filter_map(|m| m.as_str().parse::<u64>().ok().map(|v| (m.as_str(), v)))
        .collect();

    let &(digits, value) = runs.choose(rng)?;
    let increment = *increments.choose(rng)?;
    let bumped = value.checked_add(increment)?;

    let first = DIGIT_RUN.find_iter(sentence).find(|m| m.as_str() == digits)?;
    Some(format!(
        "{}{}{}",
        &sentence[..first.start()],
        bumped,
        &sentence[first.end()..]
    ))
}

/// Insert `not` after the first copula or modal, or after a `There's`,
/// `It's` or `That's` contraction.
pub fn insert_negation(sentence: &str) -> Option<String> {
    [&*COPULA, &*CONTRACTION]
        .into_iter()
        .filter_map(|pattern| pattern.find(sentence))
        .map(|m| format!("{} not{}", &sentence[..m.end()], &sentence[m.end()..]))
        .find(|s| s != sentence)
}
