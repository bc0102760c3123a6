//! Configuration loading and engine construction.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::falsifier::{Falsifier, StrategySelection, DEFAULT_INCREMENTS};
use crate::lexicon::AntonymTable;
use crate::model::Strategy;
use crate::quiz::{FalsificationPolicy, QuizGenerator, DEFAULT_QUESTION_COUNT};
use crate::scoring::{ScoringEngine, DEFAULT_MIN_ELAPSED_MS};

/// Strategy settings for the falsifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// How strategies are picked.
    #[serde(default)]
    pub selection: StrategySelection,
    /// Strategies to use, in priority order.
    #[serde(default = "default_order")]
    pub order: Vec<Strategy>,
    /// Amounts numeric perturbation may add to a number.
    #[serde(default = "default_increments")]
    pub numeric_increments: Vec<u64>,
    /// Whether to start from the built-in antonym table.
    #[serde(default = "default_true")]
    pub builtin_antonyms: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            selection: StrategySelection::default(),
            order: default_order(),
            numeric_increments: default_increments(),
            builtin_antonyms: true,
        }
    }
}

fn default_order() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}
fn default_increments() -> Vec<u64> {
    DEFAULT_INCREMENTS.to_vec()
}
fn default_true() -> bool {
    true
}

/// Top-level readscore configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadscoreConfig {
    /// Questions per quiz.
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    /// Shortest reading, in seconds, that yields a rate.
    #[serde(default = "default_min_reading_secs")]
    pub min_reading_secs: f64,
    /// Fixed seed for reproducible quizzes.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Which sentences the generator tries to falsify.
    #[serde(default)]
    pub falsification: FalsificationPolicy,
    #[serde(default)]
    pub strategies: StrategyConfig,
    /// Extra antonyms; these overwrite built-in entries with the same key.
    #[serde(default)]
    pub antonyms: BTreeMap<String, String>,
}

fn default_question_count() -> usize {
    DEFAULT_QUESTION_COUNT
}
fn default_min_reading_secs() -> f64 {
    DEFAULT_MIN_ELAPSED_MS as f64 / 1000.0
}

impl Default for ReadscoreConfig {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            min_reading_secs: default_min_reading_secs(),
            seed: None,
            falsification: FalsificationPolicy::default(),
            strategies: StrategyConfig::default(),
            antonyms: BTreeMap::new(),
        }
    }
}

impl ReadscoreConfig {
    /// Check the values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.question_count >= 1, "question_count must be at least 1");
        anyhow::ensure!(
            self.min_reading_secs.is_finite() && self.min_reading_secs >= 0.0,
            "min_reading_secs must be a non-negative number"
        );
        if let FalsificationPolicy::CoinFlip { probability } = self.falsification {
            anyhow::ensure!(
                (0.0..=1.0).contains(&probability),
                "falsification probability must be between 0.0 and 1.0"
            );
        }
        anyhow::ensure!(
            !self.strategies.order.is_empty(),
            "strategies.order must list at least one strategy"
        );
        anyhow::ensure!(
            !self.strategies.numeric_increments.is_empty()
                && self.strategies.numeric_increments.iter().all(|&i| i > 0),
            "strategies.numeric_increments must be non-empty and positive"
        );
        Ok(())
    }

    /// The antonym table: built-ins (if enabled) overlaid with `antonyms`.
    pub fn antonym_table(&self) -> AntonymTable {
        let mut table = if self.strategies.builtin_antonyms {
            AntonymTable::builtin()
        } else {
            AntonymTable::new()
        };
        table.extend(&AntonymTable::from_entries(&self.antonyms));
        table
    }

    pub fn falsifier(&self) -> Falsifier {
        Falsifier::new(self.antonym_table())
            .with_selection(self.strategies.selection)
            .with_order(self.strategies.order.clone())
            .with_increments(self.strategies.numeric_increments.clone())
    }

    pub fn quiz_generator(&self) -> QuizGenerator {
        QuizGenerator::new(self.falsifier(), self.falsification)
    }

    pub fn scoring_engine(&self) -> ScoringEngine {
        ScoringEngine::with_min_secs(self.min_reading_secs)
    }
}

/// Parse and validate a TOML config string.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<ReadscoreConfig> {
    let config: ReadscoreConfig = toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config: {}", source_path.display()))?;
    Ok(config)
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `readscore.toml` in the current directory
/// 2. `~/.config/readscore/config.toml`
///
/// Environment variable overrides: `READSCORE_SEED`, `READSCORE_QUESTION_COUNT`.
pub fn load_config() -> Result<ReadscoreConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ReadscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("readscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content, &path)?
        }
        None => ReadscoreConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut ReadscoreConfig) -> Result<()> {
    if let Ok(seed) = std::env::var("READSCORE_SEED") {
        config.seed = Some(
            seed.trim()
                .parse()
                .with_context(|| format!("invalid READSCORE_SEED: '{seed}'"))?,
        );
    }
    if let Ok(count) = std::env::var("READSCORE_QUESTION_COUNT") {
        config.question_count = count
            .trim()
            .parse()
            .with_context(|| format!("invalid READSCORE_QUESTION_COUNT: '{count}'"))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("readscore"))
}
