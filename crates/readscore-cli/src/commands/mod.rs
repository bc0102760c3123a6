//! Subcommand implementations and the helpers they share.

pub mod count;
pub mod init;
pub mod quiz;
pub mod read;
pub mod score;

use std::io::Read as _;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Read a passage from a file, or from stdin when the path is `-`.
pub fn read_passage(path: &Path) -> Result<String> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read passage from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read passage: {}", path.display()))?
    };
    anyhow::ensure!(!text.trim().is_empty(), "passage is empty");
    Ok(text)
}

/// A seeded generator when a seed is known, otherwise one seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Render an optional number with two decimals, or "undefined".
pub fn fmt_opt(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "undefined".to_string())
}

/// Render an optional ratio as a percentage, or "undefined".
pub fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or_else(|| "undefined".to_string())
}
