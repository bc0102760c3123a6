//! The `readscore quiz` command.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use readscore_core::config::load_config_from;
use readscore_core::segmenter::segment;

use super::{make_rng, read_passage};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    passage_path: PathBuf,
    count: Option<usize>,
    seed: Option<u64>,
    format: String,
    show_answers: bool,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let count = count.unwrap_or(config.question_count);
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let passage = read_passage(&passage_path)?;
    let seed = seed.or(config.seed);
    debug!(count, ?seed, policy = ?config.falsification, "generating quiz");
    let mut rng = make_rng(seed);
    let quiz = config.quiz_generator().generate(&passage, count, &mut rng);

    if let Some(path) = &output {
        quiz.save_json(path)?;
        eprintln!("Quiz saved to: {}", path.display());
    }

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&quiz)?);
        }
        "text" => {
            let sentences = segment(&passage).len();
            println!(
                "Quiz: {} question(s) from {} sentence(s)",
                quiz.len(),
                sentences
            );
            for (idx, q) in quiz.iter().enumerate() {
                if show_answers {
                    let label = if q.correct_answer { "True" } else { "False" };
                    println!("Q{}: {} [{label}]", idx + 1, q.statement);
                } else {
                    println!("Q{}: {}", idx + 1, q.statement);
                }
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
