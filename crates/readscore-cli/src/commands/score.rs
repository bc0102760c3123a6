//! The `readscore score` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};

use readscore_core::config::load_config_from;
use readscore_core::model::parse_answers;
use readscore_core::quiz::QuizSet;
use readscore_core::scoring::ScoreCard;

use super::{fmt_opt, fmt_pct};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    quiz_path: PathBuf,
    answers: String,
    words: usize,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let quiz = QuizSet::load_json(&quiz_path)?;
    let answers = parse_answers(&answers).map_err(|e| anyhow::anyhow!("{e}"))?;

    let engine = config.scoring_engine();
    let card = engine.score(words, start, end, &quiz, &answers)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&card)?),
        "text" => {
            let minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
            print_summary(words, minutes, &card);
            print_answer_key(&quiz, &answers);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    if card.wpm.is_none() {
        eprintln!(
            "Reading time is below {:.1}s, so the rate is undefined. Please retry.",
            config.min_reading_secs
        );
    }

    Ok(())
}

/// Print the score card as a table.
pub fn print_summary(words: usize, minutes: f64, card: &ScoreCard) {
    let mut table = Table::new();
    table.set_header(vec!["Words", "Minutes", "WPM", "Correct", "Accuracy", "Final score"]);
    table.add_row(vec![
        Cell::new(words),
        Cell::new(format!("{minutes:.2}")),
        Cell::new(fmt_opt(card.wpm)),
        Cell::new(format!("{}/{}", card.correct, card.total)),
        Cell::new(fmt_pct(card.accuracy)),
        Cell::new(fmt_opt(card.final_score)),
    ]);
    println!("{table}");
}

/// Print each statement with the reader's answer and the correct one.
pub fn print_answer_key(quiz: &QuizSet, answers: &[bool]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Statement", "Your answer", "Correct"]);
    for (idx, (q, &a)) in quiz.iter().zip(answers).enumerate() {
        table.add_row(vec![
            Cell::new(format!("Q{}", idx + 1)),
            Cell::new(&q.statement),
            Cell::new(label(a)),
            Cell::new(label(q.correct_answer)),
        ]);
    }
    println!("{table}");
}

fn label(answer: bool) -> &'static str {
    if answer {
        "True"
    } else {
        "False"
    }
}
