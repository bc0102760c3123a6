//! The `readscore read` command: an interactive timed reading in the terminal.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use readscore_core::config::load_config_from;
use readscore_core::model::parse_answer;
use readscore_core::quiz::{QuizGenerator, QuizSet};
use readscore_core::scoring::ScoreCard;
use readscore_core::session::Attempt;

use super::score::{print_answer_key, print_summary};
use super::{make_rng, read_passage};

pub fn execute(
    passage_path: PathBuf,
    count: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let count = count.unwrap_or(config.question_count);
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let passage = read_passage(&passage_path)?;
    let attempt = Attempt::new(passage).with_scoring(config.scoring_engine());
    debug!(id = %attempt.id(), words = attempt.total_words(), "interactive attempt");
    let generator = config.quiz_generator();
    let mut rng = make_rng(seed.or(config.seed));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = run(
        stdin.lock(),
        stdout.lock(),
        attempt,
        &generator,
        count,
        &mut rng,
        Utc::now,
    )?;

    print_summary(outcome.total_words, outcome.minutes, &outcome.card);
    print_answer_key(&outcome.quiz, &outcome.answers);
    Ok(())
}

/// What a finished interactive attempt produced.
pub struct Outcome {
    pub total_words: usize,
    pub minutes: f64,
    pub card: ScoreCard,
    pub quiz: QuizSet,
    pub answers: Vec<bool>,
}

/// Drive one attempt over line-based input.
///
/// The reader presses Enter to start and again to finish; a reading that
/// is too short asks them to continue and press Enter again. Each statement
/// is then answered with t/f.
pub fn run<I, O, R, C>(
    mut input: I,
    mut out: O,
    mut attempt: Attempt,
    generator: &QuizGenerator,
    count: usize,
    rng: &mut R,
    mut now: C,
) -> Result<Outcome>
where
    I: BufRead,
    O: Write,
    R: Rng + ?Sized,
    C: FnMut() -> DateTime<Utc>,
{
    writeln!(out, "Total words: {}", attempt.total_words())?;
    writeln!(out, "Press Enter to start reading.")?;
    out.flush()?;
    read_line(&mut input).context("input ended before reading started")?;

    writeln!(out, "\n{}\n", attempt.passage().trim())?;
    attempt.start(now())?;
    writeln!(out, "Press Enter when you have finished reading.")?;
    out.flush()?;

    let wpm = loop {
        read_line(&mut input).context("input ended before reading finished")?;
        match attempt.finish(now()) {
            Ok(wpm) => break wpm,
            Err(e) if e.is_retryable() => {
                writeln!(out, "{e}")?;
                writeln!(out, "Keep reading, then press Enter again.")?;
                out.flush()?;
            }
            Err(e) => return Err(e.into()),
        }
    };

    let minutes = match (attempt.reading().start_time, attempt.reading().end_time) {
        (Some(start), Some(end)) => (end - start).num_milliseconds() as f64 / 60_000.0,
        _ => 0.0,
    };
    writeln!(out, "Reading time: {minutes:.2} min, WPM: {wpm:.2}")?;
    writeln!(out, "\nAnswer each statement with t (True) or f (False).")?;

    let quiz = attempt.quiz(generator, count, rng)?.clone();
    let mut answers = Vec::with_capacity(quiz.len());
    for (idx, q) in quiz.iter().enumerate() {
        writeln!(out, "Q{}: {}", idx + 1, q.statement)?;
        let answer = loop {
            write!(out, "True or False? [t/f]: ")?;
            out.flush()?;
            let line = read_line(&mut input).context("input ended before all answers were given")?;
            match parse_answer(&line) {
                Ok(a) => break a,
                Err(e) => writeln!(out, "{e}")?,
            }
        };
        answers.push(answer);
    }

    let card = attempt.submit(&answers)?;
    Ok(Outcome {
        total_words: attempt.total_words(),
        minutes,
        card,
        quiz,
        answers,
    })
}

fn read_line<I: BufRead>(input: &mut I) -> Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    anyhow::ensure!(n > 0, "end of input");
    Ok(line)
}
