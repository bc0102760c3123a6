//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use readscore_core::quiz::QuizSet;

const PASSAGE: &str = "The sky is blue. Cats have four legs. Paris is the capital of France.";

fn readscore() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("readscore").unwrap()
}

fn write_passage(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("passage.txt");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn count_words_from_file() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);

    readscore()
        .arg("count")
        .arg("--passage")
        .arg(&passage)
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn count_words_from_stdin() {
    readscore()
        .args(["count", "--passage", "-"])
        .write_stdin("\"Hello,\" she said: 'fine; thanks.'")
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn count_rejects_blank_passage() {
    readscore()
        .args(["count", "--passage", "-"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("passage is empty"));
}

#[test]
fn quiz_text_output() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);

    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .args(["--seed", "3", "--show-answers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz: 3 question(s) from 3 sentence(s)"))
        .stdout(predicate::str::contains("Cats have four legs [True]"))
        .stdout(predicate::str::contains("The sky is not blue [False]"));
}

#[test]
fn quiz_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);

    let run = || {
        readscore()
            .current_dir(dir.path())
            .arg("quiz")
            .arg("--passage")
            .arg(&passage)
            .args(["--seed", "11", "--count", "2", "--format", "json"])
            .output()
            .unwrap()
            .stdout
    };
    let first = run();
    assert_eq!(first, run());

    let quiz: QuizSet = serde_json::from_slice(&first).unwrap();
    assert_eq!(quiz.len(), 2);
}

#[test]
fn quiz_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);

    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn quiz_then_score() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);
    let quiz_path = dir.path().join("quiz.json");

    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .args(["--seed", "5", "--format", "json", "--output"])
        .arg(&quiz_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Quiz saved to"));

    let quiz = QuizSet::load_json(&quiz_path).unwrap();
    let answers = quiz
        .answer_key()
        .iter()
        .map(|&a| if a { "t" } else { "f" })
        .collect::<Vec<_>>()
        .join(",");

    let out = readscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--quiz")
        .arg(&quiz_path)
        .args(["--answers", &answers, "--words", "14"])
        .args(["--start", "2026-01-01T10:00:00Z", "--end", "2026-01-01T10:01:00Z"])
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let card: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(card["wpm"], 14.0);
    assert_eq!(card["accuracy"], 1.0);
    assert_eq!(card["final_score"], 14.0);
}

#[test]
fn score_text_table_and_short_reading() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);
    let quiz_path = dir.path().join("quiz.json");

    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .args(["--seed", "5", "--count", "2", "--output"])
        .arg(&quiz_path)
        .assert()
        .success();

    readscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--quiz")
        .arg(&quiz_path)
        .args(["--answers", "t,t", "--words", "14"])
        .args(["--start", "2026-01-01T10:00:00Z", "--end", "2026-01-01T10:00:01Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WPM"))
        .stdout(predicate::str::contains("undefined"))
        .stderr(predicate::str::contains("Please retry"));
}

#[test]
fn score_rejects_mismatched_answers() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);
    let quiz_path = dir.path().join("quiz.json");

    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .args(["--seed", "5", "--count", "3", "--output"])
        .arg(&quiz_path)
        .assert()
        .success();

    readscore()
        .current_dir(dir.path())
        .arg("score")
        .arg("--quiz")
        .arg(&quiz_path)
        .args(["--answers", "t", "--words", "14"])
        .args(["--start", "2026-01-01T10:00:00Z", "--end", "2026-01-01T10:01:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 3 answers, got 1"));
}

#[test]
fn score_rejects_bad_timestamp() {
    readscore()
        .args(["score", "--quiz", "q.json", "--answers", "t", "--words", "1"])
        .args(["--start", "yesterday", "--end", "2026-01-01T10:01:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid RFC 3339 timestamp"));
}

#[test]
fn read_interactive_session() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);
    let config = dir.path().join("fast.toml");
    std::fs::write(&config, "min_reading_secs = 0.0\n").unwrap();

    // Spare blank lines are absorbed by retry and answer prompts.
    readscore()
        .current_dir(dir.path())
        .arg("read")
        .arg("--passage")
        .arg(&passage)
        .arg("--config")
        .arg(&config)
        .args(["--seed", "2"])
        .write_stdin("\n\n\n\nt\nf\nt\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total words: 14"))
        .stdout(predicate::str::contains("Paris is the capital of France."))
        .stdout(predicate::str::contains("Final score"));
}

#[test]
fn read_missing_config_fails() {
    let dir = TempDir::new().unwrap();
    let passage = write_passage(&dir, PASSAGE);

    readscore()
        .arg("read")
        .arg("--passage")
        .arg(&passage)
        .args(["--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    readscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created readscore.toml"));

    assert!(dir.path().join("readscore.toml").exists());

    readscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_config_is_loadable() {
    let dir = TempDir::new().unwrap();
    readscore()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    let passage = write_passage(&dir, PASSAGE);
    readscore()
        .current_dir(dir.path())
        .arg("quiz")
        .arg("--passage")
        .arg(&passage)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz: 3 question(s)"));
}

#[test]
fn help_lists_commands() {
    readscore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("count"))
        .stdout(predicate::str::contains("quiz"))
        .stdout(predicate::str::contains("score"))
        .stdout(predicate::str::contains("read"));
}
