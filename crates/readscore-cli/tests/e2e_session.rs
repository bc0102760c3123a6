//! End-to-end tests of the reading pipeline through the core API.
//!
//! These drive passage segmentation, quiz generation, timing and scoring
//! together, the way the `read` command does.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use readscore_core::config::parse_config_str;
use readscore_core::falsifier::{Falsifier, StrategySelection};
use readscore_core::quiz::{FalsificationPolicy, QuizGenerator};
use readscore_core::session::Attempt;
use readscore_core::{generate_quiz, segment, word_count, SessionError};

const ARTICLE: &str = "The river is 120 miles long. Its water was cold in March. \
    There's a bridge near the old mill. Farmers grow wheat on both banks. \
    The town has 4 schools. It's a quiet place in winter. \
    Tourists were common in 1990. Fishing is popular with locals.";

fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

#[test]
fn full_attempt_with_perfect_answers() {
    let mut attempt = Attempt::new(ARTICLE);
    let words = word_count(ARTICLE);
    assert_eq!(attempt.total_words(), words);

    attempt.start(t0()).unwrap();
    let wpm = attempt.finish(t0() + Duration::seconds(30)).unwrap();
    assert!((wpm - words as f64 * 2.0).abs() < 1e-9);

    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let key = attempt
        .quiz(&QuizGenerator::default(), 4, &mut rng)
        .unwrap()
        .answer_key();
    assert_eq!(key.len(), 4);

    let card = attempt.submit(&key).unwrap();
    assert_eq!(card.accuracy, Some(1.0));
    assert_eq!(card.final_score, Some(wpm));
}

#[test]
fn inverted_answers_score_zero() {
    let mut attempt = Attempt::new(ARTICLE);
    attempt.start(t0()).unwrap();
    attempt.finish(t0() + Duration::minutes(1)).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let wrong: Vec<bool> = attempt
        .quiz(&QuizGenerator::default(), 4, &mut rng)
        .unwrap()
        .answer_key()
        .into_iter()
        .map(|a| !a)
        .collect();

    let card = attempt.submit(&wrong).unwrap();
    assert_eq!(card.correct, 0);
    assert_eq!(card.final_score, Some(0.0));
}

#[test]
fn short_reading_can_be_resumed() {
    let mut attempt = Attempt::new(ARTICLE);
    attempt.start(t0()).unwrap();

    let err = attempt.finish(t0() + Duration::seconds(2)).unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(
        attempt.quiz(&QuizGenerator::default(), 4, &mut ChaCha8Rng::seed_from_u64(0)),
        Err(SessionError::NotFinished)
    ));

    let wpm = attempt.finish(t0() + Duration::minutes(2)).unwrap();
    assert!((wpm - word_count(ARTICLE) as f64 / 2.0).abs() < 1e-9);
}

#[test]
fn every_sentence_becomes_a_question_when_count_is_large() {
    let quiz = generate_quiz(ARTICLE, 50, Some(5));
    assert_eq!(quiz.len(), segment(ARTICLE).len());

    // Each question traces back to one distinct sentence.
    let mut sources: Vec<&str> = quiz.iter().map(|q| q.source.as_str()).collect();
    sources.sort_unstable();
    sources.dedup();
    assert_eq!(sources.len(), quiz.len());
}

#[test]
fn labels_follow_the_text() {
    for seed in 0..20 {
        let quiz = generate_quiz(ARTICLE, 4, Some(seed));
        for q in &quiz {
            assert_eq!(q.correct_answer, q.statement == q.source.as_str());
            assert_eq!(q.strategy.is_some(), !q.correct_answer);
        }
    }
}

#[test]
fn seeded_quizzes_are_reproducible() {
    assert_eq!(
        generate_quiz(ARTICLE, 4, Some(77)),
        generate_quiz(ARTICLE, 4, Some(77))
    );
}

#[test]
fn coin_flip_never_falsifies_at_zero() {
    let generator = QuizGenerator::new(
        Falsifier::default(),
        FalsificationPolicy::CoinFlip { probability: 0.0 },
    );
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let quiz = generator.generate(ARTICLE, 8, &mut rng);
    assert!(quiz.iter().all(|q| q.correct_answer));
}

#[test]
fn random_selection_still_produces_valid_labels() {
    let generator = QuizGenerator::new(
        Falsifier::default().with_selection(StrategySelection::Random),
        FalsificationPolicy::ContentCheck,
    );
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let quiz = generator.generate(ARTICLE, 8, &mut rng);
        let balance = quiz.balance();
        assert_eq!(balance.true_count + balance.false_count, quiz.len());
        assert_eq!(balance.per_strategy.values().sum::<usize>(), balance.false_count);
    }
}

#[test]
fn config_drives_the_attempt() {
    let config = parse_config_str(
        "question_count = 2\nmin_reading_secs = 10.0\nseed = 4\n",
        Path::new("readscore.toml"),
    )
    .unwrap();

    let mut attempt = Attempt::new(ARTICLE).with_scoring(config.scoring_engine());
    attempt.start(t0()).unwrap();
    assert!(attempt.finish(t0() + Duration::seconds(5)).is_err());
    attempt.finish(t0() + Duration::seconds(15)).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap());
    let quiz = attempt
        .quiz(&config.quiz_generator(), config.question_count, &mut rng)
        .unwrap()
        .clone();
    assert_eq!(quiz.len(), 2);
}

#[test]
fn new_passage_resets_the_attempt() {
    let mut attempt = Attempt::new(ARTICLE);
    let first_id = attempt.id();
    attempt.start(t0()).unwrap();
    attempt.finish(t0() + Duration::minutes(1)).unwrap();

    attempt.replace_passage("A short text. Nothing else.");
    assert_ne!(attempt.id(), first_id);
    assert!(!attempt.reading().is_started());
    assert!(attempt.quiz_set().is_none());
    assert_eq!(attempt.total_words(), 5);
    assert!(matches!(attempt.submit(&[]), Err(SessionError::NoQuiz)));
}
