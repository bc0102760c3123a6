//! Sentence segmentation.

use tracing::debug;

use crate::model::Sentence;

/// Split a passage into sentences on the literal period character.
///
/// Pieces are trimmed and empty pieces dropped. If nothing survives, the
/// whole trimmed passage becomes the single sentence, so callers always get
/// at least one candidate.
pub fn segment(passage: &str) -> Vec<Sentence> {
    let sentences: Vec<Sentence> = passage.split('.').filter_map(Sentence::new).collect();

    if sentences.is_empty() {
        debug!("passage has no period-delimited sentences, using it whole");
        return vec![Sentence::whole_passage(passage)];
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(passage: &str) -> Vec<String> {
        segment(passage)
            .into_iter()
            .map(Sentence::into_string)
            .collect()
    }

    #[test]
    fn splits_on_periods_and_trims() {
        assert_eq!(
            texts("The sky is blue. Cats have four legs.  Paris is the capital of France."),
            vec![
                "The sky is blue",
                "Cats have four legs",
                "Paris is the capital of France"
            ]
        );
    }

    #[test]
    fn drops_empty_pieces() {
        assert_eq!(texts("One... Two. . Three"), vec!["One", "Two", "Three"]);
    }

    #[test]
    fn no_period_falls_back_to_whole_passage() {
        assert_eq!(texts("  no full stop here  "), vec!["no full stop here"]);
        assert_eq!(texts("Wait! Really?"), vec!["Wait! Really?"]);
    }

    #[test]
    fn only_periods_falls_back_to_passage() {
        assert_eq!(texts(" ... "), vec!["..."]);
    }

    #[test]
    fn blank_passage_still_yields_one_sentence() {
        let sentences = segment("   ");
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].as_str(), "");
    }

    #[test]
    fn newlines_are_whitespace() {
        assert_eq!(texts("First line.\nSecond line."), vec!["First line", "Second line"]);
    }
}
