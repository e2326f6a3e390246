//! Readability scoring using a Flesch Reading Ease approximation.
//!
//! Formula: `206.835 - 1.015 * (words/sentences) - 84.6 * (syllables/words)`
//!
//! Higher = easier to read. Unlike textbook Flesch, `words` counts content
//! tokens only (stop words removed), and syllables come from the vowel-group
//! proxy in [`syllables`](crate::syllables). The result is not clamped to
//! 0–100; very short or very dense inputs land outside that range.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables;
use crate::text;

/// Scores below this are flagged as hard to read.
pub const COMPLEX_BELOW: f64 = 40.0;

/// Scores below this (and at least [`COMPLEX_BELOW`]) could be clearer.
pub const FAIR_BELOW: f64 = 60.0;

/// Coarse readability bucket used by the suggestion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReadabilityBand {
    /// Below 40: long sentences or heavy wording.
    Complex,
    /// 40 up to 60: readable but could be tighter.
    Fair,
    /// 60 and above.
    Clear,
}

impl ReadabilityBand {
    /// Classify a readability score.
    pub fn from_score(score: f64) -> Self {
        if score < COMPLEX_BELOW {
            Self::Complex
        } else if score < FAIR_BELOW {
            Self::Fair
        } else {
            Self::Clear
        }
    }
}

/// Result of readability analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Reading-ease score, rounded to 2 decimals.
    pub score: f64,
    /// Band the score falls into.
    pub band: ReadabilityBand,
    /// Sentence count used by the formula (at least 1).
    pub sentences: usize,
    /// Content word count (stop words excluded).
    pub words: usize,
    /// Total estimated syllables over the content words.
    pub syllables: usize,
    /// Minimum acceptable score (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
    /// Whether the score falls below the minimum.
    pub below_min: bool,
}

/// Compute the reading-ease score for a token sequence.
///
/// `sentence_count` is floored at 1, as is the word count in the syllable
/// term, so empty input scores `206.84` rather than dividing by zero.
pub fn score<S: AsRef<str>>(tokens: &[S], sentence_count: usize) -> f64 {
    let words = tokens.len();
    let syllables = syllables::total_syllables(tokens);
    formula(words, sentence_count, syllables)
}

/// Score readability of raw CV text.
///
/// # Arguments
///
/// * `text`: The raw text to analyze (normalized internally).
/// * `min_score`: Optional minimum acceptable score.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn check_readability(text: &str, min_score: Option<f64>) -> ReadabilityReport {
    let clean = text::normalize(text);
    let sentences = text::sentence_count(&clean);
    let tokens = text::tokenize(&clean);
    let syllables = syllables::total_syllables(&tokens);
    let score = formula(tokens.len(), sentences, syllables);

    ReadabilityReport {
        score,
        band: ReadabilityBand::from_score(score),
        sentences,
        words: tokens.len(),
        syllables,
        min_score,
        below_min: min_score.is_some_and(|min| score < min),
    }
}

fn formula(words: usize, sentences: usize, syllables: usize) -> f64 {
    let words_per_sentence = words as f64 / sentences.max(1) as f64;
    let syllables_per_word = syllables as f64 / words.max(1) as f64;
    round2(84.6f64.mul_add(-syllables_per_word, 1.015f64.mul_add(-words_per_sentence, 206.835)))
}

/// Round half away from zero to 2 decimal places.
///
/// The scaled value is first cut to 15 significant digits so that decimal
/// halves stored just below `.5` (`1.005` is `1.00499999...`) still round up.
pub(crate) fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    let pre: f64 = format!("{scaled:.14e}").parse().unwrap_or(scaled);
    pre.round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.011
    }

    #[test]
    fn empty_tokens_score_high() {
        let s = score::<String>(&[], 1);
        assert!(approx(s, 206.84), "got {s}");
    }

    #[test]
    fn zero_sentences_treated_as_one() {
        let tokens = vec!["rust"];
        assert_eq!(score(&tokens, 0), score(&tokens, 1));
    }

    #[test]
    fn simple_words_score_clear() {
        // 4 words, 1 sentence, 4 syllables: 206.835 - 4.06 - 84.6
        let tokens = vec!["led", "team", "built", "apps"];
        let s = score(&tokens, 1);
        assert!(approx(s, 118.18), "got {s}");
        assert_eq!(ReadabilityBand::from_score(s), ReadabilityBand::Clear);
    }

    #[test]
    fn polysyllabic_words_score_low() {
        let tokens = vec!["interdepartmental", "communication", "documentation"];
        let s = score(&tokens, 1);
        assert!(s < COMPLEX_BELOW, "got {s}");
    }

    #[test]
    fn result_is_rounded() {
        let tokens = vec!["engineer", "rust", "python"];
        let s = score(&tokens, 2);
        assert_eq!(round2(s), s);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(ReadabilityBand::from_score(39.99), ReadabilityBand::Complex);
        assert_eq!(ReadabilityBand::from_score(40.0), ReadabilityBand::Fair);
        assert_eq!(ReadabilityBand::from_score(59.99), ReadabilityBand::Fair);
        assert_eq!(ReadabilityBand::from_score(60.0), ReadabilityBand::Clear);
        assert_eq!(ReadabilityBand::from_score(-50.0), ReadabilityBand::Complex);
    }

    #[test]
    fn report_counts() {
        let report = check_readability("Led the team. Built the apps.", None);
        assert_eq!(report.sentences, 2);
        assert_eq!(report.words, 4);
        assert_eq!(report.syllables, 4);
        assert!(!report.below_min);
        assert!(report.min_score.is_none());
    }

    #[test]
    fn report_below_min() {
        let report = check_readability(
            "Interdepartmental communication documentation standardization.",
            Some(60.0),
        );
        assert!(report.below_min);
        assert_eq!(report.band, ReadabilityBand::Complex);
    }

    #[test]
    fn report_on_empty_text() {
        let report = check_readability("", Some(10.0));
        assert_eq!(report.words, 0);
        assert_eq!(report.sentences, 1);
        assert!(!report.below_min);
    }

    #[test]
    fn round2_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-2.5), -2.5);
        assert_eq!(round2(0.333_333), 0.33);
    }

    #[test]
    fn round2_decimal_halves_round_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(-1.005), -1.01);
        assert_eq!(round2(206.835), 206.84);
        assert_eq!(round2(2.675), 2.68);
    }
}
