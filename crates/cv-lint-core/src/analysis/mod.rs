//! Full CV analysis.
//!
//! [`analyze`] runs the whole heuristic pipeline over extracted CV text:
//!
//! ```text
//! raw ─ normalize ─┬─ split_sentences ─────────────┐
//!                  ├─ tokenize ─┬─ syllables ─ readability ─┤
//!                  │            └─ top_keywords ──────────┤
//!                  └─ lowercase ─ section_scores ─────────┴─ synthesize
//! ```
//!
//! Each stage is a pure function in its own module. Callers can also
//! invoke stages individually.

pub mod reports;

pub use reports::{AnalysisReport, SubScores};

use crate::error::{AnalysisError, AnalysisResult};
use crate::keywords::{self, DEFAULT_KEYWORD_LIMIT};
use crate::readability;
use crate::sections;
use crate::suggestions;
use crate::text;

/// Analyze extracted CV text.
///
/// Total over every input, including the empty string: blank text is scored
/// as a CV with no content (all sections missing, brief-length warning).
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn analyze(input: &str) -> AnalysisReport {
    let clean = text::normalize(input);
    let sentence_count = text::sentence_count(&clean);
    let tokens = text::tokenize(&clean);
    let word_count = tokens.len();

    let readability = readability::score(&tokens, sentence_count);
    let top_keywords = keywords::top_keywords(&tokens, DEFAULT_KEYWORD_LIMIT);

    let section_scores = sections::section_scores(&clean.to_lowercase());
    let missing = sections::missing_sections(&section_scores);
    let suggestions = suggestions::synthesize(&missing, readability, word_count);

    tracing::debug!(
        word_count,
        sentence_count,
        readability,
        missing = ?missing,
        "CV analyzed"
    );

    AnalysisReport {
        word_count,
        sentence_count,
        readability,
        top_keywords,
        sub_scores: SubScores::new(&section_scores, readability),
        suggestions,
    }
}

/// Analyze CV text, optionally refusing blank input.
///
/// With `reject_empty` set, input that is empty after normalization returns
/// [`AnalysisError::EmptyInput`] instead of a zero-content report. Use this
/// where an empty string more likely means extraction failed than that the
/// CV is genuinely empty.
pub fn analyze_checked(input: &str, reject_empty: bool) -> AnalysisResult<AnalysisReport> {
    if reject_empty && text::normalize(input).is_empty() {
        return Err(AnalysisError::EmptyInput);
    }
    Ok(analyze(input))
}
