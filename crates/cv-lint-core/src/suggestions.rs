//! Improvement suggestions derived from the computed scores.
//!
//! Output order is fixed: missing-section messages (in section order), then
//! at most one readability message, then at most one length message.

use crate::readability::ReadabilityBand;
use crate::sections::Section;

/// Content word counts below this are considered too brief.
pub const BRIEF_BELOW_WORDS: usize = 150;

/// Content word counts above this are considered too long.
pub const LONG_ABOVE_WORDS: usize = 1200;

/// Shown for readability below 40.
pub const COMPLEX_MESSAGE: &str =
    "Your CV text is quite complex; consider shorter sentences and simpler wording.";

/// Shown for readability from 40 up to 60.
pub const FAIR_MESSAGE: &str =
    "Readability could be improved; aim for clearer, more concise sentences.";

/// Shown when the CV has fewer than [`BRIEF_BELOW_WORDS`] content words.
pub const BRIEF_MESSAGE: &str =
    "CV appears brief; consider elaborating on experience and achievements.";

/// Shown when the CV has more than [`LONG_ABOVE_WORDS`] content words.
pub const LONG_MESSAGE: &str =
    "CV may be too long; consider condensing to the most impactful information.";

/// Suggestion for a section that scored as missing.
pub fn missing_section_message(section: Section) -> String {
    format!("Consider adding or improving your {section} section.")
}

/// Build the ordered suggestion list.
///
/// `missing` is expected in section declaration order, as returned by
/// [`missing_sections`](crate::sections::missing_sections).
pub fn synthesize(missing: &[Section], readability: f64, word_count: usize) -> Vec<String> {
    let mut suggestions: Vec<String> = missing
        .iter()
        .map(|&section| missing_section_message(section))
        .collect();

    match ReadabilityBand::from_score(readability) {
        ReadabilityBand::Complex => suggestions.push(COMPLEX_MESSAGE.to_string()),
        ReadabilityBand::Fair => suggestions.push(FAIR_MESSAGE.to_string()),
        ReadabilityBand::Clear => {}
    }

    if word_count < BRIEF_BELOW_WORDS {
        suggestions.push(BRIEF_MESSAGE.to_string());
    } else if word_count > LONG_ABOVE_WORDS {
        suggestions.push(LONG_MESSAGE.to_string());
    }

    suggestions
}
