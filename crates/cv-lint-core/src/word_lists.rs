//! Curated word lists for CV analysis.
//!
//! Stop words filtered out of the token stream, action verbs used by the ATS
//! keyword-density check, and the placeholder markers that text extractors
//! leave behind for embedded graphics.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Function words dropped by the tokenizer.
///
/// Deliberately small: readability and keyword ranking both operate on what
/// survives this filter, so growing the list shifts every score.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "a", "an", "of", "to", "in", "on", "for", "with", "at", "by", "from", "or",
        "as", "is", "are", "was", "were", "be", "this", "that", "it", "your", "you", "i", "we",
        "our",
    ]
    .into_iter()
    .collect()
});

/// Returns `true` if `word` (already lower-cased) is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Achievement verbs that applicant tracking systems tend to reward.
pub const ACTION_VERBS: &[&str] = &[
    "managed",
    "developed",
    "created",
    "implemented",
    "designed",
    "led",
    "coordinated",
    "achieved",
    "improved",
    "increased",
    "reduced",
    "analyzed",
    "collaborated",
    "delivered",
    "executed",
];

/// Placeholders left by document extractors where an image or chart was.
pub const GRAPHICS_MARKERS: &[&str] = &["[image]", "[graphic]", "[chart]", "[logo]"];

/// Section headers an ATS expects to find somewhere in the text.
pub const STANDARD_HEADERS: &[&str] = &["experience", "education", "skills"];
