//! Text preparation: normalization, tokenization and sentence splitting.
//!
//! These are the leaf stages of the analysis pipeline. Each one is a total
//! function over `&str`; none of them can fail.

use regex::Regex;
use std::sync::LazyLock;

use crate::word_lists::is_stop_word;

/// Runs of carriage returns and tabs.
static CONTROL_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\t]+").expect("valid regex"));

/// Anything that is not an ASCII lowercase letter, digit or whitespace.
static NON_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));

/// A sentence terminator followed by at least one whitespace character.
static SENTENCE_BREAK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Clean raw extracted text.
///
/// Each run of `\r`/`\t` characters becomes a single space and the result is
/// trimmed. Casing is preserved; callers lower-case their own copy when they
/// need to.
pub fn normalize(text: &str) -> String {
    CONTROL_RUN_PATTERN.replace_all(text, " ").trim().to_string()
}

/// Split cleaned text into lower-case content tokens.
///
/// Characters outside `[a-z0-9]` (after lower-casing) are treated as
/// separators, so non-ASCII letters are dropped. Stop words are removed.
/// Order and duplicates are preserved.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let ascii = NON_WORD_PATTERN.replace_all(&lower, " ");

    ascii
        .split_whitespace()
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Split cleaned text into sentences.
///
/// A boundary is a `.`, `!` or `?` immediately followed by whitespace. The
/// terminator stays with the sentence it ends. Pieces are trimmed and empty
/// pieces discarded, so blank input yields no sentences at all.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK_PATTERN.find_iter(text) {
        // Terminators are single-byte ASCII.
        push_trimmed(&mut sentences, &text[start..=m.start()]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

/// Sentence count as consumed by scoring: never less than one.
pub fn sentence_count(text: &str) -> usize {
    split_sentences(text).len().max(1)
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}
