//! Applicant tracking system (ATS) compatibility heuristics.
//!
//! Starts from 100 and deducts points for layout and content patterns that
//! ATS parsers commonly mishandle. Runs on raw text, before normalization,
//! because tabs and runs of spaces are among the signals.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word_lists::{ACTION_VERBS, GRAPHICS_MARKERS, STANDARD_HEADERS};

/// Column-aligned layout: four or more spaces, or two or more tabs.
static TABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {4,}|\t{2,}").expect("valid regex"));

/// Date range styles. A CV mixing more than one is flagged.
static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\d{4}\s*-\s*\d{4}").expect("valid regex"),
        Regex::new(r"\d{2}/\d{4}\s*-\s*\d{2}/\d{4}").expect("valid regex"),
        Regex::new(r"[A-Za-z]+\s+\d{4}").expect("valid regex"),
    ]
});

const TABLE_PENALTY: u32 = 15;
const GRAPHICS_PENALTY: u32 = 10;
const HEADERS_PENALTY: u32 = 15;
const DENSITY_PENALTY: u32 = 10;
const DATE_FORMAT_PENALTY: u32 = 10;
const SHORT_PENALTY: u32 = 15;
const LONG_PENALTY: u32 = 10;

/// Action-verb density below this is flagged.
const MIN_KEYWORD_DENSITY: f64 = 50.0;

/// Whitespace-delimited word counts outside this range are flagged.
const MIN_WORDS: usize = 200;
const MAX_WORDS: usize = 2000;

/// Result of ATS compatibility checking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AtsReport {
    /// Compatibility score, 0–100.
    pub score: u32,
    /// Problems found, in check order.
    pub issues: Vec<String>,
    /// One recommendation per issue, same order.
    pub recommendations: Vec<String>,
    /// Share of the action-verb list present in the text, 0–100.
    pub keyword_density: f64,
    /// Whitespace-delimited word count (stop words included).
    pub word_count: usize,
    /// Minimum acceptable score (if provided).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u32>,
    /// Whether the score falls below the minimum.
    pub below_min: bool,
}

/// Check raw CV text for ATS compatibility.
///
/// # Arguments
///
/// * `text` — The raw extracted text, not normalized.
/// * `min_score` — Optional minimum acceptable score.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn check_ats(text: &str, min_score: Option<u32>) -> AtsReport {
    let lower = text.to_lowercase();
    let mut deductions = Deductions::default();

    if TABLE_PATTERN.is_match(text) {
        deductions.add(
            TABLE_PENALTY,
            "Contains tables which may not be parsed correctly by ATS",
            "Convert tables to simple text format",
        );
    }

    if GRAPHICS_MARKERS.iter().any(|m| lower.contains(m)) {
        deductions.add(
            GRAPHICS_PENALTY,
            "May contain graphics or images",
            "Remove graphics and images; use text only",
        );
    }

    if !STANDARD_HEADERS.iter().all(|h| lower.contains(h)) {
        deductions.add(
            HEADERS_PENALTY,
            "Missing standard section headers",
            "Use clear section headers: Experience, Education, Skills",
        );
    }

    let keyword_density = keyword_density(&lower);
    if keyword_density < MIN_KEYWORD_DENSITY {
        deductions.add(
            DENSITY_PENALTY,
            "Low keyword density",
            "Include more industry-relevant keywords",
        );
    }

    if date_format_count(text) > 1 {
        deductions.add(
            DATE_FORMAT_PENALTY,
            "Inconsistent formatting detected",
            "Use consistent formatting throughout",
        );
    }

    let word_count = text.split_whitespace().count();
    if word_count < MIN_WORDS {
        deductions.add(
            SHORT_PENALTY,
            "CV is too short",
            "Expand your experience and skills sections",
        );
    } else if word_count > MAX_WORDS {
        deductions.add(LONG_PENALTY, "CV is too long", "Condense to 1-2 pages");
    }

    let score = 100u32.saturating_sub(deductions.total);
    tracing::debug!(score, issues = deductions.issues.len(), "ATS check complete");

    AtsReport {
        score,
        issues: deductions.issues,
        recommendations: deductions.recommendations,
        keyword_density,
        word_count,
        min_score,
        below_min: min_score.is_some_and(|min| score < min),
    }
}

#[derive(Default)]
struct Deductions {
    total: u32,
    issues: Vec<String>,
    recommendations: Vec<String>,
}

impl Deductions {
    fn add(&mut self, points: u32, issue: &str, recommendation: &str) {
        self.total += points;
        self.issues.push(issue.to_string());
        self.recommendations.push(recommendation.to_string());
    }
}

/// Percentage of [`ACTION_VERBS`] present as substrings, capped at 100.
fn keyword_density(lower: &str) -> f64 {
    let found = ACTION_VERBS.iter().filter(|v| lower.contains(**v)).count();
    (found as f64 / ACTION_VERBS.len() as f64 * 100.0).min(100.0)
}

/// Number of distinct date styles used anywhere in the text.
fn date_format_count(text: &str) -> usize {
    let mut styles = BTreeSet::new();
    for line in text.lines() {
        for (i, pattern) in DATE_PATTERNS.iter().enumerate() {
            if pattern.is_match(line) {
                styles.insert(i);
            }
        }
    }
    styles.len()
}
