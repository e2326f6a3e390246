//! Section coverage scoring.
//!
//! Estimates whether a CV contains each of five standard sections by checking
//! which marker words occur anywhere in the lower-cased text. Matching is
//! plain substring containment over the whole text, not over tokens, so a
//! marker embedded in a longer word still counts.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::readability::round2;
use crate::text;

/// Sections scoring below this are reported as missing.
pub const MISSING_BELOW: f64 = 0.30;

/// A standard CV section.
///
/// Declaration order is significant: it fixes the order of scores and of
/// missing-section suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Section {
    /// Work history.
    Experience,
    /// Degrees and schools.
    Education,
    /// Technical and soft skills.
    Skills,
    /// Professional certifications.
    Certifications,
    /// Spoken languages.
    Languages,
}

impl Section {
    /// All sections in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Experience,
        Self::Education,
        Self::Skills,
        Self::Certifications,
        Self::Languages,
    ];

    /// Display name, as used in reports and suggestions.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Certifications => "Certifications",
            Self::Languages => "Languages",
        }
    }

    /// Lower-case marker substrings for this section.
    pub const fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::Experience => &["experience", "worked", "responsible", "project"],
            Self::Education => &["bachelor", "master", "university", "college"],
            Self::Skills => &["skills", "stack", "tools", "technologies"],
            Self::Certifications => &["certified", "certificate", "certification"],
            Self::Languages => &["english", "arabic", "french", "language"],
        }
    }

    /// Comma-separated list of section names, for error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalysisError::UnknownSection {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Coverage score for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SectionScore {
    /// The section scored.
    pub section: Section,
    /// `hits / markers`, capped at 1.0 and rounded to 2 decimals.
    pub score: f64,
    /// Markers found in the text, in marker order.
    pub matched: Vec<String>,
}

impl SectionScore {
    /// Whether this section counts as missing.
    pub fn is_missing(&self) -> bool {
        self.score < MISSING_BELOW
    }
}

/// Result of section coverage checking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionsReport {
    /// Scores for the checked sections, in declaration order.
    pub sections: Vec<SectionScore>,
    /// Checked sections scoring below the threshold.
    pub missing: Vec<Section>,
    /// Whether no checked section is missing.
    pub pass: bool,
}

/// Score every section against lower-cased full text.
///
/// Each marker counts at most once however often it appears. The marker
/// table is static, so repeated calls on the same text return identical
/// scores.
pub fn section_scores(lower_text: &str) -> Vec<SectionScore> {
    Section::ALL
        .iter()
        .map(|&section| score_section(section, lower_text))
        .collect()
}

/// Sections whose score is below [`MISSING_BELOW`], in score order.
pub fn missing_sections(scores: &[SectionScore]) -> Vec<Section> {
    scores
        .iter()
        .filter(|s| s.is_missing())
        .map(|s| s.section)
        .collect()
}

/// Check section coverage of raw CV text.
///
/// # Arguments
///
/// * `text`: The raw text (normalized and lower-cased internally).
/// * `only`: Optional section names to restrict the report to
///   (case-insensitive). Unknown names are an error.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn check_sections(text: &str, only: Option<&[String]>) -> AnalysisResult<SectionsReport> {
    let wanted: Option<Vec<Section>> = only
        .map(|names| names.iter().map(|n| n.parse()).collect::<AnalysisResult<_>>())
        .transpose()?;

    Ok(check_sections_for(text, wanted.as_deref()))
}

/// Check section coverage, restricted to already-parsed sections.
pub fn check_sections_for(text: &str, only: Option<&[Section]>) -> SectionsReport {
    let lower = text::normalize(text).to_lowercase();
    let sections: Vec<SectionScore> = section_scores(&lower)
        .into_iter()
        .filter(|s| only.is_none_or(|w| w.contains(&s.section)))
        .collect();
    let missing = missing_sections(&sections);

    SectionsReport {
        pass: missing.is_empty(),
        sections,
        missing,
    }
}

fn score_section(section: Section, lower_text: &str) -> SectionScore {
    let markers = section.markers();
    let matched: Vec<String> = markers
        .iter()
        .filter(|m| !m.is_empty() && lower_text.contains(**m))
        .map(|m| (*m).to_string())
        .collect();

    let ratio = (matched.len() as f64 / markers.len().max(1) as f64).min(1.0);

    SectionScore {
        section,
        score: round2(ratio),
        matched,
    }
}
