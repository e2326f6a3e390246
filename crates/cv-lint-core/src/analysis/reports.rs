//! Report structs for full CV analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses. Field names match the
//! JSON contract consumed by the persistence and HTTP layers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordCount;
use crate::sections::{MISSING_BELOW, Section, SectionScore};

/// Result of analyzing one CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Content words after stop-word filtering.
    pub word_count: usize,
    /// Sentences detected, floored at 1.
    pub sentence_count: usize,
    /// Flesch-style reading-ease score, rounded to 2 decimals.
    pub readability: f64,
    /// Most frequent content words, highest count first (at most 10).
    pub top_keywords: Vec<KeywordCount>,
    /// Per-section coverage plus the readability score.
    pub sub_scores: SubScores,
    /// Improvement suggestions, most structural first.
    pub suggestions: Vec<String>,
}

impl AnalysisReport {
    /// Sections whose coverage score is below the missing threshold.
    pub fn missing_sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|&s| self.sub_scores.section(s) < MISSING_BELOW)
            .collect()
    }
}

/// Sub-scores keyed the way the JSON contract spells them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubScores {
    /// Experience coverage (0.0–1.0).
    #[serde(rename = "Experience")]
    pub experience: f64,
    /// Education coverage (0.0–1.0).
    #[serde(rename = "Education")]
    pub education: f64,
    /// Skills coverage (0.0–1.0).
    #[serde(rename = "Skills")]
    pub skills: f64,
    /// Certifications coverage (0.0–1.0).
    #[serde(rename = "Certifications")]
    pub certifications: f64,
    /// Languages coverage (0.0–1.0).
    #[serde(rename = "Languages")]
    pub languages: f64,
    /// Same value as the top-level `readability`.
    #[serde(rename = "Readability")]
    pub readability: f64,
}

impl SubScores {
    /// Build from section scores and the readability score.
    ///
    /// Sections absent from `scores` are recorded as 0.0.
    pub fn new(scores: &[SectionScore], readability: f64) -> Self {
        let get = |section: Section| {
            scores
                .iter()
                .find(|s| s.section == section)
                .map_or(0.0, |s| s.score)
        };
        Self {
            experience: get(Section::Experience),
            education: get(Section::Education),
            skills: get(Section::Skills),
            certifications: get(Section::Certifications),
            languages: get(Section::Languages),
            readability,
        }
    }

    /// Coverage score for a single section.
    pub const fn section(&self, section: Section) -> f64 {
        match section {
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Skills => self.skills,
            Section::Certifications => self.certifications,
            Section::Languages => self.languages,
        }
    }
}
