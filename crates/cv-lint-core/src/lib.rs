//! Core library for cv-lint.
//!
//! Heuristic analysis of extracted CV text: readability, keyword frequency,
//! section coverage, improvement suggestions, and ATS compatibility. Every
//! analysis is a pure function over a string; nothing here touches the
//! network or a database.
//!
//! # Modules
//!
//! - [`analysis`] - Full pipeline producing an [`AnalysisReport`]
//! - [`ats`] - ATS compatibility deductions
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//! - [`keywords`] - Keyword frequency ranking
//! - [`markdown`] - Markdown-to-text preparation
//! - [`readability`] - Flesch-style reading-ease score
//! - [`sections`] - Section coverage scoring
//! - [`suggestions`] - Suggestion synthesis
//! - [`syllables`] - Syllable estimation
//! - [`text`] - Normalization, sentence splitting, tokenization
//! - [`word_lists`] - Static word lists
//!
//! # Quick Start
//!
//! ```
//! use cv_lint_core::analyze;
//!
//! let report = analyze("Worked on a payments project. Skills: Rust, SQL.");
//! println!("readability: {}", report.readability);
//! for suggestion in &report.suggestions {
//!     println!("- {suggestion}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod ats;
pub mod config;
pub mod error;
pub mod keywords;
pub mod markdown;
pub mod readability;
pub mod sections;
pub mod suggestions;
pub mod syllables;
pub mod text;
pub mod word_lists;

pub use analysis::{AnalysisReport, SubScores, analyze, analyze_checked};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use keywords::KeywordCount;
pub use sections::Section;

/// Default maximum input size: 5 MiB.
///
/// Matches the upload cap of the services feeding extracted text in.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
