//! Error types for cv-lint-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur around CV analysis.
///
/// The scoring pipeline itself is total; these come from the optional
/// checks callers layer on top of it.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty after normalization and the caller asked
    /// for blank input to be rejected.
    #[error("no text in input (was the document extracted correctly?)")]
    EmptyInput,

    /// An unknown section name was provided.
    #[error("unknown section: {name}. Use: {available}")]
    UnknownSection {
        /// The section name that was requested.
        name: String,
        /// Comma-separated list of available section names.
        available: String,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
