//! Argument parsing and subcommands for the `cv-lint` binary.
//!
//! Kept in a library so `xtask` can render man pages and completions from
//! [`command()`] and so the integration tests share one definition.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// `--color` values.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    #[allow(missing_docs)]
    Always,
    #[allow(missing_docs)]
    Never,
}

impl ColorChoice {
    /// Set the process-wide `owo-colors` override.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                   Log filter, wins over -q/-v (e.g. cv_lint_core=debug)
    CV_LINT_LOG_PATH           Write JSON logs to this file
    CV_LINT_LOG_DIR            Write daily JSON log files here
    CV_LINT_MIN_READABILITY    Default readability gate
    CV_LINT_ATS_MIN_SCORE      Default ATS score gate
    CV_LINT_<KEY>              Any other config key, e.g. CV_LINT_REJECT_EMPTY_INPUT=true
";

/// Top-level `cv-lint` arguments. Global flags apply to every subcommand.
#[derive(Parser)]
#[command(name = "cv-lint")]
#[command(about = "Heuristic CV structure and readability checker", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// Absent only together with `--version-only`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version and exit
    #[arg(long)]
    pub version_only: bool,

    /// Extra config file merged above discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to use terminal colors
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// `cv-lint` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full CV analysis (readability, keywords, sections, suggestions)
    Analyze(commands::analyze::AnalyzeArgs),

    /// Score readability (Flesch reading ease)
    Readability(commands::readability::ReadabilityArgs),

    /// List the most frequent content words
    Keywords(commands::keywords::KeywordsArgs),

    /// Check coverage of standard CV sections
    Sections(commands::sections::SectionsArgs),

    /// Check compatibility with applicant tracking systems
    Ats(commands::ats::AtsArgs),

    /// Show version and the effective configuration
    Info(commands::info::InfoArgs),

    /// Serve the checks as MCP tools over stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
