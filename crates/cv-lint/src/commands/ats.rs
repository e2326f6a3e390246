//! `ats`: applicant tracking system compatibility.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use cv_lint_core::ats;

use super::read_input_file;

/// Arguments for the `ats` subcommand.
#[derive(Args, Debug)]
pub struct AtsArgs {
    /// CV file to check. Read verbatim; layout whitespace is a signal.
    pub file: Utf8PathBuf,

    /// Minimum acceptable ATS score (0-100).
    #[arg(long)]
    pub min_score: Option<u32>,
}

/// Check a CV file for ATS compatibility.
#[instrument(name = "cmd_ats", skip_all, fields(file = %args.file))]
pub fn cmd_ats(
    args: AtsArgs,
    global_json: bool,
    config_min_score: Option<u32>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, min_score = ?args.min_score, "executing ats command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let min_score = args.min_score.or(config_min_score);

    let report = ats::check_ats(&content, min_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {}/100 (keyword density {:.0}%, {} words)",
            "ATS score:".cyan(),
            report.score,
            report.keyword_density,
            report.word_count,
        );
        for (issue, recommendation) in report.issues.iter().zip(&report.recommendations) {
            println!("  {} {}", "-".yellow(), issue);
            println!("    {}", recommendation.dimmed());
        }
    }

    if report.below_min {
        bail!(
            "{} ATS score {} is below minimum {}.",
            args.file,
            report.score,
            report.min_score.unwrap_or(0),
        );
    }

    Ok(())
}
