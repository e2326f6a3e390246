//! `readability`: Flesch reading-ease scoring.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use cv_lint_core::readability;

use super::load_cv;

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// CV file to score.
    pub file: Utf8PathBuf,

    /// Minimum acceptable reading-ease score.
    #[arg(long)]
    pub min_score: Option<f64>,
}

/// Score readability of a CV file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    config_min_score: Option<f64>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, min_score = ?args.min_score, "executing readability command");

    let content = load_cv(&args.file, max_input_bytes)?;
    let min_score = args.min_score.or(config_min_score);

    let report = readability::check_readability(&content, min_score);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !report.below_min {
        match report.min_score {
            Some(min) => println!(
                "{} {} scores {:.2} (min: {:.0})",
                "PASS:".green(),
                args.file,
                report.score,
                min,
            ),
            None => println!("{:.2} ({:?})", report.score, report.band),
        }
    }

    if report.below_min {
        bail!(
            "{} scores {:.2} (min: {:.0}). Shorten sentences and prefer simpler words.",
            args.file,
            report.score,
            report.min_score.unwrap_or(0.0),
        );
    }

    Ok(())
}
