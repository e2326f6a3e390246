//! `analyze`: full CV analysis.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use cv_lint_core::analysis;
use cv_lint_core::config::Config;
use cv_lint_core::sections::{MISSING_BELOW, Section};

use super::load_cv;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// CV file to analyze (plain text, or markdown with `.md`).
    pub file: Utf8PathBuf,

    /// Minimum acceptable readability score.
    #[arg(long)]
    pub min_readability: Option<f64>,

    /// Exit non-zero when any section is missing.
    #[arg(long)]
    pub fail_on_missing: bool,
}

/// Run the full analysis pipeline on a CV file.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing analyze command");

    let content = load_cv(&args.file, max_input_bytes)?;
    let min_readability = args.min_readability.or(config.min_readability);
    let fail_on_missing = args.fail_on_missing || config.fail_on_missing_sections;

    let report = analysis::analyze_checked(&content, config.reject_empty_input)
        .with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", args.file.bold());
        println!(
            "\n  {} {:.2}, {} sentences, {} words",
            "Readability:".cyan(),
            report.readability,
            report.sentence_count,
            report.word_count,
        );

        if !report.top_keywords.is_empty() {
            let top: Vec<_> = report
                .top_keywords
                .iter()
                .map(|k| format!("{} ({})", k.word, k.count))
                .collect();
            println!("\n  {} {}", "Keywords:".cyan(), top.join(", "));
        }

        println!("\n  {}", "Sections:".cyan());
        for section in Section::ALL {
            let score = report.sub_scores.section(section);
            let value = format!("{score:.2}");
            let value = if score < MISSING_BELOW {
                value.red().to_string()
            } else {
                value.green().to_string()
            };
            println!("    {:<15} {}", section.as_str(), value);
        }

        if !report.suggestions.is_empty() {
            println!("\n  {}", "Suggestions:".yellow());
            for suggestion in &report.suggestions {
                println!("    - {suggestion}");
            }
        }
    }

    if let Some(min) = min_readability
        && report.readability < min
    {
        bail!(
            "{} readability {:.2} is below minimum {:.0}. Shorten sentences and prefer simpler words.",
            args.file,
            report.readability,
            min,
        );
    }

    let missing = report.missing_sections();
    if fail_on_missing && !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(Section::as_str).collect();
        bail!("{} is missing sections: {}", args.file, names.join(", "));
    }

    Ok(())
}
