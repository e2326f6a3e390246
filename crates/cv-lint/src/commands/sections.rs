//! `sections`: coverage of standard CV sections.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use cv_lint_core::sections::{self, Section};

use super::load_cv;

/// Arguments for the `sections` subcommand.
#[derive(Args, Debug)]
pub struct SectionsArgs {
    /// CV file to check.
    pub file: Utf8PathBuf,

    /// Only check these sections (repeatable, case-insensitive).
    #[arg(long = "section", value_name = "NAME", value_enum, ignore_case = true)]
    pub sections: Vec<Section>,

    /// Exit non-zero when any checked section is missing.
    #[arg(long)]
    pub fail_on_missing: bool,
}

/// Score section coverage of a CV file.
#[instrument(name = "cmd_sections", skip_all, fields(file = %args.file))]
pub fn cmd_sections(
    args: SectionsArgs,
    global_json: bool,
    config_fail_on_missing: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, sections = ?args.sections, "executing sections command");

    let content = load_cv(&args.file, max_input_bytes)?;
    let only = (!args.sections.is_empty()).then_some(args.sections.as_slice());
    let fail_on_missing = args.fail_on_missing || config_fail_on_missing;

    let report = sections::check_sections_for(&content, only);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for score in &report.sections {
            let status = if score.is_missing() {
                "MISSING".red().to_string()
            } else {
                "ok".green().to_string()
            };
            println!(
                "{:<15} {:.2}  {:<7}  {}",
                score.section.as_str(),
                score.score,
                status,
                score.matched.join(", ").dimmed(),
            );
        }
    }

    if fail_on_missing && !report.pass {
        let names: Vec<_> = report.missing.iter().map(Section::as_str).collect();
        bail!("{} is missing sections: {}", args.file, names.join(", "));
    }

    Ok(())
}
