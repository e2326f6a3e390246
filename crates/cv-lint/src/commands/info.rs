//! `info`: package metadata and the effective configuration.

use camino::Utf8Path;
use clap::Args;
use cv_lint_core::config::{Config, ConfigSources};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Serialize)]
struct InfoReport<'a> {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    config: EffectiveConfig<'a>,
}

/// Merged settings plus where they came from. `input_limit` is the byte
/// limit actually applied, `null` when disabled.
#[derive(Serialize)]
struct EffectiveConfig<'a> {
    config_file: Option<&'a Utf8Path>,
    layers: Vec<&'a Utf8Path>,
    input_limit: Option<usize>,
    #[serde(flatten)]
    settings: &'a Config,
}

impl<'a> InfoReport<'a> {
    fn new(config: &'a Config, sources: &'a ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            config: EffectiveConfig {
                config_file: sources.primary(),
                layers: sources.layers().collect(),
                input_limit: config.input_limit(),
                settings: config,
            },
        }
    }
}

/// Print package information and the configuration in effect.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, layers = sources.layers().count(), "executing info command");

    let report = InfoReport::new(config, sources);
    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", report.name.bold(), report.version.green());
    for (label, value) in [
        ("", report.description),
        ("License", report.license),
        ("Repository", report.repository),
    ] {
        match (label, value) {
            (_, "") => {}
            ("", text) => println!("{text}"),
            (label, text) => println!("{}: {}", label.dimmed(), text),
        }
    }

    println!();
    println!("{}", "Configuration".bold().underline());
    for row in config_rows(&report.config) {
        println!("{:<26} {}", format!("{}:", row.0).dimmed(), row.1);
    }
    Ok(())
}

fn config_rows(effective: &EffectiveConfig<'_>) -> Vec<(&'static str, String)> {
    let unset = || "(not set)".to_string();
    let settings = effective.settings;

    let mut rows = vec![(
        "Config file",
        effective
            .config_file
            .map_or_else(|| "none loaded".yellow().to_string(), |p| p.cyan().to_string()),
    )];
    if effective.layers.len() > 1 {
        let all: Vec<_> = effective.layers.iter().map(|p| p.as_str()).collect();
        rows.push(("Merged files", all.join(", ")));
    }
    rows.push(("Log level", settings.log_level.as_str().to_string()));
    if let Some(dir) = &settings.log_dir {
        rows.push(("Log directory", dir.to_string()));
    }
    rows.extend([
        (
            "Min readability",
            settings.min_readability.map_or_else(unset, |v| format!("{v:.2}")),
        ),
        (
            "ATS min score",
            settings.ats_min_score.map_or_else(unset, |v| v.to_string()),
        ),
        (
            "Top keywords",
            settings.top_keywords.map_or_else(unset, |v| v.to_string()),
        ),
        (
            "Fail on missing sections",
            settings.fail_on_missing_sections.to_string(),
        ),
        ("Reject empty input", settings.reject_empty_input.to_string()),
        (
            "Input limit",
            effective
                .input_limit
                .map_or_else(|| "disabled".yellow().to_string(), |n| format!("{n} bytes")),
        ),
    ]);
    rows
}
