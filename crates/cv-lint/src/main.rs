//! cv-lint binary entry point.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use cv_lint::{Cli, Commands, commands};
use cv_lint_core::config::{Config, ConfigLoader, ConfigSources};
use tracing::debug;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("cannot enter {}", dir.display()))?;
    }
    let (config, sources) = load_config(cli.config.as_ref())?;

    let log_dir = config.log_dir.as_ref().map(|d| d.as_std_path().to_path_buf());
    let _log_guard = observability::init_observability(
        &observability::ObservabilityConfig::from_env_with_overrides(log_dir),
        observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str()),
    )
    .context("failed to initialize logging")?;
    debug!(
        json = cli.json,
        verbose = cli.verbose,
        config_file = ?sources.primary(),
        "starting"
    );

    let result = run(command, cli.json, config, &sources);
    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

/// Search for project config from the working directory, then layer
/// `--config` on top.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("cannot read working directory")?;
    let mut loader = ConfigLoader::new().search_from(utf8(cwd, "working directory")?);
    if let Some(path) = explicit {
        loader = loader.add_file(utf8(path.clone(), "--config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow!("{what} is not valid UTF-8: {}", p.display()))
}

fn run(
    command: Commands,
    json: bool,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let limit = config.input_limit();
    match command {
        Commands::Analyze(args) => commands::analyze::cmd_analyze(args, json, &config, limit),
        Commands::Readability(args) => {
            commands::readability::cmd_readability(args, json, config.min_readability, limit)
        }
        Commands::Keywords(args) => {
            commands::keywords::cmd_keywords(args, json, config.top_keywords, limit)
        }
        Commands::Sections(args) => {
            commands::sections::cmd_sections(args, json, config.fail_on_missing_sections, limit)
        }
        Commands::Ats(args) => commands::ats::cmd_ats(args, json, config.ats_min_score, limit),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to start async runtime")?
            .block_on(commands::serve::cmd_serve(args, limit, config)),
    }
}
