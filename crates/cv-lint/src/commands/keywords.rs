//! Keywords command.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use cv_lint_core::{keywords, text};

use super::load_cv;

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// CV file to scan.
    pub file: Utf8PathBuf,

    /// Number of keywords to list (default: 10).
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// List the most frequent content words in a CV file.
#[instrument(name = "cmd_keywords", skip_all, fields(file = %args.file))]
pub fn cmd_keywords(
    args: KeywordsArgs,
    global_json: bool,
    config_limit: Option<usize>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let limit = args
        .limit
        .or(config_limit)
        .unwrap_or(keywords::DEFAULT_KEYWORD_LIMIT);
    debug!(file = %args.file, limit, "executing keywords command");

    let content = load_cv(&args.file, max_input_bytes)?;
    let tokens = text::tokenize(&text::normalize(&content));
    let ranked = keywords::top_keywords(&tokens, limit);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        for keyword in &ranked {
            println!("{:>5}  {}", keyword.count, keyword.word);
        }
    }

    Ok(())
}
