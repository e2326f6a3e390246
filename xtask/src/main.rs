//! Development tasks for the cv-lint workspace.
//!
//! ```text
//! cargo xtask completions [--out-dir DIR]
//! cargo xtask man [--out-dir DIR]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "cv-lint development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> std::io::Result<()> {
    match Xtask::parse().task {
        Task::Completions { out_dir } => completions(&out_dir),
        Task::Man { out_dir } => man_pages(&out_dir),
    }
}

fn completions(out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = cv_lint::command();
    for &shell in Shell::value_variants() {
        let path = clap_complete::generate_to(shell, &mut cmd, "cv-lint", out_dir)?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn man_pages(out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = cv_lint::command();
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("wrote man pages to {}", out_dir.display());
    Ok(())
}
