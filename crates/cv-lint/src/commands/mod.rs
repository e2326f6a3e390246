//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

use cv_lint_core::markdown;

pub mod analyze;
pub mod ats;
pub mod info;
pub mod keywords;
pub mod readability;
pub mod sections;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Read a CV file as text, converting markdown (`.md`, `.markdown`) first.
pub fn load_cv(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = read_input_file(path, max_bytes)?;
    Ok(match path.extension() {
        Some("md" | "markdown") => markdown::to_plain_text(&content),
        _ => content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(dir.path().join(name)).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn rejects_oversized_input() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cv.txt", "0123456789");
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
        assert!(read_input_file(&path, None).is_ok());
    }

    #[test]
    fn markdown_files_are_converted() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cv.md", "## Skills\n\n- **Rust**\n");
        assert_eq!(load_cv(&path, None).unwrap(), "Skills\nRust");
    }

    #[test]
    fn plain_files_are_untouched() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "cv.txt", "## Skills\n");
        assert_eq!(load_cv(&path, None).unwrap(), "## Skills\n");
    }
}
