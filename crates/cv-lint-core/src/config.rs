//! Layered configuration.
//!
//! Settings only tune what sits around the engine (quality gates, logging,
//! input limits). Stop words and section markers are fixed.
//!
//! Layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. user file: `config.{toml,yaml,yml,json}` in the platform config dir
//! 3. project files from the nearest directory (walking up from the search
//!    root, stopping at `.git`) that has any of, in order: `.cv.*`, `cv.*`,
//!    `.cv-lint.*`, `cv-lint.*`
//! 4. files added with [`ConfigLoader::add_file`], in call order
//! 5. `CV_LINT_*` environment variables
//!
//! ```no_run
//! use cv_lint_core::config::ConfigLoader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (config, sources) = ConfigLoader::new().search_from("/home/me/cv").load()?;
//! if let Some(file) = sources.primary() {
//!     println!("{file}: min readability {:?}", config.min_readability);
//! }
//! # Ok(())
//! # }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Effective cv-lint settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Default log level when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for JSON-lines log files. Unset means no file logging.
    pub log_dir: Option<Utf8PathBuf>,
    /// Readability gate for `analyze` and `readability`.
    pub min_readability: Option<f64>,
    /// How many keywords `keywords` lists by default.
    pub top_keywords: Option<usize>,
    /// Fail `analyze` and `sections` when any section scores as missing.
    pub fail_on_missing_sections: bool,
    /// Treat input that is blank after normalization as an error instead of
    /// scoring it as an empty CV.
    ///
    /// Upstream extractors hand over an empty string when a document cannot
    /// be read, so a blank input usually means a failed extraction.
    pub reject_empty_input: bool,
    /// Score gate for `ats` (0 to 100).
    pub ats_min_score: Option<u32>,
    /// Byte limit for input files; [`crate::DEFAULT_MAX_INPUT_BYTES`] if unset.
    pub max_input_bytes: Option<usize>,
    /// Skip the size check altogether.
    pub disable_input_limit: bool,
}

impl Config {
    /// Effective input limit: `None` when disabled, else the configured or
    /// default byte count.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit)
            .then(|| self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Configured log level.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Files that contributed to a loaded [`Config`], per layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User-level file, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Utf8PathBuf>,
    /// Project files from the nearest config directory, lowest precedence first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project: Vec<Utf8PathBuf>,
    /// Files added explicitly, in the order given.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every file in merge order.
    pub fn layers(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user
            .iter()
            .chain(&self.project)
            .chain(&self.explicit)
            .map(Utf8PathBuf::as_path)
    }

    /// The file merged last, i.e. the one whose values win on conflict.
    pub fn primary(&self) -> Option<&Utf8Path> {
        self.layers().last()
    }

    /// Whether no file was found at all.
    pub fn is_empty(&self) -> bool {
        self.layers().next().is_none()
    }
}

const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const APP_NAME: &str = "cv-lint";
/// Project file stems, lowest precedence first.
const STEMS: [&str; 4] = [".cv", "cv", ".cv-lint", "cv-lint"];
const ENV_PREFIX: &str = "CV_LINT_";

/// Collects config layers and merges them with figment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    stop_marker: Option<String>,
    extra_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader with user config on, no project search, and `.git` as the
    /// walk-up boundary.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            stop_marker: Some(".git".to_string()),
            extra_files: Vec::new(),
        }
    }

    /// Look for project files starting at `dir` and walking up.
    pub fn search_from(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user-level config file.
    pub const fn include_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Stop walking up after a directory containing `marker`.
    pub fn stop_at(mut self, marker: impl Into<String>) -> Self {
        self.stop_marker = Some(marker.into());
        self
    }

    /// Walk up to the filesystem root.
    pub fn unbounded(mut self) -> Self {
        self.stop_marker = None;
        self
    }

    /// Merge `path` above every discovered file.
    pub fn add_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.extra_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Find which files exist for each layer without reading them.
    pub fn discover(&self) -> ConfigSources {
        ConfigSources {
            user: self.user_config.then(find_user_file).flatten(),
            project: self
                .search_root
                .as_deref()
                .map(|root| self.find_project_files(root))
                .unwrap_or_default(),
            explicit: self.extra_files.clone(),
        }
    }

    /// Merge all layers into a [`Config`].
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = self.discover();
        let figment = sources
            .layers()
            .fold(Figment::from(Serialized::defaults(Config::default())), merge_file)
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            primary = ?sources.primary(),
            layers = sources.layers().count(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Like [`load`](Self::load), but fail with [`ConfigError::NotFound`]
    /// when no file exists in any layer.
    pub fn load_required(self) -> ConfigResult<(Config, ConfigSources)> {
        if self.discover().is_empty() {
            return Err(ConfigError::NotFound);
        }
        self.load()
    }

    fn find_project_files(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in start.ancestors() {
            let found: Vec<Utf8PathBuf> = STEMS
                .iter()
                .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }
            let at_boundary = self
                .stop_marker
                .as_ref()
                .is_some_and(|marker| dir.join(marker).exists());
            if at_boundary {
                break;
            }
        }
        Vec::new()
    }
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => figment.merge(Toml::file_exact(path)),
    }
}

fn find_user_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Platform config directory for cv-lint (`~/.config/cv-lint` on Linux).
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    /// Held by every test that loads, since loading reads `CV_LINT_*`.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn dir_path(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    fn project_loader(root: &Utf8Path) -> ConfigLoader {
        ConfigLoader::new()
            .include_user_config(false)
            .unbounded()
            .search_from(root)
    }

    #[test]
    fn defaults_without_any_file() {
        let _env = env_lock();
        let (config, sources) = ConfigLoader::new()
            .include_user_config(false)
            .load()
            .unwrap();
        assert_eq!(config, Config::default());
        assert!(sources.is_empty());
        assert!(sources.primary().is_none());
    }

    #[test]
    fn all_fields_read_from_toml() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        fs::write(
            root.join("cv-lint.toml"),
            r#"log_level = "warn"
log_dir = "/var/log/cv-lint"
min_readability = 45.5
top_keywords = 5
fail_on_missing_sections = true
reject_empty_input = true
ats_min_score = 80
max_input_bytes = 2048
"#,
        )
        .unwrap();

        let (config, _) = project_loader(&root).load().unwrap();
        assert_eq!(
            config,
            Config {
                log_level: LogLevel::Warn,
                log_dir: Some("/var/log/cv-lint".into()),
                min_readability: Some(45.5),
                top_keywords: Some(5),
                fail_on_missing_sections: true,
                reject_empty_input: true,
                ats_min_score: Some(80),
                max_input_bytes: Some(2048),
                disable_input_limit: false,
            }
        );
        assert_eq!(config.input_limit(), Some(2048));
    }

    #[test]
    fn stems_merge_in_precedence_order() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        fs::write(root.join(".cv.toml"), "top_keywords = 1\nats_min_score = 10\n").unwrap();
        fs::write(root.join("cv.yaml"), "top_keywords: 2\nmin_readability: 30.0\n").unwrap();
        fs::write(root.join(".cv-lint.json"), r#"{"top_keywords": 3}"#).unwrap();
        fs::write(root.join("cv-lint.yml"), "top_keywords: 4\n").unwrap();

        let (config, sources) = project_loader(&root).load().unwrap();

        assert_eq!(config.top_keywords, Some(4));
        assert_eq!(config.min_readability, Some(30.0));
        assert_eq!(config.ats_min_score, Some(10));
        let names: Vec<_> = sources.project.iter().map(|p| p.file_name().unwrap()).collect();
        assert_eq!(names, [".cv.toml", "cv.yaml", ".cv-lint.json", "cv-lint.yml"]);
        assert!(sources.primary().unwrap().ends_with("cv-lint.yml"));
    }

    #[test]
    fn nearest_config_directory_shadows_parents() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        let nested = root.join("applications").join("2026");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("cv.toml"), "ats_min_score = 90\n").unwrap();
        fs::write(root.join("applications").join("cv.toml"), "top_keywords = 7\n").unwrap();

        let (config, sources) = project_loader(&nested).load().unwrap();

        assert_eq!(config.top_keywords, Some(7));
        assert!(config.ats_min_score.is_none());
        assert_eq!(sources.project.len(), 1);
    }

    #[test]
    fn walk_stops_at_git_boundary() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        let repo = root.join("repo");
        let docs = repo.join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(root.join("cv.toml"), "top_keywords = 3\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .include_user_config(false)
            .search_from(&docs)
            .load()
            .unwrap();
        assert!(config.top_keywords.is_none());
        assert!(sources.project.is_empty());

        fs::write(repo.join("cv.toml"), "top_keywords = 6\n").unwrap();
        let (config, _) = ConfigLoader::new()
            .include_user_config(false)
            .search_from(&docs)
            .load()
            .unwrap();
        assert_eq!(config.top_keywords, Some(6));
    }

    #[test]
    fn added_files_beat_project_files() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        fs::write(root.join("cv-lint.toml"), "min_readability = 30.0\n").unwrap();
        let strict = root.join("strict.yaml");
        fs::write(&strict, "min_readability: 60.0\n").unwrap();

        let (config, sources) = project_loader(&root).add_file(&strict).load().unwrap();

        assert_eq!(config.min_readability, Some(60.0));
        assert_eq!(sources.primary(), Some(strict.as_path()));
        assert_eq!(sources.layers().count(), 2);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_overrides_files() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        fs::write(
            root.join("cv.toml"),
            "min_readability = 40.0\nats_min_score = 50\nreject_empty_input = false\n",
        )
        .unwrap();

        // SAFETY: ENV_LOCK is held, and every loading test takes it.
        unsafe {
            std::env::set_var("CV_LINT_MIN_READABILITY", "55.5");
            std::env::set_var("CV_LINT_ATS_MIN_SCORE", "75");
            std::env::set_var("CV_LINT_REJECT_EMPTY_INPUT", "true");
        }
        let result = project_loader(&root).load();
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("CV_LINT_MIN_READABILITY");
            std::env::remove_var("CV_LINT_ATS_MIN_SCORE");
            std::env::remove_var("CV_LINT_REJECT_EMPTY_INPUT");
        }

        let (config, _) = result.unwrap();
        assert_eq!(config.min_readability, Some(55.5));
        assert_eq!(config.ats_min_score, Some(75));
        assert!(config.reject_empty_input);
    }

    #[test]
    fn wrong_type_is_a_deserialize_error() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);
        fs::write(root.join("cv.toml"), "ats_min_score = \"high\"\n").unwrap();

        let err = project_loader(&root).load().unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn load_required_needs_a_file() {
        let _env = env_lock();
        let tmp = TempDir::new().unwrap();
        let root = dir_path(&tmp);

        let result = project_loader(&root).load_required();
        assert!(matches!(result, Err(ConfigError::NotFound)));

        fs::write(root.join(".cv.json"), "{}").unwrap();
        assert!(project_loader(&root).load_required().is_ok());
    }

    #[test]
    fn input_limit_variants() {
        assert_eq!(Config::default().input_limit(), Some(5 * 1024 * 1024));
        let custom = Config {
            max_input_bytes: Some(1024),
            ..Config::default()
        };
        assert_eq!(custom.input_limit(), Some(1024));
        let disabled = Config {
            disable_input_limit: true,
            ..custom
        };
        assert_eq!(disabled.input_limit(), None);
    }

    #[test]
    fn yaml_shape_matches_toml_shape() {
        let config: Config =
            serde_yaml::from_str("log_level: error\nfail_on_missing_sections: true\n").unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
        assert!(config.fail_on_missing_sections);
        assert!(config.top_keywords.is_none());
    }

    #[test]
    fn user_config_dir_named_after_app() {
        if let Some(dir) = user_config_dir() {
            assert!(dir.as_str().contains("cv-lint"));
        }
    }
}
