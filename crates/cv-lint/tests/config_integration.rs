//! Config layering as seen through the binary.
//!
//! Each test runs in its own temp dir with `XDG_CONFIG_HOME` pointed inside
//! it and inherited `CV_LINT_*` variables cleared, so only the files and
//! variables a test sets can take effect.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: [&str; 9] = [
    "LOG_LEVEL",
    "LOG_DIR",
    "MIN_READABILITY",
    "TOP_KEYWORDS",
    "FAIL_ON_MISSING_SECTIONS",
    "REJECT_EMPTY_INPUT",
    "ATS_MIN_SCORE",
    "MAX_INPUT_BYTES",
    "DISABLE_INPUT_LIMIT",
];

/// The binary, isolated from the caller's config and environment.
#[allow(deprecated)]
fn cv_lint(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("xdg"));
    for key in SETTINGS {
        cmd.env_remove(format!("CV_LINT_{key}"));
    }
    cmd
}

/// `config` object of `info --json`, run from `dir`.
fn effective(cmd: &mut Command, dir: &Path) -> Value {
    let output = cmd
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "info failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let mut info: Value = serde_json::from_slice(&output.stdout).unwrap();
    info["config"].take()
}

fn file_name(value: &Value) -> &str {
    Path::new(value.as_str().unwrap())
        .file_name()
        .unwrap()
        .to_str()
        .unwrap()
}

/// One long sentence of one-syllable words: reading ease far below zero.
fn dense_cv(dir: &Path) {
    fs::write(dir.join("dense.txt"), vec!["go"; 300].join(" ")).unwrap();
}

#[test]
fn defaults_when_nothing_is_configured() {
    let home = TempDir::new().unwrap();
    let cfg = effective(&mut cv_lint(&home), home.path());

    assert!(cfg["config_file"].is_null());
    assert_eq!(cfg["layers"], Value::Array(vec![]));
    assert_eq!(cfg["log_level"], "info");
    assert!(cfg["min_readability"].is_null());
    assert_eq!(cfg["reject_empty_input"], false);
    assert_eq!(cfg["input_limit"], 5 * 1024 * 1024);
}

#[test]
fn cv_lint_names_override_cv_names() {
    let home = TempDir::new().unwrap();
    let dir = home.path();
    fs::write(dir.join(".cv.toml"), "min_readability = 10.0\ntop_keywords = 3\n").unwrap();
    fs::write(dir.join("cv.yaml"), "min_readability: 20.0\nats_min_score: 40\n").unwrap();
    fs::write(dir.join(".cv-lint.json"), r#"{"min_readability": 30.0}"#).unwrap();
    fs::write(dir.join("cv-lint.toml"), "min_readability = 40.0\n").unwrap();

    let cfg = effective(&mut cv_lint(&home), dir);

    assert_eq!(cfg["min_readability"], 40.0);
    assert_eq!(cfg["top_keywords"], 3);
    assert_eq!(cfg["ats_min_score"], 40);
    assert_eq!(file_name(&cfg["config_file"]), "cv-lint.toml");
    let layers: Vec<_> = cfg["layers"].as_array().unwrap().iter().map(file_name).collect();
    assert_eq!(layers, [".cv.toml", "cv.yaml", ".cv-lint.json", "cv-lint.toml"]);
}

#[test]
fn search_walks_up_to_the_nearest_config() {
    let home = TempDir::new().unwrap();
    let nested = home.path().join("jobs").join("acme");
    fs::create_dir_all(&nested).unwrap();
    fs::write(home.path().join("cv.toml"), "ats_min_score = 90\n").unwrap();

    let cfg = effective(&mut cv_lint(&home), &nested);
    assert_eq!(cfg["ats_min_score"], 90);

    fs::write(home.path().join("jobs").join("cv.yml"), "top_keywords: 4\n").unwrap();
    let cfg = effective(&mut cv_lint(&home), &nested);
    assert_eq!(cfg["top_keywords"], 4);
    assert!(cfg["ats_min_score"].is_null(), "parent file is shadowed");
}

#[test]
fn git_directory_bounds_the_search() {
    let home = TempDir::new().unwrap();
    let repo = home.path().join("cv-repo");
    let drafts = repo.join("drafts");
    fs::create_dir_all(&drafts).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(home.path().join("cv-lint.toml"), "ats_min_score = 90\n").unwrap();

    let cfg = effective(&mut cv_lint(&home), &drafts);
    assert!(cfg["config_file"].is_null());

    fs::write(repo.join(".cv.toml"), "ats_min_score = 55\n").unwrap();
    let cfg = effective(&mut cv_lint(&home), &drafts);
    assert_eq!(cfg["ats_min_score"], 55);
}

#[cfg(target_os = "linux")]
#[test]
fn project_config_overrides_user_config() {
    let home = TempDir::new().unwrap();
    let user_dir = home.path().join("xdg").join("cv-lint");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join("config.toml"), "top_keywords = 12\nats_min_score = 60\n").unwrap();
    let project = home.path().join("cv");
    fs::create_dir(&project).unwrap();

    let cfg = effective(&mut cv_lint(&home), &project);
    assert_eq!(cfg["top_keywords"], 12);

    fs::write(project.join("cv.toml"), "top_keywords = 6\n").unwrap();
    let cfg = effective(&mut cv_lint(&home), &project);
    assert_eq!(cfg["top_keywords"], 6);
    assert_eq!(cfg["ats_min_score"], 60);
    assert_eq!(cfg["layers"].as_array().unwrap().len(), 2);
}

#[test]
fn config_flag_layers_above_discovery() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("cv.toml"), "min_readability = 30.0\ntop_keywords = 8\n").unwrap();
    let strict = home.path().join("strict.json");
    fs::write(&strict, r#"{"min_readability": 65.0}"#).unwrap();

    let cfg = effective(
        cv_lint(&home).args(["--config", strict.to_str().unwrap()]),
        home.path(),
    );

    assert_eq!(cfg["min_readability"], 65.0);
    assert_eq!(cfg["top_keywords"], 8);
    assert_eq!(file_name(&cfg["config_file"]), "strict.json");
}

#[test]
fn env_gates_override_files() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("cv-lint.toml"), "min_readability = 40.0\nats_min_score = 50\n").unwrap();

    let cfg = effective(
        cv_lint(&home)
            .env("CV_LINT_MIN_READABILITY", "12.5")
            .env("CV_LINT_ATS_MIN_SCORE", "85"),
        home.path(),
    );

    assert_eq!(cfg["min_readability"], 12.5);
    assert_eq!(cfg["ats_min_score"], 85);
}

#[test]
fn env_readability_gate_decides_exit_status() {
    let home = TempDir::new().unwrap();
    dense_cv(home.path());
    fs::write(home.path().join("cv.toml"), "min_readability = 40.0\n").unwrap();
    let dir = home.path().to_str().unwrap();

    cv_lint(&home)
        .args(["-C", dir, "analyze", "dense.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below minimum 40"));

    cv_lint(&home)
        .env("CV_LINT_MIN_READABILITY", "-500")
        .args(["-C", dir, "analyze", "dense.txt"])
        .assert()
        .success();
}

#[test]
fn env_ats_gate_applies_without_flag() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("cv.txt"), "Name\t\tRole\n").unwrap();

    cv_lint(&home)
        .env("CV_LINT_ATS_MIN_SCORE", "100")
        .args(["-C", home.path().to_str().unwrap(), "ats", "cv.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below minimum 100"));
}

#[test]
fn input_limit_follows_config() {
    let home = TempDir::new().unwrap();
    let dir = home.path();
    fs::write(dir.join("cv.toml"), "max_input_bytes = 64\n").unwrap();
    fs::write(dir.join("long.txt"), "Skills: Rust. ".repeat(10)).unwrap();

    assert_eq!(effective(&mut cv_lint(&home), dir)["input_limit"], 64);
    cv_lint(&home)
        .args(["-C", dir.to_str().unwrap(), "keywords", "long.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));

    fs::write(dir.join("cv-lint.toml"), "disable_input_limit = true\n").unwrap();
    let cfg = effective(&mut cv_lint(&home), dir);
    assert!(cfg["input_limit"].is_null());
    assert_eq!(cfg["max_input_bytes"], 64);
    cv_lint(&home)
        .args(["-C", dir.to_str().unwrap(), "keywords", "long.txt"])
        .assert()
        .success();
}

#[test]
fn reject_empty_input_from_env() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("blank.txt"), " \t\r\n").unwrap();
    let dir = home.path().to_str().unwrap();

    cv_lint(&home)
        .args(["-C", dir, "analyze", "blank.txt", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"word_count\": 0"));

    cv_lint(&home)
        .env("CV_LINT_REJECT_EMPTY_INPUT", "true")
        .args(["-C", dir, "analyze", "blank.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text in input"));
}

#[test]
fn malformed_config_stops_every_command() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("cv-lint.yaml"), "top_keywords: [unclosed\n").unwrap();
    fs::write(home.path().join("cv.txt"), "Skills: Rust.").unwrap();

    for args in [&["info"][..], &["keywords", "cv.txt"]] {
        cv_lint(&home)
            .args(["-C", home.path().to_str().unwrap()])
            .args(args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

#[test]
fn wrong_value_type_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("cv.toml"), "ats_min_score = \"strict\"\n").unwrap();

    cv_lint(&home)
        .args(["-C", home.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
