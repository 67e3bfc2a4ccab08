//! End-to-end runs of the `ngscaff` binary.
//!
//! Every run passes `--yes` and a preset framework version, so no question
//! is asked and the registry is never contacted.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Config that keeps runs offline and independent of the user's files.
fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let path = dir.join("ngscaff-test.toml");
    fs::write(
        &path,
        format!(
            "[registry]\nurl = \"http://127.0.0.1:9\"\n\n[install]\nskip = true\n\n{extra}"
        ),
    )
    .unwrap();
    path
}

fn ngscaff(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ngscaff").unwrap();
    cmd.arg("--no-color")
        .arg("--config")
        .arg(config)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("ngscaff")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version() {
    Command::cargo_bin("ngscaff")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_new_generates_javascript_project() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let out = temp.path().join("shop");

    ngscaff(&config)
        .args(["new", "my-shop", "--yes", "--skip-welcome-message"])
        .args(["--angular-version", "1.3.0"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 'myShop'"));

    let bower = fs::read_to_string(out.join("bower.json")).unwrap();
    assert!(bower.contains(r#""angular": "1.3.0""#));

    let app = fs::read_to_string(out.join("app/scripts/app.js")).unwrap();
    assert!(app.contains("'myShopApp'"));
    assert!(app.contains(".when('/about', {"));

    assert!(out.join("test/karma.conf.js").exists());
    assert!(out.join("app/scripts/controllers/about.js").exists());
    assert!(
        fs::read_to_string(out.join("app/index.html"))
            .unwrap()
            .contains("scripts/controllers/about.js")
    );
}

#[test]
fn test_new_coffee_with_empty_suffix() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let out = temp.path().join("coffee");

    ngscaff(&config)
        .args(["new", "brew", "--yes", "--coffee", "--app-suffix", ""])
        .args(["--angular-version", "1.3.0", "--skip-welcome-message"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success();

    let app = fs::read_to_string(out.join("app/scripts/app.coffee")).unwrap();
    assert!(app.contains("'brew'"));
    assert!(!out.join("app/scripts/app.js").exists());
    assert!(out.join("test/karma.conf.coffee").exists());
}

#[test]
fn test_name_defaults_to_directory() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let out = temp.path().join("admin-panel");

    ngscaff(&config)
        .args(["new", "--yes", "--angular-version", "1.3.0"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 'adminPanel'"));

    assert!(out.join("bower.json").exists());
}

#[test]
fn test_skip_install_prints_manual_steps() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let out = temp.path().join("steps");

    ngscaff(&config)
        .args(["new", "steps", "--yes", "--angular-version", "1.3.0"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("grunt wiredep"));
}

#[test]
fn test_json_summary() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");
    let out = temp.path().join("json");

    let assert = ngscaff(&config)
        .args(["--output-format", "json"])
        .args(["new", "json-app", "--yes", "--angular-version", "1.3.0"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(summary["app_name"], "jsonApp");
    assert_eq!(summary["script_app_name"], "jsonAppApp");
    assert!(summary["files_written"].as_u64().unwrap() > 0);
}

#[test]
fn test_local_templates_override_builtin_set() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("templates");
    fs::create_dir_all(templates.join("app")).unwrap();
    fs::write(
        templates.join("app/template.toml"),
        "[template]\nid = \"app\"\n",
    )
    .unwrap();
    fs::write(templates.join("app/README.md.hbs"), "# {{appname}}\n").unwrap();

    let config = write_config(
        temp.path(),
        &format!("[templates]\nlocal_path = {:?}\n", templates.display().to_string()),
    );
    let out = temp.path().join("custom");

    ngscaff(&config)
        .args(["new", "custom", "--yes", "--angular-version", "1.3.0"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out.join("README.md")).unwrap(), "# custom\n");
    assert!(!out.join("bower.json").exists());
}

#[test]
fn test_config_get_reads_file_values() {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path(), "");

    ngscaff(&config)
        .args(["config", "get", "registry.url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9"));
}

#[test]
fn test_completions_bash() {
    Command::cargo_bin("ngscaff")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ngscaff"));
}
