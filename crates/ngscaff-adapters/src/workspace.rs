//! Detection of settings from an existing project directory.
//!
//! Re-running the generator inside a project keeps its application path and
//! script language unless flags say otherwise.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use ngscaff_core::domain::ScriptLanguage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BowerManifest {
    app_path: Option<String>,
}

/// Settings found in `dir`. Every field is `None` when nothing was detected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceProbe {
    pub app_path: Option<String>,
    pub script_language: Option<ScriptLanguage>,
}

impl WorkspaceProbe {
    /// Inspect `dir`. `fallback_app_path` is searched for scripts when the
    /// directory has no `bower.json` with an `appPath`.
    pub fn detect(dir: &Path, fallback_app_path: &str) -> Self {
        let app_path = detect_app_path(dir);
        let scripts = dir
            .join(app_path.as_deref().unwrap_or(fallback_app_path))
            .join("scripts");
        let script_language = has_coffee_sources(&scripts).then_some(ScriptLanguage::CoffeeScript);

        debug!(?app_path, ?script_language, dir = %dir.display(), "workspace probed");
        Self {
            app_path,
            script_language,
        }
    }
}

/// `appPath` from `<dir>/bower.json`, if present and non-empty.
pub fn detect_app_path(dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(dir.join("bower.json")).ok()?;
    let manifest: BowerManifest = serde_json::from_str(&raw).ok()?;
    manifest.app_path.filter(|p| !p.trim().is_empty())
}

/// Whether any `.coffee` file exists below `scripts`.
pub fn has_coffee_sources(scripts: &Path) -> bool {
    WalkDir::new(scripts)
        .into_iter()
        .filter_map(Result::ok)
        .any(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "coffee")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_detects_nothing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(WorkspaceProbe::detect(temp.path(), "app"), WorkspaceProbe::default());
    }

    #[test]
    fn app_path_comes_from_bower_json() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("bower.json"),
            r#"{ "name": "demo", "appPath": "client" }"#,
        )
        .unwrap();

        assert_eq!(detect_app_path(temp.path()).as_deref(), Some("client"));
    }

    #[test]
    fn malformed_bower_json_is_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bower.json"), "{ not json").unwrap();
        assert!(detect_app_path(temp.path()).is_none());
    }

    #[test]
    fn nested_coffee_file_selects_coffeescript() {
        let temp = TempDir::new().unwrap();
        let controllers = temp.path().join("app/scripts/controllers");
        fs::create_dir_all(&controllers).unwrap();
        fs::write(controllers.join("main.coffee"), "x = 1").unwrap();

        let probe = WorkspaceProbe::detect(temp.path(), "app");
        assert_eq!(probe.script_language, Some(ScriptLanguage::CoffeeScript));
    }

    #[test]
    fn javascript_sources_detect_nothing() {
        let temp = TempDir::new().unwrap();
        let scripts = temp.path().join("app/scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join("app.js"), "x").unwrap();

        assert!(!has_coffee_sources(&scripts));
    }
}
