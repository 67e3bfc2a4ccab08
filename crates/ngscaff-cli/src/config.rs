//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `NGSCAFF_*` environment variables, sections separated by `__`
//!    (`NGSCAFF_REGISTRY__URL`, `NGSCAFF_INSTALL__SKIP`)
//! 3. Config file: `--config` alone, or else `.ngscaff.toml` in the current
//!    directory over the platform config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ngscaff_adapters::{DEFAULT_INSTALL_COMMANDS, DEFAULT_REGISTRY_URL, DEFAULT_SEARCH_SIZE};

/// Project-local config file, layered over the user's config file.
pub const LOCAL_CONFIG_FILE: &str = ".ngscaff.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub install: InstallConfig,
    pub generator: GeneratorConfig,
    pub templates: TemplateConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL for package info and search.
    pub url: String,
    /// Per-lookup deadline; 0 waits indefinitely.
    pub lookup_timeout_secs: u64,
    pub search_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub skip: bool,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub app_path: String,
    pub app_suffix: String,
    /// `javascript` or `coffeescript`.
    pub script_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of template sets that replace the built-in ones by id.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`.
    pub format: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.into(),
            lookup_timeout_secs: 30,
            search_size: DEFAULT_SEARCH_SIZE,
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            skip: false,
            commands: DEFAULT_INSTALL_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            app_path: "app".into(),
            app_suffix: "App".into(),
            script_language: "javascript".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl RegistryConfig {
    /// `None` when lookups may wait indefinitely.
    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_secs > 0).then(|| Duration::from_secs(self.lookup_timeout_secs))
    }
}

impl AppConfig {
    /// Load configuration: defaults, then files, then the environment.
    ///
    /// An explicit `config_file` must exist and replaces both default
    /// locations, which are optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let builder = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading explicit configuration");
                Self::builder(path, true)?
            }
            None => {
                let user = Self::config_path();
                debug!(user = %user.display(), local = LOCAL_CONFIG_FILE, "loading configuration");
                Self::builder(&user, false)?.add_source(
                    File::from(Path::new(LOCAL_CONFIG_FILE))
                        .format(FileFormat::Toml)
                        .required(false),
                )
            }
        };

        builder
            .add_source(
                Environment::with_prefix("NGSCAFF")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("install.commands")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Defaults plus one file, without the environment layer.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        Self::builder(path, true)?
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    fn builder(
        path: &Path,
        required: bool,
    ) -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Config::try_from(&Self::default()).context("Failed to encode defaults")?;
        Ok(Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required)))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.ngscaff.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ngscaff", "ngscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".ngscaff.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_point_at_the_public_registry() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.registry.url, "https://registry.npmjs.org");
        assert_eq!(cfg.install.commands, vec!["npm install", "bower install"]);
        assert_eq!(cfg.generator.app_path, "app");
    }

    #[test]
    fn zero_timeout_means_indefinite() {
        let mut registry = RegistryConfig::default();
        assert_eq!(registry.lookup_timeout(), Some(Duration::from_secs(30)));
        registry.lookup_timeout_secs = 0;
        assert_eq!(registry.lookup_timeout(), None);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[registry]\nurl = \"http://localhost:4873\"\n\n[generator]\napp_suffix = \"\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_file(&path).unwrap();
        assert_eq!(cfg.registry.url, "http://localhost:4873");
        assert_eq!(cfg.registry.search_size, DEFAULT_SEARCH_SIZE);
        assert_eq!(cfg.generator.app_suffix, "");
        assert_eq!(cfg.generator.app_path, "app");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
