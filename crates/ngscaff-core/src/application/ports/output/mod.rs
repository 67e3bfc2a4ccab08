//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `ngscaff-adapters` crate provides implementations; the CLI crate
//! provides the interactive ones (prompter, progress indicator).

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{
    COMPONENTS_DIR, GenerationContext, PackageInfo, ProjectStructure, RenderContext,
    ScriptLanguage, SearchHit, Template, TemplateId,
};
use crate::error::ScaffoldResult;

// ── Filesystem ───────────────────────────────────────────────────────────────

/// Port for filesystem operations.
///
/// Implemented by:
/// - `ngscaff_adapters::filesystem::LocalFilesystem` (production)
/// - `ngscaff_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ScaffoldResult<()>;

    /// Write content to a file, creating parent directories.
    fn write_file(&self, path: &Path, content: &str) -> ScaffoldResult<()>;

    /// Read a file as UTF-8.
    fn read_file(&self, path: &Path) -> ScaffoldResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ScaffoldResult<()>;
}

// ── Templates ────────────────────────────────────────────────────────────────

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `ngscaff_adapters::template_store::InMemoryStore` (built-in templates)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a template set by name.
    fn get(&self, id: &TemplateId) -> ScaffoldResult<Template>;

    /// Insert or replace a template set.
    fn insert(&self, template: Template) -> ScaffoldResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `ngscaff_adapters::renderer::HandlebarsRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render every applicable file of `template` into a project structure
    /// rooted at `output_root`. File paths are rendered too.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ScaffoldResult<ProjectStructure>;
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Port for the package registry.
///
/// Implemented by:
/// - `ngscaff_adapters::registry::HttpRegistry`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Metadata for a package: latest version, all versions, main file.
    async fn info(&self, name: &str) -> ScaffoldResult<PackageInfo>;

    /// Free-text search. An empty list is a valid success.
    async fn search(&self, term: &str) -> ScaffoldResult<Vec<SearchHit>>;
}

// ── Interaction ──────────────────────────────────────────────────────────────

/// Port for interactive questions.
///
/// Implemented by:
/// - `ngscaff_cli::prompt::DialoguerPrompter` (terminal)
/// - `DefaultAnswers` (non-interactive, below)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Single choice; returns the chosen index.
    fn select(&self, prompt: &str, items: &[String], default: usize) -> ScaffoldResult<usize>;

    fn confirm(&self, prompt: &str, default: bool) -> ScaffoldResult<bool>;

    /// Checklist; returns the checked indices.
    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> ScaffoldResult<Vec<usize>>;

    /// Free text.
    fn input(&self, prompt: &str) -> ScaffoldResult<String>;

    /// Informational message, e.g. "not found".
    fn notice(&self, message: &str);

    /// Whether open-ended questions (the component loop) may be asked.
    fn is_interactive(&self) -> bool {
        true
    }
}

/// Prompter that answers every question with its default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAnswers;

impl Prompter for DefaultAnswers {
    fn select(&self, _prompt: &str, _items: &[String], default: usize) -> ScaffoldResult<usize> {
        Ok(default)
    }

    fn confirm(&self, _prompt: &str, default: bool) -> ScaffoldResult<bool> {
        Ok(default)
    }

    fn multi_select(
        &self,
        _prompt: &str,
        _items: &[String],
        defaults: &[bool],
    ) -> ScaffoldResult<Vec<usize>> {
        Ok(defaults
            .iter()
            .enumerate()
            .filter_map(|(i, checked)| checked.then_some(i))
            .collect())
    }

    fn input(&self, _prompt: &str) -> ScaffoldResult<String> {
        Ok(String::new())
    }

    fn notice(&self, message: &str) {
        tracing::info!(notice = message, "prompt notice");
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Port for progress feedback during registry calls.
pub trait ProgressIndicator: Send + Sync {
    /// Start showing progress. The indicator stops when the handle drops.
    fn start(&self, message: &str) -> ProgressHandle;
}

/// Scoped progress display.
///
/// Dropping the handle runs its finish action exactly once, on every exit
/// path including `?` and panics.
#[must_use = "progress stops as soon as the handle is dropped"]
pub struct ProgressHandle {
    finish: Option<Box<dyn FnOnce() + Send>>,
}

impl ProgressHandle {
    pub fn new(finish: impl FnOnce() + Send + 'static) -> Self {
        Self {
            finish: Some(Box::new(finish)),
        }
    }

    /// A handle with nothing to clean up.
    pub fn noop() -> Self {
        Self { finish: None }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        if let Some(finish) = self.finish.take() {
            finish();
        }
    }
}

impl fmt::Debug for ProgressHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressHandle")
            .field("active", &self.finish.is_some())
            .finish()
    }
}

/// Progress indicator that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressIndicator for NoProgress {
    fn start(&self, _message: &str) -> ProgressHandle {
        ProgressHandle::noop()
    }
}

// ── Post-generation collaborators ────────────────────────────────────────────

/// Browser launchers and framework plugins listed in the karma config.
pub const TEST_RUNNER_PLUGINS: [&str; 5] = [
    "karma-chrome-launcher",
    "karma-firefox-launcher",
    "karma-safari-launcher",
    "karma-phantomjs-launcher",
    "karma-jasmine",
];

/// Options handed to the test-runner configurator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunnerOptions {
    /// Comma-joined package manifest.
    pub manifest: String,
    pub base_path: String,
    pub components_path: String,
    pub app_files: String,
    /// Comma-joined test globs.
    pub test_files: String,
    pub plugins: Vec<String>,
    pub script_language: ScriptLanguage,
    pub skip_install: bool,
}

impl TestRunnerOptions {
    pub fn from_context(ctx: &GenerationContext) -> Self {
        let language = ctx.selection().script_language();
        let ext = language.file_extension();
        Self {
            manifest: ctx.manifest(),
            base_path: "../".into(),
            components_path: COMPONENTS_DIR.into(),
            app_files: format!("{}/scripts/**/*.{ext}", ctx.app_path()),
            test_files: format!("test/mock/**/*.{ext},test/spec/**/*.{ext}"),
            plugins: TEST_RUNNER_PLUGINS.iter().map(|p| p.to_string()).collect(),
            script_language: language,
            skip_install: ctx.options().skip_install,
        }
    }
}

/// Route to generate after the project is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub name: String,
    pub app_path: String,
    pub script_app_name: String,
    pub script_language: ScriptLanguage,
}

/// Port for dependency installation (package managers).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DependencyInstaller: Send + Sync {
    /// Install dependencies inside `root`.
    async fn install(&self, root: &Path) -> ScaffoldResult<()>;
}

/// Port for writing the test-runner configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TestRunnerConfigurator: Send + Sync {
    /// Write the configuration; returns the path of the written file.
    async fn configure(&self, root: &Path, options: &TestRunnerOptions) -> ScaffoldResult<PathBuf>;
}

/// Port for auxiliary route generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteGenerator: Send + Sync {
    async fn generate(&self, root: &Path, request: &RouteRequest) -> ScaffoldResult<()>;
}
