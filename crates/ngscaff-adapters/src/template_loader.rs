//! Filesystem-based template loader.
//!
//! Discovers `template.toml` manifests under a directory and turns each one
//! into a domain [`Template`]. Loaded sets replace built-in sets with the
//! same id, so a local directory can override `app`, `karma` or `route`.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── app/
//! │   ├── template.toml        ← manifest (required)
//! │   ├── bower.json.hbs
//! │   └── scripts/
//! │       ├── app.js.hbs
//! │       └── app.coffee.hbs
//! └── karma/
//!     ├── template.toml
//!     └── karma.conf.js.hbs
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! id          = "app"
//! description = "Company skeleton"   # optional
//!
//! # Optional per-file settings. Files not listed are rendered to their own
//! # relative path (minus a trailing `.hbs`) unconditionally.
//! [[files]]
//! source = "scripts/app.js.hbs"
//! path   = "{{appPath}}/scripts/app.js"
//! script = "javascript"              # javascript | coffeescript
//!
//! [[files]]
//! source = "styles/main.less.hbs"
//! path   = "{{appPath}}/styles/main.less"
//! style  = "less"                    # none | compass | less
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use ngscaff_core::domain::{
    DomainError, FileCondition, Preprocessor, ScriptLanguage, Template, TemplateFile,
};

const MANIFEST: &str = "template.toml";
const TEMPLATE_EXT: &str = ".hbs";

// ── Manifest types ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TemplateSection {
    pub id: String,
    pub description: Option<String>,
}

/// One entry under `[[files]]`.
#[derive(Debug, Deserialize, Clone)]
pub struct FileEntry {
    /// Path of the source file, relative to the template directory.
    pub source: String,
    /// Output path expression; defaults to `source` without `.hbs`.
    pub path: Option<String>,
    pub script: Option<String>,
    pub style: Option<String>,
}

impl FileEntry {
    fn condition(&self) -> Result<FileCondition, DomainError> {
        match (&self.script, &self.style) {
            (Some(_), Some(_)) => Err(DomainError::InvalidTemplate(format!(
                "'{}' sets both script and style; only one condition is allowed",
                self.source
            ))),
            (Some(script), None) => Ok(FileCondition::Script(script.parse::<ScriptLanguage>()?)),
            (None, Some(style)) => Ok(FileCondition::Style(style.parse::<Preprocessor>()?)),
            (None, None) => Ok(FileCondition::Always),
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Template`] sets from subdirectories of `templates_dir`.
///
/// A subdirectory without a readable, valid manifest is skipped with a
/// `WARN` log; it does not prevent the others from loading.
pub struct FilesystemTemplateLoader {
    templates_dir: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    /// Load every valid template set found under the directory.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvalidTemplate`] if the directory is missing or
    /// unreadable.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.templates_dir.is_dir() {
            return Err(DomainError::InvalidTemplate(format!(
                "templates directory not found: {}",
                self.templates_dir.display()
            )));
        }

        let read_dir = fs::read_dir(&self.templates_dir).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read templates directory '{}': {e}",
                self.templates_dir.display()
            ))
        })?;

        let mut dirs: Vec<PathBuf> = read_dir
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut templates = Vec::new();
        for dir in dirs {
            match self.load_template_from_dir(&dir) {
                Ok(template) => {
                    debug!(id = %template.id, files = template.files.len(), "loaded template");
                    templates.push(template);
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping template directory");
                }
            }
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(templates)
    }

    /// Load a single template set from one subdirectory.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load_template_from_dir(&self, dir: &Path) -> Result<Template, DomainError> {
        let manifest_path = dir.join(MANIFEST);
        let raw = fs::read_to_string(&manifest_path).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to read '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let manifest: TemplateManifest = toml::from_str(&raw).map_err(|e| {
            DomainError::InvalidTemplate(format!(
                "failed to parse '{}': {e}",
                manifest_path.display()
            ))
        })?;

        let entries: HashMap<String, &FileEntry> = manifest
            .files
            .iter()
            .map(|f| (normalize_path(&f.source), f))
            .collect();

        let mut template = Template::new(
            manifest.template.id.as_str(),
            manifest.template.description.clone().unwrap_or_default(),
        );

        for source in walk_sources(dir)? {
            let content = fs::read_to_string(dir.join(&source)).map_err(|e| {
                DomainError::InvalidTemplate(format!("failed to read '{source}': {e}"))
            })?;

            let file = match entries.get(&source) {
                Some(entry) => {
                    let path = entry
                        .path
                        .clone()
                        .unwrap_or_else(|| output_path(&source));
                    TemplateFile::new(path, content).when(entry.condition()?)
                }
                None => TemplateFile::new(output_path(&source), content),
            };
            template = template.with_file(file);
        }

        if let Some(missing) = entries.keys().find(|s| !dir.join(s.as_str()).is_file()) {
            return Err(DomainError::InvalidTemplate(format!(
                "manifest lists '{missing}' but the file does not exist"
            )));
        }

        template.validate()?;
        Ok(template)
    }
}

/// Relative, slash-separated paths of every file except the manifest, sorted.
fn walk_sources(dir: &Path) -> Result<Vec<String>, DomainError> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry =
            entry.map_err(|e| DomainError::InvalidTemplate(format!("directory walk error: {e}")))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(dir).map_err(|_| {
            DomainError::InvalidTemplate(format!(
                "failed to relativise '{}'",
                entry.path().display()
            ))
        })?;
        let rel = normalize_path(&rel.to_string_lossy());
        if rel != MANIFEST {
            sources.push(rel);
        }
    }
    Ok(sources)
}

fn output_path(source: &str) -> String {
    source
        .strip_suffix(TEMPLATE_EXT)
        .unwrap_or(source)
        .to_string()
}

/// Forward slashes so Windows and Unix paths compare identically.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
