//! Template domain model and render context.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Template (Aggregate Root)                                   │
//! │  ├── TemplateId            - "app", "karma", "route"         │
//! │  └── Vec<TemplateFile>                                       │
//! │       ├── path     - handlebars expression, e.g.             │
//! │       │              "{{appPath}}/scripts/app.{{scriptExt}}" │
//! │       ├── content  - TemplateSource (Static | Owned)         │
//! │       └── when     - FileCondition                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                                │
//! │  └── JSON data + the choices that gate files                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering itself is a port (`TemplateRenderer`); this module only decides
//! *which* files apply and *what data* they see.

use std::collections::HashSet;
use std::fmt;

use chrono::Datelike;
use serde_json::{Map, Value};

use super::context::GenerationContext;
use crate::domain::{
    error::DomainError,
    value_objects::{Preprocessor, ScriptLanguage},
};

// ── TemplateId ───────────────────────────────────────────────────────────────

/// Name of a template set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ── TemplateSource ───────────────────────────────────────────────────────────

/// Template text: compiled into the binary or loaded at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

// ── FileCondition ────────────────────────────────────────────────────────────

/// When a template file applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FileCondition {
    #[default]
    Always,
    /// Only for this output language.
    Script(ScriptLanguage),
    /// Only for this preprocessor.
    Style(Preprocessor),
}

// ── TemplateFile ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Output path, relative to the project root. May contain expressions.
    pub path: String,
    pub content: TemplateSource,
    pub when: FileCondition,
}

impl TemplateFile {
    pub fn new(path: impl Into<String>, content: impl Into<TemplateSource>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            when: FileCondition::Always,
        }
    }

    pub fn when(mut self, condition: FileCondition) -> Self {
        self.when = condition;
        self
    }
}

// ── Template ─────────────────────────────────────────────────────────────────

/// A named set of files rendered together.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. the name is non-empty
/// 2. at least one file
/// 3. no two files share both path expression and condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub description: String,
    pub files: Vec<TemplateFile>,
}

impl Template {
    pub fn new(id: impl Into<TemplateId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidTemplate(
                "Template name cannot be empty".into(),
            ));
        }

        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "Template '{}' has no files",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert((file.path.as_str(), file.when)) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }

        Ok(())
    }

    /// Files that apply under `ctx`, in declaration order.
    pub fn applicable_files<'a>(
        &'a self,
        ctx: &'a RenderContext,
    ) -> impl Iterator<Item = &'a TemplateFile> + 'a {
        self.files.iter().filter(move |f| ctx.applies(f.when))
    }
}

// ── RenderContext ────────────────────────────────────────────────────────────

/// Data visible to templates, plus the choices that gate conditional files.
///
/// Every context carries `year`. Contexts built from a `GenerationContext`
/// also carry everything listed in `GenerationContext::template_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    data: Map<String, Value>,
    script_language: ScriptLanguage,
    preprocessor: Preprocessor,
}

impl RenderContext {
    pub fn new(script_language: ScriptLanguage, preprocessor: Preprocessor) -> Self {
        let mut data = Map::new();
        data.insert(
            "year".into(),
            Value::from(chrono::Local::now().year().to_string()),
        );
        data.insert("scriptExt".into(), script_language.file_extension().into());
        data.insert(
            "coffee".into(),
            Value::Bool(script_language == ScriptLanguage::CoffeeScript),
        );
        Self {
            data,
            script_language,
            preprocessor,
        }
    }

    pub fn for_generation(ctx: &GenerationContext) -> Self {
        let selection = ctx.selection();
        let mut render = Self::new(selection.script_language(), selection.preprocessor());
        render.data.extend(ctx.template_data());
        render
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn script_language(&self) -> ScriptLanguage {
        self.script_language
    }

    pub fn applies(&self, condition: FileCondition) -> bool {
        match condition {
            FileCondition::Always => true,
            FileCondition::Script(lang) => lang == self.script_language,
            FileCondition::Style(pre) => pre == self.preprocessor,
        }
    }
}
