//! Scaffold Service - render the application template and write it out.
//!
//! Workflow:
//! 1. Validate the feature selection
//! 2. Fetch the `app` template set from the store
//! 3. Render it with data derived from the generation context
//! 4. Check for conflicts, then write every file
//!
//! A failed write removes the files this run created; files that existed
//! before (overwritten with `force`) are left alone.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{
        DomainValidator as validator, GenerationContext, ProjectStructure, RenderContext,
        TemplateId,
    },
    error::ScaffoldResult,
};

/// Template set rendered for a new project.
pub const APP_TEMPLATE: &str = "app";

pub struct ScaffoldService {
    store: Arc<dyn TemplateStore>,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(
        store: Arc<dyn TemplateStore>,
        renderer: Arc<dyn TemplateRenderer>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Render and write the project described by `ctx`.
    ///
    /// Returns the structure that was written. With `force`, existing files
    /// are overwritten instead of rejected.
    #[instrument(
        skip_all,
        fields(app = %ctx.app_name(), output = %ctx.output_dir().display())
    )]
    pub fn scaffold(&self, ctx: &GenerationContext, force: bool) -> ScaffoldResult<ProjectStructure> {
        validator::validate_selection(ctx.selection())?;

        let template = self.store.get(&TemplateId::new(APP_TEMPLATE))?;
        validator::validate_template(&template)?;
        debug!(files = template.files.len(), "template loaded");

        let render = RenderContext::for_generation(ctx);
        let structure = self.renderer.render(&template, &render, ctx.output_dir())?;
        validator::validate_project_structure(&structure)?;
        info!(files = structure.len(), "template rendered");

        if !force {
            self.check_conflicts(&structure)?;
        }
        self.write_structure(&structure)?;

        info!("project written");
        Ok(structure)
    }

    fn check_conflicts(&self, structure: &ProjectStructure) -> ScaffoldResult<()> {
        let existing = structure
            .files()
            .map(|f| structure.root().join(&f.path))
            .find(|path| self.filesystem.exists(path));

        match existing {
            Some(path) => Err(ApplicationError::ProjectExists { path }.into()),
            None => Ok(()),
        }
    }

    fn write_structure(&self, structure: &ProjectStructure) -> ScaffoldResult<()> {
        let mut created = Vec::new();
        match self.write_all(structure, &mut created) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, created = created.len(), "write failed, rolling back");
                self.rollback(&created);
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure, created: &mut Vec<PathBuf>) -> ScaffoldResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for file in structure.files() {
            let path = structure.root().join(&file.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }

            let is_new = !self.filesystem.exists(&path);
            self.filesystem.write_file(&path, &file.content)?;
            if is_new {
                created.push(path);
            }
        }

        Ok(())
    }

    /// Best-effort removal of files created by this run.
    fn rollback(&self, created: &[PathBuf]) {
        for path in created.iter().rev() {
            if let Err(e) = self.filesystem.remove_file(path) {
                warn!(error = %e, path = %path.display(), "rollback failed");
            }
        }
    }
}
