//! Karma configuration writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use ngscaff_core::{
    application::{
        ApplicationError,
        ports::{
            Filesystem, TemplateRenderer, TemplateStore, TestRunnerConfigurator,
            TestRunnerOptions,
        },
    },
    domain::{Preprocessor, RenderContext, TemplateId},
    error::{ScaffoldError, ScaffoldResult},
};

use crate::{builtin_templates::KARMA_TEMPLATE, filesystem::write_structure};

/// Renders the `karma` template set into `test/`.
pub struct KarmaConfigurator {
    store: Arc<dyn TemplateStore>,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
}

impl KarmaConfigurator {
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

    fn render_context(options: &TestRunnerOptions) -> RenderContext {
        let bower_files: Vec<String> = split_list(&options.manifest)
            .map(|entry| format!("{}/{entry}", options.components_path))
            .collect();
        let test_files: Vec<String> = split_list(&options.test_files)
            .map(str::to_string)
            .collect();

        RenderContext::new(options.script_language, Preprocessor::None)
            .with_variable("basePath", options.base_path.as_str())
            .with_variable("bowerFiles", bower_files)
            .with_variable("appFiles", vec![options.app_files.clone()])
            .with_variable("testFiles", test_files)
            .with_variable("plugins", options.plugins.clone())
    }

    fn write(&self, root: &Path, options: &TestRunnerOptions) -> ScaffoldResult<PathBuf> {
        let template = self.store.get(&TemplateId::from(KARMA_TEMPLATE))?;
        let structure = self
            .renderer
            .render(&template, &Self::render_context(options), root)?;

        let config = structure
            .files()
            .next()
            .map(|f| root.join(&f.path))
            .ok_or_else(|| failed("karma template produced no files"))?;

        write_structure(self.filesystem.as_ref(), &structure)?;
        Ok(config)
    }
}

#[async_trait]
impl TestRunnerConfigurator for KarmaConfigurator {
    #[instrument(skip_all, fields(root = %root.display(), language = %options.script_language))]
    async fn configure(&self, root: &Path, options: &TestRunnerOptions) -> ScaffoldResult<PathBuf> {
        let path = self.write(root, options).map_err(|e| match e {
            ScaffoldError::Application(ApplicationError::TestRunnerFailed { .. }) => e,
            other => failed(other.to_string()),
        })?;
        debug!(path = %path.display(), skip_install = options.skip_install, "karma configured");
        Ok(path)
    }
}

fn split_list(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn failed(reason: impl Into<String>) -> ScaffoldError {
    ApplicationError::TestRunnerFailed {
        reason: reason.into(),
    }
    .into()
}
