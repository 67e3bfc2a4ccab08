//! Handlebars renderer.
//!
//! Output is source code and markup, so HTML escaping is disabled. File paths
//! are templates too (`{{appPath}}/scripts/app.{{scriptExt}}`).

use std::path::Path;

use handlebars::Handlebars;
use tracing::{debug, instrument};

use ngscaff_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{ProjectStructure, RelativePath, RenderContext, Template, naming},
    error::{ScaffoldError, ScaffoldResult},
};

pub struct HandlebarsRenderer {
    handlebars: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("classify", Box::new(classify_helper));
        handlebars.register_helper("kebab", Box::new(kebab_helper));
        Self { handlebars }
    }

    /// Render a single string against the context data.
    pub fn render_str(&self, source: &str, context: &RenderContext) -> ScaffoldResult<String> {
        self.handlebars
            .render_template(source, context.data())
            .map_err(|e| rendering_failed(e.to_string()))
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> ScaffoldResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);

        for file in template.applicable_files(context) {
            let path = self
                .render_str(&file.path, context)
                .map_err(|e| rendering_failed(format!("path '{}': {e}", file.path)))?;
            let content = self
                .render_str(file.content.as_str(), context)
                .map_err(|e| rendering_failed(format!("'{path}': {e}")))?;

            let path = RelativePath::try_new(path).map_err(ScaffoldError::Domain)?;
            debug!(path = %path, bytes = content.len(), "rendered");
            structure.add_file(path, content);
        }

        Ok(structure)
    }
}

fn rendering_failed(reason: impl Into<String>) -> ScaffoldError {
    ApplicationError::RenderingFailed {
        reason: reason.into(),
    }
    .into()
}

fn classify_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&naming::classify(param))?;
    Ok(())
}

fn kebab_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&naming::to_kebab_case(param))?;
    Ok(())
}
