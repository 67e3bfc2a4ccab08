//! Route generation: controller, view and spec for one route, plus the
//! route table entry and the script tag that loads the controller.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use ngscaff_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, RouteGenerator, RouteRequest, TemplateRenderer, TemplateStore},
    },
    domain::{Preprocessor, RenderContext, ScriptLanguage, TemplateId, naming},
    error::{ScaffoldError, ScaffoldResult},
};

use crate::{builtin_templates::ROUTE_TEMPLATE, filesystem::write_structure};

const OTHERWISE: &str = ".otherwise";
const END_BUILD: &str = "<!-- endbuild -->";

pub struct TemplateRouteGenerator {
    store: Arc<dyn TemplateStore>,
    renderer: Arc<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
}

impl TemplateRouteGenerator {
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

    fn run(&self, root: &Path, request: &RouteRequest) -> ScaffoldResult<()> {
        let template = self.store.get(&TemplateId::from(ROUTE_TEMPLATE))?;
        let context = RenderContext::new(request.script_language, Preprocessor::None)
            .with_variable("route", request.name.as_str())
            .with_variable("appPath", request.app_path.as_str())
            .with_variable("scriptAppName", request.script_app_name.as_str());
        let structure = self.renderer.render(&template, &context, root)?;
        write_structure(self.filesystem.as_ref(), &structure)?;

        let app_dir = root.join(&request.app_path);
        let ext = request.script_language.file_extension();

        let module = app_dir.join("scripts").join(format!("app.{ext}"));
        let source = self.filesystem.read_file(&module)?;
        let updated = add_route(&source, &request.name, request.script_language)
            .ok_or_else(|| failed(&request.name, format!("no `{OTHERWISE}` in {}", module.display())))?;
        self.filesystem.write_file(&module, &updated)?;

        let index = app_dir.join("index.html");
        let html = self.filesystem.read_file(&index)?;
        let src = format!("scripts/controllers/{}.js", request.name);
        let updated = add_script(&html, &src)
            .ok_or_else(|| failed(&request.name, format!("no `{END_BUILD}` in {}", index.display())))?;
        self.filesystem.write_file(&index, &updated)?;

        Ok(())
    }
}

#[async_trait]
impl RouteGenerator for TemplateRouteGenerator {
    #[instrument(skip_all, fields(route = %request.name, root = %root.display()))]
    async fn generate(&self, root: &Path, request: &RouteRequest) -> ScaffoldResult<()> {
        self.run(root, request).map_err(|e| match e {
            ScaffoldError::Application(ApplicationError::RouteGenerationFailed { .. }) => e,
            other => failed(&request.name, other.to_string()),
        })?;
        info!("route generated");
        Ok(())
    }
}

/// Insert a route table entry above the `.otherwise` clause, indented like
/// it. Returns `None` without an `.otherwise` clause; an existing entry for
/// the route is left alone.
pub fn add_route(source: &str, route: &str, language: ScriptLanguage) -> Option<String> {
    let url = format!("'/{route}'");
    if source.contains(&format!(".when({url}")) || source.contains(&format!(".when {url}")) {
        debug!(route, "route already registered");
        return Some(source.to_string());
    }

    let at = source.find(OTHERWISE)?;
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    let indent = &source[line_start..at];
    if !indent.chars().all(char::is_whitespace) {
        return None;
    }

    let controller = format!("{}Ctrl", naming::classify(route));
    let view = format!("views/{route}.html");
    let entry = match language {
        ScriptLanguage::JavaScript => format!(
            "{indent}.when({url}, {{\n\
             {indent}  templateUrl: '{view}',\n\
             {indent}  controller: '{controller}'\n\
             {indent}}})\n"
        ),
        ScriptLanguage::CoffeeScript => format!(
            "{indent}.when {url},\n\
             {indent}  templateUrl: '{view}'\n\
             {indent}  controller: '{controller}'\n"
        ),
    };

    let mut out = String::with_capacity(source.len() + entry.len());
    out.push_str(&source[..line_start]);
    out.push_str(&entry);
    out.push_str(&source[line_start..]);
    Some(out)
}

/// Add a script tag above the last `endbuild` marker. Returns `None` when
/// the document has no marker; an existing tag is left alone.
pub fn add_script(html: &str, src: &str) -> Option<String> {
    let tag = format!(r#"<script src="{src}"></script>"#);
    if html.contains(&tag) {
        return Some(html.to_string());
    }

    let at = html.rfind(END_BUILD)?;
    let line_start = html[..at].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = html[line_start..at]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    Some(format!(
        "{}{indent}{tag}\n{}",
        &html[..line_start],
        &html[line_start..]
    ))
}

fn failed(route: &str, reason: impl Into<String>) -> ScaffoldError {
    ApplicationError::RouteGenerationFailed {
        route: route.to_string(),
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandlebarsRenderer, InMemoryStore, MemoryFilesystem};

    const APP_JS: &str = "angular\n  .module('demoApp', [])\n  .config(function ($routeProvider) {\n    $routeProvider\n      .when('/', {\n        templateUrl: 'views/main.html',\n        controller: 'MainCtrl'\n      })\n      .otherwise({\n        redirectTo: '/'\n      });\n  });\n";

    const INDEX: &str = "<body>\n    <!-- build:js({.tmp,app}) scripts/scripts.js -->\n    <script src=\"scripts/app.js\"></script>\n    <script src=\"scripts/controllers/main.js\"></script>\n    <!-- endbuild -->\n</body>\n";

    #[test]
    fn javascript_entry_goes_above_otherwise() {
        let out = add_route(APP_JS, "about", ScriptLanguage::JavaScript).unwrap();
        assert!(out.contains(
            "      .when('/about', {\n        templateUrl: 'views/about.html',\n        controller: 'AboutCtrl'\n      })\n      .otherwise({"
        ));
    }

    #[test]
    fn coffee_entry_uses_coffee_syntax() {
        let source = "    $routeProvider\n      .when '/',\n        templateUrl: 'views/main.html'\n        controller: 'MainCtrl'\n      .otherwise\n        redirectTo: '/'\n";
        let out = add_route(source, "about", ScriptLanguage::CoffeeScript).unwrap();
        assert!(out.contains(
            "      .when '/about',\n        templateUrl: 'views/about.html'\n        controller: 'AboutCtrl'\n      .otherwise"
        ));
    }

    #[test]
    fn adding_a_route_twice_is_a_no_op() {
        let once = add_route(APP_JS, "about", ScriptLanguage::JavaScript).unwrap();
        let twice = add_route(&once, "about", ScriptLanguage::JavaScript).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn module_without_otherwise_is_rejected() {
        assert!(add_route("angular.module('x', []);", "about", ScriptLanguage::JavaScript).is_none());
    }

    #[test]
    fn script_tag_goes_above_last_endbuild() {
        let out = add_script(INDEX, "scripts/controllers/about.js").unwrap();
        assert!(out.contains(
            "main.js\"></script>\n    <script src=\"scripts/controllers/about.js\"></script>\n    <!-- endbuild -->"
        ));
        assert_eq!(add_script(&out, "scripts/controllers/about.js").unwrap(), out);
    }

    #[tokio::test]
    async fn generates_files_and_updates_module_and_index() {
        let root = Path::new("/project");
        let fs = MemoryFilesystem::new()
            .with_file(root.join("app/scripts/app.js"), APP_JS)
            .with_file(root.join("app/index.html"), INDEX);
        let generator = TemplateRouteGenerator::new(
            Arc::new(InMemoryStore::with_builtin().unwrap()),
            Arc::new(HandlebarsRenderer::new()),
            Arc::new(fs.clone()),
        );

        let request = RouteRequest {
            name: "about".into(),
            app_path: "app".into(),
            script_app_name: "demoApp".into(),
            script_language: ScriptLanguage::JavaScript,
        };
        generator.generate(root, &request).await.unwrap();

        let controller = fs.contents(root.join("app/scripts/controllers/about.js")).unwrap();
        assert!(controller.contains(".controller('AboutCtrl'"));
        assert!(fs.contents(root.join("app/views/about.html")).is_some());
        assert!(fs.contents(root.join("test/spec/controllers/about.js")).is_some());
        assert!(fs.contents(root.join("app/scripts/app.js")).unwrap().contains(".when('/about'"));
        assert!(fs.contents(root.join("app/index.html")).unwrap().contains("controllers/about.js"));
    }

    #[tokio::test]
    async fn missing_module_file_is_route_failure() {
        let generator = TemplateRouteGenerator::new(
            Arc::new(InMemoryStore::with_builtin().unwrap()),
            Arc::new(HandlebarsRenderer::new()),
            Arc::new(MemoryFilesystem::new()),
        );
        let request = RouteRequest {
            name: "about".into(),
            app_path: "app".into(),
            script_app_name: "demoApp".into(),
            script_language: ScriptLanguage::JavaScript,
        };

        let err = generator.generate(Path::new("/p"), &request).await.unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::Application(ApplicationError::RouteGenerationFailed { .. })
        ));
    }
}
