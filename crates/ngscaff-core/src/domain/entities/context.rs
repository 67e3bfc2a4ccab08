//! The assembled generation context.
//!
//! Built once after the aggregation join and read-only afterwards. Everything
//! the renderer and the post-generation actions need is derived from here:
//! the test-runner manifest, the asset references injected into the main
//! document and the template data.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use super::{
    component::ResolvedComponent,
    selection::{FeatureSelection, ModuleInjection},
};
use crate::domain::value_objects::{Preprocessor, ScriptLanguage};

/// Always-loaded packages of the test-runner manifest.
pub const BASE_MANIFEST: [&str; 2] = ["angular/angular.js", "angular-mocks/angular-mocks.js"];

/// Components directory, relative to the project root.
pub const COMPONENTS_DIR: &str = "bower_components";

const JQUERY_VERSION: &str = "~1.11.0";
const BOOTSTRAP_VERSION: &str = "~3.2.0";
const BOOTSTRAP_SASS_VERSION: &str = "~3.2.0";

/// Flags that change how post-generation actions behave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationOptions {
    pub skip_install: bool,
    /// Suppress the installer's "next steps" notice.
    pub skip_message: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationContext {
    app_name: String,
    script_app_name: String,
    app_path: String,
    output_dir: PathBuf,
    selection: FeatureSelection,
    injection: ModuleInjection,
    components: Vec<ResolvedComponent>,
    options: GenerationOptions,
}

/// Asset paths split by reference kind, each prefixed with the components
/// directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetReferences {
    pub css: Vec<String>,
    pub js: Vec<String>,
}

impl GenerationContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        app_name: impl Into<String>,
        script_app_name: impl Into<String>,
        app_path: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        selection: FeatureSelection,
        injection: ModuleInjection,
        components: Vec<ResolvedComponent>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            script_app_name: script_app_name.into(),
            app_path: app_path.into(),
            output_dir: output_dir.into(),
            selection,
            injection,
            components,
            options,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn script_app_name(&self) -> &str {
        &self.script_app_name
    }

    pub fn app_path(&self) -> &str {
        &self.app_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn selection(&self) -> &FeatureSelection {
        &self.selection
    }

    pub fn injection(&self) -> &ModuleInjection {
        &self.injection
    }

    /// Resolved extra components in lookup-completion order.
    pub fn components(&self) -> &[ResolvedComponent] {
        &self.components
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Comma-joined package list for the test runner: base packages, then
    /// enabled module assets, then resolved component assets.
    pub fn manifest(&self) -> String {
        let modules = self.selection.modules().filter_map(|m| m.primary_asset());
        let resolved = self.components.iter().map(|c| c.primary_asset());

        BASE_MANIFEST
            .into_iter()
            .chain(modules)
            .chain(resolved)
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// References to inject between the marker comments of the main document.
    pub fn asset_references(&self) -> AssetReferences {
        let mut refs = AssetReferences::default();
        let prefix = |p: &str| format!("{COMPONENTS_DIR}/{p}");

        if self.selection.bootstrap() {
            refs.js.push(prefix("jquery/dist/jquery.js"));
        }
        refs.js.push(prefix("angular/angular.js"));

        if self.selection.bootstrap() {
            if self.selection.compass_bootstrap() {
                refs.js.push(prefix(
                    "bootstrap-sass-official/assets/javascripts/bootstrap.js",
                ));
            } else {
                refs.js.push(prefix("bootstrap/dist/js/bootstrap.js"));
                if !self.selection.less_bootstrap() {
                    refs.css.push(prefix("bootstrap/dist/css/bootstrap.css"));
                }
            }
        }

        for asset in self.selection.modules().filter_map(|m| m.primary_asset()) {
            refs.js.push(prefix(asset));
        }

        for component in &self.components {
            let asset = prefix(component.primary_asset());
            if asset.ends_with(".css") {
                refs.css.push(asset);
            } else {
                refs.js.push(asset);
            }
        }

        refs
    }

    /// Data handed to the `app` template.
    pub fn template_data(&self) -> Map<String, Value> {
        let selection = &self.selection;
        let preprocessor = selection.preprocessor();
        let version = selection.angular_version();

        let mut dependencies = vec![json!({ "name": "angular", "version": version })];
        if selection.bootstrap() {
            dependencies.push(json!({ "name": "jquery", "version": JQUERY_VERSION }));
            if selection.compass_bootstrap() {
                dependencies.push(
                    json!({ "name": "bootstrap-sass-official", "version": BOOTSTRAP_SASS_VERSION }),
                );
            } else {
                dependencies.push(json!({ "name": "bootstrap", "version": BOOTSTRAP_VERSION }));
            }
        }
        for module in selection.modules() {
            dependencies.push(json!({ "name": module.package(), "version": version }));
        }
        for component in &self.components {
            dependencies.push(json!({ "name": component.name(), "version": component.version() }));
        }

        let modules: Vec<Value> = selection
            .modules()
            .map(|m| json!({ "package": m.package(), "token": m.injection_token() }))
            .collect();

        let data = json!({
            "appname": self.app_name,
            "scriptAppName": self.script_app_name,
            "appPath": self.app_path,
            "angularVersion": version,
            "coffee": selection.script_language() == ScriptLanguage::CoffeeScript,
            "scriptExt": selection.script_language().file_extension(),
            "styleExt": preprocessor.style_extension(),
            "preprocessor": preprocessor.as_str(),
            "compass": preprocessor == Preprocessor::Compass,
            "less": preprocessor == Preprocessor::Less,
            "bootstrap": selection.bootstrap(),
            "compassBootstrap": selection.compass_bootstrap(),
            "lessBootstrap": selection.less_bootstrap(),
            "buildPlugin": preprocessor.build_plugin(),
            "angularDeps": self.injection.render(),
            "ngRoute": self.injection.route(),
            "modules": modules,
            "bowerDependencies": dependencies,
        });

        match data {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}
