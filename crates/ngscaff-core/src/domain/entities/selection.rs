//! Feature selection: the finalized set of user choices.
//!
//! A `FeatureSelection` can only be obtained through
//! [`FeatureSelectionBuilder::build`], which rejects a UI-framework variant
//! unless the framework is included and a preprocessor is selected. An
//! invalid combination therefore never reaches a `GenerationContext`.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    value_objects::{AngularModule, Preprocessor, ScriptLanguage},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSelection {
    angular_version: String,
    preprocessor: Preprocessor,
    bootstrap: bool,
    bootstrap_variant: bool,
    modules: BTreeSet<AngularModule>,
    script_language: ScriptLanguage,
}

impl FeatureSelection {
    pub fn builder() -> FeatureSelectionBuilder {
        FeatureSelectionBuilder::default()
    }

    pub fn angular_version(&self) -> &str {
        &self.angular_version
    }

    pub fn preprocessor(&self) -> Preprocessor {
        self.preprocessor
    }

    pub fn bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Sass flavour of the UI framework.
    pub fn compass_bootstrap(&self) -> bool {
        self.bootstrap_variant && self.preprocessor == Preprocessor::Compass
    }

    /// Less flavour of the UI framework.
    pub fn less_bootstrap(&self) -> bool {
        self.bootstrap_variant && self.preprocessor == Preprocessor::Less
    }

    pub fn script_language(&self) -> ScriptLanguage {
        self.script_language
    }

    /// Enabled modules in injection order.
    pub fn modules(&self) -> impl Iterator<Item = AngularModule> + '_ {
        self.modules.iter().copied()
    }

    pub fn is_enabled(&self, module: AngularModule) -> bool {
        self.modules.contains(&module)
    }

    pub fn route_enabled(&self) -> bool {
        self.is_enabled(AngularModule::Route)
    }

    /// Preprocessor dependency markers; empty when no preprocessor is chosen.
    pub fn node_modules(&self) -> Vec<&'static str> {
        self.preprocessor.node_module().into_iter().collect()
    }

    /// Derived dependency-injection list.
    pub fn injection(&self) -> ModuleInjection {
        ModuleInjection::from_selection(self)
    }
}

#[derive(Debug, Default, Clone)]
pub struct FeatureSelectionBuilder {
    angular_version: Option<String>,
    preprocessor: Preprocessor,
    bootstrap: bool,
    bootstrap_variant: bool,
    modules: BTreeSet<AngularModule>,
    script_language: ScriptLanguage,
}

impl FeatureSelectionBuilder {
    pub fn angular_version(mut self, version: impl Into<String>) -> Self {
        self.angular_version = Some(version.into());
        self
    }

    pub fn preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn bootstrap(mut self, include: bool) -> Self {
        self.bootstrap = include;
        self
    }

    /// Use the preprocessor flavour of the UI framework.
    pub fn bootstrap_variant(mut self, variant: bool) -> Self {
        self.bootstrap_variant = variant;
        self
    }

    pub fn module(mut self, module: AngularModule) -> Self {
        self.modules.insert(module);
        self
    }

    pub fn modules(mut self, modules: impl IntoIterator<Item = AngularModule>) -> Self {
        self.modules.extend(modules);
        self
    }

    pub fn script_language(mut self, language: ScriptLanguage) -> Self {
        self.script_language = language;
        self
    }

    pub fn build(self) -> Result<FeatureSelection, DomainError> {
        let angular_version = self
            .angular_version
            .filter(|v| !v.trim().is_empty())
            .ok_or(DomainError::MissingRequiredField {
                field: "angular_version",
            })?;

        if self.bootstrap_variant {
            if !self.bootstrap {
                return Err(DomainError::InvalidSelection(
                    "a Bootstrap variant requires Bootstrap to be included".into(),
                ));
            }
            if self.preprocessor == Preprocessor::None {
                return Err(DomainError::InvalidSelection(
                    "a Bootstrap variant requires a CSS preprocessor".into(),
                ));
            }
        }

        Ok(FeatureSelection {
            angular_version,
            preprocessor: self.preprocessor,
            bootstrap: self.bootstrap,
            bootstrap_variant: self.bootstrap_variant,
            modules: self.modules,
            script_language: self.script_language,
        })
    }
}

// ── ModuleInjection ──────────────────────────────────────────────────────────

/// Quoted module tokens injected into the application module declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleInjection {
    tokens: Vec<&'static str>,
    route: bool,
}

impl ModuleInjection {
    pub fn from_selection(selection: &FeatureSelection) -> Self {
        Self {
            tokens: selection
                .modules()
                .filter_map(|m| m.injection_token())
                .collect(),
            route: selection.route_enabled(),
        }
    }

    /// Unquoted tokens in injection order.
    pub fn tokens(&self) -> &[&'static str] {
        &self.tokens
    }

    /// Quoted tokens in injection order.
    pub fn quoted(&self) -> Vec<String> {
        self.tokens.iter().map(|t| format!("'{t}'")).collect()
    }

    /// Whether the routing module was injected.
    pub fn route(&self) -> bool {
        self.route
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Text placed between the brackets of `angular.module(name, [...])`.
    pub fn render(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }
        format!("\n    {}\n  ", self.quoted().join(",\n    "))
    }
}
