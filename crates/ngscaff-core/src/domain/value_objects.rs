//! Domain value objects: Preprocessor, ScriptLanguage, AngularModule.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file defines the types, their string representations, and their
//! `FromStr` parsers. Anything that combines several of them lives on
//! `FeatureSelection`.
//!
//! # Adding a module to the checklist
//!
//! 1. Add the variant to [`AngularModule`] (declaration order is injection order)
//! 2. Add it to [`AngularModule::ALL`]
//! 3. Fill in the `package`, `description`, `injection_token` and
//!    `primary_asset` arms

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Preprocessor ─────────────────────────────────────────────────────────────

/// CSS preprocessor offered in the second prompt step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocessor {
    #[default]
    None,
    Compass,
    Less,
}

impl Preprocessor {
    pub const ALL: [Preprocessor; 3] = [Self::None, Self::Compass, Self::Less];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Compass => "compass",
            Self::Less => "less",
        }
    }

    /// Label shown in the single-choice list.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Compass => "Sass (with Compass)",
            Self::Less => "Less",
        }
    }

    /// Extension of the generated main stylesheet.
    pub const fn style_extension(&self) -> &'static str {
        match self {
            Self::None => "css",
            Self::Compass => "scss",
            Self::Less => "less",
        }
    }

    /// Dependency marker recorded when this preprocessor is chosen.
    ///
    /// The marker gates the UI-framework variant questions.
    pub const fn node_module(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Compass => Some("compass"),
            Self::Less => Some("less"),
        }
    }

    /// Grunt plugin added to `package.json` for this preprocessor.
    pub const fn build_plugin(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Compass => Some("grunt-contrib-compass"),
            Self::Less => Some("grunt-contrib-less"),
        }
    }
}

impl fmt::Display for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preprocessor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "compass" | "sass" | "scss" => Ok(Self::Compass),
            "less" => Ok(Self::Less),
            other => Err(DomainError::InvalidSelection(format!(
                "unknown preprocessor: {other}"
            ))),
        }
    }
}

// ── ScriptLanguage ───────────────────────────────────────────────────────────

/// Output language of generated scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    #[default]
    JavaScript,
    CoffeeScript,
}

impl ScriptLanguage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::CoffeeScript => "coffeescript",
        }
    }

    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::CoffeeScript => "coffee",
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptLanguage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Self::JavaScript),
            "coffeescript" | "coffee" => Ok(Self::CoffeeScript),
            other => Err(DomainError::InvalidSelection(format!(
                "unknown script language: {other}"
            ))),
        }
    }
}

// ── AngularModule ────────────────────────────────────────────────────────────

/// An optional framework module from the checklist step.
///
/// Variant order is the injection order. `Ord` is derived, so any sorted
/// collection of modules iterates in that order regardless of how the
/// checklist answers arrived.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AngularModule {
    Animate,
    Cookies,
    Resource,
    Route,
    Sanitize,
    Touch,
    Messages,
    Aria,
    Material,
    I18n,
    Loader,
}

impl AngularModule {
    /// Checklist order.
    pub const ALL: [AngularModule; 11] = [
        Self::Animate,
        Self::Cookies,
        Self::Resource,
        Self::Route,
        Self::Sanitize,
        Self::Touch,
        Self::I18n,
        Self::Loader,
        Self::Messages,
        Self::Aria,
        Self::Material,
    ];

    /// Package name in the component registry.
    pub const fn package(&self) -> &'static str {
        match self {
            Self::Animate => "angular-animate",
            Self::Cookies => "angular-cookies",
            Self::Resource => "angular-resource",
            Self::Route => "angular-route",
            Self::Sanitize => "angular-sanitize",
            Self::Touch => "angular-touch",
            Self::Messages => "angular-messages",
            Self::Aria => "angular-aria",
            Self::Material => "angular-material",
            Self::I18n => "angular-i18n",
            Self::Loader => "angular-loader",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Animate => {
                "provides support for JavaScript, CSS3 transition and CSS3 keyframe animation hooks"
            }
            Self::Cookies => "provides a convenient wrapper for reading and writing browser cookies",
            Self::Resource => "provides interaction support with RESTful services",
            Self::Route => "provides routing and deeplinking services and directives",
            Self::Sanitize => "provides functionality to sanitize HTML",
            Self::Touch => "provides touch events and other helpers for touch-enabled devices",
            Self::Messages => "provides enhanced support for displaying messages within templates",
            Self::Aria => "provides support for adding aria tags",
            Self::Material => "Material design for Angular",
            Self::I18n => "internationalization module for AngularJS",
            Self::Loader => "initialize Angular manually",
        }
    }

    /// Module name injected into the application module, if the package
    /// exposes one.
    pub const fn injection_token(&self) -> Option<&'static str> {
        match self {
            Self::Animate => Some("ngAnimate"),
            Self::Cookies => Some("ngCookies"),
            Self::Resource => Some("ngResource"),
            Self::Route => Some("ngRoute"),
            Self::Sanitize => Some("ngSanitize"),
            Self::Touch => Some("ngTouch"),
            Self::Messages => Some("ngMessages"),
            Self::Aria => Some("ngAria"),
            Self::Material => Some("ngMaterial"),
            Self::I18n | Self::Loader => None,
        }
    }

    /// Main distributable, relative to the components directory.
    pub const fn primary_asset(&self) -> Option<&'static str> {
        match self {
            Self::Animate => Some("angular-animate/angular-animate.js"),
            Self::Cookies => Some("angular-cookies/angular-cookies.js"),
            Self::Resource => Some("angular-resource/angular-resource.js"),
            Self::Route => Some("angular-route/angular-route.js"),
            Self::Sanitize => Some("angular-sanitize/angular-sanitize.js"),
            Self::Touch => Some("angular-touch/angular-touch.js"),
            Self::Messages => Some("angular-messages/angular-messages.js"),
            Self::Aria => Some("angular-aria/angular-aria.js"),
            Self::Material => Some("angular-material/angular-material.js"),
            Self::Loader => Some("angular-loader/angular-loader.js"),
            // One file per locale; nothing to load by default.
            Self::I18n => None,
        }
    }
}

impl fmt::Display for AngularModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package())
    }
}

impl FromStr for AngularModule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let short = lower.strip_prefix("angular-").unwrap_or(&lower);
        Self::ALL
            .into_iter()
            .find(|m| m.package().trim_start_matches("angular-") == short)
            .ok_or_else(|| DomainError::InvalidSelection(format!("unknown module: {s}")))
    }
}
