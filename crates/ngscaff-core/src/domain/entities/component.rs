//! Registry-facing entities: package metadata, search hits, requested and
//! resolved extra components.

use serde::{Deserialize, Serialize};

/// Main file assumed when a package does not declare one.
pub const DEFAULT_MAIN: &str = "index.js";

/// Metadata returned by a registry info lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    pub latest_version: String,
    /// All published versions, newest first.
    pub versions: Vec<String>,
    /// Main distributable of the latest version, relative to the package.
    pub main: Option<String>,
}

impl PackageInfo {
    /// Versions offered in the version prompt: latest first, then every
    /// version without a "build" marker.
    pub fn selectable_versions(&self) -> Vec<String> {
        std::iter::once(self.latest_version.clone())
            .chain(
                self.versions
                    .iter()
                    .filter(|v| !v.contains("build") && **v != self.latest_version)
                    .cloned(),
            )
            .collect()
    }
}

/// One result of a registry search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub url: String,
}

/// Extra package names collected by the component loop, in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraComponentRequest {
    names: Vec<String>,
}

impl ExtraComponentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExtraComponentRequest {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A requested package confirmed against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedComponent {
    name: String,
    version: String,
    primary_asset: String,
}

impl ResolvedComponent {
    /// Build from a lookup of `requested`.
    ///
    /// The asset path is `<name>/<main>` with any leading `./` dropped from
    /// `main`.
    pub fn from_info(requested: &str, info: &PackageInfo) -> Self {
        let main = info
            .main
            .as_deref()
            .map(|m| m.trim_start_matches("./"))
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MAIN);

        Self {
            name: requested.to_string(),
            version: info.latest_version.clone(),
            primary_asset: format!("{requested}/{main}"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path relative to the components directory.
    pub fn primary_asset(&self) -> &str {
        &self.primary_asset
    }
}
