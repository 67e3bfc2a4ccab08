//! npm-compatible registry client over HTTP.
//!
//! - info:   `GET {base}/{name}` (packument: `dist-tags`, `versions`, `main`)
//! - search: `GET {base}/-/v1/search?text={term}&size={n}`

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use ngscaff_core::{
    application::{ApplicationError, ports::RegistryClient},
    domain::{PackageInfo, SearchHit},
    error::{ScaffoldError, ScaffoldResult},
};

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_SEARCH_SIZE: usize = 20;

#[derive(Debug, Deserialize)]
struct Packument {
    name: String,
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    #[serde(default)]
    versions: HashMap<String, VersionManifest>,
}

#[derive(Debug, Deserialize)]
struct VersionManifest {
    /// Usually a string; some legacy manifests use a list.
    #[serde(default)]
    main: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    objects: Vec<SearchObject>,
}

#[derive(Debug, Deserialize)]
struct SearchObject {
    package: SearchPackage,
}

#[derive(Debug, Deserialize)]
struct SearchPackage {
    name: String,
    #[serde(default)]
    links: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: Client,
    base_url: String,
    search_size: usize,
}

impl HttpRegistry {
    pub fn new(base_url: impl Into<String>, search_size: usize) -> ScaffoldResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("ngscaff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScaffoldError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            search_size: search_size.max(1),
        })
    }

    /// Scoped names keep their `@` but the slash is encoded.
    fn package_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.replace('/', "%2F"))
    }

    fn registry_error(package: &str, reason: impl Into<String>) -> ScaffoldError {
        ApplicationError::Registry {
            package: package.to_string(),
            reason: reason.into(),
        }
        .into()
    }
}

#[async_trait]
impl RegistryClient for HttpRegistry {
    #[instrument(skip(self), fields(registry = %self.base_url))]
    async fn info(&self, name: &str) -> ScaffoldResult<PackageInfo> {
        let response = self
            .client
            .get(self.package_url(name))
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| Self::registry_error(name, e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(Self::registry_error(name, "package not found")),
            status if !status.is_success() => {
                return Err(Self::registry_error(name, format!("HTTP {status}")));
            }
            _ => {}
        }

        let packument: Packument = response
            .json()
            .await
            .map_err(|e| Self::registry_error(name, format!("invalid response: {e}")))?;

        let info = to_package_info(packument)
            .ok_or_else(|| Self::registry_error(name, "no published versions"))?;
        debug!(latest = %info.latest_version, versions = info.versions.len(), "package info");
        Ok(info)
    }

    #[instrument(skip(self), fields(registry = %self.base_url))]
    async fn search(&self, term: &str) -> ScaffoldResult<Vec<SearchHit>> {
        let response = self
            .client
            .get(format!("{}/-/v1/search", self.base_url))
            .query(&[
                ("text", term.to_string()),
                ("size", self.search_size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Self::registry_error(term, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::registry_error(
                term,
                format!("HTTP {}", response.status()),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| Self::registry_error(term, format!("invalid response: {e}")))?;

        let hits: Vec<SearchHit> = body
            .objects
            .into_iter()
            .map(|o| {
                let links = &o.package.links;
                let url = ["repository", "homepage", "npm"]
                    .iter()
                    .find_map(|k| links.get(*k))
                    .cloned()
                    .unwrap_or_default();
                SearchHit {
                    name: o.package.name,
                    url,
                }
            })
            .collect();
        debug!(hits = hits.len(), "search completed");
        Ok(hits)
    }
}

/// Versions newest first by semver; strings that do not parse go last.
fn sort_versions(versions: impl IntoIterator<Item = String>) -> Vec<String> {
    let (mut valid, mut invalid): (Vec<_>, Vec<_>) = versions
        .into_iter()
        .map(|v| (semver::Version::parse(&v).ok(), v))
        .partition(|(parsed, _)| parsed.is_some());

    valid.sort_by(|(a, _), (b, _)| b.cmp(a));
    invalid.sort_by(|(_, a), (_, b)| a.cmp(b));
    valid.into_iter().chain(invalid).map(|(_, v)| v).collect()
}

fn to_package_info(mut packument: Packument) -> Option<PackageInfo> {
    let latest = match packument.dist_tags.remove("latest") {
        Some(latest) => latest,
        None => sort_versions(packument.versions.keys().cloned())
            .into_iter()
            .next()?,
    };

    let main = packument
        .versions
        .get(&latest)
        .and_then(|m| m.main.as_ref())
        .and_then(|main| match main {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.first().and_then(|v| v.as_str()).map(String::from),
            _ => None,
        })
        .filter(|s| !s.is_empty());

    Some(PackageInfo {
        name: packument.name,
        latest_version: latest,
        versions: sort_versions(packument.versions.into_keys()),
        main,
    })
}
