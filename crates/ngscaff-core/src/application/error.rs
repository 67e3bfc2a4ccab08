//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Registry lookup or search failed.
    #[error("Registry request for '{package}' failed: {reason}")]
    Registry { package: String, reason: String },

    /// Registry lookup exceeded the configured deadline.
    #[error("Registry lookup for '{package}' timed out after {seconds}s")]
    RegistryTimeout { package: String, seconds: u64 },

    /// Search produced no results. Recovered by the component loop.
    #[error("No package matches '{term}'")]
    NotFound { term: String },

    /// Interactive prompt failed or was cancelled.
    #[error("Prompt failed: {reason}")]
    Prompt { reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Generated files would overwrite existing ones.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// Dependency installation command failed.
    #[error("Dependency installation failed: {reason}")]
    InstallFailed { reason: String },

    /// Test-runner configuration failed.
    #[error("Test runner configuration failed: {reason}")]
    TestRunnerFailed { reason: String },

    /// Auxiliary route generation failed.
    #[error("Route generation for '{route}' failed: {reason}")]
    RouteGenerationFailed { route: String, reason: String },

    /// Template set not found in the store.
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Registry { package, .. } => vec![
                format!("Could not reach the registry for '{}'", package),
                "Check your network connection or registry.url".into(),
                "Pass --angular-version to skip the version lookup".into(),
            ],
            Self::RegistryTimeout { .. } => vec![
                "The registry is slow to answer".into(),
                "Raise registry.lookup_timeout_secs, or set it to 0 to wait indefinitely".into(),
            ],
            Self::NotFound { term } => vec![
                format!("Nothing in the registry matches '{}'", term),
                "Try a shorter or different search term".into(),
            ],
            Self::Prompt { .. } => vec![
                "The interactive prompt could not be shown".into(),
                "Use --yes to accept every default without prompting".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Generated files already exist in {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different --dir".into(),
            ],
            Self::InstallFailed { .. } => vec![
                "Run `npm install & bower install` manually".into(),
                "Then inject your front end dependencies with `grunt wiredep`".into(),
            ],
            Self::TemplateNotFound { name } => vec![
                format!("No template named '{}'", name),
                "Check templates.local_path or remove it to use the built-in templates".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Registry { .. } | Self::RegistryTimeout { .. } => ErrorCategory::Network,
            Self::NotFound { .. } | Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::Prompt { .. } => ErrorCategory::Cancelled,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::InstallFailed { .. }
            | Self::TestRunnerFailed { .. }
            | Self::RouteGenerationFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
