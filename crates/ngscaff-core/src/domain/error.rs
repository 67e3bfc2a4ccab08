//! Errors raised by pure domain logic.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Rule violations found without touching any port. `Clone` so failures can
/// be carried in post-generation reports.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Duplicate path in project structure: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the project root: {path}")]
    ParentTraversal { path: String },

    /// The main document lacks a `<!-- marker -->` injection block.
    #[error("Marker '<!-- {marker} -->' not found in document")]
    MarkerNotFound { marker: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSelection(detail) => vec![
                "The chosen feature combination is not allowed".into(),
                format!("Details: {detail}"),
            ],
            Self::InvalidProjectName { name, .. } => vec![
                format!("'{name}' does not normalize to a usable identifier"),
                "Use letters and digits, e.g. my-app or MyApp".into(),
            ],
            Self::MarkerNotFound { marker } => vec![
                format!("The main document has no '<!-- {marker} -->' block"),
                "Run `grunt wiredep` after restoring the marker comments".into(),
            ],
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::ParentTraversal { .. }
            | Self::MissingRequiredField { .. } => vec![
                "The template set is corrupted".into(),
                "Check templates.local_path or remove it to use the built-in templates".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSelection(_) | Self::InvalidProjectName { .. } => {
                ErrorCategory::Validation
            }
            Self::MarkerNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::ParentTraversal { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}
