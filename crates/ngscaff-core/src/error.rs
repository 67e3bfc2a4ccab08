//! The crate-wide error type.
//!
//! Every port returns [`ScaffoldResult`]. Errors carry a coarse
//! [`ErrorCategory`] and user-facing suggestions so front ends can render
//! them without matching on individual variants.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScaffoldError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// An adapter could not be set up, e.g. an unusable registry URL.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type ScaffoldResult<T> = Result<T, ScaffoldError>;

/// How a failure should be presented and which exit status it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Network,
    Cancelled,
    Configuration,
    Internal,
}

impl ScaffoldError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check the registry settings in your configuration".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
        }
    }

    /// Transient failures worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::StoreLockError
                    | ApplicationError::Registry { .. }
                    | ApplicationError::RegistryTimeout { .. }
            )
        )
    }
}
