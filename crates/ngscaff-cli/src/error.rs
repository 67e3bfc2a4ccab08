//! CLI error type, suggestions and exit codes.

use std::error::Error as _;
use std::fmt::{self, Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use ngscaff_core::error::{ErrorCategory as CoreCategory, ScaffoldError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid application name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Anything raised by `ngscaff-core` or an adapter.
    #[error("Generation failed: {0}")]
    Core(#[from] ScaffoldError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Interactive prompts requested in a build without the `interactive`
    /// feature.
    #[cfg_attr(feature = "interactive", allow(dead_code))]
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Coarse grouping that decides the exit code and log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Internal => 1,
        }
    }
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Cancelled => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Network | CoreCategory::Internal => Self::Internal,
        }
    }
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } | Self::FeatureNotAvailable { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(core) => core.category().into(),
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("'{name}' cannot be used: {reason}"),
                "Use letters and digits; separators are dropped".into(),
                "Examples: my-app, shop, admin_panel".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Check the config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Run 'ngscaff init --force' to write a fresh default config".into(),
            ],
            Self::Core(core) => {
                let mut hints = core.suggestions();
                if core.is_retryable() {
                    hints.push("The failure may be temporary; try again".into());
                }
                hints
            }
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::FeatureNotAvailable { feature } => vec![
                format!("Reinstall with: cargo install ngscaff-cli --features {feature}"),
                "Or run non-interactively with --yes".into(),
            ],
        }
    }

    /// Emit one structured event at a level matching the category.
    pub fn log(&self) {
        let category = self.category();
        let cause = self.source().map(ToString::to_string);
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, ?cause, "command failed");
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, ?cause, "command failed");
            }
        }
    }

    /// Displayable report with the cause chain (when `verbose`) and
    /// suggestions.
    pub fn report(&self, verbose: bool, color: bool) -> Report<'_> {
        Report {
            error: self,
            verbose,
            color,
        }
    }
}

/// Rendering of a [`CliError`] for stderr.
pub struct Report<'a> {
    error: &'a CliError,
    verbose: bool,
    color: bool,
}

impl Report<'_> {
    fn paint(&self, text: &str, style: fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_owned()
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        let heading = self.paint("Error:", |s| s.red().bold().to_string());
        writeln!(out, "\n{heading} {}", self.error)?;

        if self.verbose {
            let mut cause = self.error.source();
            while let Some(err) = cause {
                let line = format!("caused by: {err}");
                writeln!(out, "  {}", self.paint(&line, |s| s.dimmed().to_string()))?;
                cause = err.source();
            }
        }

        let suggestions = self.error.suggestions();
        if !suggestions.is_empty() {
            let title = self.paint("Suggestions:", |s| s.yellow().bold().to_string());
            writeln!(out, "\n{title}")?;
            for hint in &suggestions {
                writeln!(out, "  - {hint}")?;
            }
        }

        if !self.verbose {
            let hint = "Run again with -v for more details.";
            writeln!(out, "\n{}", self.paint(hint, |s| s.dimmed().to_string()))?;
        }

        f.write_str(&out)
    }
}

/// Attach a message to an I/O failure.
pub trait IoContext<T> {
    fn io_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<S: Into<String>>(self, message: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: message().into(),
            source,
        })
    }
}
