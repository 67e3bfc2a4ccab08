//! Dependency installation through external package managers.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use ngscaff_core::{
    application::{ApplicationError, ports::DependencyInstaller},
    error::ScaffoldResult,
};

/// Commands run by default, in order.
pub const DEFAULT_INSTALL_COMMANDS: [&str; 2] = ["npm install", "bower install"];

/// Runs each configured command inside the project root.
///
/// Commands are split on whitespace; the first word is the program. The
/// first command that fails to start or exits non-zero stops the sequence.
#[derive(Debug, Clone)]
pub struct ProcessInstaller {
    commands: Vec<String>,
}

impl ProcessInstaller {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    async fn run_one(&self, root: &Path, command: &str) -> ScaffoldResult<()> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Ok(());
        };

        debug!(%command, root = %root.display(), "spawning");
        let output = Command::new(program)
            .args(parts)
            .current_dir(root)
            .output()
            .await
            .map_err(|e| ApplicationError::InstallFailed {
                reason: format!("failed to start `{command}`: {e}"),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ApplicationError::InstallFailed {
            reason: format!(
                "`{command}` exited with {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.lines().last().unwrap_or("no output")
            ),
        }
        .into())
    }
}

impl Default for ProcessInstaller {
    fn default() -> Self {
        Self::new(DEFAULT_INSTALL_COMMANDS.iter().map(|c| c.to_string()).collect())
    }
}

#[async_trait]
impl DependencyInstaller for ProcessInstaller {
    #[instrument(skip(self), fields(root = %root.display()))]
    async fn install(&self, root: &Path) -> ScaffoldResult<()> {
        for command in &self.commands {
            self.run_one(root, command).await?;
        }
        info!(commands = self.commands.len(), "dependencies installed");
        Ok(())
    }
}
