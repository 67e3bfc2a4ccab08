//! Terminal spinner for registry lookups.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use ngscaff_core::prelude::{ProgressHandle, ProgressIndicator};

/// Draws an indicatif spinner on stderr while a handle is alive.
///
/// A hidden spinner is used when drawing is disabled, so callers never
/// branch on it.
#[derive(Debug, Clone, Copy)]
pub struct SpinnerProgress {
    visible: bool,
}

impl SpinnerProgress {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|e| {
                tracing::debug!(error = %e, "spinner template rejected");
                ProgressStyle::default_spinner()
            });
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

impl ProgressIndicator for SpinnerProgress {
    fn start(&self, message: &str) -> ProgressHandle {
        let spinner = self.spinner(message);
        ProgressHandle::new(move || spinner.finish_and_clear())
    }
}
