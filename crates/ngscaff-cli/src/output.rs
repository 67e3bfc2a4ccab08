//! User-facing stdout lines.
//!
//! Logs and errors go to stderr; this module only writes results. In JSON
//! mode the only stdout line is the summary passed to [`OutputManager::json`].

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins over `output.format` in config; `auto`
    /// becomes human on a terminal and plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match (args.output_format, parse_format(&config.output.format)) {
            (OutputFormat::Auto, OutputFormat::Auto) if io::stdout().is_terminal() => {
                OutputFormat::Human
            }
            (OutputFormat::Auto, OutputFormat::Auto) => OutputFormat::Plain,
            (OutputFormat::Auto, configured) => configured,
            (flag, _) => flag,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn suppressed(&self) -> bool {
        self.quiet || self.format == OutputFormat::Json
    }

    fn line(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(text)
    }

    /// `<mark> <msg>`, both tinted with `color` unless colours are off.
    fn marked(&self, mark: char, color: AnsiColors, msg: &str) -> io::Result<()> {
        if self.no_color {
            self.line(&format!("{mark} {msg}"))
        } else {
            self.line(&format!(
                "{} {}",
                mark.color(color).bold(),
                msg.color(color)
            ))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', AnsiColors::Green, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', AnsiColors::Yellow, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', AnsiColors::Blue, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.line(text)
        } else {
            self.line(&text.cyan().bold().to_string())
        }
    }

    /// Emit `value` as one JSON line; a no-op outside JSON mode.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        if self.format != OutputFormat::Json {
            return Ok(());
        }
        let line = serde_json::to_string(value).map_err(io::Error::other)?;
        self.term.write_line(&line)
    }

    /// Whether spinners may draw: human output on a terminal.
    pub fn is_interactive_terminal(&self) -> bool {
        self.format == OutputFormat::Human && self.term.is_term()
    }
}

fn parse_format(value: &str) -> OutputFormat {
    match value.to_ascii_lowercase().as_str() {
        "human" => OutputFormat::Human,
        "plain" => OutputFormat::Plain,
        "json" => OutputFormat::Json,
        _ => OutputFormat::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(quiet: bool, no_color: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format,
        }
    }

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        OutputManager::new(&args(quiet, no_color, format), &AppConfig::default())
    }

    #[test]
    fn quiet_writes_nothing_and_succeeds() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.success("done").is_ok());
        assert!(out.suppressed());
    }

    #[test]
    fn only_human_output_is_coloured() {
        assert!(manager(false, false, OutputFormat::Plain).no_color);
        assert!(manager(false, false, OutputFormat::Json).no_color);
        assert!(!manager(false, false, OutputFormat::Human).no_color);
        assert!(manager(false, true, OutputFormat::Human).no_color);
    }

    #[test]
    fn json_mode_suppresses_text_lines() {
        assert!(manager(false, true, OutputFormat::Json).suppressed());
        assert!(!manager(false, true, OutputFormat::Plain).suppressed());
    }

    #[test]
    fn flag_beats_configured_format() {
        let mut config = AppConfig::default();
        config.output.format = "plain".into();
        let out = OutputManager::new(&args(false, true, OutputFormat::Json), &config);
        assert_eq!(out.format, OutputFormat::Json);
    }

    #[test]
    fn configured_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "JSON".into();
        let out = OutputManager::new(&args(false, true, OutputFormat::Auto), &config);
        assert_eq!(out.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_configured_format_is_auto() {
        assert_eq!(parse_format("fancy"), OutputFormat::Auto);
    }
}
