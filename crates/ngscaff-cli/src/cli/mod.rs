//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "ngscaff",
    bin_name = "ngscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "AngularJS application scaffolding",
    long_about = "ngscaff asks a short series of questions (framework version, \
                  stylesheet preprocessor, UI framework, optional modules, extra \
                  registry components) and generates a ready-to-build AngularJS \
                  project with its test runner configured.",
    after_help = "EXAMPLES:\n\
        \x20 ngscaff new my-app\n\
        \x20 ngscaff new my-app --coffee --app-suffix Client\n\
        \x20 ngscaff new my-app --yes --skip-install --angular-version 1.3.0\n\
        \x20 ngscaff completions bash > /usr/share/bash-completion/completions/ngscaff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new AngularJS application.
    #[command(
        visible_alias = "n",
        about = "Generate a new application",
        after_help = "EXAMPLES:\n\
            \x20 ngscaff new                      # name from the current directory\n\
            \x20 ngscaff new shop --dir ./shop    # generate into ./shop\n\
            \x20 ngscaff new shop --yes           # accept every default"
    )]
    New(NewArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 ngscaff init           # platform config dir\n\
            \x20 ngscaff init --local   # .ngscaff.toml in CWD\n\
            \x20 ngscaff init --force   # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ngscaff completions bash > ~/.local/share/bash-completion/completions/ngscaff\n\
            \x20 ngscaff completions zsh  > ~/.zfunc/_ngscaff\n\
            \x20 ngscaff completions fish > ~/.config/fish/completions/ngscaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 ngscaff config get registry.url\n\
            \x20 ngscaff config list\n\
            \x20 ngscaff config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Application name; defaults to the target directory's name.
    #[arg(value_name = "NAME", help = "Application name")]
    pub name: Option<String>,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Directory to generate into (default: current directory)"
    )]
    pub dir: Option<PathBuf>,

    /// Appended to the name to form the script module name; an empty value
    /// disables the suffix.
    #[arg(
        long = "app-suffix",
        value_name = "SUFFIX",
        help = "Script module name suffix (default: App)"
    )]
    pub app_suffix: Option<String>,

    #[arg(
        long = "app-path",
        value_name = "PATH",
        help = "Application sub-directory (default: from bower.json, else app)"
    )]
    pub app_path: Option<String>,

    #[arg(long = "coffee", help = "Generate CoffeeScript instead of JavaScript")]
    pub coffee: bool,

    #[arg(
        long = "angular-version",
        value_name = "VERSION",
        help = "Framework version; skips the version question"
    )]
    pub angular_version: Option<String>,

    #[arg(long = "skip-install", help = "Do not run npm/bower install")]
    pub skip_install: bool,

    #[arg(long = "skip-welcome-message", help = "Do not print the welcome banner")]
    pub skip_welcome_message: bool,

    #[arg(long = "skip-message", help = "Do not print the installer's next steps")]
    pub skip_message: bool,

    #[arg(
        short = 'y',
        long = "yes",
        help = "Accept every default and skip extra components"
    )]
    pub yes: bool,

    #[arg(long = "force", help = "Generate into a non-empty directory")]
    pub force: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.ngscaff.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.url`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn new_without_name_is_accepted() {
        let cli = Cli::parse_from(["ngscaff", "new"]);
        match cli.command {
            Commands::New(args) => {
                assert!(args.name.is_none());
                assert!(!args.coffee);
            }
            other => panic!("expected New, got {other:?}"),
        }
    }

    #[test]
    fn new_parses_every_flag() {
        let cli = Cli::parse_from([
            "ngscaff",
            "new",
            "shop",
            "--dir",
            "/tmp/shop",
            "--app-suffix",
            "",
            "--app-path",
            "client",
            "--coffee",
            "--angular-version",
            "1.3.0",
            "--skip-install",
            "--skip-welcome-message",
            "--skip-message",
            "--yes",
            "--force",
        ]);
        let Commands::New(args) = cli.command else {
            panic!("expected New command");
        };
        assert_eq!(args.name.as_deref(), Some("shop"));
        assert_eq!(args.app_suffix.as_deref(), Some(""));
        assert_eq!(args.app_path.as_deref(), Some("client"));
        assert_eq!(args.angular_version.as_deref(), Some("1.3.0"));
        assert!(args.coffee && args.skip_install && args.skip_message && args.yes && args.force);
    }

    #[test]
    fn config_get_requires_key() {
        assert!(Cli::try_parse_from(["ngscaff", "config", "get"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["ngscaff", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
