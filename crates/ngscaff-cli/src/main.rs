//! `ngscaff`: generate AngularJS applications from the command line.
//!
//! `main` owns process concerns only: `.env`, argument parsing, the tracing
//! subscriber, and turning a [`CliError`] into stderr text plus an exit code
//! (0 ok, 1 internal, 2 user error, 3 not found, 4 configuration).
//! Everything else happens in [`start`] and the command modules.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod progress;
#[cfg(feature = "interactive")]
mod prompt;

fn main() -> ExitCode {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with exit code 0.
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("ngscaff: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && std::io::stderr().is_terminal();

    match start(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.report(verbose, color));
            ExitCode::from(err.exit_code())
        }
    }
}

/// Load configuration and run the selected subcommand.
fn start(cli: Cli) -> CliResult<()> {
    debug!(global = ?cli.global, "arguments parsed");

    let config =
        AppConfig::load(cli.global.config.as_ref()).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?;
    let output = OutputManager::new(&cli.global, &config);

    match cli.command {
        Commands::New(args) => commands::new::execute(args, cli.global, config, output)?,
        Commands::Init(args) => commands::init::execute(args, output)?,
        Commands::Completions(args) => commands::completions::execute(args)?,
        Commands::Config(cmd) => commands::config::execute(cmd, config, output)?,
    }

    info!("done");
    Ok(())
}
