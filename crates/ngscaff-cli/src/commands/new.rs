//! Implementation of the `ngscaff new` command.
//!
//! Responsibility: resolve names and paths from arguments, configuration and
//! the target directory, wire the adapters into a [`Generator`], and display
//! the outcome. The question flow itself lives in `ngscaff-core`.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use ngscaff_adapters::{
    FilesystemTemplateLoader, HandlebarsRenderer, HttpRegistry, InMemoryStore, KarmaConfigurator,
    LocalFilesystem, ProcessInstaller, TemplateRouteGenerator, WorkspaceProbe,
};
use ngscaff_core::{
    domain::{DomainError, ResolvedComponent, naming},
    error::ScaffoldError,
    prelude::*,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::OutputManager,
    progress::SpinnerProgress,
};

/// Execute the `ngscaff new` command.
#[instrument(skip_all, fields(run_id = %uuid::Uuid::new_v4()))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let output_dir = resolve_output_dir(args.dir.as_deref())?;
    let app_name = resolve_app_name(args.name.as_deref(), &output_dir)?;
    let request = build_request(&args, &config, app_name, output_dir);
    debug!(?request, "generation request resolved");

    if !(args.skip_welcome_message || global.quiet) {
        print_welcome(&output)?;
    }

    let prompter = select_prompter(&args, &output)?;
    let generator = build_generator(&config, prompter, &output)?;

    output.header(&format!(
        "Generating '{}' in {}",
        request.app_name,
        request.output_dir.display()
    ))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .io_context(|| "Failed to start async runtime")?;
    let outcome = runtime.block_on(generator.generate(request))?;

    info!(
        files = outcome.files_written,
        components = outcome.context.components().len(),
        "generation finished"
    );

    print_summary(&outcome, &output)
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// `--dir`, else the current directory. The directory need not exist yet.
fn resolve_output_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    let cwd = std::env::current_dir().io_context(|| "Cannot read current directory")?;
    Ok(match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

/// The explicit name, else the output directory's last component. The name
/// must normalise to a non-empty identifier.
fn resolve_app_name(name: Option<&str>, output_dir: &Path) -> CliResult<String> {
    let raw = match name {
        Some(name) => name.to_string(),
        None => output_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| CliError::InvalidProjectName {
                name: output_dir.display().to_string(),
                reason: "cannot derive a name from this directory; pass NAME".into(),
            })?,
    };

    match naming::app_identifier(&raw) {
        Ok(_) => Ok(raw),
        Err(DomainError::InvalidProjectName { name, reason }) => {
            Err(CliError::InvalidProjectName { name, reason })
        }
        Err(other) => Err(CliError::Core(ScaffoldError::from(other))),
    }
}

/// Flags win over what the target directory says, which wins over config.
fn build_request(
    args: &NewArgs,
    config: &AppConfig,
    app_name: String,
    output_dir: PathBuf,
) -> GenerationRequest {
    let probe = WorkspaceProbe::detect(&output_dir, &config.generator.app_path);

    let script_language = if args.coffee {
        ScriptLanguage::CoffeeScript
    } else {
        probe.script_language.unwrap_or_else(|| {
            config
                .generator
                .script_language
                .parse()
                .unwrap_or_else(|_| {
                    warn!(
                        value = %config.generator.script_language,
                        "unknown script language in config; using JavaScript"
                    );
                    ScriptLanguage::JavaScript
                })
        })
    };

    let app_path = args
        .app_path
        .clone()
        .or(probe.app_path)
        .unwrap_or_else(|| config.generator.app_path.clone());

    GenerationRequest {
        app_name,
        app_suffix: args
            .app_suffix
            .clone()
            .unwrap_or_else(|| config.generator.app_suffix.clone()),
        app_path,
        output_dir,
        script_language,
        angular_version: args.angular_version.clone(),
        options: GenerationOptions {
            skip_install: args.skip_install || config.install.skip,
            skip_message: args.skip_message,
        },
        force: args.force,
    }
}

// ── Wiring ────────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn select_prompter(args: &NewArgs, output: &OutputManager) -> CliResult<Arc<dyn Prompter>> {
    if args.yes {
        return Ok(Arc::new(DefaultAnswers));
    }
    if !(std::io::stdin().is_terminal() && console::user_attended_stderr()) {
        output.warning("No terminal attached; answering every question with its default")?;
        return Ok(Arc::new(DefaultAnswers));
    }
    Ok(Arc::new(crate::prompt::DialoguerPrompter::new()))
}

#[cfg(not(feature = "interactive"))]
fn select_prompter(args: &NewArgs, _output: &OutputManager) -> CliResult<Arc<dyn Prompter>> {
    if args.yes {
        Ok(Arc::new(DefaultAnswers))
    } else {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

fn build_generator(
    config: &AppConfig,
    prompter: Arc<dyn Prompter>,
    output: &OutputManager,
) -> CliResult<Generator> {
    let store = Arc::new(InMemoryStore::with_builtin()?);
    if let Some(dir) = &config.templates.local_path {
        let templates = FilesystemTemplateLoader::new(dir)
            .load_all()
            .map_err(ScaffoldError::from)?;
        let count = TemplateService::new(store.clone()).apply_overrides(templates)?;
        debug!(count, dir = %dir.display(), "local templates loaded");
    }

    let renderer: Arc<dyn TemplateRenderer> = Arc::new(HandlebarsRenderer::new());
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let store: Arc<dyn TemplateStore> = store;

    let ports = GeneratorPorts {
        registry: Arc::new(HttpRegistry::new(
            config.registry.url.clone(),
            config.registry.search_size,
        )?),
        prompter,
        progress: Arc::new(SpinnerProgress::new(
            output.is_interactive_terminal() && std::io::stderr().is_terminal(),
        )),
        store: store.clone(),
        renderer: renderer.clone(),
        filesystem: filesystem.clone(),
        installer: Arc::new(ProcessInstaller::new(config.install.commands.clone())),
        test_runner: Arc::new(KarmaConfigurator::new(
            store.clone(),
            renderer.clone(),
            filesystem.clone(),
        )),
        routes: Arc::new(TemplateRouteGenerator::new(store, renderer, filesystem)),
    };

    Ok(Generator::new(ports, config.registry.lookup_timeout()))
}

// ── Display ───────────────────────────────────────────────────────────────────

fn print_welcome(output: &OutputManager) -> CliResult<()> {
    output.header("ngscaff - AngularJS application generator")?;
    output.print("Out of the box you get Bootstrap and a few AngularJS modules.")?;
    output.print("")?;
    Ok(())
}

/// Machine-readable outcome for `--output-format json`.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    app_name: &'a str,
    script_app_name: &'a str,
    output_dir: &'a Path,
    files_written: usize,
    components: &'a [ResolvedComponent],
    warnings: Vec<String>,
    notices: &'a [String],
}

fn print_summary(outcome: &GenerationOutcome, output: &OutputManager) -> CliResult<()> {
    let ctx = &outcome.context;
    let warnings = outcome.warnings();

    output.json(&Summary {
        app_name: ctx.app_name(),
        script_app_name: ctx.script_app_name(),
        output_dir: ctx.output_dir(),
        files_written: outcome.files_written,
        components: ctx.components(),
        warnings: warnings.clone(),
        notices: &outcome.post.notices,
    })?;

    output.success(&format!(
        "Created '{}' ({} files, module {})",
        ctx.app_name(),
        outcome.files_written,
        ctx.script_app_name()
    ))?;

    for component in ctx.components() {
        output.info(&format!(
            "  {} {} -> {}",
            component.name(),
            component.version(),
            component.primary_asset()
        ))?;
    }

    for warning in &warnings {
        output.warning(warning)?;
    }

    for notice in &outcome.post.notices {
        output.print("")?;
        output.print(notice)?;
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
