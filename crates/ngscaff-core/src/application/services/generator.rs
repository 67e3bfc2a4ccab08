//! Generator - the end-to-end `new` use case.
//!
//! ```text
//! naming ─▶ prompts ─▶ resolve ─▶ join ─▶ context ─▶ write ─▶ post-generation
//! ```
//!
//! The join is a barrier: the context is only assembled after every lookup
//! has completed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{
            DependencyInstaller, Filesystem, ProgressIndicator, Prompter, RegistryClient,
            RouteGenerator, TemplateRenderer, TemplateStore, TestRunnerConfigurator,
        },
        services::{
            aggregation::{AggregationJoin, JoinReport},
            orchestrator::{PostGenerationOrchestrator, PostGenerationReport},
            resolver::SelectionResolver,
            scaffold_service::ScaffoldService,
            sequencer::{PromptPreset, PromptSequencer},
        },
    },
    domain::{GenerationContext, GenerationOptions, ScriptLanguage, naming},
    error::ScaffoldResult,
};

/// Inputs of one generation run, already merged from flags and config.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Raw name; normalized to a camel-case identifier.
    pub app_name: String,
    pub app_suffix: String,
    pub app_path: String,
    pub output_dir: PathBuf,
    pub script_language: ScriptLanguage,
    /// Pre-answers the version question.
    pub angular_version: Option<String>,
    pub options: GenerationOptions,
    pub force: bool,
}

/// Every collaborator the pipeline needs.
#[derive(Clone)]
pub struct GeneratorPorts {
    pub registry: Arc<dyn RegistryClient>,
    pub prompter: Arc<dyn Prompter>,
    pub progress: Arc<dyn ProgressIndicator>,
    pub store: Arc<dyn TemplateStore>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub filesystem: Arc<dyn Filesystem>,
    pub installer: Arc<dyn DependencyInstaller>,
    pub test_runner: Arc<dyn TestRunnerConfigurator>,
    pub routes: Arc<dyn RouteGenerator>,
}

#[derive(Debug)]
pub struct GenerationOutcome {
    pub context: GenerationContext,
    pub files_written: usize,
    pub join: JoinReport,
    pub post: PostGenerationReport,
}

impl GenerationOutcome {
    /// Lookup failures and failed post-generation actions, for display.
    pub fn warnings(&self) -> Vec<String> {
        self.join
            .failures
            .iter()
            .map(|f| format!("component '{}' skipped: {}", f.name, f.error))
            .chain(self.post.warnings())
            .collect()
    }
}

pub struct Generator {
    sequencer: PromptSequencer,
    join: AggregationJoin,
    scaffold: ScaffoldService,
    orchestrator: PostGenerationOrchestrator,
    progress: Arc<dyn ProgressIndicator>,
}

impl Generator {
    /// `lookup_timeout` of `None` or zero waits indefinitely.
    pub fn new(ports: GeneratorPorts, lookup_timeout: Option<Duration>) -> Self {
        Self {
            sequencer: PromptSequencer::new(
                ports.registry.clone(),
                ports.prompter,
                ports.progress.clone(),
            ),
            join: AggregationJoin::new(ports.registry, lookup_timeout),
            scaffold: ScaffoldService::new(ports.store, ports.renderer, ports.filesystem.clone()),
            orchestrator: PostGenerationOrchestrator::new(
                ports.test_runner,
                ports.installer,
                ports.routes,
                ports.filesystem,
            ),
            progress: ports.progress,
        }
    }

    #[instrument(skip_all, fields(app = %request.app_name, dir = %request.output_dir.display()))]
    pub async fn generate(&self, request: GenerationRequest) -> ScaffoldResult<GenerationOutcome> {
        let app_name = naming::app_identifier(&request.app_name)?;
        let script_app_name = naming::script_app_name(&app_name, &request.app_suffix);
        info!(%app_name, %script_app_name, "names resolved");

        let answers = self
            .sequencer
            .run(PromptPreset {
                angular_version: request.angular_version,
            })
            .await?;
        let resolution = SelectionResolver::resolve(&answers, request.script_language)?;

        let join = {
            let _progress = match answers.extra_components.len() {
                0 => None,
                n => Some(self.progress.start(&format!("Resolving {n} components"))),
            };
            self.join.resolve_all(&answers.extra_components).await
        };
        for failure in &join.failures {
            warn!(component = %failure.name, error = %failure.error, "component excluded");
        }

        let context = GenerationContext::new(
            app_name,
            script_app_name,
            request.app_path,
            request.output_dir,
            resolution.selection,
            resolution.injection,
            join.resolved.clone(),
            request.options,
        );

        let structure = self.scaffold.scaffold(&context, request.force)?;
        let post = self.orchestrator.run(&context).await;

        info!(
            files = structure.len(),
            components = context.components().len(),
            "generation finished"
        );
        Ok(GenerationOutcome {
            files_written: structure.len(),
            context,
            join,
            post,
        })
    }
}
