//! ngscaff Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the ngscaff AngularJS project
//! generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           ngscaff-cli (CLI)             │
//! │  (clap, config, dialoguer, indicatif)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Sequencer → Resolver → Join → Scaffold │
//! │        → Post-Generation Orchestrator   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │  Registry, Prompter, Store, Filesystem  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    ngscaff-adapters (Infrastructure)    │
//! │ HttpRegistry, HandlebarsRenderer, etc.  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ FeatureSelection, GenerationContext, …  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ngscaff_core::prelude::*;
//!
//! let generator = Generator::new(ports, Some(Duration::from_secs(30)));
//! let outcome = generator.generate(request).await?;
//! for warning in outcome.warnings() {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationOutcome, GenerationRequest, Generator, GeneratorPorts, TemplateService,
        ports::{
            DefaultAnswers, DependencyInstaller, Filesystem, NoProgress, ProgressHandle,
            ProgressIndicator, Prompter, RegistryClient, RouteGenerator, RouteRequest,
            TemplateRenderer, TemplateStore, TestRunnerConfigurator, TestRunnerOptions,
        },
    };
    pub use crate::domain::{
        GenerationContext, GenerationOptions, PackageInfo, Preprocessor, ProjectStructure,
        RenderContext, ScriptLanguage, SearchHit, Template, TemplateFile, TemplateId,
    };
    pub use crate::error::{ScaffoldError, ScaffoldResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
