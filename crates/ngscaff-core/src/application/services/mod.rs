//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports. [`Generator`] wires them
//! into the full `new` pipeline; the others are usable on their own.

pub mod aggregation;
pub mod generator;
pub mod orchestrator;
pub mod resolver;
pub mod scaffold_service;
pub mod sequencer;
pub mod template_service;

pub use aggregation::{AggregationJoin, JoinReport, LookupFailure};
pub use generator::{GenerationOutcome, GenerationRequest, Generator, GeneratorPorts};
pub use orchestrator::{
    ActionOutcome, DEFAULT_ROUTE, MANUAL_INSTALL_HINT, PostGenerationOrchestrator,
    PostGenerationReport,
};
pub use resolver::{Resolution, SelectionResolver};
pub use scaffold_service::{APP_TEMPLATE, ScaffoldService};
pub use sequencer::{
    Answers, FRAMEWORK_PACKAGE, LoopState, PromptPreset, PromptSequencer, STEPS, Step, questions,
};
pub use template_service::TemplateService;
