//! Application layer for ngscaff.
//!
//! This layer contains:
//! - **Services**: prompt sequencing, selection resolution, the aggregation
//!   join, scaffolding and the post-generation orchestrator
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GenerationOutcome, GenerationRequest, Generator, GeneratorPorts, ScaffoldService,
    TemplateService,
};

pub use ports::{Filesystem, RegistryClient, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
