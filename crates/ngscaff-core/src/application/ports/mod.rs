//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `ngscaff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore` / `TemplateRenderer`: Template storage and rendering
//!   - `RegistryClient`: Package info and search
//!   - `Prompter` / `ProgressIndicator`: Terminal interaction
//!   - `DependencyInstaller`, `TestRunnerConfigurator`, `RouteGenerator`:
//!     post-generation collaborators
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DefaultAnswers, DependencyInstaller, Filesystem, NoProgress, ProgressHandle,
    ProgressIndicator, Prompter, RegistryClient, RouteGenerator, RouteRequest,
    TEST_RUNNER_PLUGINS, TemplateRenderer, TemplateStore, TestRunnerConfigurator,
    TestRunnerOptions,
};

#[cfg(test)]
pub use output::{
    MockDependencyInstaller, MockFilesystem, MockPrompter, MockRegistryClient,
    MockRouteGenerator, MockTemplateRenderer, MockTemplateStore, MockTestRunnerConfigurator,
};
