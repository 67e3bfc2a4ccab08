//! Infrastructure adapters for ngscaff.
//!
//! This crate implements the ports defined in `ngscaff_core::application::ports`.
//! It contains all external dependencies and I/O operations: the npm-style
//! registry client, the handlebars renderer, filesystems, the package-manager
//! installer and the post-generation writers.

pub mod builtin_templates;
pub mod filesystem;
pub mod installer;
pub mod registry;
pub mod renderer;
pub mod route;
pub mod template_loader;
pub mod template_store;
pub mod test_runner;
pub mod workspace;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use installer::{DEFAULT_INSTALL_COMMANDS, ProcessInstaller};
pub use registry::{DEFAULT_REGISTRY_URL, DEFAULT_SEARCH_SIZE, HttpRegistry};
pub use renderer::HandlebarsRenderer;
pub use route::TemplateRouteGenerator;
pub use template_loader::FilesystemTemplateLoader;
pub use template_store::InMemoryStore;
pub use test_runner::KarmaConfigurator;
pub use workspace::WorkspaceProbe;
