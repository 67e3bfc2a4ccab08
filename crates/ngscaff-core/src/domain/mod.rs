//! Domain layer: selections, components, templates and the rules tying them
//! together.
//!
//! Everything here is synchronous and free of I/O. Prompting, registry
//! access, rendering and writing live behind the ports in
//! [`crate::application::ports`].
//!
//! `FeatureSelection` and `GenerationContext` are read-only once built; the
//! manifest, the asset references and the injection tokens are derived from
//! them rather than stored.

pub mod entities;
pub mod error;
pub mod injection;
pub mod naming;
pub mod value_objects;

mod validation;

pub use entities::{
    common::RelativePath,
    component::{DEFAULT_MAIN, ExtraComponentRequest, PackageInfo, ResolvedComponent, SearchHit},
    context::{
        AssetReferences, BASE_MANIFEST, COMPONENTS_DIR, GenerationContext, GenerationOptions,
    },
    project_structure::{FileToWrite, ProjectStructure},
    selection::{FeatureSelection, FeatureSelectionBuilder, ModuleInjection},
    template::{FileCondition, RenderContext, Template, TemplateFile, TemplateId, TemplateSource},
};

pub use error::DomainError;
pub use injection::{ReferenceBlock, inject_references};
pub use value_objects::{AngularModule, Preprocessor, ScriptLanguage};

pub use validation::DomainValidator;
