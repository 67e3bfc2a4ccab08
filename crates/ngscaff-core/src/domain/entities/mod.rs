pub mod common;
pub mod component;
pub mod context;
pub mod project_structure;
pub mod selection;
pub mod template;

pub use crate::domain::DomainError;
pub use component::{ExtraComponentRequest, PackageInfo, ResolvedComponent, SearchHit};
pub use context::GenerationContext;
pub use project_structure::ProjectStructure;
pub use selection::FeatureSelection;
pub use template::{RenderContext, Template};
