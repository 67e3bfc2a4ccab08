use crate::domain::{
    entities::{FeatureSelection, ProjectStructure, Template},
    error::DomainError,
    value_objects::Preprocessor,
};

/// Centralized domain validation.
///
/// Construction already enforces most invariants; these checks run again at
/// the boundaries where data crosses into rendering and writing.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_selection(selection: &FeatureSelection) -> Result<(), DomainError> {
        let variant = selection.compass_bootstrap() || selection.less_bootstrap();
        if variant && (!selection.bootstrap() || selection.preprocessor() == Preprocessor::None) {
            return Err(DomainError::InvalidSelection(
                "Bootstrap variant without Bootstrap and a preprocessor".into(),
            ));
        }
        Ok(())
    }

    pub fn validate_template(template: &Template) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
