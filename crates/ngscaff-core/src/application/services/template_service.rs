//! Template Service - template lookup and local overrides.
//!
//! Separated from ScaffoldService so the post-generation adapters and the CLI
//! can fetch or replace template sets without the write workflow.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    application::ports::TemplateStore,
    domain::{DomainValidator as validator, Template, TemplateId},
    error::ScaffoldResult,
};

pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    pub fn get(&self, id: &TemplateId) -> ScaffoldResult<Template> {
        self.store.get(id)
    }

    /// Add or replace a template set after validating it.
    pub fn save(&self, template: Template) -> ScaffoldResult<()> {
        validator::validate_template(&template)?;
        debug!(template = %template.id, "template saved");
        self.store.insert(template)
    }

    /// Register loaded overrides; a set with a built-in name replaces it.
    /// Returns how many were registered.
    pub fn apply_overrides(&self, templates: Vec<Template>) -> ScaffoldResult<usize> {
        let count = templates.len();
        for template in templates {
            self.save(template)?;
        }
        info!(count, "template overrides applied");
        Ok(count)
    }
}
