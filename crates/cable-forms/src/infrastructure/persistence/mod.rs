//! In-memory repository implementations for testing

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::{Form, Template};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;
use crate::ports::outbound::{
    ApproverDirectory, EventPublisher, FormRepository, RepositoryError, TemplateRepository,
};

/// In-memory form repository (for testing)
#[derive(Default)]
pub struct InMemoryFormRepository {
    forms: DashMap<String, Form>,
}

impl InMemoryFormRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for InMemoryFormRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError> {
        Ok(self.forms.get(id.as_str()).map(|f| f.clone()))
    }

    async fn find_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Form>, RepositoryError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.forms.get(id.as_str()).map(|f| f.clone()))
            .collect())
    }

    async fn count_active(&self, ids: &[EntityId]) -> Result<u64, RepositoryError> {
        Ok(ids
            .iter()
            .filter(|id| {
                self.forms
                    .get(id.as_str())
                    .map_or(false, |f| f.status().is_active() && f.is_active())
            })
            .count() as u64)
    }

    async fn count_existing(&self, ids: &[EntityId]) -> Result<u64, RepositoryError> {
        Ok(ids
            .iter()
            .filter(|id| self.forms.get(id.as_str()).map_or(false, |f| f.is_active()))
            .count() as u64)
    }

    async fn save(&self, form: &Form) -> Result<(), RepositoryError> {
        self.forms.insert(form.id().to_string(), form.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.forms.remove(id.as_str());
        Ok(())
    }
}

/// In-memory template repository (for testing)
///
/// Enforces the storage-layer constraint: template names are unique
/// case-insensitively among non-soft-deleted templates.
#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: DashMap<String, Template>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Template>, RepositoryError> {
        Ok(self.templates.get(id.as_str()).map(|t| t.clone()))
    }

    async fn find_by_name_ci(&self, name: &str) -> Result<Option<Template>, RepositoryError> {
        let needle = name.to_lowercase();
        Ok(self
            .templates
            .iter()
            .find(|entry| {
                entry.value().is_active()
                    && entry.value().template_name().to_lowercase() == needle
            })
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, template: &Template) -> Result<(), RepositoryError> {
        if template.is_active() {
            let needle = template.template_name().to_lowercase();
            let clash = self.templates.iter().any(|entry| {
                entry.key() != template.id().as_str()
                    && entry.value().is_active()
                    && entry.value().template_name().to_lowercase() == needle
            });
            if clash {
                return Err(RepositoryError::DuplicateKey(
                    template.template_name().to_string(),
                ));
            }
        }
        self.templates
            .insert(template.id().to_string(), template.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError> {
        self.templates.remove(id.as_str());
        Ok(())
    }
}

/// In-memory approver directory (for testing)
#[derive(Default)]
pub struct InMemoryApproverDirectory {
    users: DashMap<String, ()>,
}

impl InMemoryApproverDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: &EntityId) {
        self.users.insert(id.to_string(), ());
    }
}

#[async_trait]
impl ApproverDirectory for InMemoryApproverDirectory {
    async fn exists(&self, id: &EntityId) -> Result<bool, RepositoryError> {
        Ok(self.users.contains_key(id.as_str()))
    }
}

/// No-op event publisher for testing
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        // No-op for testing
        Ok(())
    }
}
