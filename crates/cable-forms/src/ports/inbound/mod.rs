//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces. The HTTP layer
//! talks to these and renders `UseCaseError` as a 4xx body with either the
//! plain string list or the structured activation error list.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::{CreateFormCommand, CreateTemplateCommand, TemplateStats};
use crate::domain::aggregates::{Form, Template};
use crate::domain::services::ActivationError;
use crate::domain::value_objects::{EntityId, EntityStatus, FieldConfig};

/// Form management use cases
#[async_trait]
pub trait FormUseCases: Send + Sync {
    /// Create a new form
    async fn create_form(&self, command: CreateFormCommand) -> Result<Form, UseCaseError>;

    /// Replace a form's field array (the builder saves wholesale)
    async fn replace_fields(
        &self,
        form_id: &EntityId,
        fields: Vec<FieldConfig>,
    ) -> Result<Form, UseCaseError>;

    /// Toggle a form's publication status
    async fn set_form_status(
        &self,
        form_id: &EntityId,
        status: EntityStatus,
    ) -> Result<Form, UseCaseError>;

    /// Rename a form
    async fn rename_form(&self, form_id: &EntityId, form_name: &str) -> Result<Form, UseCaseError>;

    /// Soft-delete a form
    async fn soft_delete_form(&self, form_id: &EntityId) -> Result<Form, UseCaseError>;

    /// Get form by ID
    async fn get_form(&self, id: &EntityId) -> Result<Option<Form>, UseCaseError>;
}

/// Template management use cases
#[async_trait]
pub trait TemplateUseCases: Send + Sync {
    /// Create a new template
    async fn create_template(&self, command: CreateTemplateCommand)
        -> Result<Template, UseCaseError>;

    /// Replace a template's form references
    async fn set_forms(
        &self,
        template_id: &EntityId,
        forms: Vec<EntityId>,
    ) -> Result<Template, UseCaseError>;

    /// Change a template's approver
    async fn set_approver(
        &self,
        template_id: &EntityId,
        approver: EntityId,
    ) -> Result<Template, UseCaseError>;

    /// Toggle a template's publication status
    async fn set_template_status(
        &self,
        template_id: &EntityId,
        status: EntityStatus,
    ) -> Result<Template, UseCaseError>;

    /// Run the activation check and, on success, persist the transition
    async fn activate_template(&self, template_id: &EntityId) -> Result<Template, UseCaseError>;

    /// Re-derive a template's status against the referenced forms' current
    /// state and persist the result. The persisted status is a cache; this
    /// is how a stale active status catches up with a deactivated form.
    async fn refresh_template(&self, template_id: &EntityId) -> Result<Template, UseCaseError>;

    /// Read-only pre-flight aggregate for the UI
    async fn get_template_stats(&self, template_id: &EntityId)
        -> Result<TemplateStats, UseCaseError>;

    /// Whether a name is already used by a live template, case-insensitively
    async fn is_name_taken(
        &self,
        name: &str,
        exclude: Option<&EntityId>,
    ) -> Result<bool, UseCaseError>;

    /// Rename a template, keeping the uniqueness constraint
    async fn rename_template(
        &self,
        template_id: &EntityId,
        template_name: &str,
    ) -> Result<Template, UseCaseError>;

    /// Soft-delete a template
    async fn soft_delete_template(&self, template_id: &EntityId) -> Result<Template, UseCaseError>;

    /// Get template by ID
    async fn get_template(&self, id: &EntityId) -> Result<Option<Template>, UseCaseError>;
}

/// Application-level error, rendered by the HTTP layer as a 4xx body.
#[derive(Debug, Clone, Error)]
pub enum UseCaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authoring-time rejection: plain per-field messages from the schema
    /// validator, displayed verbatim.
    #[error("Invalid field configuration: {}", .errors.join("; "))]
    FieldValidation {
        errors: Vec<String>,
        warnings: Vec<String>,
    },

    /// Persistence-time rejection: structured activation errors the UI
    /// branches on.
    #[error("{message}")]
    ActivationBlocked {
        message: String,
        errors: Vec<ActivationError>,
    },

    #[error("Template name '{0}' is already in use")]
    NameTaken(String),

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}
