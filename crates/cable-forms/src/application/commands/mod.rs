//! Command handlers
//!
//! Application services that orchestrate use cases. The persistence-lifecycle
//! hooks of the two aggregates live here: every mutating path funnels through
//! the same save rules before anything is written.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::dto::{CreateFormCommand, CreateTemplateCommand, TemplateStats};
use crate::domain::aggregates::{Form, Template};
use crate::domain::services::{FieldSchemaValidator, TemplateActivationPolicy};
use crate::domain::value_objects::{EntityId, EntityStatus, FieldConfig};
use crate::ports::inbound::{FormUseCases, TemplateUseCases, UseCaseError};
use crate::ports::outbound::{
    ApproverDirectory, EventPublisher, FormRepository, RepositoryError, TemplateRepository,
};

fn repo_err(e: RepositoryError) -> UseCaseError {
    UseCaseError::RepositoryError(e.to_string())
}

/// Form application service
pub struct FormService {
    form_repo: Arc<dyn FormRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl FormService {
    pub fn new(form_repo: Arc<dyn FormRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            form_repo,
            event_publisher,
        }
    }

    /// Authoring-time gate: a field array entering the system is validated
    /// in full before it is accepted.
    fn check_fields(fields: &[FieldConfig]) -> Result<(), UseCaseError> {
        let report = FieldSchemaValidator::validate_fields(fields);
        if !report.is_valid {
            debug!(errors = report.errors.len(), "field array rejected");
            return Err(UseCaseError::FieldValidation {
                errors: report.errors,
                warnings: report.warnings,
            });
        }
        Ok(())
    }

    async fn persist(&self, form: &mut Form) -> Result<(), UseCaseError> {
        self.form_repo.save(form).await.map_err(repo_err)?;
        let events = form.take_events();
        self.event_publisher.publish(events).await.map_err(repo_err)?;
        Ok(())
    }

    async fn load(&self, form_id: &EntityId) -> Result<Form, UseCaseError> {
        self.form_repo
            .find_by_id(form_id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| UseCaseError::NotFound("Form not found".into()))
    }
}

#[async_trait]
impl FormUseCases for FormService {
    async fn create_form(&self, command: CreateFormCommand) -> Result<Form, UseCaseError> {
        let created_by = command.created_by.map(EntityId::from_string);
        let mut form = Form::create(command.form_name, created_by)
            .map_err(|e| UseCaseError::DomainError(e.to_string()))?;

        if let Some(initiator) = command.initiator {
            form.set_initiator(EntityId::from_string(initiator));
        }
        if let Some(reviewer) = command.reviewer {
            form.set_reviewer(EntityId::from_string(reviewer));
        }
        if let Some(approver) = command.approver {
            form.set_approver(EntityId::from_string(approver));
        }

        // A form may be created empty (the builder fills it in later), but a
        // non-empty payload must pass the schema validator.
        if !command.fields.is_empty() {
            Self::check_fields(&command.fields)?;
            form.replace_fields(command.fields);
        }

        if command.status == Some(EntityStatus::Active) {
            form.activate().map_err(|report| {
                warn!(form = %form.id(), "form activation rejected at creation");
                UseCaseError::ActivationBlocked {
                    message: report.joined_message(),
                    errors: report.errors,
                }
            })?;
        }

        self.persist(&mut form).await?;
        Ok(form)
    }

    async fn replace_fields(
        &self,
        form_id: &EntityId,
        fields: Vec<FieldConfig>,
    ) -> Result<Form, UseCaseError> {
        Self::check_fields(&fields)?;

        let mut form = self.load(form_id).await?;
        form.replace_fields(fields);
        self.persist(&mut form).await?;
        Ok(form)
    }

    async fn set_form_status(
        &self,
        form_id: &EntityId,
        status: EntityStatus,
    ) -> Result<Form, UseCaseError> {
        let mut form = self.load(form_id).await?;

        match status {
            EntityStatus::Active => {
                form.activate().map_err(|report| {
                    warn!(form = %form_id, "form activation rejected");
                    UseCaseError::ActivationBlocked {
                        message: report.joined_message(),
                        errors: report.errors,
                    }
                })?;
            }
            EntityStatus::Inactive => form.deactivate(),
        }

        self.persist(&mut form).await?;
        Ok(form)
    }

    async fn rename_form(&self, form_id: &EntityId, form_name: &str) -> Result<Form, UseCaseError> {
        let mut form = self.load(form_id).await?;
        form.rename(form_name)
            .map_err(|e| UseCaseError::DomainError(e.to_string()))?;
        self.persist(&mut form).await?;
        Ok(form)
    }

    async fn soft_delete_form(&self, form_id: &EntityId) -> Result<Form, UseCaseError> {
        let mut form = self.load(form_id).await?;
        form.soft_delete();
        self.persist(&mut form).await?;
        Ok(form)
    }

    async fn get_form(&self, id: &EntityId) -> Result<Option<Form>, UseCaseError> {
        self.form_repo.find_by_id(id).await.map_err(repo_err)
    }
}

/// Template application service
pub struct TemplateService {
    template_repo: Arc<dyn TemplateRepository>,
    form_repo: Arc<dyn FormRepository>,
    approvers: Arc<dyn ApproverDirectory>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TemplateService {
    pub fn new(
        template_repo: Arc<dyn TemplateRepository>,
        form_repo: Arc<dyn FormRepository>,
        approvers: Arc<dyn ApproverDirectory>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            template_repo,
            form_repo,
            approvers,
            event_publisher,
        }
    }

    /// The save-time hook, evaluated on every template save in a fixed
    /// order:
    ///
    /// 1. a formless template never stays active (silent coercion);
    /// 2. a save resulting in active status must pass the activation check.
    ///    An explicit activation request is rejected on failure, while an
    ///    active status merely carried over from a previous save is coerced
    ///    back to inactive (the lazy cascade from form deactivation);
    /// 3. a modified approver reference must exist;
    /// 4. modified form references must all exist and not be soft-deleted.
    ///
    /// Name uniqueness (rule 5) is enforced by the pre-checks in
    /// `create_template`/`rename_template` plus the storage constraint.
    ///
    /// The check and the subsequent save are not wrapped in a transaction;
    /// a form may be deactivated concurrently between the two. The window is
    /// accepted: the invariant is re-derived at the template's next save.
    async fn apply_save_rules(
        &self,
        template: &mut Template,
        explicit_activation: bool,
        forms_modified: bool,
        approver_modified: bool,
    ) -> Result<(), UseCaseError> {
        if template.forms().is_empty() {
            template.force_inactive();
        } else if explicit_activation || template.status().is_active() {
            let report =
                TemplateActivationPolicy::can_be_activated(template, self.form_repo.as_ref())
                    .await
                    .map_err(repo_err)?;
            if report.is_valid {
                if explicit_activation {
                    template.mark_active();
                }
            } else if explicit_activation {
                warn!(template = %template.id(), "template activation rejected: {}", report.joined_message());
                return Err(UseCaseError::ActivationBlocked {
                    message: report.joined_message(),
                    errors: report.errors,
                });
            } else {
                debug!(template = %template.id(), "active status no longer holds, coercing to inactive");
                template.force_inactive();
            }
        }

        if approver_modified {
            if let Some(approver) = template.approver() {
                let exists = self.approvers.exists(approver).await.map_err(repo_err)?;
                if !exists {
                    return Err(UseCaseError::DomainError(format!(
                        "Approver '{}' does not exist",
                        approver
                    )));
                }
            }
        }

        if forms_modified && !template.forms().is_empty() {
            let existing = self
                .form_repo
                .count_existing(template.forms())
                .await
                .map_err(repo_err)?;
            if existing as usize != template.forms().len() {
                return Err(UseCaseError::DomainError(
                    "One or more referenced forms do not exist or are deleted".into(),
                ));
            }
        }

        Ok(())
    }

    async fn persist(&self, template: &mut Template) -> Result<(), UseCaseError> {
        self.template_repo.save(template).await.map_err(|e| match e {
            RepositoryError::DuplicateKey(_) => {
                UseCaseError::NameTaken(template.template_name().to_string())
            }
            other => repo_err(other),
        })?;
        let events = template.take_events();
        self.event_publisher.publish(events).await.map_err(repo_err)?;
        Ok(())
    }

    async fn load(&self, template_id: &EntityId) -> Result<Template, UseCaseError> {
        self.template_repo
            .find_by_id(template_id)
            .await
            .map_err(repo_err)?
            .ok_or_else(|| UseCaseError::NotFound("Template not found".into()))
    }
}

#[async_trait]
impl TemplateUseCases for TemplateService {
    async fn create_template(
        &self,
        command: CreateTemplateCommand,
    ) -> Result<Template, UseCaseError> {
        if self
            .is_name_taken(&command.template_name, None)
            .await?
        {
            return Err(UseCaseError::NameTaken(command.template_name));
        }

        let approver = command.approver.map(EntityId::from_string);
        let mut template = Template::create(command.template_name, approver)
            .map_err(|e| UseCaseError::DomainError(e.to_string()))?;

        let forms: Vec<EntityId> = command.forms.into_iter().map(EntityId::from_string).collect();
        let forms_modified = !forms.is_empty();
        if forms_modified {
            template.set_forms(forms);
        }

        let explicit_activation = command.status == Some(EntityStatus::Active);
        let approver_modified = template.approver().is_some();
        self.apply_save_rules(&mut template, explicit_activation, forms_modified, approver_modified)
            .await?;

        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn set_forms(
        &self,
        template_id: &EntityId,
        forms: Vec<EntityId>,
    ) -> Result<Template, UseCaseError> {
        let mut template = self.load(template_id).await?;
        template.set_forms(forms);
        self.apply_save_rules(&mut template, false, true, false).await?;
        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn set_approver(
        &self,
        template_id: &EntityId,
        approver: EntityId,
    ) -> Result<Template, UseCaseError> {
        let mut template = self.load(template_id).await?;
        template.set_approver(approver);
        self.apply_save_rules(&mut template, false, false, true).await?;
        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn set_template_status(
        &self,
        template_id: &EntityId,
        status: EntityStatus,
    ) -> Result<Template, UseCaseError> {
        let mut template = self.load(template_id).await?;

        match status {
            EntityStatus::Active => {
                self.apply_save_rules(&mut template, true, false, false).await?;
            }
            EntityStatus::Inactive => {
                template.deactivate();
                self.apply_save_rules(&mut template, false, false, false).await?;
            }
        }

        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn activate_template(&self, template_id: &EntityId) -> Result<Template, UseCaseError> {
        self.set_template_status(template_id, EntityStatus::Active)
            .await
    }

    async fn refresh_template(&self, template_id: &EntityId) -> Result<Template, UseCaseError> {
        let mut template = self.load(template_id).await?;
        self.apply_save_rules(&mut template, false, false, false).await?;
        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn get_template_stats(
        &self,
        template_id: &EntityId,
    ) -> Result<TemplateStats, UseCaseError> {
        let template = self.load(template_id).await?;
        let report =
            TemplateActivationPolicy::can_be_activated(&template, self.form_repo.as_ref())
                .await
                .map_err(repo_err)?;

        Ok(TemplateStats {
            form_count: template.forms().len(),
            has_approver: template.approver().is_some(),
            can_be_activated: report.is_valid,
            validation_errors: report.errors,
            status: template.status(),
            is_active: template.is_active(),
            created_at: template.created_at(),
            updated_at: template.updated_at(),
        })
    }

    async fn is_name_taken(
        &self,
        name: &str,
        exclude: Option<&EntityId>,
    ) -> Result<bool, UseCaseError> {
        let existing = self
            .template_repo
            .find_by_name_ci(name)
            .await
            .map_err(repo_err)?;
        Ok(match existing {
            Some(template) => exclude != Some(template.id()),
            None => false,
        })
    }

    async fn rename_template(
        &self,
        template_id: &EntityId,
        template_name: &str,
    ) -> Result<Template, UseCaseError> {
        if self.is_name_taken(template_name, Some(template_id)).await? {
            return Err(UseCaseError::NameTaken(template_name.to_string()));
        }

        let mut template = self.load(template_id).await?;
        template
            .rename(template_name)
            .map_err(|e| UseCaseError::DomainError(e.to_string()))?;
        self.apply_save_rules(&mut template, false, false, false).await?;
        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn soft_delete_template(
        &self,
        template_id: &EntityId,
    ) -> Result<Template, UseCaseError> {
        let mut template = self.load(template_id).await?;
        template.soft_delete();
        self.persist(&mut template).await?;
        Ok(template)
    }

    async fn get_template(&self, id: &EntityId) -> Result<Option<Template>, UseCaseError> {
        self.template_repo.find_by_id(id).await.map_err(repo_err)
    }
}
