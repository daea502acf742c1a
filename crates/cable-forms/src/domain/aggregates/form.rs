//! Form Aggregate
//!
//! A named bundle of field configurations with a publication status and a
//! soft-delete flag. Activation is gated by the structural field check; deep
//! schema validation happens earlier, at authoring time.

use chrono::{DateTime, Utc};

use crate::domain::events::{DomainEvent, FormEvent};
use crate::domain::services::activation::{ActivationReport, FormActivationPolicy};
use crate::domain::value_objects::{EntityId, EntityStatus, FieldConfig};

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 100;

/// Form aggregate root
#[derive(Clone, Debug)]
pub struct Form {
    id: EntityId,
    form_name: String,
    fields: Vec<FieldConfig>,
    status: EntityStatus,
    is_active: bool,
    created_by: Option<EntityId>,
    initiator: Option<EntityId>,
    reviewer: Option<EntityId>,
    approver: Option<EntityId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Form {
    /// Create a new form. Starts inactive with no fields.
    pub fn create(
        form_name: impl Into<String>,
        created_by: Option<EntityId>,
    ) -> Result<Self, FormError> {
        let form_name = valid_name(form_name.into())?;
        let now = Utc::now();
        let id = EntityId::new();

        let mut form = Self {
            id: id.clone(),
            form_name: form_name.clone(),
            fields: vec![],
            status: EntityStatus::Inactive,
            is_active: true,
            created_by,
            initiator: None,
            reviewer: None,
            approver: None,
            created_at: now,
            updated_at: now,
            last_modified: now,
            events: vec![],
        };

        form.raise_event(DomainEvent::Form(FormEvent::Created {
            form_id: id,
            form_name,
            created_at: now,
        }));

        Ok(form)
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn form_name(&self) -> &str { &self.form_name }
    pub fn fields(&self) -> &[FieldConfig] { &self.fields }
    pub fn status(&self) -> EntityStatus { self.status }
    pub fn is_active(&self) -> bool { self.is_active }
    pub fn created_by(&self) -> Option<&EntityId> { self.created_by.as_ref() }
    pub fn initiator(&self) -> Option<&EntityId> { self.initiator.as_ref() }
    pub fn reviewer(&self) -> Option<&EntityId> { self.reviewer.as_ref() }
    pub fn approver(&self) -> Option<&EntityId> { self.approver.as_ref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn last_modified(&self) -> DateTime<Utc> { self.last_modified }

    /// Structural pre-flight for activation.
    pub fn can_be_activated(&self) -> ActivationReport {
        FormActivationPolicy::can_be_activated(self)
    }

    // =========================================================================
    // Business Operations
    // =========================================================================

    /// Replace the whole field array (the builder saves wholesale).
    pub fn replace_fields(&mut self, fields: Vec<FieldConfig>) {
        self.fields = fields;
        self.touch();
        self.raise_event(DomainEvent::Form(FormEvent::FieldsReplaced {
            form_id: self.id.clone(),
            field_count: self.fields.len(),
        }));
    }

    /// Transition to active. Requires the structural field check to pass;
    /// the full report is returned on refusal.
    pub fn activate(&mut self) -> Result<(), ActivationReport> {
        let report = FormActivationPolicy::can_be_activated(self);
        if !report.is_valid {
            return Err(report);
        }

        let now = Utc::now();
        self.status = EntityStatus::Active;
        self.touch();
        self.raise_event(DomainEvent::Form(FormEvent::Activated {
            form_id: self.id.clone(),
            activated_at: now,
        }));

        Ok(())
    }

    /// Transition to inactive. Always permitted.
    pub fn deactivate(&mut self) {
        self.status = EntityStatus::Inactive;
        self.touch();
        self.raise_event(DomainEvent::Form(FormEvent::Deactivated {
            form_id: self.id.clone(),
        }));
    }

    /// Soft delete: the record stays in storage, excluded from active
    /// queries. Does not alter `status` and never cascades to templates;
    /// they discover the change at their next save.
    pub fn soft_delete(&mut self) {
        self.is_active = false;
        self.touch();
        self.raise_event(DomainEvent::Form(FormEvent::SoftDeleted {
            form_id: self.id.clone(),
        }));
    }

    pub fn rename(&mut self, form_name: impl Into<String>) -> Result<(), FormError> {
        self.form_name = valid_name(form_name.into())?;
        self.touch();
        Ok(())
    }

    pub fn set_initiator(&mut self, initiator: EntityId) {
        self.initiator = Some(initiator);
        self.touch();
    }

    pub fn set_reviewer(&mut self, reviewer: EntityId) {
        self.reviewer = Some(reviewer);
        self.touch();
    }

    pub fn set_approver(&mut self, approver: EntityId) {
        self.approver = Some(approver);
        self.touch();
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = now;
        self.last_modified = now;
    }
}

fn valid_name(name: String) -> Result<String, FormError> {
    let trimmed = name.trim().to_string();
    let len = trimmed.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return Err(FormError::InvalidName);
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidName,
}

impl std::error::Error for FormError {}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => {
                write!(f, "Form name must be between 3 and 100 characters")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::activation::ActivationErrorKind;

    fn text_field(id: &str, label: &str) -> FieldConfig {
        FieldConfig {
            id: Some(id.into()),
            field_type: Some("text".into()),
            name: Some(format!("field_{}", id)),
            label: Some(label.into()),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn test_form_starts_inactive() {
        let form = Form::create("My Form", None).unwrap();
        assert_eq!(form.status(), EntityStatus::Inactive);
        assert!(form.is_active());
        assert!(form.fields().is_empty());
    }

    #[test]
    fn test_name_bounds() {
        assert!(matches!(Form::create("ab", None), Err(FormError::InvalidName)));
        assert!(Form::create("abc", None).is_ok());
        assert!(matches!(
            Form::create("x".repeat(101), None),
            Err(FormError::InvalidName)
        ));
    }

    #[test]
    fn test_activation_rejected_without_fields() {
        let mut form = Form::create("My Form", None).unwrap();
        let report = form.activate().unwrap_err();
        assert_eq!(report.errors[0].kind, ActivationErrorKind::NoFields);
        assert_eq!(form.status(), EntityStatus::Inactive);
    }

    #[test]
    fn test_activation_succeeds_with_valid_field() {
        let mut form = Form::create("My Form", None).unwrap();
        form.replace_fields(vec![text_field("f1", "Name")]);
        form.activate().unwrap();
        assert_eq!(form.status(), EntityStatus::Active);
    }

    #[test]
    fn test_deactivate_always_permitted() {
        let mut form = Form::create("My Form", None).unwrap();
        form.deactivate();
        assert_eq!(form.status(), EntityStatus::Inactive);
    }

    #[test]
    fn test_soft_delete_keeps_status() {
        let mut form = Form::create("My Form", None).unwrap();
        form.replace_fields(vec![text_field("f1", "Name")]);
        form.activate().unwrap();
        form.soft_delete();
        assert!(!form.is_active());
        assert_eq!(form.status(), EntityStatus::Active);
    }

    #[test]
    fn test_events_drained_once() {
        let mut form = Form::create("My Form", None).unwrap();
        form.replace_fields(vec![text_field("f1", "Name")]);
        let events = form.take_events();
        assert_eq!(events.len(), 2);
        assert!(form.take_events().is_empty());
    }
}
