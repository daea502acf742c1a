//! Template Aggregate
//!
//! A named bundle of form references plus an approver. A template may only
//! be active while at least one referenced form is active; that half of the
//! invariant needs a lookup and is enforced by the activation policy at save
//! time. The locally checkable half lives here: a template with no form
//! references is coerced to inactive, silently.

use chrono::{DateTime, Utc};

use crate::domain::events::{DomainEvent, TemplateEvent};
use crate::domain::value_objects::{EntityId, EntityStatus};

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 100;

/// Template aggregate root
#[derive(Clone, Debug)]
pub struct Template {
    id: EntityId,
    template_name: String,
    forms: Vec<EntityId>,
    approver: Option<EntityId>,
    status: EntityStatus,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Template {
    /// Create a new template. Starts inactive.
    pub fn create(
        template_name: impl Into<String>,
        approver: Option<EntityId>,
    ) -> Result<Self, TemplateError> {
        let template_name = valid_name(template_name.into())?;
        let now = Utc::now();
        let id = EntityId::new();

        let mut template = Self {
            id: id.clone(),
            template_name: template_name.clone(),
            forms: vec![],
            approver,
            status: EntityStatus::Inactive,
            is_active: true,
            created_at: now,
            updated_at: now,
            events: vec![],
        };

        template.raise_event(DomainEvent::Template(TemplateEvent::Created {
            template_id: id,
            template_name,
            created_at: now,
        }));

        Ok(template)
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &EntityId { &self.id }
    pub fn template_name(&self) -> &str { &self.template_name }
    pub fn forms(&self) -> &[EntityId] { &self.forms }
    pub fn approver(&self) -> Option<&EntityId> { self.approver.as_ref() }
    pub fn is_active(&self) -> bool { self.is_active }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// The persisted status. Stale by design between saves: the fresh truth
    /// about activability comes from the activation policy, which re-reads
    /// the referenced forms; treat this field as a cache.
    pub fn status(&self) -> EntityStatus { self.status }

    // =========================================================================
    // Business Operations
    // =========================================================================

    /// Replace the form reference list. Emptying the list while active
    /// coerces the template to inactive on the spot.
    pub fn set_forms(&mut self, forms: Vec<EntityId>) {
        self.forms = forms;
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::FormsLinked {
            template_id: self.id.clone(),
            form_count: self.forms.len(),
        }));
        if self.forms.is_empty() {
            self.force_inactive();
        }
    }

    pub fn set_approver(&mut self, approver: EntityId) {
        self.approver = Some(approver.clone());
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::ApproverChanged {
            template_id: self.id.clone(),
            approver_id: approver,
        }));
    }

    /// Record a passed activation check. Callers run
    /// `TemplateActivationPolicy::can_be_activated` first; a formless
    /// template falls back to the silent coercion instead of activating.
    pub fn mark_active(&mut self) {
        if self.forms.is_empty() {
            self.force_inactive();
            return;
        }
        let now = Utc::now();
        self.status = EntityStatus::Active;
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::Activated {
            template_id: self.id.clone(),
            activated_at: now,
        }));
    }

    /// Transition to inactive. Always permitted.
    pub fn deactivate(&mut self) {
        self.status = EntityStatus::Inactive;
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::Deactivated {
            template_id: self.id.clone(),
        }));
    }

    /// The silent coercion: no error is surfaced, only an event.
    pub fn force_inactive(&mut self) {
        if self.status == EntityStatus::Inactive {
            return;
        }
        self.status = EntityStatus::Inactive;
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::ForcedInactive {
            template_id: self.id.clone(),
        }));
    }

    /// Soft delete: excluded from active queries, kept in storage.
    pub fn soft_delete(&mut self) {
        self.is_active = false;
        self.touch();
        self.raise_event(DomainEvent::Template(TemplateEvent::SoftDeleted {
            template_id: self.id.clone(),
        }));
    }

    pub fn rename(&mut self, template_name: impl Into<String>) -> Result<(), TemplateError> {
        self.template_name = valid_name(template_name.into())?;
        self.touch();
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn valid_name(name: String) -> Result<String, TemplateError> {
    let trimmed = name.trim().to_string();
    let len = trimmed.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return Err(TemplateError::InvalidName);
    }
    Ok(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    InvalidName,
}

impl std::error::Error for TemplateError {}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => {
                write!(f, "Template name must be between 3 and 100 characters")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_starts_inactive() {
        let template = Template::create("Onboarding", None).unwrap();
        assert_eq!(template.status(), EntityStatus::Inactive);
        assert!(template.is_active());
        assert!(template.forms().is_empty());
    }

    #[test]
    fn test_name_bounds() {
        assert!(matches!(
            Template::create("ab", None),
            Err(TemplateError::InvalidName)
        ));
        assert!(Template::create("abc", None).is_ok());
    }

    #[test]
    fn test_emptying_forms_coerces_active_template() {
        let mut template = Template::create("Onboarding", Some(EntityId::new())).unwrap();
        template.set_forms(vec![EntityId::new()]);
        template.mark_active();
        assert_eq!(template.status(), EntityStatus::Active);

        template.set_forms(vec![]);
        assert_eq!(template.status(), EntityStatus::Inactive);

        let forced = template
            .take_events()
            .into_iter()
            .filter(|e| e.event_type() == "template.forced_inactive")
            .count();
        assert_eq!(forced, 1);
    }

    #[test]
    fn test_mark_active_on_formless_template_coerces() {
        let mut template = Template::create("Onboarding", Some(EntityId::new())).unwrap();
        template.mark_active();
        assert_eq!(template.status(), EntityStatus::Inactive);
    }

    #[test]
    fn test_force_inactive_is_idempotent() {
        let mut template = Template::create("Onboarding", None).unwrap();
        template.force_inactive();
        template.force_inactive();
        assert!(template
            .take_events()
            .iter()
            .all(|e| e.event_type() != "template.forced_inactive"));
    }

    #[test]
    fn test_soft_delete_keeps_status() {
        let mut template = Template::create("Onboarding", None).unwrap();
        template.soft_delete();
        assert!(!template.is_active());
        assert_eq!(template.status(), EntityStatus::Inactive);
    }
}
