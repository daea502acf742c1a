//! Domain Events
//!
//! Events raised by aggregates to communicate state changes.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::EntityId;

/// All domain events in the Cable Forms bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Form(FormEvent),
    Template(TemplateEvent),
}

/// Form-related domain events
#[derive(Clone, Debug)]
pub enum FormEvent {
    Created {
        form_id: EntityId,
        form_name: String,
        created_at: DateTime<Utc>,
    },

    FieldsReplaced {
        form_id: EntityId,
        field_count: usize,
    },

    Activated {
        form_id: EntityId,
        activated_at: DateTime<Utc>,
    },

    Deactivated {
        form_id: EntityId,
    },

    SoftDeleted {
        form_id: EntityId,
    },
}

/// Template-related domain events
#[derive(Clone, Debug)]
pub enum TemplateEvent {
    Created {
        template_id: EntityId,
        template_name: String,
        created_at: DateTime<Utc>,
    },

    FormsLinked {
        template_id: EntityId,
        form_count: usize,
    },

    ApproverChanged {
        template_id: EntityId,
        approver_id: EntityId,
    },

    Activated {
        template_id: EntityId,
        activated_at: DateTime<Utc>,
    },

    Deactivated {
        template_id: EntityId,
    },

    /// The implicit active-to-inactive transition: a template whose form
    /// list became empty is coerced without an error being returned.
    ForcedInactive {
        template_id: EntityId,
    },

    SoftDeleted {
        template_id: EntityId,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &EntityId {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { form_id, .. } => form_id,
                FormEvent::FieldsReplaced { form_id, .. } => form_id,
                FormEvent::Activated { form_id, .. } => form_id,
                FormEvent::Deactivated { form_id } => form_id,
                FormEvent::SoftDeleted { form_id } => form_id,
            },
            DomainEvent::Template(e) => match e {
                TemplateEvent::Created { template_id, .. } => template_id,
                TemplateEvent::FormsLinked { template_id, .. } => template_id,
                TemplateEvent::ApproverChanged { template_id, .. } => template_id,
                TemplateEvent::Activated { template_id, .. } => template_id,
                TemplateEvent::Deactivated { template_id } => template_id,
                TemplateEvent::ForcedInactive { template_id } => template_id,
                TemplateEvent::SoftDeleted { template_id } => template_id,
            },
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Form(e) => match e {
                FormEvent::Created { .. } => "form.created",
                FormEvent::FieldsReplaced { .. } => "form.fields_replaced",
                FormEvent::Activated { .. } => "form.activated",
                FormEvent::Deactivated { .. } => "form.deactivated",
                FormEvent::SoftDeleted { .. } => "form.soft_deleted",
            },
            DomainEvent::Template(e) => match e {
                TemplateEvent::Created { .. } => "template.created",
                TemplateEvent::FormsLinked { .. } => "template.forms_linked",
                TemplateEvent::ApproverChanged { .. } => "template.approver_changed",
                TemplateEvent::Activated { .. } => "template.activated",
                TemplateEvent::Deactivated { .. } => "template.deactivated",
                TemplateEvent::ForcedInactive { .. } => "template.forced_inactive",
                TemplateEvent::SoftDeleted { .. } => "template.soft_deleted",
            },
        }
    }
}
