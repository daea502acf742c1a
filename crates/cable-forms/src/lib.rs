//! Cable Forms Platform
//!
//! Rule engine for a multi-step data-entry form platform, following
//! Domain-Driven Design (DDD) with a hexagonal ports-and-adapters layout.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Form and Template aggregates, field value objects,
//!   domain events, and the two rule services
//! - **Application Layer**: Use case orchestration, DTOs, the save-time
//!   lifecycle hooks
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: Concrete implementations
//!
//! ## The two rule components
//!
//! - **FieldSchemaValidator**: pure validation of the declarative field
//!   schema a form is built from (24 field types, per-type requirements,
//!   option integrity, dependency-graph integrity). Accumulates every
//!   violation into plain display-ready strings.
//! - **Activation policies**: lifecycle invariants between Templates and
//!   Forms. A form activates only with a structurally sound field list; a
//!   template activates only while it references at least one active form
//!   and an approver. Violations are structured `{type, message, details}`
//!   objects the UI branches on.
//!
//! Both components accumulate every violation before reporting instead of
//! failing on the first one.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use application::dto::{CreateFormCommand, CreateTemplateCommand, TemplateStats};
pub use application::{FormService, TemplateService};
pub use domain::aggregates::{Form, FormError, Template, TemplateError};
pub use domain::events::{DomainEvent, FormEvent, TemplateEvent};
pub use domain::services::{
    ActivationError, ActivationErrorKind, ActivationReport, FieldReport, FieldSchemaValidator,
    FormActivationPolicy, TemplateActivationPolicy,
};
pub use domain::value_objects::{
    Condition, EntityId, EntityStatus, FieldConfig, FieldDependency, FieldOption, FieldType,
};
pub use ports::inbound::{FormUseCases, TemplateUseCases, UseCaseError};
pub use ports::outbound::{
    ApproverDirectory, EventPublisher, FormRepository, RepositoryError, TemplateRepository,
};
