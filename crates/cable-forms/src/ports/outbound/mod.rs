//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: these are the interfaces that infrastructure must
//! implement. The core treats persistence as a simple document store; the
//! only query shapes it needs are find-by-id-set and count-matching-filter.

use async_trait::async_trait;

use crate::domain::aggregates::{Form, Template};
use crate::domain::value_objects::EntityId;
use crate::domain::DomainEvent;

/// Form repository port
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Find form by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Form>, RepositoryError>;

    /// Find all forms in an id set
    async fn find_by_ids(&self, ids: &[EntityId]) -> Result<Vec<Form>, RepositoryError>;

    /// Count forms in an id set that are status-active and not soft-deleted
    async fn count_active(&self, ids: &[EntityId]) -> Result<u64, RepositoryError>;

    /// Count forms in an id set that exist and are not soft-deleted
    async fn count_existing(&self, ids: &[EntityId]) -> Result<u64, RepositoryError>;

    /// Save form (insert or update)
    async fn save(&self, form: &Form) -> Result<(), RepositoryError>;

    /// Delete form
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Template repository port
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Find template by ID
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Template>, RepositoryError>;

    /// Find a non-soft-deleted template by name, case-insensitively
    async fn find_by_name_ci(&self, name: &str) -> Result<Option<Template>, RepositoryError>;

    /// Save template (insert or update). Implementations enforce the
    /// case-insensitive name uniqueness constraint among non-soft-deleted
    /// templates and report violations as `DuplicateKey`.
    async fn save(&self, template: &Template) -> Result<(), RepositoryError>;

    /// Delete template
    async fn delete(&self, id: &EntityId) -> Result<(), RepositoryError>;
}

/// Directory of users eligible to approve templates
#[async_trait]
pub trait ApproverDirectory: Send + Sync {
    /// Whether the referenced user exists
    async fn exists(&self, id: &EntityId) -> Result<bool, RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Debug, Clone)]
pub enum RepositoryError {
    NotFound,
    DuplicateKey(String),
    ConnectionError(String),
    QueryError(String),
    SerializationError(String),
}

impl std::error::Error for RepositoryError {}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Entity not found"),
            Self::DuplicateKey(k) => write!(f, "Duplicate key: {}", k),
            Self::ConnectionError(e) => write!(f, "Connection error: {}", e),
            Self::QueryError(e) => write!(f, "Query error: {}", e),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}
