//! Data Transfer Objects (DTOs)
//!
//! Objects for transferring data across boundaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::ActivationError;
use crate::domain::value_objects::{EntityStatus, FieldConfig};

// =============================================================================
// Form Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateFormCommand {
    pub form_name: String,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    pub status: Option<EntityStatus>,
    pub created_by: Option<String>,
    pub initiator: Option<String>,
    pub reviewer: Option<String>,
    pub approver: Option<String>,
}

// =============================================================================
// Template Commands
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTemplateCommand {
    pub template_name: String,
    #[serde(default)]
    pub forms: Vec<String>,
    pub approver: Option<String>,
    pub status: Option<EntityStatus>,
}

// =============================================================================
// Views (Read Models)
// =============================================================================

/// Pre-flight view the UI reads before offering an "activate" affordance.
/// `can_be_activated` and `validation_errors` are recomputed on every call;
/// `status` is the persisted value, which may lag behind them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStats {
    pub form_count: usize,
    pub has_approver: bool,
    pub can_be_activated: bool,
    pub validation_errors: Vec<ActivationError>,
    pub status: EntityStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
