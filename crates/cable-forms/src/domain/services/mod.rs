//! Domain services: the two rule components of the platform.
//!
//! `FieldSchemaValidator` is the deep authoring-time gate and speaks plain
//! strings; the activation policies are the persistence-time gates and speak
//! structured errors the UI branches on.

pub mod activation;
pub mod field_validation;

pub use activation::{
    ActivationError, ActivationErrorKind, ActivationReport, FormActivationPolicy,
    TemplateActivationPolicy,
};
pub use field_validation::{FieldReport, FieldSchemaValidator};
