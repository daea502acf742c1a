//! Activation policies
//!
//! The persistence-time gates for the form and template lifecycle. Unlike
//! the schema validator these produce structured, machine-readable errors:
//! the UI branches on the `type` discriminant (open the builder on
//! `NO_FIELDS`, link a form on `NO_ACTIVE_FORMS`, ...), so the vocabulary
//! here is a wire contract.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::aggregates::{Form, Template};
use crate::ports::outbound::{FormRepository, RepositoryError};

/// Machine-readable activation error discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivationErrorKind {
    NoFields,
    InvalidFields,
    NoForms,
    NoActiveForms,
    NoApprover,
}

/// One activation rule violation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivationError {
    #[serde(rename = "type")]
    pub kind: ActivationErrorKind,
    pub message: String,
    pub details: Value,
}

/// Outcome of an activation check. All applicable violations are collected
/// in one pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationReport {
    pub is_valid: bool,
    pub errors: Vec<ActivationError>,
}

impl ActivationReport {
    fn finish(errors: Vec<ActivationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// All violation messages joined into one aggregate message.
    pub fn joined_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Structural activation gate for forms.
///
/// Intentionally shallower than the schema validator: this is the cheap
/// check run on every save, while `FieldSchemaValidator` is the deep
/// authoring-time gate.
pub struct FormActivationPolicy;

impl FormActivationPolicy {
    pub fn can_be_activated(form: &Form) -> ActivationReport {
        let mut errors = Vec::new();

        if form.fields().is_empty() {
            errors.push(ActivationError {
                kind: ActivationErrorKind::NoFields,
                message: "Form must have at least one field to be activated".to_string(),
                details: json!({ "currentCount": 0, "requiredCount": 1 }),
            });
            return ActivationReport::finish(errors);
        }

        let mut invalid_fields = Vec::new();
        for field in form.fields() {
            let mut issues = Vec::new();
            if !field.has_type() {
                issues.push("Missing type");
            }
            if !field.has_label() {
                issues.push("Missing or empty label");
            }
            if !issues.is_empty() {
                invalid_fields.push(json!({
                    "id": field.id.clone(),
                    "issues": issues,
                }));
            }
        }

        if !invalid_fields.is_empty() {
            errors.push(ActivationError {
                kind: ActivationErrorKind::InvalidFields,
                message: "Form has fields with missing type or label".to_string(),
                details: json!({ "invalidFields": invalid_fields }),
            });
        }

        ActivationReport::finish(errors)
    }
}

/// Activation gate for templates.
///
/// Asynchronous: the active-form half of the invariant is computed against
/// the referenced forms' current statuses, never against a cached value.
/// Lookup failures propagate unmodified.
pub struct TemplateActivationPolicy;

impl TemplateActivationPolicy {
    pub async fn can_be_activated(
        template: &Template,
        forms: &dyn FormRepository,
    ) -> Result<ActivationReport, RepositoryError> {
        let mut errors = Vec::new();

        if template.forms().is_empty() {
            errors.push(ActivationError {
                kind: ActivationErrorKind::NoForms,
                message: "Template must reference at least one form".to_string(),
                details: json!({ "formCount": 0 }),
            });
        } else {
            let total = template.forms().len();
            let active = forms.count_active(template.forms()).await?;
            if active == 0 {
                errors.push(ActivationError {
                    kind: ActivationErrorKind::NoActiveForms,
                    message: "Template has no active forms".to_string(),
                    details: json!({ "totalForms": total, "activeForms": 0 }),
                });
            }
        }

        if template.approver().is_none() {
            errors.push(ActivationError {
                kind: ActivationErrorKind::NoApprover,
                message: "Template must have an approver".to_string(),
                details: json!({}),
            });
        }

        Ok(ActivationReport::finish(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{EntityId, FieldConfig};
    use crate::infrastructure::persistence::InMemoryFormRepository;

    fn field(id: &str, field_type: Option<&str>, label: Option<&str>) -> FieldConfig {
        FieldConfig {
            id: Some(id.into()),
            field_type: field_type.map(Into::into),
            name: Some(format!("field_{}", id)),
            label: label.map(Into::into),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn test_no_fields() {
        let form = Form::create("Empty Form", None).unwrap();
        let report = FormActivationPolicy::can_be_activated(&form);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ActivationErrorKind::NoFields);
        assert_eq!(report.errors[0].details["requiredCount"], 1);
    }

    #[test]
    fn test_invalid_fields_enumerated() {
        let mut form = Form::create("Broken Form", None).unwrap();
        form.replace_fields(vec![
            field("f1", Some("text"), Some("Name")),
            field("f2", None, Some("Orphan")),
            field("f3", Some("text"), None),
        ]);
        let report = FormActivationPolicy::can_be_activated(&form);
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].kind, ActivationErrorKind::InvalidFields);

        let invalid = report.errors[0].details["invalidFields"].as_array().unwrap();
        assert_eq!(invalid.len(), 2);
        assert_eq!(invalid[0]["issues"][0], "Missing type");
        assert_eq!(invalid[1]["issues"][0], "Missing or empty label");
    }

    #[test]
    fn test_valid_form_passes() {
        let mut form = Form::create("Good Form", None).unwrap();
        form.replace_fields(vec![field("f1", Some("text"), Some("Name"))]);
        let report = FormActivationPolicy::can_be_activated(&form);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_template_all_violations_collected() {
        let repo = InMemoryFormRepository::new();
        let template = Template::create("Bare Template", None).unwrap();

        let report = TemplateActivationPolicy::can_be_activated(&template, &repo)
            .await
            .unwrap();
        assert!(!report.is_valid);
        let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivationErrorKind::NoForms, ActivationErrorKind::NoApprover]
        );
    }

    #[tokio::test]
    async fn test_template_no_active_forms() {
        let repo = InMemoryFormRepository::new();
        let mut form = Form::create("Inactive Form", None).unwrap();
        form.replace_fields(vec![field("f1", Some("text"), Some("Name"))]);
        repo.save(&form).await.unwrap();

        let mut template = Template::create("Waiting Template", Some(EntityId::new())).unwrap();
        template.set_forms(vec![form.id().clone()]);

        let report = TemplateActivationPolicy::can_be_activated(&template, &repo)
            .await
            .unwrap();
        assert!(!report.is_valid);
        assert_eq!(report.errors[0].kind, ActivationErrorKind::NoActiveForms);
        assert_eq!(report.errors[0].details["totalForms"], 1);
        assert_eq!(report.errors[0].details["activeForms"], 0);
    }

    #[tokio::test]
    async fn test_template_passes_with_active_form() {
        let repo = InMemoryFormRepository::new();
        let mut form = Form::create("Live Form", None).unwrap();
        form.replace_fields(vec![field("f1", Some("text"), Some("Name"))]);
        form.activate().unwrap();
        repo.save(&form).await.unwrap();

        let mut template = Template::create("Ready Template", Some(EntityId::new())).unwrap();
        template.set_forms(vec![form.id().clone()]);

        let report = TemplateActivationPolicy::can_be_activated(&template, &repo)
            .await
            .unwrap();
        assert!(report.is_valid, "{}", report.joined_message());
    }

    #[tokio::test]
    async fn test_soft_deleted_form_does_not_count_as_active() {
        let repo = InMemoryFormRepository::new();
        let mut form = Form::create("Gone Form", None).unwrap();
        form.replace_fields(vec![field("f1", Some("text"), Some("Name"))]);
        form.activate().unwrap();
        form.soft_delete();
        repo.save(&form).await.unwrap();

        let mut template = Template::create("Stale Template", Some(EntityId::new())).unwrap();
        template.set_forms(vec![form.id().clone()]);

        let report = TemplateActivationPolicy::can_be_activated(&template, &repo)
            .await
            .unwrap();
        assert_eq!(report.errors[0].kind, ActivationErrorKind::NoActiveForms);
    }

    #[test]
    fn test_error_serialization_contract() {
        let error = ActivationError {
            kind: ActivationErrorKind::NoActiveForms,
            message: "Template has no active forms".to_string(),
            details: json!({ "totalForms": 2, "activeForms": 0 }),
        };
        let wire = serde_json::to_value(&error).unwrap();
        assert_eq!(wire["type"], "NO_ACTIVE_FORMS");
        assert_eq!(wire["details"]["totalForms"], 2);
    }
}
