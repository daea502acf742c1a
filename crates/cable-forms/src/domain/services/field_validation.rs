//! Field schema validation
//!
//! The authoring-time gate for form definitions. Every rule accumulates into
//! one report so a designer fixing a form sees all problems in a single pass;
//! nothing in here short-circuits or performs I/O.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::value_objects::field::ALLOWED_VALIDATION_KEYS;
use crate::domain::value_objects::{Condition, FieldConfig, FieldType};

const MAX_LABEL_CHARS: usize = 100;
const MAX_TEXT_CHARS: usize = 1000;
const MAX_PLACEHOLDER_CHARS: usize = 200;
const MAX_HELPER_TEXT_CHARS: usize = 500;
const MAX_STEP_TITLE_CHARS: usize = 100;
const MAX_STEP_DESCRIPTION_CHARS: usize = 500;
const GRID_SIZES: [i64; 6] = [1, 2, 3, 4, 6, 12];

/// Outcome of validating one field or a whole field array.
///
/// Errors block saving; warnings do not block activation, they are advisory
/// messages rendered next to the field in the designer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FieldReport {
    fn finish(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Structural and per-type validation of field configurations.
pub struct FieldSchemaValidator;

impl FieldSchemaValidator {
    /// Validate a single field configuration.
    ///
    /// Checks run in a fixed order and every violation is collected; the
    /// referenced-field half of a dependency rule needs sibling visibility
    /// and is checked by [`FieldSchemaValidator::validate_fields`] instead.
    pub fn validate_field(field: Option<&FieldConfig>) -> FieldReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let Some(field) = field else {
            errors.push("Field configuration is required".to_string());
            return FieldReport::finish(errors, warnings);
        };

        if is_blank(field.id.as_deref()) {
            errors.push("Field id is required".to_string());
        }

        let resolved = match field.field_type.as_deref() {
            None | Some("") => {
                errors.push("Field type is required".to_string());
                None
            }
            Some(raw) => {
                let parsed = FieldType::parse(raw);
                if parsed.is_none() {
                    errors.push(format!("Unknown field type '{}'", raw));
                }
                parsed
            }
        };

        Self::check_name(field, resolved, &mut errors);
        Self::check_label(field, resolved, &mut errors);
        Self::check_text(field, resolved, &mut errors);
        Self::check_placeholder(field, resolved, &mut errors);

        if let Some(helper) = field.helper_text.as_deref() {
            if helper.chars().count() > MAX_HELPER_TEXT_CHARS {
                errors.push(format!(
                    "Helper text must be at most {} characters",
                    MAX_HELPER_TEXT_CHARS
                ));
            }
        }

        if let Some(grid) = field.grid_size {
            if !GRID_SIZES.contains(&grid) {
                errors.push("Grid size must be one of 1, 2, 3, 4, 6, 12".to_string());
            }
        }

        Self::check_options(field, resolved, &mut errors);
        Self::check_type_extras(field, resolved, &mut errors, &mut warnings);
        Self::check_validations(field, &mut errors);
        Self::check_dependency_shape(field, &mut errors);

        FieldReport::finish(errors, warnings)
    }

    /// Validate a whole field array: per-field reports prefixed with the
    /// field's 1-based position, duplicate id/name detection, and existence
    /// of every dependency target among sibling names.
    pub fn validate_fields(fields: &[FieldConfig]) -> FieldReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if fields.is_empty() {
            errors.push("Form must have at least one field".to_string());
            return FieldReport::finish(errors, warnings);
        }

        for (index, field) in fields.iter().enumerate() {
            let report = Self::validate_field(Some(field));
            errors.extend(
                report
                    .errors
                    .into_iter()
                    .map(|e| format!("Field {}: {}", index + 1, e)),
            );
            warnings.extend(
                report
                    .warnings
                    .into_iter()
                    .map(|w| format!("Field {}: {}", index + 1, w)),
            );
        }

        for name in duplicates(fields.iter().map(|f| f.name.as_deref())) {
            errors.push(format!("Duplicate field name '{}'", name));
        }
        for id in duplicates(fields.iter().map(|f| f.id.as_deref())) {
            errors.push(format!("Duplicate field id '{}'", id));
        }

        for (index, field) in fields.iter().enumerate() {
            let Some(target) = field
                .depends_on
                .as_ref()
                .and_then(|d| d.field.as_deref())
                .filter(|t| !t.is_empty())
            else {
                continue;
            };
            let exists = fields.iter().any(|f| f.name.as_deref() == Some(target));
            if !exists {
                errors.push(format!(
                    "Field {}: Dependent field '{}' does not exist",
                    index + 1,
                    target
                ));
            }
        }

        FieldReport::finish(errors, warnings)
    }

    fn check_name(field: &FieldConfig, resolved: Option<FieldType>, errors: &mut Vec<String>) {
        let name = field.name.as_deref();
        if resolved.is_some_and(|t| t.requires_name()) && is_blank(name) {
            errors.push("Field name is required".to_string());
        }
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            if !is_valid_name(name) {
                errors.push(
                    "Field name must start with a letter and contain only letters, numbers, and underscores"
                        .to_string(),
                );
            }
        }
    }

    fn check_label(field: &FieldConfig, resolved: Option<FieldType>, errors: &mut Vec<String>) {
        if let Some(ty) = resolved {
            if ty.requires_label() && is_blank(field.label.as_deref()) {
                errors.push(format!("Label is required for {} fields", ty));
            }
        }
        if let Some(label) = field.label.as_deref() {
            if label.chars().count() > MAX_LABEL_CHARS {
                errors.push(format!("Label must be at most {} characters", MAX_LABEL_CHARS));
            }
        }
    }

    fn check_text(field: &FieldConfig, resolved: Option<FieldType>, errors: &mut Vec<String>) {
        if let Some(ty) = resolved {
            if ty.requires_text() && is_blank(field.text.as_deref()) {
                errors.push(format!("Text is required for {} fields", ty));
            }
        }
        if let Some(text) = field.text.as_deref() {
            if text.chars().count() > MAX_TEXT_CHARS {
                errors.push(format!("Text must be at most {} characters", MAX_TEXT_CHARS));
            }
        }
    }

    fn check_placeholder(field: &FieldConfig, resolved: Option<FieldType>, errors: &mut Vec<String>) {
        let Some(placeholder) = field.placeholder.as_deref() else {
            return;
        };
        if let Some(ty) = resolved {
            if !ty.accepts_placeholder() {
                errors.push(format!("Placeholder is not applicable to {} fields", ty));
            }
        }
        if placeholder.chars().count() > MAX_PLACEHOLDER_CHARS {
            errors.push(format!(
                "Placeholder must be at most {} characters",
                MAX_PLACEHOLDER_CHARS
            ));
        }
    }

    fn check_options(field: &FieldConfig, resolved: Option<FieldType>, errors: &mut Vec<String>) {
        let Some(ty) = resolved.filter(|t| t.requires_options()) else {
            return;
        };

        let Some(options) = field.options.as_deref().filter(|o| !o.is_empty()) else {
            errors.push(format!("At least one option is required for {} fields", ty));
            return;
        };

        for (index, option) in options.iter().enumerate() {
            if is_blank(option.label.as_deref()) {
                errors.push(format!("Option {} must have a label", index + 1));
            }
            if !has_usable_value(option.value.as_ref()) {
                errors.push(format!("Option {} must have a value", index + 1));
            }
        }

        let mut seen: Vec<&Value> = Vec::new();
        let mut duplicated = false;
        for value in options.iter().filter_map(|o| o.value.as_ref()) {
            if seen.contains(&value) {
                duplicated = true;
            } else {
                seen.push(value);
            }
        }
        if duplicated {
            errors.push("Option values must be unique".to_string());
        }
    }

    fn check_type_extras(
        field: &FieldConfig,
        resolved: Option<FieldType>,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        let Some(ty) = resolved else {
            return;
        };
        match ty {
            FieldType::Textarea => {
                if let Some(rows) = field.rows {
                    if !(1..=20).contains(&rows) {
                        errors.push("Rows must be between 1 and 20".to_string());
                    }
                }
            }
            FieldType::Rating => {
                if let Some(max) = field.max {
                    if !(1..=10).contains(&max) {
                        errors.push("Rating max must be between 1 and 10".to_string());
                    }
                }
            }
            FieldType::Header => {
                if let Some(variant) = field.variant.as_deref() {
                    if !["h1", "h2", "h3", "h4", "h5", "h6"].contains(&variant) {
                        errors.push(
                            "Header variant must be one of h1, h2, h3, h4, h5, h6".to_string(),
                        );
                    }
                }
                if let Some(align) = field.align.as_deref() {
                    if !["left", "center", "right"].contains(&align) {
                        errors.push("Align must be one of left, center, right".to_string());
                    }
                }
            }
            FieldType::Paragraph => {
                if let Some(align) = field.align.as_deref() {
                    if !["left", "center", "right", "justify"].contains(&align) {
                        errors.push(
                            "Paragraph align must be one of left, center, right, justify"
                                .to_string(),
                        );
                    }
                }
            }
            FieldType::Spacer => {
                if let Some(height) = field.height {
                    if !(1..=200).contains(&height) {
                        errors.push("Spacer height must be between 1 and 200".to_string());
                    }
                }
            }
            FieldType::Step => {
                if let Some(title) = field.title.as_deref() {
                    if title.chars().count() > MAX_STEP_TITLE_CHARS {
                        errors.push(format!(
                            "Step title must be at most {} characters",
                            MAX_STEP_TITLE_CHARS
                        ));
                    }
                }
                if let Some(description) = field.description.as_deref() {
                    if description.chars().count() > MAX_STEP_DESCRIPTION_CHARS {
                        errors.push(format!(
                            "Step description must be at most {} characters",
                            MAX_STEP_DESCRIPTION_CHARS
                        ));
                    }
                }
            }
            FieldType::Hidden => {
                if !has_usable_value(field.value.as_ref()) {
                    warnings.push("Hidden field has no default value".to_string());
                }
            }
            _ => {}
        }
    }

    fn check_validations(field: &FieldConfig, errors: &mut Vec<String>) {
        let Some(rules) = field.validations.as_ref() else {
            return;
        };

        for (key, value) in rules {
            if !ALLOWED_VALIDATION_KEYS.contains(&key.as_str()) {
                errors.push(format!("Unknown validation rule '{}'", key));
                continue;
            }
            match key.as_str() {
                "required" | "email" | "url" => {
                    if !value.is_boolean() {
                        errors.push(format!("Validation rule '{}' must be a boolean", key));
                    }
                }
                "minLength" | "maxLength" => {
                    if value.as_u64().is_none() {
                        errors.push(format!("{} must be a non-negative integer", key));
                    }
                }
                "min" | "max" => {
                    if value.as_f64().is_none() {
                        errors.push(format!("{} must be a number", key));
                    }
                }
                "pattern" => match value.as_str() {
                    None => errors.push("Pattern must be a string".to_string()),
                    Some(pattern) => {
                        if Regex::new(pattern).is_err() {
                            errors.push("Pattern must be a valid regular expression".to_string());
                        }
                    }
                },
                "fileSize" => {
                    if !value.as_i64().is_some_and(|size| (1..=100).contains(&size)) {
                        errors.push(
                            "File size limit must be an integer between 1 and 100 MB".to_string(),
                        );
                    }
                }
                "fileType" => {
                    let mime_shaped = value.as_array().is_some_and(|types| {
                        !types.is_empty()
                            && types
                                .iter()
                                .all(|t| t.as_str().is_some_and(|s| s.contains('/')))
                    });
                    if !mime_shaped {
                        errors.push(
                            "File types must be a non-empty array of MIME types".to_string(),
                        );
                    }
                }
                _ => {}
            }
        }

        let min_length = rules.get("minLength").and_then(Value::as_u64);
        let max_length = rules.get("maxLength").and_then(Value::as_u64);
        if let (Some(lo), Some(hi)) = (min_length, max_length) {
            if lo > hi {
                errors.push("minLength cannot be greater than maxLength".to_string());
            }
        }

        let min = rules.get("min").and_then(Value::as_f64);
        let max = rules.get("max").and_then(Value::as_f64);
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                errors.push("min cannot be greater than max".to_string());
            }
        }
    }

    fn check_dependency_shape(field: &FieldConfig, errors: &mut Vec<String>) {
        let Some(dependency) = field.depends_on.as_ref() else {
            return;
        };
        if is_blank(dependency.field.as_deref()) {
            errors.push("Dependency must reference a field name".to_string());
        }
        match dependency.condition.as_deref() {
            None | Some("") => errors.push("Dependency condition is required".to_string()),
            Some(raw) => {
                if Condition::parse(raw).is_none() {
                    errors.push(format!("Unknown dependency condition '{}'", raw));
                }
            }
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A value counts as usable when it is present and neither null nor an empty
/// string. Zero and false are usable defaults.
fn has_usable_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Values that appear more than once, in first-seen order. Blank entries are
/// skipped: only fields that declare the property participate.
fn duplicates<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for value in values.flatten().filter(|v| !v.is_empty()) {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    order.retain(|v| counts[v] > 1);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_field(id: &str, name: &str, label: &str) -> FieldConfig {
        FieldConfig {
            id: Some(id.into()),
            field_type: Some("text".into()),
            name: Some(name.into()),
            label: Some(label.into()),
            ..FieldConfig::default()
        }
    }

    #[test]
    fn test_missing_configuration() {
        let report = FieldSchemaValidator::validate_field(None);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Field configuration is required"]);
    }

    #[test]
    fn test_valid_text_field() {
        let report = FieldSchemaValidator::validate_field(Some(&text_field("f1", "name", "Name")));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_errors_accumulate() {
        let field = FieldConfig {
            field_type: Some("text".into()),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(!report.is_valid);
        // id, name and label all missing, reported together
        assert!(report.errors.contains(&"Field id is required".to_string()));
        assert!(report.errors.contains(&"Field name is required".to_string()));
        assert!(report
            .errors
            .contains(&"Label is required for text fields".to_string()));
    }

    #[test]
    fn test_unknown_type() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("carousel".into()),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Unknown field type 'carousel'".to_string()));
    }

    #[test]
    fn test_layout_types_never_require_label() {
        for raw in ["header", "paragraph", "divider", "spacer", "step"] {
            let field = FieldConfig {
                id: Some("f1".into()),
                field_type: Some(raw.into()),
                text: Some("Heading".into()),
                ..FieldConfig::default()
            };
            let report = FieldSchemaValidator::validate_field(Some(&field));
            assert!(
                !report.errors.iter().any(|e| e.contains("Label is required")),
                "{} should not require a label: {:?}",
                raw,
                report.errors
            );
        }
    }

    #[test]
    fn test_input_types_require_label() {
        for raw in ["text", "email", "select", "file", "rating", "switch"] {
            let field = FieldConfig {
                id: Some("f1".into()),
                field_type: Some(raw.into()),
                name: Some("field_name".into()),
                ..FieldConfig::default()
            };
            let report = FieldSchemaValidator::validate_field(Some(&field));
            assert!(
                report
                    .errors
                    .contains(&format!("Label is required for {} fields", raw)),
                "{} must require a label",
                raw
            );
        }
    }

    #[test]
    fn test_name_format() {
        let mut field = text_field("f1", "1bad", "Label");
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report.errors.iter().any(|e| e.contains("start with a letter")));

        field.name = Some("good_name_2".into());
        assert!(FieldSchemaValidator::validate_field(Some(&field)).is_valid);
    }

    #[test]
    fn test_label_length_cap() {
        let field = text_field("f1", "name", &"x".repeat(101));
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Label must be at most 100 characters".to_string()));
    }

    #[test]
    fn test_placeholder_only_on_free_text_inputs() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("checkbox".into()),
            name: Some("agree".into()),
            label: Some("Agree".into()),
            placeholder: Some("pick one".into()),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Placeholder is not applicable to checkbox fields".to_string()));
    }

    #[test]
    fn test_grid_size_membership() {
        let mut field = text_field("f1", "name", "Name");
        field.grid_size = Some(5);
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Grid size must be one of 1, 2, 3, 4, 6, 12".to_string()));
    }

    #[test]
    fn test_select_requires_options() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("select".into()),
            name: Some("choice".into()),
            label: Some("Choice".into()),
            options: Some(vec![]),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("At least one option")));
    }

    #[test]
    fn test_duplicate_option_values() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("select".into()),
            name: Some("choice".into()),
            label: Some("Choice".into()),
            options: Some(vec![
                crate::domain::value_objects::FieldOption::new("A", "a"),
                crate::domain::value_objects::FieldOption::new("B", "a"),
            ]),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report.errors.iter().any(|e| e.contains("must be unique")));
    }

    #[test]
    fn test_textarea_rows_range() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("textarea".into()),
            name: Some("notes".into()),
            label: Some("Notes".into()),
            rows: Some(40),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Rows must be between 1 and 20".to_string()));
    }

    #[test]
    fn test_validation_rules() {
        let mut rules = serde_json::Map::new();
        rules.insert("minLength".into(), json!(10));
        rules.insert("maxLength".into(), json!(5));
        rules.insert("pattern".into(), json!("["));
        rules.insert("bogus".into(), json!(true));
        let mut field = text_field("f1", "name", "Name");
        field.validations = Some(rules);

        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"minLength cannot be greater than maxLength".to_string()));
        assert!(report
            .errors
            .contains(&"Pattern must be a valid regular expression".to_string()));
        assert!(report
            .errors
            .contains(&"Unknown validation rule 'bogus'".to_string()));
    }

    #[test]
    fn test_min_max_cross_check() {
        let mut rules = serde_json::Map::new();
        rules.insert("min".into(), json!(10.5));
        rules.insert("max".into(), json!(2));
        let mut field = text_field("f1", "amount", "Amount");
        field.field_type = Some("number".into());
        field.validations = Some(rules);

        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"min cannot be greater than max".to_string()));
    }

    #[test]
    fn test_file_rules() {
        let mut rules = serde_json::Map::new();
        rules.insert("fileSize".into(), json!(500));
        rules.insert("fileType".into(), json!(["png"]));
        let mut field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("file".into()),
            name: Some("attachment".into()),
            label: Some("Attachment".into()),
            ..FieldConfig::default()
        };
        field.validations = Some(rules);

        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"File size limit must be an integer between 1 and 100 MB".to_string()));
        assert!(report
            .errors
            .contains(&"File types must be a non-empty array of MIME types".to_string()));
    }

    #[test]
    fn test_hidden_field_warning_not_error() {
        let field = FieldConfig {
            id: Some("f1".into()),
            field_type: Some("hidden".into()),
            name: Some("source".into()),
            ..FieldConfig::default()
        };
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report.is_valid);
        assert_eq!(report.warnings, vec!["Hidden field has no default value"]);

        // Zero and false are usable defaults
        for value in [json!(0), json!(false)] {
            let mut with_default = field.clone();
            with_default.value = Some(value);
            let report = FieldSchemaValidator::validate_field(Some(&with_default));
            assert!(report.warnings.is_empty());
        }
    }

    #[test]
    fn test_dependency_condition_membership() {
        let mut field = text_field("f1", "city", "City");
        field.depends_on = Some(crate::domain::value_objects::FieldDependency {
            field: Some("country".into()),
            value: Some(json!("US")),
            condition: Some("greater_than".into()),
        });
        let report = FieldSchemaValidator::validate_field(Some(&field));
        assert!(report
            .errors
            .contains(&"Unknown dependency condition 'greater_than'".to_string()));
    }

    #[test]
    fn test_empty_array() {
        let report = FieldSchemaValidator::validate_fields(&[]);
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Form must have at least one field"]);
    }

    #[test]
    fn test_well_formed_array() {
        let fields = vec![
            text_field("f1", "first_name", "First Name"),
            text_field("f2", "last_name", "Last Name"),
            text_field("f3", "nickname", "Nickname"),
        ];
        let report = FieldSchemaValidator::validate_fields(&fields);
        assert!(report.is_valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_errors_prefixed_with_position() {
        let fields = vec![
            text_field("f1", "name", "Name"),
            FieldConfig::default(),
        ];
        let report = FieldSchemaValidator::validate_fields(&fields);
        assert!(report
            .errors
            .iter()
            .all(|e| e.starts_with("Field 2: ")));
    }

    #[test]
    fn test_duplicate_names_and_ids() {
        let fields = vec![
            text_field("f1", "email", "Email"),
            text_field("f1", "email", "Backup Email"),
        ];
        let report = FieldSchemaValidator::validate_fields(&fields);
        assert!(report
            .errors
            .contains(&"Duplicate field name 'email'".to_string()));
        assert!(report.errors.contains(&"Duplicate field id 'f1'".to_string()));
    }

    #[test]
    fn test_missing_dependency_target() {
        let mut dependent = text_field("f2", "city", "City");
        dependent.depends_on = Some(crate::domain::value_objects::FieldDependency {
            field: Some("country".into()),
            value: Some(json!("US")),
            condition: Some("equals".into()),
        });
        let fields = vec![text_field("f1", "name", "Name"), dependent];
        let report = FieldSchemaValidator::validate_fields(&fields);
        assert!(report
            .errors
            .contains(&"Field 2: Dependent field 'country' does not exist".to_string()));
    }

    #[test]
    fn test_dependency_target_found() {
        let mut dependent = text_field("f2", "city", "City");
        dependent.depends_on = Some(crate::domain::value_objects::FieldDependency {
            field: Some("country".into()),
            value: Some(json!("US")),
            condition: Some("equals".into()),
        });
        let fields = vec![text_field("f1", "country", "Country"), dependent];
        let report = FieldSchemaValidator::validate_fields(&fields);
        assert!(report.is_valid, "{:?}", report.errors);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let fields = vec![text_field("f1", "name", "Name"), FieldConfig::default()];
        let first = FieldSchemaValidator::validate_fields(&fields);
        let second = FieldSchemaValidator::validate_fields(&fields);
        assert_eq!(first, second);
    }
}
