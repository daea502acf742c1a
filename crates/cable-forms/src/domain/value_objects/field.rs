//! Field configuration value objects
//!
//! The declarative schema a form is built from. `FieldConfig` mirrors the
//! wire shape produced by the form designer: every attribute is optional so
//! that a malformed payload deserializes and the validator can report every
//! problem at once instead of failing on the first missing key.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys permitted inside a field's `validations` map.
pub const ALLOWED_VALIDATION_KEYS: [&str; 10] = [
    "required",
    "minLength",
    "maxLength",
    "min",
    "max",
    "pattern",
    "email",
    "url",
    "fileSize",
    "fileType",
];

/// Open-keyed validation rule map, checked by the schema validator.
pub type ValidationRules = serde_json::Map<String, Value>;

/// The catalog of field types a form designer can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Date,
    Time,
    Week,
    Color,
    Password,
    Url,
    Tel,
    Textarea,
    Select,
    Multiselect,
    Checkbox,
    Radio,
    Switch,
    File,
    Rating,
    Header,
    Paragraph,
    Divider,
    Spacer,
    Hidden,
    Step,
}

impl FieldType {
    pub const ALL: [FieldType; 24] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Number,
        FieldType::Date,
        FieldType::Time,
        FieldType::Week,
        FieldType::Color,
        FieldType::Password,
        FieldType::Url,
        FieldType::Tel,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Multiselect,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Switch,
        FieldType::File,
        FieldType::Rating,
        FieldType::Header,
        FieldType::Paragraph,
        FieldType::Divider,
        FieldType::Spacer,
        FieldType::Hidden,
        FieldType::Step,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Week => "week",
            FieldType::Color => "color",
            FieldType::Password => "password",
            FieldType::Url => "url",
            FieldType::Tel => "tel",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Switch => "switch",
            FieldType::File => "file",
            FieldType::Rating => "rating",
            FieldType::Header => "header",
            FieldType::Paragraph => "paragraph",
            FieldType::Divider => "divider",
            FieldType::Spacer => "spacer",
            FieldType::Hidden => "hidden",
            FieldType::Step => "step",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == value)
    }

    /// Layout elements carry no input value.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            FieldType::Header
                | FieldType::Paragraph
                | FieldType::Divider
                | FieldType::Spacer
                | FieldType::Step
        )
    }

    /// Every non-layout field needs an identifier name.
    pub fn requires_name(self) -> bool {
        !self.is_layout()
    }

    /// Input fields need a user-facing caption; layout elements and hidden
    /// fields do not.
    pub fn requires_label(self) -> bool {
        !self.is_layout() && self != FieldType::Hidden
    }

    pub fn requires_text(self) -> bool {
        matches!(self, FieldType::Header | FieldType::Paragraph)
    }

    pub fn requires_options(self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Multiselect | FieldType::Radio
        )
    }

    pub fn accepts_placeholder(self) -> bool {
        matches!(
            self,
            FieldType::Text
                | FieldType::Email
                | FieldType::Number
                | FieldType::Password
                | FieldType::Url
                | FieldType::Tel
                | FieldType::Textarea
        )
    }

    /// Designer defaults for a freshly placed field of this type.
    ///
    /// Pure lookup: no id is assigned here, the designer does that when the
    /// field is dropped onto the canvas.
    pub fn defaults(self) -> FieldConfig {
        let mut config = FieldConfig {
            field_type: Some(self.as_str().to_string()),
            grid_size: Some(12),
            required: Some(false),
            ..FieldConfig::default()
        };

        match self {
            FieldType::Text => {
                config.label = Some("Text Field".into());
                config.placeholder = Some("Enter text".into());
            }
            FieldType::Email => {
                config.label = Some("Email".into());
                config.placeholder = Some("name@example.com".into());
            }
            FieldType::Number => {
                config.label = Some("Number".into());
                config.placeholder = Some("0".into());
            }
            FieldType::Date => config.label = Some("Date".into()),
            FieldType::Time => config.label = Some("Time".into()),
            FieldType::Week => config.label = Some("Week".into()),
            FieldType::Color => config.label = Some("Color".into()),
            FieldType::Password => {
                config.label = Some("Password".into());
                config.placeholder = Some("Enter password".into());
            }
            FieldType::Url => {
                config.label = Some("URL".into());
                config.placeholder = Some("https://".into());
            }
            FieldType::Tel => {
                config.label = Some("Phone".into());
                config.placeholder = Some("+1 555 000 0000".into());
            }
            FieldType::Textarea => {
                config.label = Some("Long Text".into());
                config.placeholder = Some("Enter text".into());
                config.rows = Some(4);
            }
            FieldType::Select | FieldType::Multiselect | FieldType::Radio => {
                config.label = Some(match self {
                    FieldType::Select => "Dropdown".into(),
                    FieldType::Multiselect => "Multi Select".into(),
                    _ => "Radio Group".into(),
                });
                config.options = Some(vec![
                    FieldOption::new("Option 1", "option_1"),
                    FieldOption::new("Option 2", "option_2"),
                ]);
            }
            FieldType::Checkbox => config.label = Some("Checkbox".into()),
            FieldType::Switch => config.label = Some("Switch".into()),
            FieldType::File => {
                config.label = Some("File Upload".into());
                config.multiple = Some(false);
            }
            FieldType::Rating => {
                config.label = Some("Rating".into());
                config.max = Some(5);
            }
            FieldType::Header => {
                config.text = Some("Section Header".into());
                config.variant = Some("h2".into());
                config.align = Some("left".into());
            }
            FieldType::Paragraph => {
                config.text = Some("Paragraph text".into());
                config.align = Some("left".into());
            }
            FieldType::Divider => {}
            FieldType::Spacer => config.height = Some(20),
            FieldType::Hidden => config.label = Some("Hidden".into()),
            FieldType::Step => {
                config.title = Some("Step".into());
            }
        }

        config
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One choice in a select/multiselect/radio field.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: Option<String>,
    pub value: Option<Value>,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            value: Some(Value::String(value.into())),
        }
    }
}

/// Conditions a dependency rule can apply to the watched field's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Equals,
    NotEquals,
    Contains,
    NotEmpty,
    Empty,
}

impl Condition {
    pub const ALL: [Condition; 5] = [
        Condition::Equals,
        Condition::NotEquals,
        Condition::Contains,
        Condition::NotEmpty,
        Condition::Empty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Equals => "equals",
            Condition::NotEquals => "not_equals",
            Condition::Contains => "contains",
            Condition::NotEmpty => "not_empty",
            Condition::Empty => "empty",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// A field-level visibility rule: this field is only relevant when the named
/// sibling field's value satisfies the condition.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDependency {
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    pub condition: Option<String>,
}

/// One declarative unit of a form, as authored by the designer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub text: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub required: Option<bool>,
    pub grid_size: Option<i64>,
    pub options: Option<Vec<FieldOption>>,
    pub validations: Option<ValidationRules>,
    pub depends_on: Option<FieldDependency>,
    /// Default value, relevant to hidden fields.
    pub value: Option<Value>,
    // Type-specific extras
    pub rows: Option<i64>,
    pub multiple: Option<bool>,
    pub max: Option<i64>,
    pub variant: Option<String>,
    pub align: Option<String>,
    pub height: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl FieldConfig {
    /// Resolved field type, if the raw string names a known type.
    pub fn resolved_type(&self) -> Option<FieldType> {
        self.field_type.as_deref().and_then(FieldType::parse)
    }

    /// Structural activation check: a field with a type and a non-empty
    /// label counts as activatable. Deep per-type validation is the schema
    /// validator's job.
    pub fn has_type(&self) -> bool {
        self.field_type.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_label(&self) -> bool {
        self.label.as_deref().is_some_and(|l| !l.trim().is_empty())
    }
}
