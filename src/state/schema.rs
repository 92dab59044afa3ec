//! Form schema definitions as served by the form service

use super::nullable::or_default;
use serde::{Deserialize, Serialize};

/// Top-level response of the form service (`{ "form": { ... } }`)
#[derive(Debug, Clone, Deserialize)]
pub struct FormResponse {
    pub form: FormSchema,
}

/// Immutable description of a multi-section form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_title: String,
    pub form_id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub version: String,
    #[serde(default, deserialize_with = "or_default")]
    pub sections: Vec<FormSection>,
}

impl FormSchema {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// One step of the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSection {
    pub section_id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub fields: Vec<FormField>,
}

/// Closed set of field kinds. Anything else decodes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Tel,
    Email,
    Textarea,
    Date,
    Dropdown,
    Radio,
    Checkbox,
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Single-line text entry (text, tel, email, date)
    pub fn is_single_line(&self) -> bool {
        matches!(self, Self::Text | Self::Tel | Self::Email | Self::Date)
    }

    /// Accepts typed characters
    pub fn is_text_like(&self) -> bool {
        self.is_single_line() || matches!(self, Self::Textarea)
    }

    /// Selection among `options`
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio | Self::Checkbox)
    }
}

/// Custom validation payload (`{ "message": "..." }`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default)]
    pub message: Option<String>,
}

/// An entry of a dropdown, radio or checkbox field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// A single typed input of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub field_id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub required: bool,
    #[serde(default)]
    pub validation: Option<FieldValidation>,
    #[serde(default, deserialize_with = "or_default")]
    pub options: Vec<FieldOption>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl FormField {
    /// Schema-provided message overriding the generic ones; blank counts as none
    pub fn validation_message(&self) -> Option<&str> {
        self.validation
            .as_ref()
            .and_then(|v| v.message.as_deref())
            .filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "form": {
            "formTitle": "Student Information Form",
            "formId": "student-info",
            "version": "1.0",
            "sections": [
                {
                    "sectionId": 1,
                    "title": "Personal Details",
                    "description": "Tell us about yourself",
                    "fields": [
                        {
                            "fieldId": "firstName",
                            "type": "text",
                            "label": "First Name",
                            "placeholder": "Enter your first name",
                            "required": true,
                            "dataTestId": "first-name-input",
                            "validation": { "message": "First name is required" },
                            "minLength": 2,
                            "maxLength": 50
                        },
                        {
                            "fieldId": "gender",
                            "type": "radio",
                            "label": "Gender",
                            "required": true,
                            "options": [
                                { "value": "male", "label": "Male", "dataTestId": "gender-male" },
                                { "value": "female", "label": "Female" }
                            ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_sample_response() {
        let response: FormResponse = serde_json::from_str(SAMPLE).unwrap();
        let schema = response.form;

        assert_eq!(schema.form_title, "Student Information Form");
        assert_eq!(schema.form_id, "student-info");
        assert_eq!(schema.section_count(), 1);

        let first = &schema.sections[0].fields[0];
        assert_eq!(first.kind, FieldKind::Text);
        assert_eq!(first.validation_message(), Some("First name is required"));
        assert_eq!(first.min_length, Some(2));
        assert_eq!(first.max_length, Some(50));

        let gender = &schema.sections[0].fields[1];
        assert_eq!(gender.kind, FieldKind::Radio);
        assert_eq!(gender.options.len(), 2);
        assert_eq!(gender.options[1].label, "Female");
    }

    #[test]
    fn test_unknown_kind_decodes_to_unknown() {
        let json = r#"{"fieldId": "x", "type": "slider", "label": "X"}"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(field.kind, FieldKind::Unknown);
    }

    #[test]
    fn test_optional_keys_default() {
        let json = r#"{"fieldId": "x", "type": "email", "label": "X"}"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert!(!field.required);
        assert!(field.options.is_empty());
        assert!(field.validation_message().is_none());
        assert!(field.placeholder.is_none());
        assert!(field.min_length.is_none());
    }

    #[test]
    fn test_empty_validation_object_has_no_message() {
        let json = r#"{"fieldId": "x", "type": "text", "label": "X", "validation": {}}"#;
        let field: FormField = serde_json::from_str(json).unwrap();
        assert!(field.validation.is_some());
        assert!(field.validation_message().is_none());
    }

    #[test]
    fn test_null_collections_decode_empty() {
        let json = r#"{
            "formTitle": "T", "formId": "t", "version": null,
            "sections": [{
                "sectionId": 1, "title": "A", "description": null,
                "fields": [{
                    "fieldId": "g", "type": "radio", "label": "G",
                    "required": null, "options": null, "validation": null
                }]
            }]
        }"#;
        let schema: FormSchema = serde_json::from_str(json).unwrap();
        let section = &schema.sections[0];
        assert!(section.description.is_empty());

        let field = &section.fields[0];
        assert!(field.options.is_empty());
        assert!(!field.required);
        assert!(field.validation.is_none());
    }

    #[test]
    fn test_kind_classification() {
        assert!(FieldKind::Date.is_single_line());
        assert!(!FieldKind::Textarea.is_single_line());
        assert!(FieldKind::Textarea.is_text_like());
        assert!(FieldKind::Checkbox.is_choice());
        assert!(!FieldKind::Unknown.is_text_like());
        assert!(!FieldKind::Unknown.is_choice());
    }
}
