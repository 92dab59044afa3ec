//! Section validation rules

use super::values::{FieldValue, FormValues, ValidationErrors};
use crate::state::schema::{FieldKind, FormField, FormSection};

/// Generic message for a missing required value
pub const REQUIRED_MESSAGE: &str = "Required field";

/// Validate every field of `section` against `values`.
///
/// Rules run in order (required, minimum length, maximum length) and a later
/// failing rule replaces the message of an earlier one for the same field.
pub fn validate_section(section: &FormSection, values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in &section.fields {
        if let Some(message) = validate_field(field, values.get(&field.field_id)) {
            errors.insert(field.field_id.clone(), message);
        }
    }
    errors
}

/// Validate a single field, returning the message to display if it fails
pub fn validate_field(field: &FormField, value: Option<&FieldValue>) -> Option<String> {
    let mut message = None;

    if field.required && is_missing(field.kind, value) {
        message = Some(custom_or(field, REQUIRED_MESSAGE.to_string()));
    }

    if let Some(FieldValue::Single(text)) = value {
        let len = text.chars().count();
        if let Some(min) = field.min_length.filter(|m| *m > 0) {
            if len < min {
                message = Some(custom_or(field, format!("Minimum {min} characters")));
            }
        }
        if let Some(max) = field.max_length.filter(|m| *m > 0) {
            if len > max {
                message = Some(custom_or(field, format!("Maximum {max} characters")));
            }
        }
    }

    message
}

/// Checkbox fields need a non-empty selection; every other kind a non-empty string
fn is_missing(kind: FieldKind, value: Option<&FieldValue>) -> bool {
    match (kind, value) {
        (_, None) => true,
        (FieldKind::Checkbox, Some(FieldValue::Multi(selected))) => selected.is_empty(),
        (FieldKind::Checkbox, Some(FieldValue::Single(_))) => true,
        (_, Some(v)) => v.is_empty(),
    }
}

fn custom_or(field: &FormField, generic: String) -> String {
    field
        .validation_message()
        .map(str::to_string)
        .unwrap_or(generic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::schema::{FieldOption, FieldValidation};
    use pretty_assertions::assert_eq;

    fn text_field(id: &str) -> FormField {
        FormField {
            field_id: id.to_string(),
            kind: FieldKind::Text,
            label: id.to_string(),
            placeholder: None,
            required: false,
            validation: None,
            options: Vec::new(),
            min_length: None,
            max_length: None,
        }
    }

    fn checkbox_field(id: &str) -> FormField {
        FormField {
            kind: FieldKind::Checkbox,
            options: ["a", "b", "c"]
                .iter()
                .map(|v| FieldOption {
                    value: v.to_string(),
                    label: v.to_uppercase(),
                })
                .collect(),
            ..text_field(id)
        }
    }

    fn section(fields: Vec<FormField>) -> FormSection {
        FormSection {
            section_id: 1,
            title: "S".to_string(),
            description: String::new(),
            fields,
        }
    }

    mod required {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_missing_text_uses_generic_message() {
            let field = FormField {
                required: true,
                ..text_field("name")
            };
            assert_eq!(
                validate_field(&field, None),
                Some("Required field".to_string())
            );
        }

        #[test]
        fn test_empty_string_fails() {
            let field = FormField {
                required: true,
                ..text_field("name")
            };
            let value = FieldValue::from("");
            assert!(validate_field(&field, Some(&value)).is_some());
        }

        #[test]
        fn test_custom_message_wins() {
            let field = FormField {
                required: true,
                validation: Some(FieldValidation {
                    message: Some("Please enter your name".to_string()),
                }),
                ..text_field("name")
            };
            assert_eq!(
                validate_field(&field, None),
                Some("Please enter your name".to_string())
            );
        }

        #[test]
        fn test_empty_custom_message_falls_back() {
            let field = FormField {
                required: true,
                validation: Some(FieldValidation {
                    message: Some(String::new()),
                }),
                ..text_field("name")
            };
            assert_eq!(
                validate_field(&field, None),
                Some("Required field".to_string())
            );
        }

        #[test]
        fn test_checkbox_fails_iff_selection_empty() {
            let field = FormField {
                required: true,
                ..checkbox_field("interests")
            };
            assert!(validate_field(&field, None).is_some());
            assert!(validate_field(&field, Some(&FieldValue::Multi(vec![]))).is_some());
            let picked = FieldValue::Multi(vec!["b".to_string()]);
            assert!(validate_field(&field, Some(&picked)).is_none());
        }

        #[test]
        fn test_optional_absent_passes() {
            let field = FormField {
                min_length: Some(3),
                ..text_field("nick")
            };
            assert!(validate_field(&field, None).is_none());
        }
    }

    mod length {
        use super::*;
        use pretty_assertions::assert_eq;

        fn bounded(min: Option<usize>, max: Option<usize>) -> FormField {
            FormField {
                min_length: min,
                max_length: max,
                ..text_field("code")
            }
        }

        #[test]
        fn test_below_minimum() {
            let field = bounded(Some(5), None);
            assert_eq!(
                validate_field(&field, Some(&FieldValue::from("ab"))),
                Some("Minimum 5 characters".to_string())
            );
        }

        #[test]
        fn test_above_maximum() {
            let field = bounded(None, Some(5));
            assert_eq!(
                validate_field(&field, Some(&FieldValue::from("abcdef"))),
                Some("Maximum 5 characters".to_string())
            );
        }

        #[test]
        fn test_within_both_bounds() {
            let field = bounded(Some(5), Some(5));
            assert!(validate_field(&field, Some(&FieldValue::from("abcde"))).is_none());
        }

        #[test]
        fn test_custom_message_overrides_length_messages() {
            let field = FormField {
                validation: Some(FieldValidation {
                    message: Some("Use 5 characters".to_string()),
                }),
                ..bounded(Some(5), None)
            };
            assert_eq!(
                validate_field(&field, Some(&FieldValue::from("ab"))),
                Some("Use 5 characters".to_string())
            );
        }

        #[test]
        fn test_length_overrides_required_message() {
            let field = FormField {
                required: true,
                ..bounded(Some(3), None)
            };
            assert_eq!(
                validate_field(&field, Some(&FieldValue::from(""))),
                Some("Minimum 3 characters".to_string())
            );
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            let field = bounded(None, Some(3));
            assert!(validate_field(&field, Some(&FieldValue::from("äöü"))).is_none());
        }

        #[test]
        fn test_zero_minimum_is_ignored() {
            let field = bounded(Some(0), None);
            assert!(validate_field(&field, Some(&FieldValue::from(""))).is_none());
        }

        #[test]
        fn test_bounds_ignored_for_selections() {
            let field = FormField {
                min_length: Some(5),
                ..checkbox_field("tags")
            };
            let value = FieldValue::Multi(vec!["a".to_string()]);
            assert!(validate_field(&field, Some(&value)).is_none());
        }
    }

    #[test]
    fn test_validate_section_collects_only_failures() {
        let s = section(vec![
            FormField {
                required: true,
                ..text_field("name")
            },
            text_field("nickname"),
            FormField {
                required: true,
                ..checkbox_field("interests")
            },
        ]);
        let mut values = FormValues::new();
        values.set("interests", vec!["a".to_string()]);

        let errors = validate_section(&s, &values);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Required field"));
    }

    #[test]
    fn test_validate_section_ignores_other_sections_values() {
        let s = section(vec![text_field("a")]);
        let mut values = FormValues::new();
        values.set("elsewhere", "");
        assert!(validate_section(&s, &values).is_empty());
    }
}
