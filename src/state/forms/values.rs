//! Accumulated form values and validation results

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value bound to a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text-like, dropdown and radio fields
    Single(String),
    /// Checkbox fields, in the order options were ticked
    Multi(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            FieldValue::Multi(v) => Some(v),
            FieldValue::Single(_) => None,
        }
    }

    /// Empty string or empty selection
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(s) => s.is_empty(),
            FieldValue::Multi(v) => v.is_empty(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Single(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Single(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::Multi(v)
    }
}

/// User input across all sections, keyed by field id.
///
/// A key is absent until the field is written; choice fields drop their key
/// when their selection becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.0.get(field_id)
    }

    pub fn single(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).and_then(FieldValue::as_single)
    }

    pub fn multi(&self, field_id: &str) -> Option<&[String]> {
        self.get(field_id).and_then(FieldValue::as_multi)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.0.contains_key(field_id)
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field_id.into(), value.into());
    }

    pub fn remove(&mut self, field_id: &str) -> Option<FieldValue> {
        self.0.remove(field_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-field error messages of the last validated section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    /// Record a message, replacing any earlier one for the field
    pub fn insert(&mut self, field_id: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field_id.into(), message.into());
    }

    pub fn remove(&mut self, field_id: &str) -> Option<String> {
        self.0.remove(field_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from("a").is_empty());
        assert!(FieldValue::Multi(vec![]).is_empty());
        assert!(!FieldValue::Multi(vec!["a".into()]).is_empty());
    }

    #[test]
    fn test_accessors_by_shape() {
        let mut values = FormValues::new();
        values.set("name", "Ann");
        values.set("tags", vec!["a".to_string()]);

        assert_eq!(values.single("name"), Some("Ann"));
        assert_eq!(values.multi("name"), None);
        assert_eq!(values.multi("tags"), Some(&["a".to_string()][..]));
        assert_eq!(values.single("tags"), None);
        assert!(values.single("absent").is_none());
    }

    #[test]
    fn test_values_serialize_flat() {
        let mut values = FormValues::new();
        values.set("name", "Ann");
        values.set("interests", vec!["a".to_string(), "c".to_string()]);

        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "interests": ["a", "c"], "name": "Ann" })
        );
    }

    #[test]
    fn test_errors_insert_replaces() {
        let mut errors = ValidationErrors::new();
        errors.insert("name", "Required field");
        errors.insert("name", "Minimum 2 characters");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Minimum 2 characters"));
    }
}
