//! Editable text inputs used outside the schema-driven form

/// A labelled single-line text input with its current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl TextInput {
    /// Create an empty input
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: String::new(),
        }
    }

    /// Create an input with an initial value
    pub fn with_value(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: value.into(),
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Value with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Value shown when rendering; a placeholder when empty and unfocused
    pub fn display_value(&self, is_active: bool) -> String {
        if self.value.is_empty() && !is_active {
            "(empty)".to_string()
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let input = TextInput::new("name", "Name");
        assert_eq!(input.as_text(), "");
        assert!(input.is_blank());
    }

    #[test]
    fn test_push_and_pop() {
        let mut input = TextInput::new("name", "Name");
        input.push_char('a');
        input.push_char('b');
        assert_eq!(input.as_text(), "ab");
        input.pop_char();
        assert_eq!(input.as_text(), "a");
        input.pop_char();
        input.pop_char(); // popping empty is a no-op
        assert_eq!(input.as_text(), "");
    }

    #[test]
    fn test_blank_ignores_whitespace() {
        let input = TextInput::with_value("id", "Roll Number", "   ");
        assert!(input.is_blank());
        let input = TextInput::with_value("id", "Roll Number", " RA1 ");
        assert_eq!(input.trimmed(), "RA1");
    }

    #[test]
    fn test_display_value_placeholder() {
        let input = TextInput::new("name", "Name");
        assert_eq!(input.display_value(false), "(empty)");
        assert_eq!(input.display_value(true), "");
    }
}
