//! Login form state

use super::input::TextInput;

/// Rows of the login form: identifier, name, submit button
const LOGIN_ROWS: usize = 3;

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub identifier: TextInput,
    pub name: TextInput,
    pub active_row: usize,
    /// Banner shown above the inputs
    pub error: Option<String>,
    /// A registration request is in flight
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::prefilled(None, None)
    }

    /// Build the form with values taken from configuration
    pub fn prefilled(identifier: Option<&str>, name: Option<&str>) -> Self {
        Self {
            identifier: TextInput::with_value(
                "identifier",
                "Roll Number",
                identifier.unwrap_or_default(),
            ),
            name: TextInput::with_value("name", "Name", name.unwrap_or_default()),
            active_row: 0,
            error: None,
            submitting: false,
        }
    }

    pub fn next_row(&mut self) {
        self.active_row = (self.active_row + 1) % LOGIN_ROWS;
    }

    pub fn prev_row(&mut self) {
        self.active_row = (self.active_row + LOGIN_ROWS - 1) % LOGIN_ROWS;
    }

    pub fn is_button_active(&self) -> bool {
        self.active_row == LOGIN_ROWS - 1
    }

    fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.active_row {
            0 => Some(&mut self.identifier),
            1 => Some(&mut self.name),
            _ => None,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.active_input_mut() {
            input.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(input) = self.active_input_mut() {
            input.pop_char();
        }
    }

    /// Check the inputs before registering; returns the trimmed credentials
    pub fn credentials(&self) -> Result<(String, String), String> {
        if self.identifier.is_blank() {
            return Err("Roll number is required".to_string());
        }
        if self.name.is_blank() {
            return Err("Name is required".to_string());
        }
        Ok((
            self.identifier.trimmed().to_string(),
            self.name.trimmed().to_string(),
        ))
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}
