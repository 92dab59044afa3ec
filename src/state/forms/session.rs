//! Wizard session over a fetched form schema
//!
//! `FormSession` owns the immutable schema together with the section cursor,
//! the accumulated values and the errors of the last validation. All
//! transitions are synchronous and independent of rendering.

use super::validation::validate_section;
use super::values::{FieldValue, FormValues, ValidationErrors};
use crate::state::schema::{FieldKind, FormField, FormSchema, FormSection};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Errors constructing a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("form has no sections")]
    EmptySchema,
}

/// Errors submitting a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("submit is only available on the last section")]
    NotOnLastSection,
    #[error("{} field(s) need attention", .0.len())]
    Invalid(ValidationErrors),
}

/// Result of a forward transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Section passed and the cursor moved forward
    Moved,
    /// Section failed validation; cursor unchanged
    Blocked,
    /// Section passed but there is no further section
    LastSection,
}

/// Button of the navigation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavButton {
    Previous,
    #[default]
    Primary,
}

/// Completed, validated values handed to a submission sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub form_id: String,
    pub identifier: String,
    pub submitted_at: DateTime<Utc>,
    pub values: FormValues,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    cursor: usize,
    values: FormValues,
    errors: ValidationErrors,
    /// Focused row of the active section; `fields.len()` is the navigation row
    focus: usize,
    /// Highlighted option of the focused radio/checkbox field
    option_index: usize,
    selected_button: NavButton,
}

impl FormSession {
    /// Start a session at the first section with no values
    pub fn new(schema: FormSchema) -> Result<Self, SessionError> {
        if schema.sections.is_empty() {
            return Err(SessionError::EmptySchema);
        }
        let mut session = Self {
            schema,
            cursor: 0,
            values: FormValues::new(),
            errors: ValidationErrors::new(),
            focus: 0,
            option_index: 0,
            selected_button: NavButton::Primary,
        };
        session.reset_focus();
        Ok(session)
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn section_count(&self) -> usize {
        self.schema.sections.len()
    }

    pub fn active_section(&self) -> &FormSection {
        &self.schema.sections[self.cursor]
    }

    pub fn is_first_section(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last_section(&self) -> bool {
        self.cursor + 1 == self.section_count()
    }

    // ---- value mutations ----

    /// Write a value without validating. Clears a pending error for the field.
    pub fn set_field_value(&mut self, field_id: &str, value: impl Into<FieldValue>) {
        self.values.set(field_id, value);
        self.errors.remove(field_id);
    }

    /// Remove a value (unselected dropdown, emptied selection)
    pub fn clear_field_value(&mut self, field_id: &str) {
        self.values.remove(field_id);
        self.errors.remove(field_id);
    }

    /// Add `option` to a checkbox selection, or remove it if already present.
    /// Remaining entries keep their order; an emptied selection drops the key.
    pub fn toggle_option(&mut self, field_id: &str, option: &str) {
        let mut selected = self
            .values
            .multi(field_id)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        match selected.iter().position(|v| v == option) {
            Some(pos) => {
                selected.remove(pos);
            }
            None => selected.push(option.to_string()),
        }

        if selected.is_empty() {
            self.clear_field_value(field_id);
        } else {
            self.set_field_value(field_id, selected);
        }
    }

    // ---- validation and navigation ----

    /// Recompute `errors` for the section at `index`; true when it passes
    pub fn validate_section(&mut self, index: usize) -> bool {
        let Some(section) = self.schema.sections.get(index) else {
            return false;
        };
        self.errors = validate_section(section, &self.values);
        self.errors.is_empty()
    }

    /// Validate the active section and move forward when it passes
    pub fn advance(&mut self) -> StepOutcome {
        if !self.validate_section(self.cursor) {
            tracing::debug!(
                section = self.cursor,
                failing = self.errors.len(),
                "section blocked by validation"
            );
            return StepOutcome::Blocked;
        }
        if self.is_last_section() {
            return StepOutcome::LastSection;
        }
        self.cursor += 1;
        self.reset_focus();
        StepOutcome::Moved
    }

    /// Move back one section without validating
    pub fn retreat(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.reset_focus();
        true
    }

    /// Validate the last section and produce the submission
    pub fn submit(&mut self, identifier: &str) -> Result<Submission, SubmitError> {
        if !self.is_last_section() {
            return Err(SubmitError::NotOnLastSection);
        }
        if !self.validate_section(self.cursor) {
            return Err(SubmitError::Invalid(self.errors.clone()));
        }
        Ok(Submission {
            form_id: self.schema.form_id.clone(),
            identifier: identifier.to_string(),
            submitted_at: Utc::now(),
            values: self.values.clone(),
        })
    }

    // ---- focus and keyboard interaction ----

    /// Number of focusable rows: the section's fields plus the navigation row
    pub fn row_count(&self) -> usize {
        self.active_section().fields.len() + 1
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn option_index(&self) -> usize {
        self.option_index
    }

    pub fn selected_button(&self) -> NavButton {
        self.selected_button
    }

    pub fn is_nav_row_focused(&self) -> bool {
        self.focus == self.row_count() - 1
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.active_section().fields.get(self.focus)
    }

    pub fn next_row(&mut self) {
        self.set_focus((self.focus + 1) % self.row_count());
    }

    pub fn prev_row(&mut self) {
        let count = self.row_count();
        self.set_focus((self.focus + count - 1) % count);
    }

    /// Toggle between the Previous and Next/Submit buttons
    pub fn toggle_button(&mut self) {
        self.selected_button = match self.selected_button {
            NavButton::Primary if !self.is_first_section() => NavButton::Previous,
            _ => NavButton::Primary,
        };
    }

    /// Type a character into the focused text-like field
    pub fn input_char(&mut self, c: char) {
        let Some((id, kind)) = self.focused_id_and_kind() else {
            return;
        };
        if !kind.is_text_like() {
            return;
        }
        let mut text = self.values.single(&id).unwrap_or_default().to_string();
        text.push(c);
        self.set_field_value(&id, text);
    }

    /// Insert a line break into the focused textarea
    pub fn newline(&mut self) {
        if matches!(self.focused_id_and_kind(), Some((_, FieldKind::Textarea))) {
            self.input_char('\n');
        }
    }

    /// Delete the last character of the focused text-like field
    pub fn backspace(&mut self) {
        let Some((id, kind)) = self.focused_id_and_kind() else {
            return;
        };
        if !kind.is_text_like() {
            return;
        }
        if let Some(current) = self.values.single(&id) {
            let mut text = current.to_string();
            text.pop();
            self.set_field_value(&id, text);
        }
    }

    /// Move the highlight of the focused choice field by `delta`.
    /// Dropdowns change their selection directly.
    pub fn move_option(&mut self, delta: isize) {
        let Some(field) = self.focused_field() else {
            return;
        };
        match field.kind {
            FieldKind::Radio | FieldKind::Checkbox => {
                let last = field.options.len().saturating_sub(1);
                self.option_index = self.option_index.saturating_add_signed(delta).min(last);
            }
            FieldKind::Dropdown => self.cycle_dropdown(delta),
            FieldKind::Text
            | FieldKind::Tel
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Date
            | FieldKind::Unknown => {}
        }
    }

    /// Primary action on the focused field (select, toggle, cycle)
    pub fn activate(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let id = field.field_id.clone();
        match field.kind {
            FieldKind::Radio => {
                if let Some(option) = field.options.get(self.option_index) {
                    let value = option.value.clone();
                    self.set_field_value(&id, value);
                }
            }
            FieldKind::Checkbox => {
                if let Some(option) = field.options.get(self.option_index) {
                    let value = option.value.clone();
                    self.toggle_option(&id, &value);
                }
            }
            FieldKind::Dropdown => self.cycle_dropdown(1),
            FieldKind::Text
            | FieldKind::Tel
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Date
            | FieldKind::Unknown => {}
        }
    }

    /// Position of a dropdown's selection where 0 is "Select..."
    pub fn dropdown_position(&self, field: &FormField) -> usize {
        self.values
            .single(&field.field_id)
            .and_then(|v| field.options.iter().position(|o| o.value == v))
            .map_or(0, |i| i + 1)
    }

    fn cycle_dropdown(&mut self, delta: isize) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let slots = field.options.len() as isize + 1;
        let current = self.dropdown_position(field) as isize;
        let next = (current + delta).rem_euclid(slots) as usize;
        let id = field.field_id.clone();
        match next {
            0 => self.clear_field_value(&id),
            n => {
                let value = field.options[n - 1].value.clone();
                self.set_field_value(&id, value);
            }
        }
    }

    fn focused_id_and_kind(&self) -> Option<(String, FieldKind)> {
        self.focused_field()
            .map(|f| (f.field_id.clone(), f.kind))
    }

    fn set_focus(&mut self, row: usize) {
        self.focus = row;
        self.option_index = self
            .focused_field()
            .filter(|f| f.kind == FieldKind::Radio)
            .and_then(|f| {
                let current = self.values.single(&f.field_id)?;
                f.options.iter().position(|o| o.value == current)
            })
            .unwrap_or(0);
    }

    fn reset_focus(&mut self) {
        self.selected_button = NavButton::Primary;
        self.set_focus(0);
    }
}
