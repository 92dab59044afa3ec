//! Application state definitions

use super::directory::{
    all_specialties, suggestions, Consultation, DirectoryQuery, DirectorySort, Doctor,
};
use super::forms::{FormSession, LoginForm, SessionError, TextInput};
use super::schema::FormSchema;
use std::collections::VecDeque;

/// Message shown when the schema has nothing to walk through
pub const FORM_NOT_FOUND: &str = "Form not found";

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Form,
    Doctors,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Form => "Form",
            Self::Doctors => "Doctors",
        }
    }
}

/// Observable outcome of a schema fetch
#[derive(Debug, Clone)]
pub enum FormLoad {
    Loading,
    Failed(String),
    Ready(Box<FormSession>),
}

/// The form screen for one identifier
#[derive(Debug, Clone)]
pub struct FormScreen {
    pub identifier: String,
    pub load: FormLoad,
    /// Banner shown above the form
    pub notice: Option<String>,
}

impl FormScreen {
    pub fn loading(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            load: FormLoad::Loading,
            notice: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, FormLoad::Loading)
    }

    pub fn session(&self) -> Option<&FormSession> {
        match &self.load {
            FormLoad::Ready(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut FormSession> {
        match &mut self.load {
            FormLoad::Ready(session) => Some(&mut **session),
            _ => None,
        }
    }

    /// Start a session over a fetched schema
    pub fn resolve(&mut self, schema: FormSchema) {
        self.load = match FormSession::new(schema) {
            Ok(session) => FormLoad::Ready(Box::new(session)),
            Err(SessionError::EmptySchema) => FormLoad::Failed(FORM_NOT_FOUND.to_string()),
        };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.load = FormLoad::Failed(message.into());
    }
}

/// Focus areas of the doctor directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryFocus {
    #[default]
    Search,
    Filters,
    List,
}

impl DirectoryFocus {
    pub fn next(&self) -> Self {
        match self {
            Self::Search => Self::Filters,
            Self::Filters => Self::List,
            Self::List => Self::Search,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Search => Self::List,
            Self::Filters => Self::Search,
            Self::List => Self::Filters,
        }
    }
}

/// One row of the filter panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterItem {
    Sort(DirectorySort),
    Consultation(Consultation),
    Specialty(String),
    ClearAll,
}

impl FilterItem {
    pub fn label(&self) -> &str {
        match self {
            Self::Sort(sort) => sort.label(),
            Self::Consultation(mode) => mode.label(),
            Self::Specialty(name) => name,
            Self::ClearAll => "Clear filters",
        }
    }
}

/// State of the doctor directory screen
#[derive(Debug, Clone)]
pub struct DirectoryScreen {
    pub doctors: Vec<Doctor>,
    pub loading: bool,
    pub query: DirectoryQuery,
    pub search: TextInput,
    pub focus: DirectoryFocus,
    pub filter_index: usize,
    pub selected_index: usize,
    /// Highlighted autocomplete suggestion
    pub suggestion_index: Option<usize>,
    specialties: Vec<String>,
}

impl Default for DirectoryScreen {
    fn default() -> Self {
        Self {
            doctors: Vec::new(),
            loading: false,
            query: DirectoryQuery::default(),
            search: TextInput::new("search", "Search doctors..."),
            focus: DirectoryFocus::default(),
            filter_index: 0,
            selected_index: 0,
            suggestion_index: None,
            specialties: Vec::new(),
        }
    }
}

impl DirectoryScreen {
    /// Replace the feed
    pub fn set_doctors(&mut self, doctors: Vec<Doctor>) {
        self.specialties = all_specialties(&doctors);
        self.doctors = doctors;
        self.loading = false;
        self.selected_index = 0;
        self.filter_index = self.filter_index.min(self.filter_items().len() - 1);
    }

    /// Doctors after search, filters and sort
    pub fn visible(&self) -> Vec<&Doctor> {
        self.query.apply(&self.doctors)
    }

    /// Autocomplete entries for the current search text
    pub fn suggestions(&self) -> Vec<&Doctor> {
        if self.focus != DirectoryFocus::Search {
            return Vec::new();
        }
        suggestions(&self.doctors, self.search.as_text())
    }

    fn sync_search(&mut self) {
        self.query.search = self.search.as_text().to_string();
        self.selected_index = 0;
        self.suggestion_index = None;
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search.push_char(c);
        self.sync_search();
    }

    pub fn search_backspace(&mut self) {
        self.search.pop_char();
        self.sync_search();
    }

    pub fn next_suggestion(&mut self) {
        let count = self.suggestions().len();
        if count == 0 {
            return;
        }
        self.suggestion_index = Some(match self.suggestion_index {
            Some(i) if i + 1 < count => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    pub fn prev_suggestion(&mut self) {
        self.suggestion_index = match self.suggestion_index {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Put the highlighted suggestion's name into the search
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(name) = self
            .suggestion_index
            .and_then(|i| self.suggestions().get(i).map(|d| d.name.clone()))
        else {
            return false;
        };
        self.search = TextInput::with_value("search", "Search doctors...", name);
        self.sync_search();
        self.focus = DirectoryFocus::List;
        true
    }

    /// Rows of the filter panel
    pub fn filter_items(&self) -> Vec<FilterItem> {
        let mut items = vec![
            FilterItem::Sort(DirectorySort::Fees),
            FilterItem::Sort(DirectorySort::Experience),
            FilterItem::Consultation(Consultation::Video),
            FilterItem::Consultation(Consultation::InClinic),
        ];
        items.extend(self.specialties.iter().cloned().map(FilterItem::Specialty));
        items.push(FilterItem::ClearAll);
        items
    }

    pub fn is_filter_active(&self, item: &FilterItem) -> bool {
        match item {
            FilterItem::Sort(sort) => self.query.sort == Some(*sort),
            FilterItem::Consultation(mode) => self.query.consultation == Some(*mode),
            FilterItem::Specialty(name) => self.query.specialties.contains(name),
            FilterItem::ClearAll => false,
        }
    }

    pub fn next_filter(&mut self) {
        let count = self.filter_items().len();
        self.filter_index = (self.filter_index + 1) % count;
    }

    pub fn prev_filter(&mut self) {
        let count = self.filter_items().len();
        self.filter_index = (self.filter_index + count - 1) % count;
    }

    /// Apply the highlighted filter row
    pub fn toggle_filter(&mut self) {
        let Some(item) = self.filter_items().into_iter().nth(self.filter_index) else {
            return;
        };
        match item {
            FilterItem::Sort(sort) => self.query.set_sort(sort),
            FilterItem::Consultation(mode) if self.query.consultation == Some(mode) => {
                self.query.clear_consultation()
            }
            FilterItem::Consultation(mode) => self.query.set_consultation(mode),
            FilterItem::Specialty(name) => self.query.toggle_specialty(&name),
            FilterItem::ClearAll => {
                self.query.clear_specialties();
                self.query.clear_consultation();
                self.query.sort = None;
            }
        }
        self.selected_index = 0;
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if self.selected_index + 1 < count {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Screens
    pub login: LoginForm,
    pub form: Option<FormScreen>,
    pub directory: DirectoryScreen,

    // Feedback
    pub error_queue: VecDeque<String>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn form_session(&self) -> Option<&FormSession> {
        self.form.as_ref().and_then(FormScreen::session)
    }

    pub fn form_session_mut(&mut self) -> Option<&mut FormSession> {
        self.form.as_mut().and_then(FormScreen::session_mut)
    }
}
