//! Application state and core logic

use crate::api::{ApiClient, ApiError, FormApi, LogSink, SubmissionSink};
use crate::config::AppConfig;
use crate::platform::is_shortcut;
use crate::state::{
    AppState, DirectoryFocus, Doctor, FieldKind, FormSchema, FormScreen, FormSession,
    LoginForm, NavButton, StepOutcome, SubmitError, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Banner shown on the form screen when registration was rejected
pub const REGISTRATION_FAILED: &str = "Registration failed (user may already exist)";

/// Results of background requests, applied on the UI loop
#[derive(Debug)]
pub enum AppEvent {
    FormLoaded {
        identifier: String,
        result: Result<FormSchema, ApiError>,
    },
    Registered {
        identifier: String,
        result: Result<(), ApiError>,
    },
    DoctorsLoaded(Result<Vec<Doctor>, ApiError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Remote services
    api: Arc<dyn FormApi>,
    /// Destination of completed forms
    sink: Arc<dyn SubmissionSink>,
    config: AppConfig,
    /// Write the config back after a login
    persist_config: bool,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app with the HTTP client and the logging sink
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = ApiClient::from_config(&config)?;
        info!(api = %api.api_base_url(), "using form service");
        let mut app = Self::with_services(config, Arc::new(api), Arc::new(LogSink));
        app.persist_config = true;
        Ok(app)
    }

    /// Create the app over arbitrary services
    pub fn with_services(
        config: AppConfig,
        api: Arc<dyn FormApi>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut state = AppState::default();
        state.login = LoginForm::prefilled(
            config.identifier.as_deref(),
            config.user_name.as_deref(),
        );

        Self {
            state,
            api,
            sink,
            config,
            persist_config: false,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        if self.state.current_view == view {
            return;
        }
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        let Some(view) = self.state.view_history.pop() else {
            return;
        };
        if self.state.current_view == View::Form && view == View::Login {
            // Leaving the form drops it; results still in flight are discarded
            self.state.form = None;
        }
        self.state.current_view = view;

        if view == View::Form {
            let identifier = self
                .state
                .form
                .as_ref()
                .filter(|f| f.is_loading())
                .map(|f| f.identifier.clone());
            if let Some(identifier) = identifier {
                self.start_form_fetch(identifier);
            }
        }
    }

    // ---- background requests ----

    fn start_registration(&mut self, identifier: String, name: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.register_user(&identifier, &name).await;
            let _ = tx.send(AppEvent::Registered { identifier, result });
        });
    }

    fn start_form_fetch(&mut self, identifier: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_form(&identifier).await;
            let _ = tx.send(AppEvent::FormLoaded { identifier, result });
        });
    }

    fn start_directory_fetch(&mut self) {
        self.state.directory.loading = true;
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_doctors().await;
            let _ = tx.send(AppEvent::DoctorsLoaded(result));
        });
    }

    /// Apply every background result that has arrived
    pub fn poll_events(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Registered { identifier, result } => {
                if !self.state.login.submitting {
                    debug!(identifier, "discarding stale registration result");
                    return;
                }
                self.state.login.submitting = false;
                self.open_form(identifier.clone());
                if let Err(err) = result {
                    warn!(identifier, error = %err, "registration failed");
                    if let Some(form) = self.state.form.as_mut() {
                        form.notice = Some(REGISTRATION_FAILED.to_string());
                    }
                }
            }
            AppEvent::FormLoaded { identifier, result } => {
                let on_form = self.state.current_view == View::Form;
                let Some(form) = self
                    .state
                    .form
                    .as_mut()
                    .filter(|f| on_form && f.identifier == identifier && f.is_loading())
                else {
                    debug!(identifier, "discarding stale form result");
                    return;
                };
                match result {
                    Ok(schema) => {
                        info!(
                            form_id = %schema.form_id,
                            sections = schema.section_count(),
                            "form loaded"
                        );
                        form.resolve(schema);
                    }
                    Err(err) => form.fail(err.user_message()),
                }
            }
            AppEvent::DoctorsLoaded(result) => match result {
                Ok(doctors) => self.state.directory.set_doctors(doctors),
                Err(err) => {
                    warn!(error = %err, "doctor directory fetch failed");
                    self.state.directory.set_doctors(Vec::new());
                }
            },
        }
    }

    fn open_form(&mut self, identifier: String) {
        self.state.form = Some(FormScreen::loading(identifier.clone()));
        self.navigate(View::Form);
        self.start_form_fetch(identifier);
    }

    fn open_directory(&mut self) {
        self.navigate(View::Doctors);
        if self.state.directory.doctors.is_empty() && !self.state.directory.loading {
            self.start_directory_fetch();
        }
    }

    // ---- key handling ----

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if key.code == KeyCode::Esc {
            self.go_back();
            return Ok(());
        }

        if is_shortcut(&key, 'd') && self.state.current_view != View::Doctors {
            self.open_directory();
            return Ok(());
        }

        match self.state.current_view {
            View::Login => self.handle_login_key(key),
            View::Form => self.handle_form_key(key).await?,
            View::Doctors => self.handle_doctors_key(key),
        }

        Ok(())
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if is_shortcut(&key, 's') {
            self.submit_login();
            return;
        }

        let login = &mut self.state.login;
        match key.code {
            KeyCode::Tab | KeyCode::Down => login.next_row(),
            KeyCode::BackTab | KeyCode::Up => login.prev_row(),
            KeyCode::Enter if login.is_button_active() => self.submit_login(),
            KeyCode::Enter => login.next_row(),
            KeyCode::Backspace => login.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                login.input_char(c)
            }
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        if self.state.login.submitting {
            return;
        }
        let (identifier, name) = match self.state.login.credentials() {
            Ok(credentials) => credentials,
            Err(message) => {
                self.state.login.error = Some(message);
                return;
            }
        };

        self.state.login.error = None;
        self.state.login.submitting = true;
        self.remember_login(&identifier, &name);
        info!(identifier, "registering user");
        self.start_registration(identifier, name);
    }

    fn remember_login(&mut self, identifier: &str, name: &str) {
        self.config.remember_login(identifier, name);
        if self.persist_config {
            if let Err(err) = self.config.save() {
                warn!(error = %err, "failed to save config");
            }
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_shortcut(&key, 's') {
            return self.press_primary().await;
        }

        let Some(session) = self.state.form_session_mut() else {
            return Ok(());
        };

        let on_nav_row = session.is_nav_row_focused();
        let focused_kind = session.focused_field().map(|f| f.kind);
        match key.code {
            KeyCode::Tab | KeyCode::Down => session.next_row(),
            KeyCode::BackTab | KeyCode::Up => session.prev_row(),
            KeyCode::Left | KeyCode::Right if on_nav_row => session.toggle_button(),
            KeyCode::Left => session.move_option(-1),
            KeyCode::Right => session.move_option(1),
            KeyCode::Enter if on_nav_row => match session.selected_button() {
                NavButton::Previous => {
                    session.retreat();
                }
                NavButton::Primary => return self.press_primary().await,
            },
            KeyCode::Enter => match focused_kind {
                Some(kind) if kind.is_choice() => session.activate(),
                Some(FieldKind::Textarea) => session.newline(),
                _ => session.next_row(),
            },
            KeyCode::Char(' ') if focused_kind.is_some_and(|k| k.is_choice()) => {
                session.activate()
            }
            KeyCode::Backspace => session.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                session.input_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    /// Next on inner sections, Submit on the last one
    async fn press_primary(&mut self) -> Result<()> {
        let Some(form) = self.state.form.as_mut() else {
            return Ok(());
        };
        let identifier = form.identifier.clone();
        let Some(session) = form.session_mut() else {
            return Ok(());
        };

        if !session.is_last_section() {
            match session.advance() {
                StepOutcome::Moved => self.state.status_message = None,
                StepOutcome::Blocked => {
                    self.state.status_message = Some(blocked_message(session));
                }
                StepOutcome::LastSection => {}
            }
            return Ok(());
        }

        match session.submit(&identifier) {
            Ok(submission) => {
                let sink = Arc::clone(&self.sink);
                match sink.submit(&submission).await {
                    Ok(()) => {
                        info!(form_id = %submission.form_id, "submission accepted");
                        self.state.status_message = Some("Form submitted".to_string());
                    }
                    Err(err) => {
                        warn!(error = %err, "submission sink failed");
                        self.push_error(format!("Failed to submit form: {err}"));
                    }
                }
            }
            Err(SubmitError::Invalid(_)) => {
                self.state.status_message = Some(blocked_message(session));
            }
            Err(SubmitError::NotOnLastSection) => {}
        }
        Ok(())
    }

    fn handle_doctors_key(&mut self, key: KeyEvent) {
        let directory = &mut self.state.directory;
        match key.code {
            KeyCode::Tab => {
                directory.focus = directory.focus.next();
                return;
            }
            KeyCode::BackTab => {
                directory.focus = directory.focus.prev();
                return;
            }
            _ => {}
        }

        match directory.focus {
            DirectoryFocus::Search => match key.code {
                KeyCode::Down => directory.next_suggestion(),
                KeyCode::Up => directory.prev_suggestion(),
                KeyCode::Enter => {
                    if !directory.accept_suggestion() {
                        directory.focus = DirectoryFocus::List;
                    }
                }
                KeyCode::Backspace => directory.search_backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    directory.search_input_char(c)
                }
                _ => {}
            },
            DirectoryFocus::Filters => match key.code {
                KeyCode::Down => directory.next_filter(),
                KeyCode::Up => directory.prev_filter(),
                KeyCode::Enter | KeyCode::Char(' ') => directory.toggle_filter(),
                _ => {}
            },
            DirectoryFocus::List => match key.code {
                KeyCode::Down => directory.select_next(),
                KeyCode::Up => directory.select_prev(),
                KeyCode::Char('r') if directory.doctors.is_empty() => {
                    self.start_directory_fetch();
                }
                _ => {}
            },
        }
    }
}

fn blocked_message(session: &FormSession) -> String {
    match session.errors().len() {
        1 => "1 field needs attention".to_string(),
        n => format!("{n} fields need attention"),
    }
}
