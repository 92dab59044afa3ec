//! UI module for rendering the TUI

mod components;
mod doctors;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::Login => forms::draw_login(frame, main_area, app),
        View::Form => forms::draw_form_page(frame, main_area, app),
        View::Doctors => doctors::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog is modal and drawn last
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.error_queue.len());
    }
}
