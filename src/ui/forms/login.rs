//! Login / registration screen

use super::field_renderer::draw_text_input;
use crate::app::App;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::widgets::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the login form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.state.login;
    let box_area = centered_rect(area, 50, 15);

    let block = Block::default()
        .title(" Register ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Error banner
            Constraint::Length(3),             // Roll number
            Constraint::Length(3),             // Name
            Constraint::Length(1),             // Spacing
            Constraint::Length(BUTTON_HEIGHT), // Submit
        ])
        .horizontal_margin(1)
        .split(inner);

    if let Some(error) = &login.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            chunks[0],
        );
    }

    draw_text_input(frame, chunks[1], &login.identifier, login.active_row == 0);
    draw_text_input(frame, chunks[2], &login.name, login.active_row == 1);

    let label = if login.submitting {
        "Registering..."
    } else {
        "Submit"
    };
    render_button(
        frame,
        chunks[4],
        label,
        login.is_button_active(),
        !login.submitting,
    );
}
