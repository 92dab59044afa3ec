//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{DIRECTORY_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{DirectoryFocus, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Views shown as tabs in the header
const HEADER_TABS: &[View] = &[View::Login, View::Form, View::Doctors];

/// Split the screen into header and content, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the header with the app name and view tabs
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " dynform ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for view in HEADER_TABS {
        let style = if *view == app.state.current_view {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(view.title(), style));
    }

    if let Some(form) = &app.state.form {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Roll No. {}", form.identifier),
            Style::default().fg(Color::Blue),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Login => format!(
            "Tab:next  Enter:select  {SUBMIT_SHORTCUT}:register  {DIRECTORY_SHORTCUT}:doctors"
        ),
        View::Form => {
            let on_last = app
                .state
                .form_session()
                .is_some_and(|s| s.is_last_section());
            let primary = if on_last { "submit" } else { "next" };
            format!(
                "Tab:field  ←/→:option  Space:select  {SUBMIT_SHORTCUT}:{primary}  Esc:back"
            )
        }
        View::Doctors => match app.state.directory.focus {
            DirectoryFocus::Search => "Tab:panel  ↑/↓:suggestion  Enter:pick  Esc:back".to_string(),
            DirectoryFocus::Filters => "Tab:panel  ↑/↓:nav  Enter:toggle  Esc:back".to_string(),
            DirectoryFocus::List => "Tab:panel  ↑/↓:nav  r:reload  Esc:back".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_header_and_status_rows() {
        let (header, content) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(header, Rect::new(0, 0, 80, 1));
        assert_eq!(content, Rect::new(0, 1, 80, 22));
    }
}
