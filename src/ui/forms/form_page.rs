//! Wizard screen over a loaded form session

use super::field_renderer::{draw_form_field, field_height};
use crate::app::App;
use crate::state::{FormLoad, FormScreen, FormSession, NavButton};
use crate::ui::components::{render_button_row, ButtonSpec, BUTTON_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the form view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = &app.state.form else {
        draw_message(frame, area, "No form loaded", Color::DarkGray);
        return;
    };

    match &form.load {
        FormLoad::Loading => draw_message(frame, area, "Loading form...", Color::Yellow),
        FormLoad::Failed(message) => draw_message(frame, area, message, Color::Red),
        FormLoad::Ready(session) => draw_session(frame, area, form, session),
    }
}

fn draw_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Form "));
    frame.render_widget(paragraph, area);
}

fn draw_session(frame: &mut Frame, area: Rect, form: &FormScreen, session: &FormSession) {
    let schema = session.schema();
    let block = Block::default()
        .title(format!(" {} ", schema.form_title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let notice_height = if form.notice.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notice_height), // Notice banner
            Constraint::Length(3),             // Section heading
            Constraint::Min(0),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .horizontal_margin(1)
        .split(inner);

    if let Some(notice) = &form.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                notice.clone(),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )),
            chunks[0],
        );
    }

    draw_section_heading(frame, chunks[1], session);
    draw_fields(frame, chunks[2], session);
    draw_navigation(frame, chunks[3], session);
}

fn draw_section_heading(frame: &mut Frame, area: Rect, session: &FormSession) {
    let section = session.active_section();
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Section {} of {}", session.cursor() + 1, session.section_count()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  "),
            Span::styled(
                section.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            section.description.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_fields(frame: &mut Frame, area: Rect, session: &FormSession) {
    let fields = &session.active_section().fields;
    let heights: Vec<u16> = fields.iter().map(field_height).collect();
    let focus = session.focus().min(fields.len().saturating_sub(1));
    let (start, end) = visible_range(&heights, focus, area.height);

    let mut y = area.y;
    for (index, field) in fields.iter().enumerate().take(end).skip(start) {
        let height = heights[index].min(area.bottom().saturating_sub(y));
        if height == 0 {
            continue;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        draw_form_field(frame, field_area, field, session, index == session.focus());
        y += height;
    }

    if start > 0 || end < fields.len() {
        let indicator = format!(" {}-{} of {} ", start + 1, end, fields.len());
        let width = (indicator.len() as u16).min(area.width);
        let indicator_area = Rect {
            x: area.right().saturating_sub(width),
            y: area.bottom().saturating_sub(1),
            width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(indicator).style(Style::default().fg(Color::DarkGray)),
            indicator_area,
        );
    }
}

/// Range of rows `start..end` that fits in `available` rows and contains `focus`
fn visible_range(heights: &[u16], focus: usize, available: u16) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }

    // Walk back from the focused field as far as the space allows
    let mut start = focus;
    let mut used = heights[focus];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }

    let mut end = focus + 1;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }

    (start, end)
}

fn draw_navigation(frame: &mut Frame, area: Rect, session: &FormSession) {
    let nav_focused = session.is_nav_row_focused();
    let selected = session.selected_button();
    let primary = if session.is_last_section() {
        "Submit"
    } else {
        "Next"
    };

    let mut buttons = Vec::new();
    if !session.is_first_section() {
        buttons.push(ButtonSpec {
            label: "Previous",
            is_selected: nav_focused && selected == NavButton::Previous,
            is_enabled: true,
        });
    }
    buttons.push(ButtonSpec {
        label: primary,
        is_selected: nav_focused && selected == NavButton::Primary,
        is_enabled: true,
    });

    render_button_row(frame, area, &buttons);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(visible_range(&[3, 3, 4], 1, 20), (0, 3));
    }

    #[test]
    fn test_scrolls_to_keep_focus_visible() {
        assert_eq!(visible_range(&[3, 3, 3, 3], 3, 7), (2, 4));
        assert_eq!(visible_range(&[3, 3, 3, 3], 0, 7), (0, 2));
    }

    #[test]
    fn test_oversized_focused_field_still_shown() {
        assert_eq!(visible_range(&[3, 10, 3], 1, 5), (1, 2));
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(visible_range(&[], 0, 10), (0, 0));
    }
}
