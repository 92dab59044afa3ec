//! Button component for TUI

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Width of a button in a button row
const BUTTON_WIDTH: u16 = 16;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let border_style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(content.to_string())
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// One entry of a button row
pub struct ButtonSpec<'a> {
    pub label: &'a str,
    pub is_selected: bool,
    pub is_enabled: bool,
}

/// Render buttons side by side, right-aligned in `area`
pub fn render_button_row(frame: &mut Frame, area: Rect, buttons: &[ButtonSpec]) {
    let mut constraints = vec![Constraint::Min(0)];
    constraints.extend(buttons.iter().map(|_| Constraint::Length(BUTTON_WIDTH)));

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (button, chunk) in buttons.iter().zip(chunks.iter().skip(1)) {
        render_button(
            frame,
            *chunk,
            button.label,
            button.is_selected,
            button.is_enabled,
        );
    }
}
