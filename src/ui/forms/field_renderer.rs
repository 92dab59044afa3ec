//! Field rendering for schema-driven forms
//!
//! Every [`FieldKind`] maps to exactly one renderer. Heights are computed up
//! front so the form page can lay fields out and scroll them.

use crate::state::{FieldKind, FieldValue, FormField, FormSession, TextInput};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows of a bordered single-line input
const SINGLE_LINE_HEIGHT: u16 = 3;

/// Rows of a bordered textarea
const TEXTAREA_HEIGHT: u16 = 6;

const CURSOR: &str = "▌";

/// Rows needed to draw `field`; 0 for kinds that are not rendered
pub fn field_height(field: &FormField) -> u16 {
    match field.kind {
        FieldKind::Text | FieldKind::Tel | FieldKind::Email | FieldKind::Date => SINGLE_LINE_HEIGHT,
        FieldKind::Dropdown => SINGLE_LINE_HEIGHT,
        FieldKind::Textarea => TEXTAREA_HEIGHT,
        FieldKind::Radio | FieldKind::Checkbox => field.options.len().max(1) as u16 + 2,
        FieldKind::Unknown => 0,
    }
}

fn border_style(is_active: bool, has_error: bool) -> Style {
    if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bordered block titled with the label; the error sits on the bottom border
fn field_block<'a>(field: &'a FormField, is_active: bool, error: Option<&'a str>) -> Block<'a> {
    let mut title = vec![Span::raw(format!(" {}", field.label))];
    if field.required {
        title.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    title.push(Span::raw(" "));

    let mut block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, error.is_some()));
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::Red),
        )));
    }
    block
}

/// Draw one schema field bound to the session's values
pub fn draw_form_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    session: &FormSession,
    is_active: bool,
) {
    let value = session.values().get(&field.field_id);
    let error = session.errors().get(&field.field_id);

    let lines = match field.kind {
        FieldKind::Text | FieldKind::Tel | FieldKind::Email | FieldKind::Date => {
            text_lines(field, value, is_active, false)
        }
        FieldKind::Textarea => text_lines(field, value, is_active, true),
        FieldKind::Dropdown => dropdown_lines(field, session, is_active),
        FieldKind::Radio => option_lines(field, value, is_active, session.option_index(), false),
        FieldKind::Checkbox => {
            option_lines(field, value, is_active, session.option_index(), true)
        }
        FieldKind::Unknown => return,
    };

    let block = field_block(field, is_active, error);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn placeholder(field: &FormField) -> String {
    match (&field.placeholder, field.kind) {
        (Some(text), _) if !text.is_empty() => text.clone(),
        (_, FieldKind::Date) => "YYYY-MM-DD".to_string(),
        _ => String::new(),
    }
}

fn text_lines(
    field: &FormField,
    value: Option<&FieldValue>,
    is_active: bool,
    multiline: bool,
) -> Vec<Line<'static>> {
    let text = value.and_then(FieldValue::as_single).unwrap_or_default();
    let cursor = Span::styled(CURSOR, Style::default().fg(Color::Cyan));

    if text.is_empty() {
        let mut spans = Vec::new();
        if is_active {
            spans.push(cursor);
        }
        spans.push(Span::styled(
            placeholder(field),
            Style::default().fg(Color::DarkGray),
        ));
        return vec![Line::from(spans)];
    }

    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default()
    };

    let mut lines: Vec<Line> = if multiline {
        text.split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    } else {
        vec![Line::from(Span::styled(text.to_string(), style))]
    };

    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
    }
    lines
}

fn dropdown_lines(field: &FormField, session: &FormSession, is_active: bool) -> Vec<Line<'static>> {
    let position = session.dropdown_position(field);
    let (label, style) = match position.checked_sub(1).and_then(|i| field.options.get(i)) {
        Some(option) => (option.label.clone(), Style::default()),
        None => ("Select...".to_string(), Style::default().fg(Color::DarkGray)),
    };

    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    vec![Line::from(vec![
        Span::styled("◂ ", arrow_style),
        Span::styled(label, style),
        Span::styled(" ▸", arrow_style),
        Span::styled(
            format!("  ({}/{})", position, field.options.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ])]
}

fn option_lines(
    field: &FormField,
    value: Option<&FieldValue>,
    is_active: bool,
    highlighted: usize,
    multiple: bool,
) -> Vec<Line<'static>> {
    if field.options.is_empty() {
        return vec![Line::from(Span::styled(
            "(no options)",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    field
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let checked = match value {
                Some(FieldValue::Multi(selected)) => selected.contains(&option.value),
                Some(FieldValue::Single(selected)) => *selected == option.value,
                None => false,
            };
            let marker = match (multiple, checked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };

            let style = if is_active && i == highlighted {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{marker} {}", option.label), style))
        })
        .collect()
}

/// Draw a plain text input such as the login fields
pub fn draw_text_input(frame: &mut Frame, area: Rect, input: &TextInput, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display = input.display_value(is_active);
    let cursor = if is_active { CURSOR } else { "" };
    let content = Paragraph::new(Line::from(vec![
        Span::styled(display, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", input.label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.block(block), area);
}
