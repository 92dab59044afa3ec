//! Doctor directory view

use super::forms::draw_text_input;
use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::{DirectoryFocus, DirectoryScreen, Doctor};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

/// Width of the filter panel
const FILTER_PANEL_WIDTH: u16 = 30;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let directory = &app.state.directory;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FILTER_PANEL_WIDTH), Constraint::Min(0)])
        .split(chunks[1]);

    draw_text_input(
        frame,
        chunks[0],
        &directory.search,
        directory.focus == DirectoryFocus::Search,
    );
    draw_filters(frame, body[0], directory);
    draw_doctor_list(frame, body[1], directory);

    // Suggestions float over the panels below the search box
    draw_suggestions(frame, chunks[0], directory);
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn draw_filters(frame: &mut Frame, area: Rect, directory: &DirectoryScreen) {
    let focused = directory.focus == DirectoryFocus::Filters;
    let items: Vec<ListItem> = directory
        .filter_items()
        .iter()
        .map(|item| {
            let marker = if directory.is_filter_active(item) {
                "[x]"
            } else {
                "[ ]"
            };
            ListItem::new(format!("{marker} {}", item.label()))
        })
        .collect();

    render_scrollable_list(
        frame,
        area,
        items,
        panel_block("Filters", focused),
        focused.then_some(directory.filter_index),
    );
}

fn doctor_item(doctor: &Doctor) -> ListItem<'static> {
    let specialities = doctor.speciality_names().collect::<Vec<_>>().join(", ");

    let mut details = vec![
        Span::styled(
            doctor.fees.clone().unwrap_or_else(|| "fee n/a".to_string()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            doctor.experience.clone().unwrap_or_default(),
            Style::default().fg(Color::Gray),
        ),
    ];
    if let Some(clinic) = doctor.clinic_name() {
        let place = match doctor.city() {
            Some(city) => format!("  {clinic}, {city}"),
            None => format!("  {clinic}"),
        };
        details.push(Span::styled(place, Style::default().fg(Color::DarkGray)));
    }

    let mut modes = Vec::new();
    if doctor.video_consult {
        modes.push("Video");
    }
    if doctor.in_clinic {
        modes.push("In clinic");
    }

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                doctor.display_name().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {specialities}"),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(details),
        Line::from(Span::styled(
            modes.join(" · "),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_doctor_list(frame: &mut Frame, area: Rect, directory: &DirectoryScreen) {
    let focused = directory.focus == DirectoryFocus::List;
    let visible = directory.visible();
    let title = format!("Doctors ({})", visible.len());
    let block = panel_block(&title, focused);

    if directory.loading || visible.is_empty() {
        let message = if directory.loading {
            "Loading doctors..."
        } else {
            "No doctors found"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = visible.into_iter().map(doctor_item).collect();
    render_scrollable_list(frame, area, items, block, Some(directory.selected_index));
}

fn draw_suggestions(frame: &mut Frame, search_area: Rect, directory: &DirectoryScreen) {
    let suggestions = directory.suggestions();
    if suggestions.is_empty() {
        return;
    }

    let height = suggestions.len() as u16 + 2;
    let area = Rect {
        x: search_area.x + 2,
        y: search_area.bottom(),
        width: search_area.width.saturating_sub(4).min(50),
        height,
    }
    .intersection(frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .map(|(i, doctor)| {
            let style = if directory.suggestion_index == Some(i) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let speciality = doctor.speciality_names().next().unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(doctor.display_name().to_string(), style),
                Span::styled(
                    format!("  {speciality}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        ),
        area,
    );
}
