//! Main menu and dashboard rendering.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{App, MenuItem};

use super::helpers::truncate;
use super::theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

const WELCOME: &str = "Welcome to CodeK7!\n\nVideo Management System\n\n\
    Login or Register to get started\n\
    Upload and manage your videos\n\
    Real-time notifications\n\
    Try Demo Mode for a quick preview";

fn render_menu(frame: &mut Frame, area: Rect, title: &str, items: &[MenuItem], selected: usize) {
    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("[{}] ", item.hotkey()), Style::default().fg(COLOR_DIM)),
                    Span::styled(item.label(), Style::default().fg(COLOR_ACCENT)),
                ]),
                Line::from(Span::styled(
                    format!("    {}", item.description()),
                    Style::default().fg(COLOR_DIM),
                )),
            ])
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_main_menu(frame: &mut Frame, area: Rect, app: &App) {
    let [welcome_area, menu_area] =
        Layout::vertical([Constraint::Length(10), Constraint::Min(0)]).areas(area);

    let welcome = Paragraph::new(WELCOME)
        .alignment(Alignment::Center)
        .style(Style::default().fg(COLOR_HEADER))
        .block(
            Block::bordered()
                .border_style(Style::default().fg(COLOR_BORDER))
                .title("Welcome"),
        );
    frame.render_widget(welcome, welcome_area);
    render_menu(frame, menu_area, " CodeK7 - Main Menu ", app.current_menu(), app.menu_index);
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let [info_area, menu_area] =
        Layout::horizontal([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)]).areas(area);

    let (username, user_id) = app
        .state
        .session()
        .map(|s| (s.username, s.user_id))
        .unwrap_or_default();
    let videos = app.state.videos();
    let notification_count = app.state.notifications().len();

    let latest = videos
        .first()
        .map(|v| truncate(&format!("Latest: {}", v.title), 30))
        .unwrap_or_else(|| "No videos yet".to_string());

    let push = if app.state.is_push_connected() {
        Span::styled("Connected", Style::default().fg(COLOR_ACTIVE))
    } else {
        Span::styled("Disconnected", Style::default().fg(COLOR_ERROR))
    };

    let lines = vec![
        Line::from(Span::styled(
            format!("Welcome back, {}!", username),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("User ID: {}", user_id)),
        Line::from(format!("Total Videos: {}", videos.len())),
        Line::from(latest),
        Line::from(format!("Notifications: {}", notification_count)),
        Line::from(vec![Span::raw("Live updates: "), push]),
        Line::default(),
        Line::from(Span::styled(
            "Arrow keys or hotkeys to choose, Enter to open, Esc to go back",
            Style::default().fg(COLOR_DIM),
        )),
    ];

    let info = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::bordered()
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(" Dashboard "),
    );
    frame.render_widget(info, info_area);
    render_menu(frame, menu_area, " Actions ", app.current_menu(), app.menu_index);
}
