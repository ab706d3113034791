//! Video tables and the notification log.

use ratatui::{
    prelude::*,
    widgets::{Block, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::app::App;
use crate::models::VideoRecord;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_STALE};

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(
        cells
            .iter()
            .map(|c| Cell::from(*c).style(Style::default().fg(COLOR_HEADER))),
    )
}

fn video_table<'a>(
    videos: &'a [VideoRecord],
    with_ids: bool,
    block: Block<'a>,
) -> Table<'a> {
    let rows = videos.iter().map(|v| {
        let mut cells = Vec::with_capacity(5);
        if with_ids {
            cells.push(v.id.as_str());
        }
        cells.extend([v.title.as_str(), v.description.as_str(), v.created_at.as_str()]);
        if with_ids {
            cells.push(v.file_name.as_str());
        }
        Row::new(cells).style(Style::default().fg(COLOR_ACCENT))
    });

    let (head, widths) = if with_ids {
        (
            header(&["ID", "Title", "Description", "Created", "File"]),
            vec![
                Constraint::Length(12),
                Constraint::Percentage(25),
                Constraint::Percentage(35),
                Constraint::Length(19),
                Constraint::Min(10),
            ],
        )
    } else {
        (
            header(&["Title", "Description", "Created"]),
            vec![
                Constraint::Percentage(30),
                Constraint::Percentage(50),
                Constraint::Min(19),
            ],
        )
    };

    Table::new(rows, widths)
        .header(head)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
}

fn footer(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(COLOR_DIM)),
        area,
    );
}

fn split(area: Rect) -> (Rect, Rect) {
    let [body, foot] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    (body, foot)
}

pub fn render_videos(frame: &mut Frame, area: Rect, app: &App) {
    let (body, foot) = split(area);
    let videos = app.state.videos();
    let block = Block::bordered()
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(format!(" My Videos ({}) ", videos.len()));

    if videos.is_empty() {
        frame.render_widget(
            Paragraph::new("No videos found. Upload your first video!")
                .alignment(Alignment::Center)
                .block(block),
            body,
        );
    } else {
        let mut state = TableState::default().with_selected(Some(app.list_index));
        frame.render_stateful_widget(video_table(&videos, true, block), body, &mut state);
    }
    footer(frame, foot, "Esc back to dashboard | arrows to navigate");
}

pub fn render_recent(frame: &mut Frame, area: Rect, app: &App) {
    let (body, foot) = split(area);
    let empty = Vec::new();
    let (videos, stale) = match &app.recent {
        Some(recent) => (&recent.videos, recent.is_stale()),
        None => (&empty, false),
    };

    let mut title = vec![Span::raw(" Recent Videos ")];
    if stale {
        title.push(Span::styled(
            "(cached, server unavailable) ",
            Style::default().fg(COLOR_STALE),
        ));
    }
    let block = Block::bordered()
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Line::from(title));

    if videos.is_empty() {
        frame.render_widget(
            Paragraph::new("No recent videos")
                .alignment(Alignment::Center)
                .block(block),
            body,
        );
    } else {
        let mut state = TableState::default().with_selected(Some(app.list_index));
        frame.render_stateful_widget(video_table(videos, false, block), body, &mut state);
    }
    footer(frame, foot, "Esc back to dashboard | arrows to navigate");
}

pub fn render_notifications(frame: &mut Frame, area: Rect, app: &App) {
    let (body, foot) = split(area);
    let notifications = app.state.notifications();
    let block = Block::bordered()
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(format!(" Notifications ({}) ", notifications.len()));

    if notifications.is_empty() {
        frame.render_widget(
            Paragraph::new("No notifications\n\nConnect live notifications from the dashboard")
                .alignment(Alignment::Center)
                .block(block),
            body,
        );
    } else {
        // newest first
        let items: Vec<ListItem> = notifications
            .iter()
            .rev()
            .map(|n| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("[{}] ", n.time), Style::default().fg(COLOR_DIM)),
                        Span::styled(n.kind.clone(), Style::default().fg(COLOR_HEADER)),
                    ]),
                    Line::from(format!("    {}", n.message)),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(app.list_index));
        frame.render_stateful_widget(list, body, &mut state);
    }
    footer(frame, foot, "Esc back to dashboard");
}
