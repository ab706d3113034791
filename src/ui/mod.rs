//! UI rendering for the TUI.
//!
//! Presentation only: every function here reads [`App`] and
//! [`SharedState`](crate::state::SharedState) snapshots and draws them.
//!
//! - [`menu`] - main menu and dashboard
//! - [`forms`] - login, register and upload forms
//! - [`lists`] - video tables and the notification log
//! - [`overlay`] - modal message box

mod forms;
mod helpers;
mod lists;
mod menu;
mod overlay;
mod theme;

use ratatui::{prelude::*, widgets::Paragraph};

use crate::app::{App, Screen};

use helpers::{spinner, truncate};
use theme::{COLOR_ACTIVE, COLOR_DIM, COLOR_ERROR};

/// Draw the whole frame for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    let [body, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    match app.screen {
        Screen::Menu => menu::render_main_menu(frame, body, app),
        Screen::Dashboard => menu::render_dashboard(frame, body, app),
        Screen::Login | Screen::Register | Screen::Upload => forms::render_form(frame, body, app),
        Screen::Videos => lists::render_videos(frame, body, app),
        Screen::RecentVideos => lists::render_recent(frame, body, app),
        Screen::Notifications => lists::render_notifications(frame, body, app),
    }

    render_status_bar(frame, status, app);

    if let Some(message) = &app.overlay {
        overlay::render_overlay(frame, body, message);
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.state.is_push_connected() {
        spans.push(Span::styled("● live ", Style::default().fg(COLOR_ACTIVE)));
    } else {
        spans.push(Span::styled("○ offline ", Style::default().fg(COLOR_ERROR)));
    }

    if let Some(session) = app.state.session() {
        spans.push(Span::styled(
            format!("{} ", session.username),
            Style::default().fg(COLOR_DIM),
        ));
    }

    if let Some(busy) = &app.busy {
        spans.push(Span::raw(format!("{} {} ", spinner(app.tick_count), busy)));
    } else if let Some(notification) = &app.last_notification {
        spans.push(Span::raw(format!(
            "[{}] {}",
            notification.time,
            truncate(&notification.message, 60)
        )));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
