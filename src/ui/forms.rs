//! Login, register and upload forms.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use crate::app::{App, Screen};

use super::helpers::centered_rect;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

const UPLOAD_HELP: &str = "Supported formats: MP4, AVI, MOV, MKV\n\
    Maximum file size: 500 MB\n\
    Files are sent in chunks\n\
    You'll be notified when processing completes";

pub fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let title = match app.screen {
        Screen::Login => " Login ",
        Screen::Register => " Register ",
        _ => " Upload Video ",
    };

    let mut lines = Vec::new();
    for (i, field) in app.form.fields.iter().enumerate() {
        let focused = i == app.form.focus;
        let marker = if focused { "> " } else { "  " };
        let cursor = if focused { "_" } else { "" };
        let value_style = if focused {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_HEADER)),
            Span::styled(format!("{:<12}", field.label), Style::default().fg(COLOR_DIM)),
            Span::styled(format!("{}{}", field.display_value(), cursor), value_style),
        ]));
        lines.push(Line::default());
    }
    let back = if app.screen == Screen::Upload { "dashboard" } else { "menu" };
    lines.push(Line::from(Span::styled(
        format!("Tab next field, Enter submit, Esc back to {}", back),
        Style::default().fg(COLOR_DIM),
    )));

    let height = app.form.fields.len() as u16 * 2 + 3;
    let width = if app.screen == Screen::Upload { 90 } else { 60 };

    if app.screen == Screen::Upload {
        let [help_area, form_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);
        let help = Paragraph::new(UPLOAD_HELP).block(
            Block::bordered()
                .border_style(Style::default().fg(COLOR_BORDER))
                .title(" Help "),
        );
        frame.render_widget(help, centered_rect(help_area, width, 6));
        render_box(frame, centered_rect(form_area, width, height), title, lines);
    } else {
        render_box(frame, centered_rect(area, width, height), title, lines);
    }
}

fn render_box(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(title),
    );
    frame.render_widget(form, area);
}
