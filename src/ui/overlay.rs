//! Modal message overlay.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

use super::helpers::centered_rect;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM};

pub fn render_overlay(frame: &mut Frame, area: Rect, message: &str) {
    let width = 60;
    // rough wrap estimate plus borders and the hint line
    let text_lines = message
        .lines()
        .map(|l| l.chars().count() as u16 / (width - 4) + 1)
        .sum::<u16>();
    let popup = centered_rect(area, width, text_lines + 4);

    let mut lines: Vec<Line> = message
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(COLOR_ACCENT))))
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("[Enter] OK", Style::default().fg(COLOR_DIM))));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(COLOR_BORDER))
                    .style(Style::default().bg(COLOR_DIALOG_BG)),
            ),
        popup,
    );
}
