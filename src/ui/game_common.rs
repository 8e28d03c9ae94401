//! Shared UI pieces: the controls bar and centred dialogs.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render a one-line controls bar, e.g. `[Space] Flap  [Q] Quit`.
///
/// `status` is shown first in `status_color` when given.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status: Option<(&str, Color)>,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let mut spans = Vec::new();
    if let Some((text, color)) = status {
        spans.push(Span::styled(
            format!("{}  ", text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black))
        .alignment(Alignment::Center);
    frame.render_widget(bar, Rect { height: 1, ..area });
}

/// A rectangle of at most `width` x `height` centred in `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

/// Draw a bordered dialog over whatever is behind it.
pub fn render_dialog(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    lines: Vec<Line>,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
