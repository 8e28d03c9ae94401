//! Asset customization panel: pick a slot, type a file path, apply.

use super::game_common::{centered_rect, render_status_bar};
use flapper::assets::{AssetKind, AssetSlot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::path::PathBuf;

/// Feedback line under the slot list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct CustomizeScreen {
    pub selected: usize,
    /// Pending file path per slot, like the browser's file inputs.
    pub path_inputs: [String; 5],
    pub editing: bool,
    pub confirm_reset: bool,
    pub notice: Option<Notice>,
}

impl CustomizeScreen {
    pub fn new() -> Self {
        Self {
            selected: 0,
            path_inputs: Default::default(),
            editing: false,
            confirm_reset: false,
            notice: None,
        }
    }

    pub fn selected_slot(&self) -> AssetSlot {
        AssetSlot::from_index(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < AssetSlot::ALL.len() {
            self.selected += 1;
        }
    }

    pub fn handle_char_input(&mut self, c: char) {
        self.path_inputs[self.selected].push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.path_inputs[self.selected].pop();
    }

    /// Empty every pending path input. Stored assets are untouched.
    pub fn clear_uploads(&mut self) {
        for input in &mut self.path_inputs {
            input.clear();
        }
        self.notice = Some(Notice::Info("Upload fields cleared".to_string()));
    }

    /// The selected slot's path, trimmed, if one was typed.
    pub fn pending_path(&self) -> Option<PathBuf> {
        let raw = self.path_inputs[self.selected].trim();
        if raw.is_empty() {
            None
        } else {
            Some(PathBuf::from(raw))
        }
    }

    /// Draw the panel as an overlay. `sources` holds each slot's current
    /// source description in slot order.
    pub fn draw(&self, frame: &mut Frame, area: Rect, sources: &[String; 5]) {
        let dialog = centered_rect(area, 72, 20);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Customize Assets ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(10), // Slots (two lines each)
                Constraint::Length(1),  // Spacer
                Constraint::Length(3),  // Path input
                Constraint::Min(1),     // Notice
                Constraint::Length(1),  // Controls
            ])
            .split(inner);

        self.draw_slots(frame, chunks[0], sources);
        self.draw_input(frame, chunks[2]);
        self.draw_notice(frame, chunks[3]);

        let controls: &[(&str, &str)] = if self.confirm_reset {
            &[("[Y]", "Reset all"), ("[N/Esc]", "Cancel")]
        } else if self.editing {
            &[("[Enter]", "Apply"), ("[Esc]", "Stop editing")]
        } else {
            &[
                ("[Up/Down]", "Select"),
                ("[Enter]", "Edit path"),
                ("[X]", "Clear fields"),
                ("[D]", "Defaults"),
                ("[Esc]", "Close"),
            ]
        };
        render_status_bar(frame, chunks[4], None, controls);
    }

    fn draw_slots(&self, frame: &mut Frame, area: Rect, sources: &[String; 5]) {
        let mut lines = Vec::with_capacity(10);
        for (i, slot) in AssetSlot::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let marker = if selected { "> " } else { "  " };
            let kind = match slot.kind() {
                AssetKind::Image => "image",
                AssetKind::Audio => "audio",
            };
            let name_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}", marker, slot.label()), name_style),
                Span::styled(format!("  ({})", kind), Style::default().fg(Color::DarkGray)),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", sources[i]),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let text = if self.editing {
            format!("{}_", self.path_inputs[self.selected])
        } else {
            self.path_inputs[self.selected].clone()
        };
        let border = if self.editing {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let input = Paragraph::new(text)
            .block(
                Block::default()
                    .title(format!(" {} file path ", self.selected_slot().label()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .style(Style::default().fg(Color::White));
        frame.render_widget(input, area);
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect) {
        let line = if self.confirm_reset {
            Line::styled(
                "Reset all custom assets?",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            match &self.notice {
                Some(Notice::Info(msg)) => {
                    Line::styled(msg.as_str(), Style::default().fg(Color::Green))
                }
                Some(Notice::Error(msg)) => {
                    Line::styled(msg.as_str(), Style::default().fg(Color::Red))
                }
                None => Line::from(""),
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
