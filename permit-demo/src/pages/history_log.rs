use crossterm::event::KeyCode;
use rat_passage::{Action, Component, Context, Event};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::icons::Icon;
use super::shell::{page_shell, ACCENT};
use crate::model::{HistoryAction, HistoryLogItem};

/// Plain-text form of a history entry.
pub fn describe(item: &HistoryLogItem) -> String {
    format!("{} {} {}", item.timestamp, item.actor, item.action)
}

pub fn history_line(item: &HistoryLogItem) -> Line<'static> {
    let action_color = match item.action {
        HistoryAction::ApprovedPermit(_) => Color::Green,
        HistoryAction::RejectedPermit(_) | HistoryAction::Deactivated => Color::Red,
        _ => Color::White,
    };
    Line::from(vec![
        Span::styled(format!("{} ", item.timestamp), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} ", item.actor), Style::default().fg(ACCENT)),
        Span::styled(item.action.to_string(), Style::default().fg(action_color)),
    ])
}

/// Scrollable audit history of one admin.
pub struct HistoryLogPage {
    admin_id: u32,
    items: Vec<HistoryLogItem>,
    scroll: u16,
}

impl HistoryLogPage {
    pub fn new(admin_id: u32, items: Vec<HistoryLogItem>) -> Self {
        Self {
            admin_id,
            items,
            scroll: 0,
        }
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.items.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }
}

impl Component for HistoryLogPage {
    fn on_mount(&mut self, cx: &mut Context) {
        let latest = self.items.first().map(describe);
        tracing::debug!(key = %cx.key(), entries = self.items.len(), ?latest, "history mounted");
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context) {
        let body = page_shell(
            frame,
            cx.area,
            &format!("History of admin #{}", self.admin_id),
            Icon::History,
            &[("↑/↓", "Scroll"), ("Esc", "Back"), ("Q", "Quit")],
        );

        let lines: Vec<Line> = if self.items.is_empty() {
            vec![Line::styled("No recorded activity", Style::default().fg(Color::DarkGray))]
        } else {
            self.items.iter().map(history_line).collect()
        };
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), body);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut Context) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll = self.scroll.saturating_sub(1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll = (self.scroll + 1).min(self.max_scroll());
                    None
                }
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
