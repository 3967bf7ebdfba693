use crossterm::event::KeyCode;
use rat_passage::{Action, Component, Context, Event, Location};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::icons::Icon;
use super::shell::page_shell;

/// Shown for any location no route claims, and for unknown admins.
pub struct NotFoundPage {
    location: Location,
    reason: Option<String>,
}

impl NotFoundPage {
    pub fn new(location: Location) -> Self {
        Self { location, reason: None }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl Component for NotFoundPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context) {
        let body = page_shell(
            frame,
            cx.area,
            "Not found",
            Icon::Warning,
            &[("Esc", "Back"), ("Enter", "Dashboard"), ("Q", "Quit")],
        );

        let mut lines = vec![
            Line::from(""),
            Line::styled(format!("Nothing lives at {}", self.location), Style::default().fg(Color::Yellow)),
        ];
        if let Some(reason) = &self.reason {
            lines.push(Line::styled(reason.clone(), Style::default().fg(Color::DarkGray)));
        }
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut Context) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                KeyCode::Enter => Some(Action::Navigate("/".to_string())),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
