use crossterm::event::KeyCode;
use rat_passage::{Action, Component, Context, Event};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::icons::Icon;
use super::shell::{page_shell, ACCENT};
use crate::model::Admin;

pub struct AdminDetailsPage {
    admin: Admin,
}

impl AdminDetailsPage {
    pub fn new(admin: Admin) -> Self {
        Self { admin }
    }

    fn field(label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:>10}: "), Style::default().fg(Color::DarkGray)),
            Span::raw(value),
        ])
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let admin = &self.admin;
        let status = if admin.active { Icon::Active } else { Icon::Inactive };
        vec![
            Line::from(vec![
                Span::styled(format!("{} ", status.glyph()), Style::default().fg(status.color())),
                Span::styled(admin.name.clone(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Self::field("Role", admin.role.name().to_string()),
            Self::field("Email", admin.email.clone()),
            Self::field("Phone", admin.phone.clone()),
            Self::field("Status", if admin.active { "active" } else { "inactive" }.to_string()),
            Self::field("Reviewed", format!("{} {} permits", Icon::Permit.glyph(), admin.permits_reviewed)),
            Self::field("Since", admin.created.clone()),
        ]
    }
}

impl Component for AdminDetailsPage {
    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context) {
        let body = page_shell(
            frame,
            cx.area,
            &format!("Admin #{}", self.admin.id),
            Icon::Admin,
            &[("H", "History"), ("Esc", "Back"), ("Q", "Quit")],
        );
        frame.render_widget(Paragraph::new(self.lines()), body);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut Context) -> Option<Action> {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('h') => Some(Action::Navigate(format!("/admins/{}/history", self.admin.id))),
                KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
