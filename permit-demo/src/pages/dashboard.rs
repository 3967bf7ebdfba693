use std::sync::Arc;

use crossterm::event::KeyCode;
use rat_passage::{Action, Component, Context, Event};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem};

use super::icons::Icon;
use super::shell::{page_shell, ACCENT};
use crate::model::{Admin, Directory};

/// Admin list with a selection cursor.
pub struct DashboardPage {
    directory: Arc<Directory>,
    selected: usize,
}

impl DashboardPage {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory, selected: 0 }
    }

    fn selected_admin(&self) -> Option<&Admin> {
        self.directory.admins().get(self.selected)
    }

    fn admin_item(admin: &Admin, selected: bool) -> ListItem<'static> {
        let status = if admin.active { Icon::Active } else { Icon::Inactive };
        let prefix = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        ListItem::new(Line::from(vec![
            Span::styled(prefix, Style::default().fg(ACCENT)),
            Span::styled(format!("{} ", status.glyph()), Style::default().fg(status.color())),
            Span::styled(admin.name.clone(), name_style),
            Span::styled(format!("  {}", admin.role.name()), Style::default().fg(Color::DarkGray)),
        ]))
    }
}

impl Component for DashboardPage {
    fn on_mount(&mut self, cx: &mut Context) {
        tracing::debug!(key = %cx.key(), admins = self.directory.admins().len(), "dashboard mounted");
    }

    fn render(&mut self, frame: &mut ratatui::Frame, cx: &mut Context) {
        let body = page_shell(
            frame,
            cx.area,
            "Permit office admins",
            Icon::Dashboard,
            &[("↑/↓", "Select"), ("Enter", "Open"), ("Q", "Quit")],
        );

        let items: Vec<ListItem> = self
            .directory
            .admins()
            .iter()
            .enumerate()
            .map(|(i, admin)| Self::admin_item(admin, i == self.selected))
            .collect();
        frame.render_widget(List::new(items), body);
    }

    fn handle_event(&mut self, event: Event, _cx: &mut Context) -> Option<Action> {
        let count = self.directory.admins().len();
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                    self.selected = (self.selected + count - 1) % count;
                    None
                }
                KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                    self.selected = (self.selected + 1) % count;
                    None
                }
                KeyCode::Enter => self
                    .selected_admin()
                    .map(|admin| Action::Navigate(format!("/admins/{}", admin.id))),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
