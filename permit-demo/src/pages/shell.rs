//! Common page frame: title bar, bordered body, key hints.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::icons::Icon;

pub const ACCENT: Color = Color::Cyan;

/// Draw the frame into `area` and return the body rectangle inside it.
pub fn page_shell(frame: &mut Frame, area: Rect, title: &str, icon: Icon, hints: &[(&str, &str)]) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let title = Line::from(vec![
        Span::styled(format!(" {} ", icon.glyph()), Style::default().fg(icon.color())),
        Span::styled(title.to_string(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT));
    let body = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);

    let footer = Paragraph::new(hint_line(hints))
        .style(Style::default().bg(ACCENT).fg(Color::Black))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);

    body
}

fn hint_line(hints: &[(&str, &str)]) -> String {
    let hints: Vec<String> = hints.iter().map(|(key, what)| format!("{key} {what}")).collect();
    format!(" {} ", hints.join(" │ "))
}
